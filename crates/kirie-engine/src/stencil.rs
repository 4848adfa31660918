//! The stencil frame: a shaped, movable, resizable crop window.

use serde::{Deserialize, Serialize};

use crate::shape::{ClipRegion, StencilShape};
use crate::types::{
    Bounds, DEFAULT_STENCIL_HEIGHT, DEFAULT_STENCIL_WIDTH, DEFAULT_STENCIL_X, DEFAULT_STENCIL_Y,
    MIN_STENCIL_SIZE, Point,
};

/// The user-manipulable frame defining the visible crop window.
///
/// Owned exclusively by the editing session; mutated only through the
/// transform operations in [`crate::transform`]. Both dimensions are
/// kept at or above [`MIN_STENCIL_SIZE`] by every constructor and
/// operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StencilRegion {
    /// Shape of the frame and its per-shape rendering parameters.
    pub shape: StencilShape,
    /// Left edge in canvas units.
    pub x: f64,
    /// Top edge in canvas units.
    pub y: f64,
    /// Width in canvas units (`>= MIN_STENCIL_SIZE`).
    pub width: f64,
    /// Height in canvas units (`>= MIN_STENCIL_SIZE`).
    pub height: f64,
}

impl Default for StencilRegion {
    /// The default frame: a rounded rectangle, `600x400` at `(200, 200)`.
    fn default() -> Self {
        Self::with_shape(StencilShape::default())
    }
}

impl StencilRegion {
    /// Create a stencil, clamping both dimensions to the minimum.
    #[must_use]
    pub fn new(shape: StencilShape, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            shape,
            x,
            y,
            width: width.max(MIN_STENCIL_SIZE),
            height: height.max(MIN_STENCIL_SIZE),
        }
    }

    /// Create a stencil of the given shape at the default geometry.
    #[must_use]
    pub fn with_shape(shape: StencilShape) -> Self {
        Self::new(
            shape,
            DEFAULT_STENCIL_X,
            DEFAULT_STENCIL_Y,
            DEFAULT_STENCIL_WIDTH,
            DEFAULT_STENCIL_HEIGHT,
        )
    }

    /// Bounding rectangle.
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    /// Top-left corner.
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Geometric center.
    #[must_use]
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Derive the clip region matching this stencil's current geometry.
    #[must_use]
    pub fn clip_region(&self) -> ClipRegion {
        ClipRegion::derive(self.shape, self.bounds())
    }
}
