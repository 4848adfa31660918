//! Shared geometry types and the editing contract constants.
//!
//! The constants in this module form the external contract of the
//! editor: zoom range and step sizes, stencil minimums, and the
//! default canvas/stencil geometry. UI crates read them so controls
//! and the engine cannot silently diverge.

use serde::{Deserialize, Serialize};

/// Lowest permitted absolute zoom (40%).
pub const ZOOM_MIN: f64 = 0.4;

/// Highest permitted absolute zoom (300%).
pub const ZOOM_MAX: f64 = 3.0;

/// Multiplier applied to the current zoom per zoom-in click.
pub const ZOOM_IN_STEP: f64 = 1.05;

/// Multiplier applied to the current zoom per zoom-out click.
pub const ZOOM_OUT_STEP: f64 = 0.95;

/// Canvas units added to (or removed from) each stencil dimension per
/// resize step.
pub const STENCIL_RESIZE_STEP: f64 = 20.0;

/// Smallest permitted stencil width or height.
pub const MIN_STENCIL_SIZE: f64 = 50.0;

/// Editing canvas width in canvas units.
pub const CANVAS_WIDTH: f64 = 1000.0;

/// Editing canvas height in canvas units.
pub const CANVAS_HEIGHT: f64 = 800.0;

/// Default stencil width.
pub const DEFAULT_STENCIL_WIDTH: f64 = 600.0;

/// Default stencil height.
pub const DEFAULT_STENCIL_HEIGHT: f64 = 400.0;

/// Default stencil left edge.
pub const DEFAULT_STENCIL_X: f64 = 200.0;

/// Default stencil top edge.
pub const DEFAULT_STENCIL_Y: f64 = 200.0;

/// Corner radius of the default rectangle stencil.
pub const DEFAULT_CORNER_RADIUS: f64 = 20.0;

/// Fraction of raw pointer movement applied while dragging the image.
/// Slows the drag for finer placement control.
pub const DRAG_MOVEMENT_FACTOR: f64 = 0.5;

/// A 2D point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (canvas units from left edge).
    pub x: f64,
    /// Vertical position (canvas units from top edge).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise offset by `(dx, dy)`.
    #[must_use]
    pub const fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// An axis-aligned rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width (non-negative).
    pub width: f64,
    /// Height (non-negative).
    pub height: f64,
}

impl Bounds {
    /// Create new bounds.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Geometric center.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether `point` lies inside these bounds (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Whether these bounds fully contain `other` on all four edges.
    #[must_use]
    pub fn contains_bounds(&self, other: &Self) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && self.right() >= other.right()
            && self.bottom() >= other.bottom()
    }
}

/// Inclusive zoom limits for [`apply_zoom`](crate::transform::apply_zoom).
///
/// A value type so call sites can narrow or widen the range; the
/// default matches the editor contract (`[ZOOM_MIN, ZOOM_MAX]`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomBounds {
    /// Lowest permitted absolute zoom.
    pub min: f64,
    /// Highest permitted absolute zoom.
    pub max: f64,
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self {
            min: ZOOM_MIN,
            max: ZOOM_MAX,
        }
    }
}

impl ZoomBounds {
    /// Clamp `scale` into `[min, max]`.
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }
}
