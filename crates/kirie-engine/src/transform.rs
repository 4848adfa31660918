//! Constrained image transform math.
//!
//! All operations here preserve the cover invariant: the scaled
//! image's bounding box always fully contains the stencil's bounding
//! box, so no uncovered stencil area can ever be shown. Inputs that
//! would violate it are normalized, never rejected.

use serde::{Deserialize, Serialize};

use crate::stencil::StencilRegion;
use crate::types::{Bounds, Point, ZoomBounds};

/// Position and scale of the loaded image on the canvas.
///
/// `scale` is absolute: the rendered size is `source_width * scale`,
/// never a multiple of the previous rendered size. This keeps repeated
/// identical zoom requests idempotent instead of compounding floating
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageTransform {
    /// Left edge of the rendered image in canvas units.
    pub x: f64,
    /// Top edge of the rendered image in canvas units.
    pub y: f64,
    /// Absolute scale applied to the source dimensions.
    pub scale: f64,
    /// Source image width in pixels (at least 1).
    pub source_width: f64,
    /// Source image height in pixels (at least 1).
    pub source_height: f64,
}

impl ImageTransform {
    /// Rendered width (`source_width * scale`).
    #[must_use]
    pub fn scaled_width(&self) -> f64 {
        self.source_width * self.scale
    }

    /// Rendered height (`source_height * scale`).
    #[must_use]
    pub fn scaled_height(&self) -> f64 {
        self.source_height * self.scale
    }

    /// Top-left corner of the rendered image.
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Bounding box of the rendered image.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.scaled_width(), self.scaled_height())
    }
}

/// The minimum scale at which the scaled image still fully contains
/// the stencil's bounding box (cover, never contain).
///
/// Zero or negative source dimensions are treated as 1 pixel so the
/// result stays finite.
#[must_use]
pub fn min_cover_scale(stencil: &StencilRegion, source_width: f64, source_height: f64) -> f64 {
    let sw = source_width.max(1.0);
    let sh = source_height.max(1.0);
    (stencil.width / sw).max(stencil.height / sh)
}

/// Scale the image to cover the stencil and center it over the
/// stencil's center.
///
/// Post-condition: the scaled image's bounding box contains the
/// stencil's bounding box on all four edges.
#[must_use]
pub fn fit_to_stencil(
    stencil: &StencilRegion,
    source_width: f64,
    source_height: f64,
) -> ImageTransform {
    let source_width = source_width.max(1.0);
    let source_height = source_height.max(1.0);
    let scale = min_cover_scale(stencil, source_width, source_height);
    let center = stencil.center();
    ImageTransform {
        x: center.x - (source_width * scale) / 2.0,
        y: center.y - (source_height * scale) / 2.0,
        scale,
        source_width,
        source_height,
    }
}

/// Clamp a candidate image position so the scaled image keeps covering
/// the stencil.
///
/// The valid range per axis is `[stencil edge + stencil extent -
/// scaled extent, stencil edge]`. If the scaled image is smaller than
/// the stencil on an axis (cannot happen while the cover invariant
/// holds, but tolerated), the range degenerates to the single position
/// aligning both left/top edges.
///
/// Returns the clamped position; never mutates anything.
#[must_use]
pub fn clamp_position(
    stencil: &StencilRegion,
    transform: &ImageTransform,
    candidate: Point,
) -> Point {
    let scaled_width = transform.scaled_width();
    let scaled_height = transform.scaled_height();

    let max_x = stencil.x;
    let min_x = (stencil.x + stencil.width - scaled_width).min(max_x);
    let max_y = stencil.y;
    let min_y = (stencil.y + stencil.height - scaled_height).min(max_y);

    Point::new(candidate.x.clamp(min_x, max_x), candidate.y.clamp(min_y, max_y))
}

/// Apply an absolute zoom request.
///
/// 1. Clamps `requested_scale` into `bounds`.
/// 2. Overrides to the cover scale if the clamped value would leave
///    the stencil uncovered (only possible when `bounds` is
///    inconsistent with the stencil size).
/// 3. Re-centers the image per axis where the new rendered extent no
///    longer contains the stencil; zoom changes the valid position
///    range itself, so re-centering beats clamping here.
#[must_use]
pub fn apply_zoom(
    stencil: &StencilRegion,
    transform: &ImageTransform,
    requested_scale: f64,
    bounds: ZoomBounds,
) -> ImageTransform {
    let mut scale = bounds.clamp(requested_scale);

    let cover = min_cover_scale(stencil, transform.source_width, transform.source_height);
    if scale < cover {
        scale = cover;
    }

    let mut out = ImageTransform { scale, ..*transform };
    let scaled_width = out.scaled_width();
    let scaled_height = out.scaled_height();

    if out.x > stencil.x || out.x + scaled_width < stencil.x + stencil.width {
        out.x = stencil.x + (stencil.width - scaled_width) / 2.0;
    }
    if out.y > stencil.y || out.y + scaled_height < stencil.y + stencil.height {
        out.y = stencil.y + (stencil.height - scaled_height) / 2.0;
    }

    out
}

/// Resize the stencil around its own center and rescale the image
/// proportionally.
///
/// New dimensions are `max(MIN_STENCIL_SIZE, old + delta)` and the
/// stencil is repositioned symmetrically (`x -= applied_delta / 2`),
/// so its center is unchanged. The image scale is multiplied by the
/// width ratio `new_width / old_width` — relative, unlike
/// [`apply_zoom`]'s absolute contract, because this operation means
/// "keep the same visual crop, just more/less of it". The rescale is
/// exactly multiplicative so that a grow step followed by an equal
/// shrink step restores the original scale; on a non-square stencil
/// the height axis can therefore transiently under-cover, which the
/// degenerate branch of [`clamp_position`] absorbs by aligning edges.
/// The image is rescaled about the stencil center so the point under
/// the center stays put, then the position is clamped.
#[must_use]
pub fn resize_stencil(
    stencil: &StencilRegion,
    transform: &ImageTransform,
    delta_width: f64,
    delta_height: f64,
) -> (StencilRegion, ImageTransform) {
    let new_width = (stencil.width + delta_width).max(crate::types::MIN_STENCIL_SIZE);
    let new_height = (stencil.height + delta_height).max(crate::types::MIN_STENCIL_SIZE);
    let applied_dw = new_width - stencil.width;
    let applied_dh = new_height - stencil.height;

    let new_stencil = StencilRegion {
        x: stencil.x - applied_dw / 2.0,
        y: stencil.y - applied_dh / 2.0,
        width: new_width,
        height: new_height,
        shape: stencil.shape,
    };

    // Symmetric resize keeps the center fixed; scale the image about it.
    let center = stencil.center();
    let factor = new_width / stencil.width;
    let mut out = ImageTransform {
        x: center.x - (center.x - transform.x) * factor,
        y: center.y - (center.y - transform.y) * factor,
        scale: transform.scale * factor,
        ..*transform
    };
    let clamped = clamp_position(&new_stencil, &out, out.position());
    out.x = clamped.x;
    out.y = clamped.y;

    (new_stencil, out)
}

/// Translate the stencil to `new_position`, carrying the image with it.
///
/// The stencil is a window and the image is the content behind it:
/// moving the window must not re-crop the content, so both translate
/// by the same delta.
#[must_use]
pub fn move_stencil(
    stencil: &StencilRegion,
    transform: &ImageTransform,
    new_position: Point,
) -> (StencilRegion, ImageTransform) {
    let dx = new_position.x - stencil.x;
    let dy = new_position.y - stencil.y;
    let new_stencil = StencilRegion {
        x: new_position.x,
        y: new_position.y,
        ..*stencil
    };
    let new_transform = ImageTransform {
        x: transform.x + dx,
        y: transform.y + dy,
        ..*transform
    };
    (new_stencil, new_transform)
}
