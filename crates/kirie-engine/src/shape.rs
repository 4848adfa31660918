//! Stencil shape variants and clip region derivation.
//!
//! Each [`StencilShape`] is an immutable tag carrying its own rendering
//! parameters (corner radius for rectangles, nothing for triangles and
//! circles). The single capability every variant provides is producing
//! an outline for a given bounding rectangle; everything else in the
//! engine works on the bounds alone.

use serde::{Deserialize, Serialize};

use crate::types::{Bounds, DEFAULT_CORNER_RADIUS, Point};

/// The shape of the stencil frame.
///
/// A closed enum matched exhaustively, so adding a shape is a
/// compile-time-checked extension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StencilShape {
    /// Rounded rectangle.
    Rectangle {
        /// Corner radius in canvas units; clamped to half the shorter
        /// stencil dimension when the outline is produced.
        corner_radius: f64,
    },
    /// Isoceles triangle: apex at the top-center of the bounds, base
    /// along the bottom edge.
    Triangle,
    /// Circle (rendered as an ellipse inscribed in the bounds; the
    /// bounds stay square under uniform resize steps).
    Circle,
}

impl Default for StencilShape {
    fn default() -> Self {
        Self::Rectangle {
            corner_radius: DEFAULT_CORNER_RADIUS,
        }
    }
}

impl StencilShape {
    /// All shapes at their default parameters, in picker order.
    pub const ALL: [Self; 3] = [
        Self::Rectangle {
            corner_radius: DEFAULT_CORNER_RADIUS,
        },
        Self::Triangle,
        Self::Circle,
    ];

    /// Display label for the shape picker.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rectangle { .. } => "Rectangle",
            Self::Triangle => "Triangle",
            Self::Circle => "Circle",
        }
    }

    /// Produce the shape's outline for the given bounds.
    ///
    /// Pure and deterministic; called whenever the stencil moves or
    /// resizes.
    #[must_use]
    pub fn outline(self, bounds: Bounds) -> ClipOutline {
        match self {
            Self::Rectangle { corner_radius } => {
                // A radius beyond half the shorter side would self-intersect.
                let max_radius = bounds.width.min(bounds.height) / 2.0;
                ClipOutline::RoundedRect {
                    bounds,
                    corner_radius: corner_radius.clamp(0.0, max_radius),
                }
            }
            Self::Triangle => ClipOutline::Polygon {
                points: vec![
                    Point::new(bounds.x + bounds.width / 2.0, bounds.y),
                    Point::new(bounds.x, bounds.bottom()),
                    Point::new(bounds.right(), bounds.bottom()),
                ],
            },
            Self::Circle => ClipOutline::Ellipse {
                center: bounds.center(),
                radius_x: bounds.width / 2.0,
                radius_y: bounds.height / 2.0,
            },
        }
    }
}

/// Concrete outline geometry for one shape at one set of bounds.
///
/// Renderer-agnostic: the UI layer maps each variant onto its own
/// drawing primitive (SVG `rect`/`polygon`/`ellipse`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outline", rename_all = "snake_case")]
pub enum ClipOutline {
    /// Axis-aligned rectangle with rounded corners.
    RoundedRect {
        /// The rectangle itself.
        bounds: Bounds,
        /// Corner radius, already clamped to a drawable value.
        corner_radius: f64,
    },
    /// Closed polygon through the listed vertices.
    Polygon {
        /// Vertices in drawing order.
        points: Vec<Point>,
    },
    /// Axis-aligned ellipse.
    Ellipse {
        /// Ellipse center.
        center: Point,
        /// Semi-axis along x.
        radius_x: f64,
        /// Semi-axis along y.
        radius_y: f64,
    },
}

/// The shape-matched mask applied to the image so only the
/// stencil-covered portion is visible.
///
/// Derived, never stored: recomputed from the stencil whenever its
/// geometry changes, and always co-located with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipRegion {
    /// Bounding geometry, identical to the stencil's.
    pub bounds: Bounds,
    /// The shape's own outline within those bounds.
    pub outline: ClipOutline,
}

impl ClipRegion {
    /// Derive the clip region for `shape` at `bounds`.
    #[must_use]
    pub fn derive(shape: StencilShape, bounds: Bounds) -> Self {
        Self {
            bounds,
            outline: shape.outline(bounds),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn all_contains_every_variant() {
        // If you add a variant to StencilShape, update ALL and this count.
        assert_eq!(StencilShape::ALL.len(), 3);
        let labels: Vec<_> = StencilShape::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, ["Rectangle", "Triangle", "Circle"]);
    }

    #[test]
    fn rectangle_outline_keeps_bounds_and_radius() {
        let shape = StencilShape::default();
        let bounds = Bounds::new(200.0, 200.0, 600.0, 400.0);
        match shape.outline(bounds) {
            ClipOutline::RoundedRect {
                bounds: b,
                corner_radius,
            } => {
                assert_eq!(b, bounds);
                assert!((corner_radius - 20.0).abs() < f64::EPSILON);
            }
            other => panic!("expected RoundedRect, got {other:?}"),
        }
    }

    #[test]
    fn rectangle_radius_clamped_to_half_min_dimension() {
        let shape = StencilShape::Rectangle {
            corner_radius: 500.0,
        };
        let bounds = Bounds::new(0.0, 0.0, 100.0, 60.0);
        match shape.outline(bounds) {
            ClipOutline::RoundedRect { corner_radius, .. } => {
                assert!((corner_radius - 30.0).abs() < f64::EPSILON);
            }
            other => panic!("expected RoundedRect, got {other:?}"),
        }
    }

    #[test]
    fn triangle_outline_spans_bounds() {
        let bounds = Bounds::new(200.0, 200.0, 600.0, 400.0);
        match StencilShape::Triangle.outline(bounds) {
            ClipOutline::Polygon { points } => {
                assert_eq!(points.len(), 3);
                assert_eq!(points[0], Point::new(500.0, 200.0)); // apex
                assert_eq!(points[1], Point::new(200.0, 600.0)); // base left
                assert_eq!(points[2], Point::new(800.0, 600.0)); // base right
            }
            other => panic!("expected Polygon, got {other:?}"),
        }
    }

    #[test]
    fn circle_outline_inscribed_in_bounds() {
        let bounds = Bounds::new(100.0, 100.0, 250.0, 250.0);
        match StencilShape::Circle.outline(bounds) {
            ClipOutline::Ellipse {
                center,
                radius_x,
                radius_y,
            } => {
                assert_eq!(center, Point::new(225.0, 225.0));
                assert!((radius_x - 125.0).abs() < f64::EPSILON);
                assert!((radius_y - 125.0).abs() < f64::EPSILON);
            }
            other => panic!("expected Ellipse, got {other:?}"),
        }
    }

    #[test]
    fn clip_region_bounds_match_stencil_bounds() {
        let bounds = Bounds::new(10.0, 20.0, 300.0, 200.0);
        for shape in StencilShape::ALL {
            let clip = ClipRegion::derive(shape, bounds);
            assert_eq!(clip.bounds, bounds, "clip bounds drifted for {shape:?}");
        }
    }

    #[test]
    fn shape_serde_round_trip() {
        for shape in StencilShape::ALL {
            let json = serde_json::to_string(&shape).unwrap();
            let back: StencilShape = serde_json::from_str(&json).unwrap();
            assert_eq!(shape, back);
        }
    }
}
