//! The editing stage: a fixed-size SVG canvas showing the photo
//! clipped to the stencil, with pointer events forwarded to the host.
//!
//! The component is purely presentational. It renders whatever state
//! it is handed and reports pointer positions in canvas coordinates;
//! the gesture controller in the host decides what those mean.

use std::fmt::Write;

use dioxus::prelude::*;
use kirie_engine::shape::ClipOutline;
use kirie_engine::types::{CANVAS_HEIGHT, CANVAS_WIDTH};
use kirie_engine::{DragMode, ImageTransform, Point, StencilRegion};

/// Props for the [`EditorStage`] component.
#[derive(Props, Clone, PartialEq)]
pub struct EditorStageProps {
    /// Blob URL of the loaded photo, if any.
    photo_url: Option<String>,
    /// Current image transform, present once a photo is loaded.
    transform: Option<ImageTransform>,
    /// Current stencil.
    stencil: StencilRegion,
    /// Drag mode the next press would start in (drives the cursor).
    mode: DragMode,
    /// Whether a drag is in flight.
    dragging: bool,
    /// Pointer pressed: canvas coordinates plus Shift state.
    on_pointer_down: EventHandler<(Point, bool)>,
    /// Pointer moved: canvas coordinates plus Shift state.
    on_pointer_move: EventHandler<(Point, bool)>,
    /// Pointer released inside the canvas.
    on_pointer_up: EventHandler<()>,
    /// Pointer left the canvas mid-gesture.
    on_pointer_leave: EventHandler<()>,
}

/// The fixed-size editing canvas.
///
/// Renders the stencil cutout as an SVG clip path over the photo, plus
/// a dashed stencil outline so the cutout stays visible while empty or
/// while being moved.
#[component]
pub fn EditorStage(props: EditorStageProps) -> Element {
    let clip = props.stencil.clip_region();
    let cursor = match (props.mode, props.dragging) {
        (DragMode::Stencil, _) => "move",
        (DragMode::Image, true) => "grabbing",
        (DragMode::Image, false) => "grab",
    };

    let on_down = props.on_pointer_down;
    let on_move = props.on_pointer_move;
    let on_up = props.on_pointer_up;
    let on_leave = props.on_pointer_leave;

    rsx! {
        svg {
            xmlns: "http://www.w3.org/2000/svg",
            view_box: "0 0 {CANVAS_WIDTH} {CANVAS_HEIGHT}",
            width: "{CANVAS_WIDTH}",
            height: "{CANVAS_HEIGHT}",
            class: "editor-stage",
            style: "cursor: {cursor};",
            onmousedown: move |evt| {
                let p = evt.element_coordinates();
                let shift = evt.modifiers().shift();
                on_down.call((Point::new(p.x, p.y), shift));
            },
            onmousemove: move |evt| {
                let p = evt.element_coordinates();
                let shift = evt.modifiers().shift();
                on_move.call((Point::new(p.x, p.y), shift));
            },
            onmouseup: move |_| on_up.call(()),
            onmouseleave: move |_| on_leave.call(()),

            defs {
                clipPath { id: "stencil-clip",
                    {outline_element(&clip.outline, "", "none")}
                }
            }

            if let (Some(url), Some(transform)) = (props.photo_url.as_ref(), props.transform) {
                g { "clip-path": "url(#stencil-clip)",
                    image {
                        href: "{url}",
                        x: "{transform.x}",
                        y: "{transform.y}",
                        width: "{transform.scaled_width()}",
                        height: "{transform.scaled_height()}",
                        "preserveAspectRatio": "none",
                    }
                }
            }

            {outline_element(&clip.outline, "stencil-outline", "none")}
        }
    }
}

/// Render a clip outline as the matching SVG shape element.
fn outline_element(outline: &ClipOutline, class: &str, fill: &str) -> Element {
    let class = class.to_string();
    let fill = fill.to_string();
    match outline {
        ClipOutline::RoundedRect {
            bounds,
            corner_radius,
        } => rsx! {
            rect {
                class: "{class}",
                fill: "{fill}",
                x: "{bounds.x}",
                y: "{bounds.y}",
                width: "{bounds.width}",
                height: "{bounds.height}",
                rx: "{corner_radius}",
            }
        },
        ClipOutline::Polygon { points } => {
            let mut attr = String::new();
            for p in points {
                let _ = write!(attr, "{},{} ", p.x, p.y);
            }
            rsx! {
                polygon {
                    class: "{class}",
                    fill: "{fill}",
                    points: "{attr}",
                }
            }
        }
        ClipOutline::Ellipse {
            center,
            radius_x,
            radius_y,
        } => rsx! {
            ellipse {
                class: "{class}",
                fill: "{fill}",
                cx: "{center.x}",
                cy: "{center.y}",
                rx: "{radius_x}",
                ry: "{radius_y}",
            }
        },
    }
}
