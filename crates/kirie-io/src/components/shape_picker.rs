//! Stencil shape picker.

use dioxus::prelude::*;
use kirie_engine::StencilShape;
use kirie_engine::shape::ClipOutline;
use kirie_engine::types::Bounds;

/// Props for the [`ShapePicker`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ShapePickerProps {
    /// The currently active shape.
    selected: StencilShape,
    /// Fired with the chosen shape.
    on_select: EventHandler<StencilShape>,
}

/// A row of buttons, one per stencil shape, with a small outline icon.
#[component]
pub fn ShapePicker(props: ShapePickerProps) -> Element {
    rsx! {
        div { class: "shape-picker",
            for shape in StencilShape::ALL {
                {shape_button(shape, shape == props.selected, props.on_select)}
            }
        }
    }
}

fn shape_button(
    shape: StencilShape,
    selected: bool,
    on_select: EventHandler<StencilShape>,
) -> Element {
    let class = if selected {
        "shape-button shape-button-selected"
    } else {
        "shape-button"
    };

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| on_select.call(shape),
            {shape_icon(shape)}
            span { "{shape.label()}" }
        }
    }
}

/// Miniature outline of the shape, drawn in a 48x36 box.
fn shape_icon(shape: StencilShape) -> Element {
    let bounds = Bounds {
        x: 4.0,
        y: 4.0,
        width: 40.0,
        height: 28.0,
    };
    match shape.outline(bounds) {
        ClipOutline::RoundedRect {
            bounds,
            corner_radius,
        } => rsx! {
            svg { view_box: "0 0 48 36", width: "48", height: "36",
                rect {
                    class: "shape-icon",
                    x: "{bounds.x}",
                    y: "{bounds.y}",
                    width: "{bounds.width}",
                    height: "{bounds.height}",
                    rx: "{corner_radius}",
                }
            }
        },
        ClipOutline::Polygon { points } => {
            let attr = points
                .iter()
                .map(|p| format!("{},{}", p.x, p.y))
                .collect::<Vec<_>>()
                .join(" ");
            rsx! {
                svg { view_box: "0 0 48 36", width: "48", height: "36",
                    polygon { class: "shape-icon", points: "{attr}" }
                }
            }
        }
        ClipOutline::Ellipse {
            center,
            radius_x,
            radius_y,
        } => rsx! {
            svg { view_box: "0 0 48 36", width: "48", height: "36",
                ellipse {
                    class: "shape-icon",
                    cx: "{center.x}",
                    cy: "{center.y}",
                    rx: "{radius_x}",
                    ry: "{radius_y}",
                }
            }
        },
    }
}
