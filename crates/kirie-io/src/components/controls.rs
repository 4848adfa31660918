//! Editing control bar: zoom, stencil resize, and history buttons.
//!
//! Purely presentational; every button forwards a unit event and the
//! host decides what happens. Buttons whose operation would be a no-op
//! are rendered disabled so the UI reflects the engine's guards.

use dioxus::prelude::*;
use kirie_engine::DragMode;
use kirie_engine::types::{ZOOM_MAX, ZOOM_MIN};

/// Props for the [`EditorControls`] component.
#[derive(Props, Clone, PartialEq)]
pub struct EditorControlsProps {
    /// Current zoom as a whole percentage.
    zoom_percent: u32,
    /// Current absolute zoom, for bound checks.
    zoom: f64,
    /// Whether an undo step is available.
    can_undo: bool,
    /// Whether a redo step is available.
    can_redo: bool,
    /// Whether a photo is loaded (gates everything).
    has_image: bool,
    /// Drag mode the next press would start in.
    mode: DragMode,
    on_zoom_in: EventHandler<()>,
    on_zoom_out: EventHandler<()>,
    on_grow_stencil: EventHandler<()>,
    on_shrink_stencil: EventHandler<()>,
    on_undo: EventHandler<()>,
    on_redo: EventHandler<()>,
    on_reset: EventHandler<()>,
}

/// The zoom / resize / history control bar.
#[component]
pub fn EditorControls(props: EditorControlsProps) -> Element {
    let has_image = props.has_image;
    // The engine clamps zoom to the configured range, so clicking at a
    // bound would change nothing; disable the button instead.
    let at_max = props.zoom >= ZOOM_MAX - 1e-9;
    let at_min = props.zoom <= ZOOM_MIN + 1e-9;
    let mode_label = match props.mode {
        DragMode::Image => "Drag: photo (hold Shift for stencil)",
        DragMode::Stencil => "Drag: stencil",
    };

    rsx! {
        div { class: "controls",
            div { class: "controls-group",
                {control_button("Zoom -", has_image && !at_min, props.on_zoom_out)}
                span { class: "zoom-readout", "{props.zoom_percent}%" }
                {control_button("Zoom +", has_image && !at_max, props.on_zoom_in)}
            }
            div { class: "controls-group",
                {control_button("Stencil -", has_image, props.on_shrink_stencil)}
                {control_button("Stencil +", has_image, props.on_grow_stencil)}
            }
            div { class: "controls-group",
                {control_button("Undo", props.can_undo, props.on_undo)}
                {control_button("Redo", props.can_redo, props.on_redo)}
                {control_button("Reset", has_image, props.on_reset)}
            }
            span { class: "mode-indicator", "{mode_label}" }
        }
    }
}

/// Render one control-bar button.
fn control_button(label: &str, enabled: bool, on_click: EventHandler<()>) -> Element {
    let label = label.to_string();
    rsx! {
        button {
            class: "control-button",
            disabled: !enabled,
            onclick: move |_| on_click.call(()),
            "{label}"
        }
    }
}
