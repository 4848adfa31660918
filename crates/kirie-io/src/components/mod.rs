//! Dioxus UI components for kirie.
//!
//! Provides the photo upload drop zone, the editing stage (clipped
//! canvas with pointer handling), the zoom/resize/history control bar,
//! and the stencil shape picker.

mod controls;
mod shape_picker;
mod stage;
mod upload;

pub use controls::EditorControls;
pub use shape_picker::ShapePicker;
pub use stage::EditorStage;
pub use upload::PhotoUpload;
