//! kirie-engine: Pure stencil-editing engine (sans-IO).
//!
//! Models a fixed-size canvas on which a photo sits behind a movable,
//! resizable stencil cutout. The engine owns:
//! fit-to-cover placement -> clamped panning -> absolute zoom ->
//! stencil resize with proportional image rescale -> rigid
//! stencil-plus-image moves -> snapshot undo/redo/reset.
//!
//! This crate has **no I/O dependencies** -- it operates on plain
//! numeric state and returns structured data. All browser interaction
//! (decoding, rendering, pointer events) lives in `kirie-io`.

pub mod gesture;
pub mod history;
pub mod session;
pub mod shape;
pub mod stencil;
pub mod transform;
pub mod types;

pub use gesture::{DragMode, GestureController, PointerTarget, ResizeCorner};
pub use history::{HistoryState, Snapshot};
pub use session::{EditorSession, ResizeDirection};
pub use shape::{ClipOutline, ClipRegion, StencilShape};
pub use stencil::StencilRegion;
pub use transform::ImageTransform;
pub use types::{Bounds, Point, ZoomBounds};
