//! kirie-io: Browser I/O and Dioxus component library.
//!
//! Handles photo decoding, Blob URL management, and provides the UI
//! components for the kirie web application. All editing semantics
//! live in `kirie-engine`; this crate only renders state and forwards
//! events.

pub mod components;
pub mod raster;

pub use components::{EditorControls, EditorStage, PhotoUpload, ShapePicker};
pub use raster::{DecodedPhoto, RasterError};
