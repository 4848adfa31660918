//! Photo upload component with drag-and-drop and file picker.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;

/// Allowed file extensions for photo uploads. The picker's `accept`
/// attribute and the formats label are derived from this list.
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "webp"];

/// Check whether a filename has an allowed image extension.
fn has_allowed_extension(name: &str) -> bool {
    name.rsplit_once('.').is_some_and(|(_, ext)| {
        ALLOWED_EXTENSIONS
            .iter()
            .any(|a| a.eq_ignore_ascii_case(ext))
    })
}

/// `accept` attribute value for the file input: `.png,.jpg,...`.
fn accept_attr() -> String {
    let dotted: Vec<String> = ALLOWED_EXTENSIONS.iter().map(|e| format!(".{e}")).collect();
    dotted.join(",")
}

/// `123 B` / `4.2 KB` / `1.7 MB` for the loaded-file line.
fn format_size(bytes: usize) -> String {
    #[allow(clippy::cast_precision_loss)]
    let bytes = bytes as f64;
    if bytes < 1024.0 {
        format!("{bytes} B")
    } else if bytes < 1024.0 * 1024.0 {
        format!("{:.1} KB", bytes / 1024.0)
    } else {
        format!("{:.1} MB", bytes / (1024.0 * 1024.0))
    }
}

/// Props for the [`PhotoUpload`] component.
#[derive(Props, Clone, PartialEq)]
pub struct PhotoUploadProps {
    /// Called with the raw file bytes and filename after a successful upload.
    on_upload: EventHandler<(Vec<u8>, String)>,
}

/// A drag-and-drop zone with a file picker button.
///
/// Accepts PNG, JPEG, BMP, and WebP photos. When a file is selected
/// (via the picker or drag-and-drop), reads the bytes and fires
/// `on_upload` with `(bytes, filename)`. A rejected or unreadable file
/// clears the loaded-file line so the status never lies about what the
/// editor is showing.
#[component]
pub fn PhotoUpload(props: PhotoUploadProps) -> Element {
    let mut dragging = use_signal(|| false);
    let mut loaded = use_signal(|| Option::<String>::None);
    let mut error = use_signal(|| Option::<String>::None);

    // Shared by the file-picker and drag-and-drop paths so the
    // validate/read/forward logic lives in one place.
    let process_files = move |files: Vec<FileData>| async move {
        let Some(file) = files.into_iter().next() else {
            return;
        };
        let name = file.name();
        if !has_allowed_extension(&name) {
            loaded.set(None);
            error.set(Some(format!("Unsupported file type: {name}")));
            return;
        }
        match file.read_bytes().await {
            Ok(bytes) => {
                let bytes = bytes.to_vec();
                loaded.set(Some(format!("{name} ({})", format_size(bytes.len()))));
                error.set(None);
                props.on_upload.call((bytes, name));
            }
            Err(e) => {
                loaded.set(None);
                error.set(Some(format!("Failed to read {name}: {e}")));
            }
        }
    };

    let handle_files = move |evt: FormEvent| async move {
        process_files(evt.files()).await;
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        dragging.set(false);
        process_files(evt.files()).await;
    };

    let zone_class = if dragging() {
        "upload-zone upload-zone-active"
    } else {
        "upload-zone"
    };
    let formats = ALLOWED_EXTENSIONS.join(", ").to_uppercase();

    rsx! {
        div {
            class: "{zone_class}",
            ondragover: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| {
                dragging.set(false);
            },
            ondrop: handle_drop,

            if let Some(ref status) = loaded() {
                p { class: "upload-loaded", "Loaded: {status}" }
            }

            if let Some(ref err) = error() {
                p { class: "upload-error", "{err}" }
            }

            p { class: "upload-hint", "Drop a photo here or" }

            label { class: "upload-button",
                input {
                    r#type: "file",
                    accept: accept_attr(),
                    class: "hidden",
                    onchange: handle_files,
                }
                "Choose File"
            }

            p { class: "upload-formats", "{formats}" }
        }
    }
}
