use dioxus::prelude::*;
use kirie_engine::{EditorSession, GestureController, Point, ResizeDirection, StencilShape};
use kirie_io::raster::{self, DecodedPhoto};
use kirie_io::{EditorControls, EditorStage, PhotoUpload, ShapePicker};

fn main() {
    dioxus::launch(app);
}

/// Root application component.
///
/// Owns the editing session and gesture controller via Dioxus signals
/// and wires together the upload, stage, shape picker, and control
/// bar components.
#[allow(clippy::too_many_lines)]
fn app() -> Element {
    // --- Application state ---
    let mut session = use_signal(EditorSession::new);
    let mut gestures = use_signal(GestureController::new);
    let mut photo = use_signal(|| Option::<DecodedPhoto>::None);
    let mut decoding = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let mut generation = use_signal(|| 0u64);

    // --- Photo upload handler ---
    // Decoding is synchronous, so spawn a task and yield once to the
    // browser event loop so the "Decoding..." state paints first.
    let on_upload = move |(bytes, _name): (Vec<u8>, String)| {
        // Increment generation so any in-flight decode from a prior
        // upload knows it is stale and should discard its result.
        generation += 1;
        let my_generation = *generation.peek();

        decoding.set(true);
        error.set(None);

        spawn(async move {
            gloo_timers::future::TimeoutFuture::new(0).await;

            let outcome = raster::decode_photo(&bytes);

            // A newer upload superseded this one; drop it silently.
            if *generation.peek() != my_generation {
                return;
            }

            match outcome {
                Ok(decoded) => {
                    if let Some(previous) = photo.take() {
                        raster::revoke_blob_url(&previous.blob_url);
                    }
                    gestures.write().cancel();
                    session.write().load_image(decoded.width, decoded.height);
                    photo.set(Some(decoded));
                    error.set(None);
                }
                Err(e) => {
                    error.set(Some(format!("{e}")));
                    // Keep the previous photo editable if one exists.
                }
            }

            decoding.set(false);
        });
    };

    // --- Gesture handlers ---
    // The Shift state rides along on every pointer event, so the drag
    // mode tracks the keyboard even without element focus.
    let on_pointer_down = move |(point, shift): (Point, bool)| {
        gestures.write().set_modifier(shift);
        gestures.write().pointer_down(&session.peek(), point);
    };

    let on_pointer_move = move |(point, shift): (Point, bool)| {
        gestures.write().set_modifier(shift);
        if gestures.peek().is_dragging() {
            gestures.write().pointer_move(&mut session.write(), point);
        }
    };

    let on_pointer_up = move |()| {
        gestures.write().pointer_up(&mut session.write());
    };

    // Leaving the canvas ends the gesture the same way a release does:
    // a mouseup outside the element would otherwise never arrive.
    let on_pointer_leave = move |()| {
        gestures.write().pointer_up(&mut session.write());
    };

    // --- Snapshot the state the view needs ---
    let state = session.read();
    let drag_mode = gestures.read().current_mode();
    let dragging = gestures.read().is_dragging();
    let photo_url = photo.read().as_ref().map(|p| p.blob_url.clone());

    // --- Layout ---
    rsx! {
        style { dangerous_inner_html: include_str!("../assets/app.css") }

        div { class: "app",
            header { class: "app-header",
                h1 { class: "title-brand", "kirie" }
                p { class: "app-tagline", "Frame photos behind shaped stencil cutouts" }
            }

            div { class: "app-body",
                // Left column: stage + control bar
                div { class: "editor-column",
                    if decoding() {
                        div { class: "stage-placeholder",
                            p { class: "pulse", "Decoding..." }
                        }
                    } else {
                        EditorStage {
                            photo_url: photo_url,
                            transform: state.transform().copied(),
                            stencil: *state.stencil(),
                            mode: drag_mode,
                            dragging: dragging,
                            on_pointer_down: on_pointer_down,
                            on_pointer_move: on_pointer_move,
                            on_pointer_up: on_pointer_up,
                            on_pointer_leave: on_pointer_leave,
                        }
                    }

                    EditorControls {
                        zoom_percent: state.zoom_percent(),
                        zoom: state.zoom(),
                        can_undo: state.can_undo(),
                        can_redo: state.can_redo(),
                        has_image: state.has_image(),
                        mode: drag_mode,
                        on_zoom_in: move |()| session.write().zoom_in(),
                        on_zoom_out: move |()| session.write().zoom_out(),
                        on_grow_stencil: move |()| {
                            session.write().resize_stencil_step(ResizeDirection::Grow);
                        },
                        on_shrink_stencil: move |()| {
                            session.write().resize_stencil_step(ResizeDirection::Shrink);
                        },
                        on_undo: move |()| session.write().undo(),
                        on_redo: move |()| session.write().redo(),
                        on_reset: move |()| session.write().reset_to_initial(),
                    }

                    if let Some(ref err) = error() {
                        div { class: "error-banner",
                            p { "{err}" }
                        }
                    }
                }

                // Right sidebar: shape picker + upload
                div { class: "side-panel",
                    h3 { class: "panel-heading", "Stencil shape" }
                    ShapePicker {
                        selected: state.stencil().shape,
                        on_select: move |shape: StencilShape| {
                            session.write().select_shape(shape);
                        },
                    }

                    h3 { class: "panel-heading", "Photo" }
                    PhotoUpload {
                        on_upload: on_upload,
                    }
                }
            }
        }
    }
}
