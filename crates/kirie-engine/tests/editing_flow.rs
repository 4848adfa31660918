//! Integration test: drive a full editing workflow through the session and gesture layers.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use kirie_engine::{
    DragMode, EditorSession, GestureController, Point, ResizeDirection, StencilShape,
};

#[test]
fn full_editing_workflow_round_trips_through_history() {
    let mut session = EditorSession::new();
    let mut gestures = GestureController::new();

    // Load a wide photo: cover fit leaves it centered on the stencil.
    session.load_image(1600, 800);
    let initial = session.snapshot().expect("image loaded");
    assert_eq!(session.zoom_percent(), 50);
    assert!(!session.can_undo());

    // Zoom in twice, resize the stencil once.
    session.zoom_in();
    session.zoom_in();
    session.resize_stencil_step(ResizeDirection::Grow);
    assert_eq!(session.history_depths(), (3, 0));

    // Drag the image under the stencil: exactly one more save point.
    let grab = session.stencil().center();
    assert!(gestures.pointer_down(&session, grab));
    gestures.pointer_move(&mut session, grab.offset(-120.0, -40.0));
    assert!(gestures.pointer_up(&mut session));
    assert_eq!(session.history_depths(), (4, 0));

    // Shift-drag moves the stencil and carries the image rigidly.
    let image_before = session.transform().copied().unwrap();
    let stencil_before = *session.stencil();
    gestures.set_modifier(true);
    assert_eq!(gestures.current_mode(), DragMode::Stencil);
    let grab = session.stencil().center();
    assert!(gestures.pointer_down(&session, grab));
    gestures.pointer_move(&mut session, grab.offset(35.0, 25.0));
    assert!(gestures.pointer_up(&mut session));
    gestures.set_modifier(false);
    let image_after = session.transform().copied().unwrap();
    assert!((session.stencil().x - (stencil_before.x + 35.0)).abs() < 1e-9);
    assert!((image_after.x - (image_before.x + 35.0)).abs() < 1e-9);
    assert!((image_after.y - (image_before.y + 25.0)).abs() < 1e-9);
    assert_eq!(session.history_depths(), (5, 0));

    // Walk the whole history back and forward again.
    let edited = session.snapshot().unwrap();
    for _ in 0..5 {
        session.undo();
    }
    assert_eq!(session.snapshot(), Some(initial));
    assert!(!session.can_undo());
    for _ in 0..5 {
        session.redo();
    }
    assert_eq!(session.snapshot(), Some(edited));
    assert!(!session.can_redo());

    // Reset jumps home in one step and is itself undoable.
    session.reset_to_initial();
    assert_eq!(session.snapshot(), Some(initial));
    session.undo();
    assert_eq!(session.snapshot(), Some(edited));
}

#[test]
fn shape_changes_interleave_with_edits() {
    let mut session = EditorSession::new();
    session.load_image(900, 900);
    let initial = session.snapshot().unwrap();

    session.select_shape(StencilShape::Circle);
    session.zoom_in();
    session.select_shape(StencilShape::Triangle);
    assert_eq!(session.stencil().shape, StencilShape::Triangle);
    assert_eq!(session.history_depths(), (3, 0));

    // A fresh edit after undoing discards the redo branch.
    session.undo();
    session.undo();
    assert_eq!(session.stencil().shape, StencilShape::Circle);
    assert!(session.can_redo());
    session.resize_stencil_step(ResizeDirection::Shrink);
    assert!(!session.can_redo());

    for _ in 0..2 {
        session.undo();
    }
    assert_eq!(session.snapshot(), Some(initial));
}

#[test]
fn gesture_state_survives_serialization() {
    let mut session = EditorSession::new();
    session.load_image(1200, 900);
    session.zoom_in();
    session.drag_stencil_to(Point::new(240.0, 180.0));

    let encoded = serde_json::to_string(&session).unwrap();
    let decoded: EditorSession = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, session);
    assert_eq!(decoded.history_depths(), session.history_depths());
}
