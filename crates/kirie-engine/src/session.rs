//! The editing session: single owner of the stencil, transform, and
//! history triple.
//!
//! Zoom, resize, and history operations read-then-write across all
//! three, so they live behind one value with exclusive mutable access.
//! A multi-threaded host must wrap the whole session in one mutex or
//! actor; splitting the triple would race.

use serde::{Deserialize, Serialize};

use crate::history::{HistoryState, Snapshot};
use crate::shape::{ClipRegion, StencilShape};
use crate::stencil::StencilRegion;
use crate::transform::{
    ImageTransform, apply_zoom, clamp_position, fit_to_stencil, move_stencil, resize_stencil,
};
use crate::types::{Bounds, Point, STENCIL_RESIZE_STEP, ZOOM_IN_STEP, ZOOM_OUT_STEP, ZoomBounds};

/// Tolerance below which two live states are considered unchanged, so
/// input noise cannot flood the history.
const CHANGE_EPSILON: f64 = 1e-9;

/// Direction of a discrete stencil resize step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeDirection {
    /// Grow both dimensions by one step.
    Grow,
    /// Shrink both dimensions by one step.
    Shrink,
}

/// One editing session: a stencil, the loaded image's transform (once
/// an image is loaded), and the undo/redo history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorSession {
    stencil: StencilRegion,
    transform: Option<ImageTransform>,
    history: HistoryState,
}

impl EditorSession {
    /// A fresh session with the default stencil and no image.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a new image, fully replacing the previous editing state.
    ///
    /// Resets the stencil to the default geometry (keeping the
    /// currently selected shape), fits the image over it, clears the
    /// undo/redo stacks, and records the post-fit state as the
    /// session's initial snapshot.
    pub fn load_image(&mut self, source_width: u32, source_height: u32) {
        self.stencil = StencilRegion::with_shape(self.stencil.shape);
        let transform = fit_to_stencil(
            &self.stencil,
            f64::from(source_width),
            f64::from(source_height),
        );
        self.history = HistoryState::new();
        self.history
            .set_initial(Snapshot::capture(&self.stencil, &transform));
        self.transform = Some(transform);
    }

    /// Replace the stencil with the default geometry for `shape` and
    /// re-fit the loaded image. Undoable; a re-selection of the current
    /// state is a no-op.
    pub fn select_shape(&mut self, shape: StencilShape) {
        let Some(transform) = self.transform else {
            self.stencil = StencilRegion::with_shape(shape);
            return;
        };
        let pre = Snapshot::capture(&self.stencil, &transform);
        let next_stencil = StencilRegion::with_shape(shape);
        let next_transform =
            fit_to_stencil(&next_stencil, transform.source_width, transform.source_height);
        let post = Snapshot::capture(&next_stencil, &next_transform);
        if snapshots_differ(&pre, &post) {
            self.history.commit(pre);
            self.stencil = next_stencil;
            self.transform = Some(next_transform);
        }
    }

    /// One zoom-in click (multiplies the current zoom by the step).
    pub fn zoom_in(&mut self) {
        if let Some(transform) = self.transform {
            self.set_zoom(transform.scale * ZOOM_IN_STEP);
        }
    }

    /// One zoom-out click.
    pub fn zoom_out(&mut self) {
        if let Some(transform) = self.transform {
            self.set_zoom(transform.scale * ZOOM_OUT_STEP);
        }
    }

    /// Set the absolute zoom, committing a save point first if the
    /// normalized result actually changes anything.
    pub fn set_zoom(&mut self, requested_scale: f64) {
        let Some(transform) = self.transform else {
            return;
        };
        let next = apply_zoom(
            &self.stencil,
            &transform,
            requested_scale,
            ZoomBounds::default(),
        );
        if transforms_differ(&next, &transform) {
            self.history
                .commit(Snapshot::capture(&self.stencil, &transform));
            self.transform = Some(next);
        }
    }

    /// One discrete stencil resize step (keyboard/button driven).
    pub fn resize_stencil_step(&mut self, direction: ResizeDirection) {
        let Some(transform) = self.transform else {
            return;
        };
        let delta = match direction {
            ResizeDirection::Grow => STENCIL_RESIZE_STEP,
            ResizeDirection::Shrink => -STENCIL_RESIZE_STEP,
        };
        let (next_stencil, next_transform) =
            resize_stencil(&self.stencil, &transform, delta, delta);
        if next_stencil != self.stencil || transforms_differ(&next_transform, &transform) {
            self.history
                .commit(Snapshot::capture(&self.stencil, &transform));
            self.stencil = next_stencil;
            self.transform = Some(next_transform);
        }
    }

    /// Move the image so its top-left approaches `candidate`, clamped
    /// to keep the stencil covered. Live-drag path: no history commit.
    pub fn pan_image(&mut self, candidate: Point) {
        let stencil = self.stencil;
        if let Some(transform) = self.transform.as_mut() {
            let clamped = clamp_position(&stencil, transform, candidate);
            transform.x = clamped.x;
            transform.y = clamped.y;
        }
    }

    /// Translate the stencil (and the image with it) so the stencil's
    /// top-left lands on `new_position`. Live-drag path: no commit.
    pub fn drag_stencil_to(&mut self, new_position: Point) {
        let Some(transform) = self.transform else {
            return;
        };
        let (next_stencil, next_transform) =
            move_stencil(&self.stencil, &transform, new_position);
        self.stencil = next_stencil;
        self.transform = Some(next_transform);
    }

    /// Set the stencil to `bounds` without touching the image.
    /// Live path for a corner-handle resize drag: the image follows
    /// only when the gesture ends, via [`finish_reshape`](Self::finish_reshape).
    pub fn reshape_stencil(&mut self, bounds: Bounds) {
        if self.transform.is_none() {
            return;
        }
        self.stencil = StencilRegion::new(
            self.stencil.shape,
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
        );
    }

    /// Apply the deferred image rescale after a corner-handle resize.
    ///
    /// The image scale is multiplied by the net width ratio against
    /// `reference` (the pre-gesture snapshot), matching the discrete
    /// resize contract, then the position is clamped back over the
    /// reshaped stencil.
    pub fn finish_reshape(&mut self, reference: &Snapshot) {
        let Some(transform) = self.transform.as_mut() else {
            return;
        };
        transform.scale *= self.stencil.width / reference.stencil.width;
        let clamped = clamp_position(&self.stencil, transform, transform.position());
        transform.x = clamped.x;
        transform.y = clamped.y;
    }

    /// Push a pre-gesture save point. Called by the gesture controller
    /// on release, after it has verified the gesture changed something.
    pub fn commit_snapshot(&mut self, snapshot: Snapshot) {
        self.history.commit(snapshot);
    }

    /// Step back one edit. No-op with nothing to undo.
    pub fn undo(&mut self) {
        let Some(current) = self.snapshot() else {
            return;
        };
        if let Some(restored) = self.history.undo(current) {
            self.apply_snapshot(restored);
        }
    }

    /// Step forward one edit. No-op with nothing to redo.
    pub fn redo(&mut self) {
        let Some(current) = self.snapshot() else {
            return;
        };
        if let Some(restored) = self.history.redo(current) {
            self.apply_snapshot(restored);
        }
    }

    /// Return to the initial post-load state; the reset is undoable.
    /// No-op before any image has loaded.
    pub fn reset_to_initial(&mut self) {
        let Some(current) = self.snapshot() else {
            return;
        };
        if let Some(initial) = self.history.reset_to_initial(current) {
            self.apply_snapshot(initial);
        }
    }

    /// Capture the current live state, once an image is loaded.
    #[must_use]
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.transform
            .map(|transform| Snapshot::capture(&self.stencil, &transform))
    }

    /// The current stencil.
    #[must_use]
    pub const fn stencil(&self) -> &StencilRegion {
        &self.stencil
    }

    /// The loaded image's transform, if any.
    #[must_use]
    pub const fn transform(&self) -> Option<&ImageTransform> {
        self.transform.as_ref()
    }

    /// Clip region matching the stencil's current geometry.
    #[must_use]
    pub fn clip_region(&self) -> ClipRegion {
        self.stencil.clip_region()
    }

    /// Current absolute zoom (1.0 before an image loads).
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.transform.map_or(1.0, |transform| transform.scale)
    }

    /// Current zoom as a whole percentage (`round(scale * 100)`).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom() * 100.0).round() as u32
    }

    /// Whether an image is loaded.
    #[must_use]
    pub const fn has_image(&self) -> bool {
        self.transform.is_some()
    }

    /// Whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// History stack depths as `(past, future)`, for diagnostics.
    #[must_use]
    pub fn history_depths(&self) -> (usize, usize) {
        (self.history.past_depth(), self.history.future_depth())
    }

    /// Restore a snapshot as the live state. The image binding (source
    /// dimensions) is untouched: snapshots are independent of the
    /// loaded asset.
    fn apply_snapshot(&mut self, snapshot: Snapshot) {
        self.stencil = snapshot.stencil;
        if let Some(transform) = self.transform.as_mut() {
            transform.scale = snapshot.scale;
            transform.x = snapshot.position.x;
            transform.y = snapshot.position.y;
        }
    }
}

/// Whether two transforms differ beyond tolerance in any live field.
fn transforms_differ(a: &ImageTransform, b: &ImageTransform) -> bool {
    (a.scale - b.scale).abs() > CHANGE_EPSILON
        || (a.x - b.x).abs() > CHANGE_EPSILON
        || (a.y - b.y).abs() > CHANGE_EPSILON
}

/// Whether two snapshots differ beyond tolerance.
pub(crate) fn snapshots_differ(a: &Snapshot, b: &Snapshot) -> bool {
    (a.scale - b.scale).abs() > CHANGE_EPSILON
        || (a.position.x - b.position.x).abs() > CHANGE_EPSILON
        || (a.position.y - b.position.y).abs() > CHANGE_EPSILON
        || a.stencil.shape != b.stencil.shape
        || (a.stencil.x - b.stencil.x).abs() > CHANGE_EPSILON
        || (a.stencil.y - b.stencil.y).abs() > CHANGE_EPSILON
        || (a.stencil.width - b.stencil.width).abs() > CHANGE_EPSILON
        || (a.stencil.height - b.stencil.height).abs() > CHANGE_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ZOOM_MAX, ZOOM_MIN};

    fn loaded_session() -> EditorSession {
        let mut session = EditorSession::new();
        session.load_image(800, 400);
        session
    }

    #[test]
    fn load_image_fits_and_records_initial() {
        let session = loaded_session();
        let transform = session.transform().copied().unwrap();
        assert!((transform.scale - 1.0).abs() < f64::EPSILON);
        assert!((transform.x - 100.0).abs() < f64::EPSILON);
        assert!((transform.y - 200.0).abs() < f64::EPSILON);
        assert!(!session.can_undo());
        assert!(!session.can_redo());
        assert_eq!(session.zoom_percent(), 100);
    }

    #[test]
    fn reload_clears_history_and_keeps_shape() {
        let mut session = loaded_session();
        session.select_shape(StencilShape::Circle);
        session.zoom_in();
        assert!(session.can_undo());

        session.load_image(640, 480);
        assert!(!session.can_undo());
        assert!(!session.can_redo());
        assert_eq!(session.stencil().shape, StencilShape::Circle);
        assert_eq!(session.stencil().bounds(), StencilRegion::default().bounds());
    }

    #[test]
    fn operations_before_load_are_no_ops() {
        let mut session = EditorSession::new();
        session.zoom_in();
        session.resize_stencil_step(ResizeDirection::Grow);
        session.pan_image(Point::new(10.0, 10.0));
        session.drag_stencil_to(Point::new(10.0, 10.0));
        session.undo();
        session.redo();
        session.reset_to_initial();
        assert_eq!(session, EditorSession::new());
        assert_eq!(session.zoom_percent(), 100);
    }

    #[test]
    fn zoom_click_commits_and_is_undoable() {
        let mut session = loaded_session();
        let before = session.snapshot().unwrap();
        session.zoom_in();
        assert!(session.can_undo());
        let zoomed = session.snapshot().unwrap();
        assert!((zoomed.scale - 1.05).abs() < 1e-9);

        session.undo();
        assert_eq!(session.snapshot(), Some(before));
        assert!(session.can_redo());
        session.redo();
        assert_eq!(session.snapshot(), Some(zoomed));
    }

    #[test]
    fn zoom_at_ceiling_does_not_commit() {
        let mut session = loaded_session();
        session.set_zoom(ZOOM_MAX);
        let (past, _) = session.history_depths();
        // Already at the ceiling: a further zoom-in is fully clamped
        // away and must not grow the history.
        session.zoom_in();
        session.set_zoom(5.0);
        assert_eq!(session.history_depths().0, past);
        assert!((session.zoom() - ZOOM_MAX).abs() < 1e-9);
    }

    #[test]
    fn zoom_floor_respects_cover_scale() {
        let mut session = loaded_session();
        // Cover scale for 800x400 in a 600x400 stencil is 1.0, above
        // the configured floor; requests below it normalize to cover.
        session.set_zoom(ZOOM_MIN);
        assert!((session.zoom() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn resize_step_commits_once() {
        let mut session = loaded_session();
        session.resize_stencil_step(ResizeDirection::Grow);
        assert_eq!(session.history_depths(), (1, 0));
        assert!((session.stencil().width - 620.0).abs() < 1e-9);
        session.undo();
        assert!((session.stencil().width - 600.0).abs() < 1e-9);
    }

    #[test]
    fn reshape_defers_the_image_rescale_to_finish() {
        let mut session = loaded_session();
        let reference = session.snapshot().unwrap();

        session.reshape_stencil(Bounds::new(200.0, 200.0, 300.0, 200.0));
        assert!((session.zoom() - 1.0).abs() < 1e-9, "reshape leaves the image alone");

        session.finish_reshape(&reference);
        assert!((session.zoom() - 0.5).abs() < 1e-9);
        let transform = session.transform().copied().unwrap();
        let stencil = *session.stencil();
        assert!(transform.bounds().contains_bounds(&stencil.bounds()));
    }

    #[test]
    fn pan_is_clamped_and_uncommitted() {
        let mut session = loaded_session();
        session.set_zoom(2.0);
        let (past, _) = session.history_depths();
        session.pan_image(Point::new(-1e6, -1e6));
        let transform = session.transform().copied().unwrap();
        // Pinned to the far corner of the valid range.
        let stencil = *session.stencil();
        assert!(
            (transform.x - (stencil.x + stencil.width - transform.scaled_width())).abs() < 1e-9
        );
        assert_eq!(session.history_depths().0, past, "pan must not commit");
    }

    #[test]
    fn reset_returns_to_initial_and_is_undoable() {
        let mut session = loaded_session();
        let initial = session.snapshot().unwrap();
        session.zoom_in();
        session.resize_stencil_step(ResizeDirection::Shrink);
        let edited = session.snapshot().unwrap();

        session.reset_to_initial();
        assert_eq!(session.snapshot(), Some(initial));

        session.undo();
        assert_eq!(session.snapshot(), Some(edited));
    }

    #[test]
    fn select_shape_refits_and_is_undoable() {
        let mut session = loaded_session();
        let before = session.snapshot().unwrap();
        session.select_shape(StencilShape::Triangle);
        assert_eq!(session.stencil().shape, StencilShape::Triangle);
        assert!(session.can_undo());

        // Same shape again at the same geometry: no-op, no new entry.
        let (past, _) = session.history_depths();
        session.select_shape(StencilShape::Triangle);
        assert_eq!(session.history_depths().0, past);

        session.undo();
        assert_eq!(session.snapshot(), Some(before));
    }

    #[test]
    fn select_shape_before_load_swaps_silently() {
        let mut session = EditorSession::new();
        session.select_shape(StencilShape::Circle);
        assert_eq!(session.stencil().shape, StencilShape::Circle);
        assert!(!session.can_undo());
    }

    #[test]
    fn drag_stencil_carries_image() {
        let mut session = loaded_session();
        let before = session.transform().copied().unwrap();
        session.drag_stencil_to(Point::new(260.0, 150.0));
        let after = session.transform().copied().unwrap();
        assert!((after.x - before.x - 60.0).abs() < 1e-9);
        assert!((after.y - before.y + 50.0).abs() < 1e-9);
    }

    #[test]
    fn clip_region_tracks_stencil() {
        let mut session = loaded_session();
        session.drag_stencil_to(Point::new(300.0, 300.0));
        assert_eq!(session.clip_region().bounds, session.stencil().bounds());
    }
}
