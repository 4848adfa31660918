//! Snapshot-based undo/redo history.
//!
//! History is a pair of stacks of immutable [`Snapshot`] values plus a
//! separate `initial` slot recorded once per loaded image. Every entry
//! captures the full editable state (zoom, image position, stencil
//! geometry) so no path can record a partial state.

use serde::{Deserialize, Serialize};

use crate::stencil::StencilRegion;
use crate::transform::ImageTransform;
use crate::types::Point;

/// An immutable capture of everything needed to restore editing state,
/// independent of the loaded image asset itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Absolute image scale.
    pub scale: f64,
    /// Image top-left position.
    pub position: Point,
    /// Full stencil geometry (shape included, so shape re-selection is
    /// undoable like any other edit).
    pub stencil: StencilRegion,
}

impl Snapshot {
    /// Capture the current live state.
    #[must_use]
    pub const fn capture(stencil: &StencilRegion, transform: &ImageTransform) -> Self {
        Self {
            scale: transform.scale,
            position: transform.position(),
            stencil: *stencil,
        }
    }
}

/// Undo/redo stacks plus the per-image initial state.
///
/// `initial` is distinct from the bottom of `past`: reset-to-initial
/// returns to it without consuming it, and it survives the entire
/// editing session of one image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryState {
    past: Vec<Snapshot>,
    future: Vec<Snapshot>,
    initial: Option<Snapshot>,
}

impl HistoryState {
    /// Empty history with no initial state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            initial: None,
        }
    }

    /// Record the state preceding a committing mutation.
    ///
    /// Pushes `snapshot` onto `past` and clears `future`; called with
    /// the pre-mutation state so the top of `past` is always the state
    /// one undo step away.
    pub fn commit(&mut self, snapshot: Snapshot) {
        self.past.push(snapshot);
        self.future.clear();
    }

    /// Record the initial state for a freshly loaded image, discarding
    /// any prior history.
    pub fn set_initial(&mut self, snapshot: Snapshot) {
        self.initial = Some(snapshot);
        self.past.clear();
        self.future.clear();
    }

    /// Step back one edit. `current` is the live state, which becomes
    /// redo-able. Returns the restored snapshot, or `None` when there
    /// is nothing to undo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.past.pop()?;
        self.future.push(current);
        Some(previous)
    }

    /// Step forward one edit; the mirror of [`undo`](Self::undo).
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.future.pop()?;
        self.past.push(current);
        Some(next)
    }

    /// Return to the initial state, keeping the reset itself undoable.
    ///
    /// `current` is pushed onto `past` and `future` is cleared. The
    /// initial snapshot is returned without being consumed, so repeated
    /// resets keep returning it.
    pub fn reset_to_initial(&mut self, current: Snapshot) -> Option<Snapshot> {
        let initial = self.initial?;
        self.past.push(current);
        self.future.clear();
        Some(initial)
    }

    /// Whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Whether an initial state has been recorded.
    #[must_use]
    pub const fn has_initial(&self) -> bool {
        self.initial.is_some()
    }

    /// The recorded initial state, if any.
    #[must_use]
    pub const fn initial(&self) -> Option<&Snapshot> {
        self.initial.as_ref()
    }

    /// Number of undo steps available.
    #[must_use]
    pub fn past_depth(&self) -> usize {
        self.past.len()
    }

    /// Number of redo steps available.
    #[must_use]
    pub fn future_depth(&self) -> usize {
        self.future.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::transform::fit_to_stencil;

    fn snapshot_at(scale: f64, x: f64, y: f64) -> Snapshot {
        let stencil = StencilRegion::default();
        Snapshot {
            scale,
            position: Point::new(x, y),
            stencil,
        }
    }

    #[test]
    fn capture_reads_live_state() {
        let stencil = StencilRegion::default();
        let transform = fit_to_stencil(&stencil, 800.0, 400.0);
        let snap = Snapshot::capture(&stencil, &transform);
        assert!((snap.scale - 1.0).abs() < f64::EPSILON);
        assert_eq!(snap.position, Point::new(100.0, 200.0));
        assert_eq!(snap.stencil, stencil);
    }

    #[test]
    fn undo_redo_round_trip_restores_exact_values() {
        let s1 = snapshot_at(1.0, 100.0, 200.0);
        let s2 = snapshot_at(1.5, 80.0, 150.0);

        let mut history = HistoryState::new();
        history.commit(s1); // pre-mutation state; live state is now s2

        let restored = history.undo(s2);
        assert_eq!(restored, Some(s1));
        let replayed = history.redo(s1);
        assert_eq!(replayed, Some(s2));
        // Back to where we started: one undoable entry, no redo.
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_redo_preserve_total_depth() {
        let mut history = HistoryState::new();
        for i in 0..4 {
            history.commit(snapshot_at(1.0, f64::from(i), 0.0));
        }
        let live = snapshot_at(1.0, 99.0, 0.0);

        let mut current = live;
        for _ in 0..3 {
            if let Some(prev) = history.undo(current) {
                current = prev;
            }
            assert_eq!(history.past_depth() + history.future_depth(), 4);
        }
        for _ in 0..3 {
            if let Some(next) = history.redo(current) {
                current = next;
            }
            assert_eq!(history.past_depth() + history.future_depth(), 4);
        }
        assert_eq!(current, live);
    }

    #[test]
    fn empty_stacks_are_no_ops() {
        let mut history = HistoryState::new();
        let live = snapshot_at(1.0, 0.0, 0.0);
        assert_eq!(history.undo(live), None);
        assert_eq!(history.redo(live), None);
        assert_eq!(history.reset_to_initial(live), None);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(!history.has_initial());
    }

    #[test]
    fn commit_clears_future() {
        let mut history = HistoryState::new();
        history.commit(snapshot_at(1.0, 0.0, 0.0));
        let _ = history.undo(snapshot_at(1.0, 10.0, 0.0));
        assert!(history.can_redo());

        history.commit(snapshot_at(1.0, 20.0, 0.0));
        assert!(!history.can_redo(), "a committing mutation must clear future");
    }

    #[test]
    fn set_initial_discards_history() {
        let mut history = HistoryState::new();
        history.commit(snapshot_at(1.0, 0.0, 0.0));
        let _ = history.undo(snapshot_at(1.0, 5.0, 0.0));

        let initial = snapshot_at(2.0, 1.0, 1.0);
        history.set_initial(initial);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.initial(), Some(&initial));
    }

    #[test]
    fn repeated_reset_returns_initial_unchanged() {
        let initial = snapshot_at(1.0, 100.0, 200.0);
        let mut history = HistoryState::new();
        history.set_initial(initial);

        let live1 = snapshot_at(2.0, 50.0, 60.0);
        let first = history.reset_to_initial(live1);
        assert_eq!(first, Some(initial));
        assert_eq!(history.past_depth(), 1);

        // Second reset from the (now initial) live state: same result,
        // past grows by one each time, initial is never consumed.
        let second = history.reset_to_initial(initial);
        assert_eq!(second, Some(initial));
        assert_eq!(history.past_depth(), 2);
        assert!(!history.can_redo());
    }

    #[test]
    fn reset_is_undoable() {
        let initial = snapshot_at(1.0, 100.0, 200.0);
        let mut history = HistoryState::new();
        history.set_initial(initial);

        let live = snapshot_at(2.0, 50.0, 60.0);
        let restored = history.reset_to_initial(live);
        assert_eq!(restored, Some(initial));

        // Undoing the reset returns the pre-reset live state.
        let undone = history.undo(initial);
        assert_eq!(undone, Some(live));
    }

    #[test]
    fn history_serde_round_trip() {
        let mut history = HistoryState::new();
        history.set_initial(snapshot_at(1.0, 0.0, 0.0));
        history.commit(snapshot_at(1.2, 3.0, 4.0));
        let json = serde_json::to_string(&history).unwrap();
        let back: HistoryState = serde_json::from_str(&json).unwrap();
        assert_eq!(history, back);
    }
}
