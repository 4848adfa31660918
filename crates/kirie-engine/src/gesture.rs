//! Pointer-gesture interpretation: drag mode selection, live motion,
//! and single-save-point commits on release.
//!
//! The controller owns no canvas state; it translates pointer events
//! into [`EditorSession`] calls. One snapshot is taken when a drag
//! starts and committed on release only if the gesture produced a net
//! change, so a drag is exactly one undo step and an aborted drag is
//! none.

use serde::{Deserialize, Serialize};

use crate::history::Snapshot;
use crate::session::{EditorSession, snapshots_differ};
use crate::stencil::StencilRegion;
use crate::types::{Bounds, DRAG_MOVEMENT_FACTOR, MIN_STENCIL_SIZE, Point};

/// Half-width of the square corner-handle zone, in canvas units.
const RESIZE_HANDLE_RADIUS: f64 = 12.0;

/// What a drag manipulates. Selected by the modifier key at press time
/// and locked for the duration of the gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragMode {
    /// Pan the image under the fixed stencil.
    #[default]
    Image,
    /// Move the stencil, carrying the image rigidly with it.
    Stencil,
}

/// What lies under a pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerTarget {
    /// Inside the visible (stencil-clipped) image area.
    Image,
    /// Inside the stencil bounds.
    Stencil,
    /// Neither.
    Background,
}

/// A stencil corner handle. Dragging one anchors the opposite corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeCorner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
enum DragKind {
    MoveImage,
    MoveStencil,
    ResizeStencil(ResizeCorner),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct ActiveDrag {
    kind: DragKind,
    start: Snapshot,
    last_pointer: Point,
}

/// Interprets pointer and modifier events against a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GestureController {
    modifier_pressed: bool,
    drag: Option<ActiveDrag>,
}

impl GestureController {
    /// A controller with no gesture in flight.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the mode modifier's current state. Takes effect on the
    /// next press; an in-flight drag keeps the mode it started with.
    pub fn set_modifier(&mut self, pressed: bool) {
        self.modifier_pressed = pressed;
    }

    /// The mode the next press would start in.
    #[must_use]
    pub const fn current_mode(&self) -> DragMode {
        if let Some(drag) = &self.drag {
            match drag.kind {
                DragKind::MoveImage => DragMode::Image,
                DragKind::MoveStencil | DragKind::ResizeStencil(_) => DragMode::Stencil,
            }
        } else if self.modifier_pressed {
            DragMode::Stencil
        } else {
            DragMode::Image
        }
    }

    /// Whether a drag is in flight.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Begin a drag at `pointer` if the press lands on the active
    /// mode's target. In stencil mode a press inside a corner-handle
    /// zone starts a resize instead of a move. Returns whether a
    /// gesture started. Presses with no image loaded, during an
    /// existing drag, or off-target are ignored.
    pub fn pointer_down(&mut self, session: &EditorSession, pointer: Point) -> bool {
        if self.drag.is_some() {
            return false;
        }
        let Some(start) = session.snapshot() else {
            return false;
        };
        let kind = match self.current_mode() {
            DragMode::Image => match hit_test(session, pointer) {
                PointerTarget::Image => DragKind::MoveImage,
                PointerTarget::Stencil | PointerTarget::Background => return false,
            },
            DragMode::Stencil => {
                if let Some(corner) = corner_hit(session.stencil(), pointer) {
                    DragKind::ResizeStencil(corner)
                } else {
                    match hit_test(session, pointer) {
                        PointerTarget::Stencil | PointerTarget::Image => DragKind::MoveStencil,
                        PointerTarget::Background => return false,
                    }
                }
            }
        };
        self.drag = Some(ActiveDrag {
            kind,
            start,
            last_pointer: pointer,
        });
        true
    }

    /// Advance the in-flight drag to `pointer`, updating the session's
    /// live state. No-op outside a drag.
    pub fn pointer_move(&mut self, session: &mut EditorSession, pointer: Point) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let dx = pointer.x - drag.last_pointer.x;
        let dy = pointer.y - drag.last_pointer.y;
        drag.last_pointer = pointer;
        match drag.kind {
            DragKind::MoveImage => {
                if let Some(transform) = session.transform() {
                    let candidate = Point::new(
                        transform.x + dx * DRAG_MOVEMENT_FACTOR,
                        transform.y + dy * DRAG_MOVEMENT_FACTOR,
                    );
                    session.pan_image(candidate);
                }
            }
            DragKind::MoveStencil => {
                let stencil = session.stencil();
                let target = Point::new(stencil.x + dx, stencil.y + dy);
                session.drag_stencil_to(target);
            }
            DragKind::ResizeStencil(corner) => {
                let bounds = resize_bounds(session.stencil(), corner, pointer);
                session.reshape_stencil(bounds);
            }
        }
    }

    /// End the drag, committing the pre-gesture snapshot as a save
    /// point only if the gesture produced a net change. A resize drag
    /// first rescales the image by the net stencil width ratio. Returns
    /// whether a save point was recorded.
    pub fn pointer_up(&mut self, session: &mut EditorSession) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        if let DragKind::ResizeStencil(_) = drag.kind {
            session.finish_reshape(&drag.start);
        }
        let Some(current) = session.snapshot() else {
            return false;
        };
        if snapshots_differ(&drag.start, &current) {
            session.commit_snapshot(drag.start);
            true
        } else {
            false
        }
    }

    /// Abandon any in-flight drag without committing, leaving the live
    /// state where the drag put it.
    pub fn cancel(&mut self) {
        self.drag = None;
    }
}

/// Classify a canvas-space point against the session's current state.
#[must_use]
pub fn hit_test(session: &EditorSession, pointer: Point) -> PointerTarget {
    let stencil_bounds = session.stencil().bounds();
    if stencil_bounds.contains(pointer) {
        // Inside the stencil the image is visible wherever its scaled
        // bounds reach; a covering transform reaches everywhere.
        let on_image = session
            .transform()
            .is_some_and(|transform| transform.bounds().contains(pointer));
        if on_image {
            PointerTarget::Image
        } else {
            PointerTarget::Stencil
        }
    } else {
        PointerTarget::Background
    }
}

/// The corner handle under `pointer`, if any. Handle zones extend a
/// little beyond the stencil so small stencils stay grabbable.
#[must_use]
pub fn corner_hit(stencil: &StencilRegion, pointer: Point) -> Option<ResizeCorner> {
    let bounds = stencil.bounds();
    let corners = [
        (ResizeCorner::TopLeft, bounds.x, bounds.y),
        (ResizeCorner::TopRight, bounds.right(), bounds.y),
        (ResizeCorner::BottomLeft, bounds.x, bounds.bottom()),
        (ResizeCorner::BottomRight, bounds.right(), bounds.bottom()),
    ];
    corners.into_iter().find_map(|(corner, x, y)| {
        let inside = (pointer.x - x).abs() <= RESIZE_HANDLE_RADIUS
            && (pointer.y - y).abs() <= RESIZE_HANDLE_RADIUS;
        inside.then_some(corner)
    })
}

/// Stencil bounds with the dragged corner at `pointer` and the opposite
/// corner fixed, each dimension held at the minimum stencil size.
fn resize_bounds(stencil: &StencilRegion, corner: ResizeCorner, pointer: Point) -> Bounds {
    let bounds = stencil.bounds();
    let (anchor_x, anchor_y) = match corner {
        ResizeCorner::TopLeft => (bounds.right(), bounds.bottom()),
        ResizeCorner::TopRight => (bounds.x, bounds.bottom()),
        ResizeCorner::BottomLeft => (bounds.right(), bounds.y),
        ResizeCorner::BottomRight => (bounds.x, bounds.y),
    };
    let (x, width) = match corner {
        ResizeCorner::TopRight | ResizeCorner::BottomRight => {
            (anchor_x, (pointer.x - anchor_x).max(MIN_STENCIL_SIZE))
        }
        ResizeCorner::TopLeft | ResizeCorner::BottomLeft => {
            let width = (anchor_x - pointer.x).max(MIN_STENCIL_SIZE);
            (anchor_x - width, width)
        }
    };
    let (y, height) = match corner {
        ResizeCorner::BottomLeft | ResizeCorner::BottomRight => {
            (anchor_y, (pointer.y - anchor_y).max(MIN_STENCIL_SIZE))
        }
        ResizeCorner::TopLeft | ResizeCorner::TopRight => {
            let height = (anchor_y - pointer.y).max(MIN_STENCIL_SIZE);
            (anchor_y - height, height)
        }
    };
    Bounds::new(x, y, width, height)
}
