//! Single-gesture arbitration.
//!
//! The arbiter owns the one piece of transient gesture state an editor has:
//! which controller is active (if any) together with that controller's
//! context, plus the pending selection waiting for metadata. A controller must
//! [`claim`](InteractionArbiter::claim) the arbiter before it accepts a
//! gesture start; the claim fails while another gesture is active.
//!
//! Cancelling clears all transient state at once. The field store is never
//! touched here, so whatever a gesture already committed stays committed.

#[cfg(test)]
#[path = "arbiter_test.rs"]
mod arbiter_test;

use serde::Serialize;
use tracing::debug;

use crate::columns::ColumnGesture;
use crate::drag::MoveGesture;
use crate::field::FieldId;
use crate::resize::ResizeGesture;
use crate::selection::{PendingSelection, SelectionGesture};
use crate::space::Rect;

/// Which controller holds the arbiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    Creating,
    Dragging,
    Resizing,
    ResizingColumn,
}

/// The active gesture and its context.
#[derive(Debug, Clone, Default)]
pub enum ActiveGesture {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Drawing a selection box for a new field.
    Creating(SelectionGesture),
    /// Moving an existing field.
    Dragging(MoveGesture),
    /// Resizing an existing field from its handle.
    Resizing(ResizeGesture),
    /// Dragging a table column boundary.
    ResizingColumn(ColumnGesture),
}

impl ActiveGesture {
    #[must_use]
    pub fn kind(&self) -> Option<GestureKind> {
        match self {
            Self::Idle => None,
            Self::Creating(_) => Some(GestureKind::Creating),
            Self::Dragging(_) => Some(GestureKind::Dragging),
            Self::Resizing(_) => Some(GestureKind::Resizing),
            Self::ResizingColumn(_) => Some(GestureKind::ResizingColumn),
        }
    }

    /// The field the gesture operates on. Selection gestures have none.
    #[must_use]
    pub fn target(&self) -> Option<&FieldId> {
        match self {
            Self::Idle | Self::Creating(_) => None,
            Self::Dragging(g) => Some(g.id()),
            Self::Resizing(g) => Some(g.id()),
            Self::ResizingColumn(g) => Some(g.id()),
        }
    }
}

/// Why transient state was force-released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The current page changed.
    PageChange,
    /// The pointer left the canvas.
    PointerLeave,
    /// Explicit abort (Escape, host request, reload).
    Abort,
    /// The gesture's target field was deleted.
    FieldDeleted,
}

/// Returned by [`InteractionArbiter::claim`] when another gesture is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("gesture already active: {active:?}")]
pub struct ArbiterBusy {
    pub active: GestureKind,
}

/// Holder of the single active gesture of one editor.
#[derive(Debug, Clone, Default)]
pub struct InteractionArbiter {
    active: ActiveGesture,
    pending: Option<PendingSelection>,
}

impl InteractionArbiter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self.active, ActiveGesture::Idle)
    }

    #[must_use]
    pub fn active(&self) -> &ActiveGesture {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut ActiveGesture {
        &mut self.active
    }

    #[must_use]
    pub fn active_kind(&self) -> Option<GestureKind> {
        self.active.kind()
    }

    /// Make `gesture` the active one.
    ///
    /// # Errors
    ///
    /// Returns [`ArbiterBusy`] if another gesture holds the arbiter; the
    /// active gesture is left as it was.
    pub fn claim(&mut self, gesture: ActiveGesture) -> Result<(), ArbiterBusy> {
        if let Some(active) = self.active.kind() {
            return Err(ArbiterBusy { active });
        }
        if let Some(kind) = gesture.kind() {
            debug!(gesture = ?kind, target = ?gesture.target(), "gesture claimed");
        }
        self.active = gesture;
        Ok(())
    }

    /// End the active gesture normally and hand its context back.
    pub fn release(&mut self) -> ActiveGesture {
        std::mem::take(&mut self.active)
    }

    /// Drop the active gesture and the pending selection.
    ///
    /// A pointer leaving the canvas keeps the pending selection, since its
    /// metadata is collected outside the canvas. Returns true if anything was
    /// discarded.
    pub fn cancel(&mut self, reason: CancelReason) -> bool {
        let had_gesture = self.active.kind();
        let had_pending = reason != CancelReason::PointerLeave && self.pending.take().is_some();
        self.active = ActiveGesture::Idle;
        if had_gesture.is_some() || had_pending {
            debug!(?reason, gesture = ?had_gesture, had_pending, "transient state cancelled");
            return true;
        }
        false
    }

    /// Force-release the active gesture if it targets `id`.
    pub fn release_if_target(&mut self, id: &FieldId) -> bool {
        if self.active.target() != Some(id) {
            return false;
        }
        debug!(field = %id, reason = ?CancelReason::FieldDeleted, "gesture target removed");
        self.active = ActiveGesture::Idle;
        true
    }

    /// Box of the selection being drawn, if a selection gesture is active.
    #[must_use]
    pub fn preview(&self) -> Option<Rect> {
        match &self.active {
            ActiveGesture::Creating(g) => Some(g.preview()),
            _ => None,
        }
    }

    #[must_use]
    pub fn pending(&self) -> Option<&PendingSelection> {
        self.pending.as_ref()
    }

    /// Store a finished selection, replacing any older one.
    pub fn set_pending(&mut self, pending: PendingSelection) {
        self.pending = Some(pending);
    }

    pub fn take_pending(&mut self) -> Option<PendingSelection> {
        self.pending.take()
    }
}
