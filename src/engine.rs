//! Editor core: routes pointer and keyboard input to the gesture controllers.
//!
//! `EditorCore` owns every piece of state of one editor instance: the canvas
//! transform, the field store, the page cursor, the arbiter and the selected
//! field. Input handlers run to completion and return the [`Action`]s the host
//! should react to (redraw, notify, persist).

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::arbiter::{ActiveGesture, CancelReason, GestureKind, InteractionArbiter};
use crate::columns::ColumnGesture;
use crate::config::LayoutConfig;
use crate::drag::MoveGesture;
use crate::field::{Field, FieldId};
use crate::hit::{HitPart, hit_test};
use crate::page::PageFilter;
use crate::resize::ResizeGesture;
use crate::selection::{FieldMeta, PendingSelection, SelectionGesture};
use crate::space::{CanvasSpace, Point, Rect};
use crate::store::{FieldStore, StoreError};
use crate::wire::{ExportedField, export_fields};

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    #[default]
    Primary,
    /// Middle mouse button.
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key, named as the host reports it (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Action {
    RenderNeeded,
    SelectionChanged { id: Option<FieldId> },
    /// A selection box is waiting for field metadata.
    FieldCreateRequested { selection: PendingSelection },
    FieldUpdated { id: FieldId, rect: Rect },
    ColumnsUpdated { id: FieldId, column_widths: Vec<f64> },
    FieldDeleted { id: FieldId },
    GestureCancelled,
    PageChanged { page: u32 },
}

/// All editor state that doesn't depend on a rendering surface.
#[derive(Debug, Clone)]
pub struct EditorCore {
    pub space: CanvasSpace,
    pub store: FieldStore,
    pub pages: PageFilter,
    pub arbiter: InteractionArbiter,
    selected: Option<FieldId>,
}

impl Default for EditorCore {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl EditorCore {
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            space: CanvasSpace::new(&config),
            store: FieldStore::new(config),
            pages: PageFilter::new(),
            arbiter: InteractionArbiter::new(),
            selected: None,
        }
    }

    // --- Data inputs ---

    /// Replace the field list, dropping all transient state. Returns the
    /// number of fields stored.
    pub fn load_fields(&mut self, fields: Vec<Field>) -> usize {
        self.arbiter.cancel(CancelReason::Abort);
        self.selected = None;
        let count = self.store.replace_all(fields);
        debug!(count, "fields loaded");
        count
    }

    /// Set the document's page count, pulling the page cursor back if needed.
    pub fn set_page_count(&mut self, page_count: u32) -> Vec<Action> {
        self.store.set_page_count(page_count);
        let before = self.pages.current_page();
        self.pages.clamp_to(self.store.page_count());
        let page = self.pages.current_page();
        if page == before {
            return vec![Action::RenderNeeded];
        }
        let mut actions = Vec::new();
        if self.arbiter.cancel(CancelReason::PageChange) {
            actions.push(Action::GestureCancelled);
        }
        actions.extend(self.clear_selection());
        actions.push(Action::PageChanged { page });
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Recompute the display scale for the width available to the editor.
    pub fn set_display_width(&mut self, display_width: f64) -> f64 {
        let scale = self.space.set_display_width(display_width);
        trace!(display_width, scale, "display width set");
        scale
    }

    /// Switch pages. Any gesture and pending selection are cancelled and the
    /// selection is cleared.
    pub fn set_page(&mut self, page: u32) -> Vec<Action> {
        let had_transient = !self.arbiter.is_idle() || self.arbiter.pending().is_some();
        if !self.pages.set_page(page, &self.store, &mut self.arbiter) {
            return Vec::new();
        }
        let mut actions = Vec::new();
        if had_transient {
            actions.push(Action::GestureCancelled);
        }
        actions.extend(self.clear_selection());
        actions.push(Action::PageChanged { page });
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Gesture starts ---

    /// Start drawing a selection box at canonical `pt`.
    ///
    /// A pending selection from an earlier gesture is discarded.
    pub fn begin_selection(&mut self, pt: Point) -> bool {
        if !is_finite(pt) {
            return false;
        }
        let origin = self.space.clamp_point(pt);
        if !self.claim(ActiveGesture::Creating(SelectionGesture::begin(origin))) {
            return false;
        }
        if self.arbiter.take_pending().is_some() {
            debug!("pending selection replaced");
        }
        true
    }

    /// Start moving field `id`, grabbed at canonical `pt`.
    pub fn begin_move(&mut self, id: &FieldId, pt: Point) -> bool {
        if !is_finite(pt) {
            return false;
        }
        let Some(field) = self.visible_field(id) else {
            debug!(field = %id, "move target not visible");
            return false;
        };
        let gesture = MoveGesture::begin(field, pt);
        self.claim(ActiveGesture::Dragging(gesture))
    }

    /// Start resizing field `id` with the pointer at display position `display_pt`.
    pub fn begin_resize(&mut self, id: &FieldId, display_pt: Point) -> bool {
        if !is_finite(display_pt) {
            return false;
        }
        if self.visible_field(id).is_none() {
            debug!(field = %id, "resize target not visible");
            return false;
        }
        self.claim(ActiveGesture::Resizing(ResizeGesture::begin(id.clone(), display_pt)))
    }

    /// Start dragging the boundary right of `column` on table `id` from canonical `x`.
    pub fn begin_column_resize(&mut self, id: &FieldId, column: usize, x: f64) -> bool {
        if !x.is_finite() {
            return false;
        }
        let Some(gesture) = self.visible_field(id).and_then(|f| ColumnGesture::begin(f, column, x)) else {
            debug!(field = %id, column, "column resize target not available");
            return false;
        };
        self.claim(ActiveGesture::ResizingColumn(gesture))
    }

    // --- Input events ---

    /// Route a pointer-down at display position `display_pt`.
    ///
    /// Only the primary button starts gestures, and only while idle. The hit
    /// part picks the gesture: resize handle, column boundary, field body
    /// (select and move), or empty canvas (deselect and draw a selection).
    pub fn on_pointer_down(&mut self, display_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary || !self.arbiter.is_idle() || !is_finite(display_pt) {
            return Vec::new();
        }
        let pt = self.space.to_canonical(display_pt);
        let hit = hit_test(pt, &self.pages.visible_fields(&self.store), &self.space);

        let mut actions = Vec::new();
        let started = match hit {
            Some(hit) => {
                actions.extend(self.select(Some(hit.field_id.clone())));
                match hit.part {
                    HitPart::ResizeHandle => self.begin_resize(&hit.field_id, display_pt),
                    HitPart::ColumnBoundary(column) => self.begin_column_resize(&hit.field_id, column, pt.x),
                    HitPart::Body => self.begin_move(&hit.field_id, pt),
                }
            }
            None => {
                actions.extend(self.select(None));
                self.begin_selection(pt)
            }
        };
        if started || !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Advance the active gesture to display position `display_pt`.
    pub fn on_pointer_move(&mut self, display_pt: Point) -> Vec<Action> {
        if !is_finite(display_pt) {
            return Vec::new();
        }
        let pt = self.space.to_canonical(display_pt);
        match self.arbiter.active_mut() {
            ActiveGesture::Idle => Vec::new(),
            ActiveGesture::Creating(gesture) => {
                gesture.update(self.space.clamp_point(pt));
                vec![Action::RenderNeeded]
            }
            ActiveGesture::Dragging(gesture) => {
                let Some(rect) = gesture.step(&mut self.store, pt) else {
                    return Vec::new();
                };
                trace!(field = %gesture.id(), x = rect.x, y = rect.y, "move step");
                vec![Action::FieldUpdated { id: gesture.id().clone(), rect }, Action::RenderNeeded]
            }
            ActiveGesture::Resizing(gesture) => {
                let Some(rect) = gesture.step(&mut self.store, &self.space, display_pt) else {
                    return Vec::new();
                };
                trace!(field = %gesture.id(), width = rect.width, height = rect.height, "resize step");
                vec![Action::FieldUpdated { id: gesture.id().clone(), rect }, Action::RenderNeeded]
            }
            ActiveGesture::ResizingColumn(gesture) => {
                let Some(column_widths) = gesture.step(&mut self.store, pt.x) else {
                    return Vec::new();
                };
                trace!(field = %gesture.id(), column = gesture.column(), ?column_widths, "column step");
                vec![Action::ColumnsUpdated { id: gesture.id().clone(), column_widths }, Action::RenderNeeded]
            }
        }
    }

    /// End the active gesture at display position `display_pt`.
    ///
    /// A selection gesture applies the release point before its size check.
    /// Move, resize and column gestures keep their last committed state.
    pub fn on_pointer_up(&mut self, display_pt: Point) -> Vec<Action> {
        match self.arbiter.release() {
            ActiveGesture::Idle => Vec::new(),
            ActiveGesture::Creating(mut gesture) => {
                if is_finite(display_pt) {
                    gesture.update(self.space.clamp_point(self.space.to_canonical(display_pt)));
                }
                let page = self.pages.current_page();
                match gesture.finish(self.store.config(), page) {
                    Some(selection) => {
                        debug!(?selection, "selection pending");
                        self.arbiter.set_pending(selection);
                        vec![Action::FieldCreateRequested { selection }, Action::RenderNeeded]
                    }
                    None => {
                        debug!(preview = ?gesture.preview(), "selection below minimum size");
                        vec![Action::RenderNeeded]
                    }
                }
            }
            ended => {
                debug!(gesture = ?ended.kind(), field = ?ended.target(), "gesture ended");
                vec![Action::RenderNeeded]
            }
        }
    }

    /// The pointer left the canvas: abort the active gesture.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.cancel(CancelReason::PointerLeave)
    }

    /// Handle a key press. `Escape` cancels; `Delete` and `Backspace` delete
    /// the selected field.
    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        match key.0.as_str() {
            "Escape" => self.cancel(CancelReason::Abort),
            "Delete" | "Backspace" => match self.selected.clone() {
                Some(id) => self.delete_field(&id),
                None => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    /// Force-release transient state.
    pub fn cancel(&mut self, reason: CancelReason) -> Vec<Action> {
        if self.arbiter.cancel(reason) {
            vec![Action::GestureCancelled, Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // --- Field operations ---

    /// Turn the pending selection into a field built from `meta`.
    ///
    /// Returns the new field's id, or `None` when nothing is pending.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] if `meta` names an id already in
    /// use; the pending selection is kept so the host can retry.
    pub fn commit_pending(&mut self, meta: FieldMeta) -> Result<Option<FieldId>, StoreError> {
        let Some(pending) = self.arbiter.take_pending() else {
            return Ok(None);
        };
        let field = pending.into_field(meta, self.store.config());
        let id = field.id.clone();
        if let Err(err) = self.store.add(field) {
            self.arbiter.set_pending(pending);
            return Err(err);
        }
        debug!(field = %id, page = pending.page, "field created");
        Ok(Some(id))
    }

    /// Drop the pending selection. Returns false if none was pending.
    pub fn discard_pending(&mut self) -> bool {
        self.arbiter.take_pending().is_some()
    }

    /// Remove a field, releasing any gesture that targets it.
    pub fn delete_field(&mut self, id: &FieldId) -> Vec<Action> {
        if self.store.remove(id).is_none() {
            return Vec::new();
        }
        let mut actions = Vec::new();
        if self.arbiter.release_if_target(id) {
            actions.push(Action::GestureCancelled);
        }
        if self.selected.as_ref() == Some(id) {
            actions.extend(self.clear_selection());
        }
        debug!(field = %id, "field deleted");
        actions.push(Action::FieldDeleted { id: id.clone() });
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Select a field on the current page, or clear the selection with `None`.
    pub fn select(&mut self, id: Option<FieldId>) -> Vec<Action> {
        if let Some(id) = &id {
            if self.visible_field(id).is_none() {
                return Vec::new();
            }
        }
        if self.selected == id {
            return Vec::new();
        }
        self.selected.clone_from(&id);
        vec![Action::SelectionChanged { id }]
    }

    // --- Queries ---

    /// The currently selected field, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&FieldId> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn pending_selection(&self) -> Option<&PendingSelection> {
        self.arbiter.pending()
    }

    /// The box being drawn, while a selection gesture is active.
    #[must_use]
    pub fn selection_preview(&self) -> Option<Rect> {
        self.arbiter.preview()
    }

    #[must_use]
    pub fn visible_fields(&self) -> Vec<&Field> {
        self.pages.visible_fields(&self.store)
    }

    #[must_use]
    pub fn field(&self, id: &FieldId) -> Option<&Field> {
        self.store.get(id)
    }

    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.pages.current_page()
    }

    #[must_use]
    pub fn active_gesture_kind(&self) -> Option<GestureKind> {
        self.arbiter.active_kind()
    }

    /// The save payload: every field with integer-rounded geometry.
    #[must_use]
    pub fn export(&self) -> Vec<ExportedField> {
        export_fields(self.store.all(), self.store.config())
    }

    // --- Internals ---

    fn visible_field(&self, id: &FieldId) -> Option<&Field> {
        self.store.get(id).filter(|f| f.page == self.pages.current_page())
    }

    fn claim(&mut self, gesture: ActiveGesture) -> bool {
        match self.arbiter.claim(gesture) {
            Ok(()) => true,
            Err(busy) => {
                debug!(%busy, "gesture start rejected");
                false
            }
        }
    }

    fn clear_selection(&mut self) -> Option<Action> {
        self.selected.take().map(|_| Action::SelectionChanged { id: None })
    }
}

fn is_finite(pt: Point) -> bool {
    pt.x.is_finite() && pt.y.is_finite()
}
