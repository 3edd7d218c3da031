#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

use crate::field::FieldId;
use crate::space::{CanvasSpace, Point, Rect};
use crate::store::{FieldStore, GeometryPatch};

/// Resizing a field's bounding box from its bottom-right handle.
///
/// Unlike [`crate::drag::MoveGesture`], this gesture is incremental: each
/// step applies the pointer delta since the previous step (converted from
/// display to canonical units at the current scale) and then rebases onto the
/// new pointer position. The rebase happens even when the proposal was
/// clamped, so pointer travel spent below the minimum size is not recovered.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeGesture {
    id: FieldId,
    last_pointer_display: Point,
}

impl ResizeGesture {
    /// Start resizing field `id` with the pointer at display position `pointer`.
    #[must_use]
    pub fn begin(id: FieldId, pointer: Point) -> Self {
        Self { id, last_pointer_display: pointer }
    }

    #[must_use]
    pub fn id(&self) -> &FieldId {
        &self.id
    }

    #[must_use]
    pub fn last_pointer_display(&self) -> Point {
        self.last_pointer_display
    }

    /// Grow or shrink the field by the display-space delta since the last step.
    ///
    /// Returns the committed box, or `None` if the field is gone.
    pub fn step(&mut self, store: &mut FieldStore, space: &CanvasSpace, pointer: Point) -> Option<Rect> {
        let field = store.get(&self.id)?;
        let config = store.config();
        let delta = pointer - self.last_pointer_display;
        let width = (field.width + delta.x / space.scale()).max(config.min_field_width);
        let height = (field.height + delta.y / space.scale()).max(config.min_field_height);
        let applied = store.clamp_and_apply(&self.id, &GeometryPatch::size(width, height));
        self.last_pointer_display = pointer;
        applied
    }
}
