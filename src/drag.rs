#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use crate::field::{Field, FieldId};
use crate::space::{Point, Rect};
use crate::store::{FieldStore, GeometryPatch};

/// Relocating an existing field.
///
/// The grab offset between the pointer and the field's top-left corner is
/// captured once at gesture start and held for the whole gesture, so the grab
/// point stays under the pointer. Every step commits to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveGesture {
    id: FieldId,
    offset: Point,
}

impl MoveGesture {
    /// Start dragging `field` from canonical `pointer`.
    #[must_use]
    pub fn begin(field: &Field, pointer: Point) -> Self {
        Self { id: field.id.clone(), offset: pointer - Point::new(field.x, field.y) }
    }

    #[must_use]
    pub fn id(&self) -> &FieldId {
        &self.id
    }

    #[must_use]
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Move the field so the grab point sits under canonical `pointer`.
    ///
    /// Returns the committed box, or `None` if the field is gone.
    pub fn step(&self, store: &mut FieldStore, pointer: Point) -> Option<Rect> {
        let field = store.get(&self.id)?;
        let config = store.config();
        let max_x = (config.canvas_width - field.width).max(0.0);
        let max_y = (config.canvas_height - field.height).max(0.0);
        let target = pointer - self.offset;
        let x = target.x.clamp(0.0, max_x);
        let y = target.y.clamp(0.0, max_y);
        store.clamp_and_apply(&self.id, &GeometryPatch::position(x, y))
    }
}
