//! Drag-to-create: the selection box that becomes a new field.
//!
//! The box drawn during a selection gesture is advisory only; nothing is
//! written to the store. When the gesture ends with a large enough box it
//! becomes a [`PendingSelection`], which waits for the host to collect field
//! metadata (label, required flag, simple or table) and then materializes
//! through [`PendingSelection::into_field`].

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::consts::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE};
use crate::field::{Field, FieldId, FieldKind, TableData};
use crate::space::{Point, Rect};

/// An in-flight selection gesture, in canonical coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionGesture {
    origin: Point,
    current: Point,
}

impl SelectionGesture {
    #[must_use]
    pub fn begin(origin: Point) -> Self {
        Self { origin, current: origin }
    }

    pub fn update(&mut self, pointer: Point) {
        self.current = pointer;
    }

    /// The box spanned so far.
    #[must_use]
    pub fn preview(&self) -> Rect {
        Rect::from_corners(self.origin, self.current)
    }

    /// End the gesture. Boxes smaller than `min_create` on either axis are dropped.
    #[must_use]
    pub fn finish(self, config: &LayoutConfig, page: u32) -> Option<PendingSelection> {
        let rect = self.preview();
        if rect.width >= config.min_create && rect.height >= config.min_create {
            Some(PendingSelection { rect, page })
        } else {
            None
        }
    }
}

/// A committed selection box waiting for metadata before it becomes a field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PendingSelection {
    pub rect: Rect,
    /// Page the box was drawn on.
    pub page: u32,
}

/// Metadata supplied by the host for a pending selection.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldMeta {
    /// Caller-chosen id; a fresh one is generated when absent.
    pub id: Option<FieldId>,
    pub label: String,
    pub required: bool,
    /// Table shape; `None` creates a simple field.
    pub table: Option<TableShape>,
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
}

/// Row and column count of a new table field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TableShape {
    pub rows: u32,
    pub cols: u32,
}

impl PendingSelection {
    /// Build the field described by this box and `meta`.
    ///
    /// The result is not yet clamped; the store normalizes it on insert.
    #[must_use]
    pub fn into_field(self, meta: FieldMeta, config: &LayoutConfig) -> Field {
        let kind = match meta.table {
            Some(shape) => FieldKind::Table(TableData::new(shape.rows, shape.cols, config.max_table_cols())),
            None => FieldKind::Simple,
        };
        Field {
            id: meta.id.unwrap_or_else(FieldId::generate),
            label: meta.label.trim().to_owned(),
            x: self.rect.x,
            y: self.rect.y,
            width: self.rect.width,
            height: self.rect.height,
            page: self.page,
            required: meta.required,
            kind,
            font_size: meta.font_size.unwrap_or(DEFAULT_FONT_SIZE),
            font_family: meta.font_family.unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_owned()),
        }
    }
}
