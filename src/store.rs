//! Field store: the authoritative, ordered collection of fields.
//!
//! Fields keep insertion order; later fields draw (and hit-test) above earlier
//! ones. Every geometric write goes through [`FieldStore::clamp_and_apply`],
//! which clamps proposals against the canvas and the minimum field size before
//! touching the field. Gesture controllers have no other write path.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::LayoutConfig;
use crate::consts::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE};
use crate::field::{Field, FieldId, FieldKind, TableData};
use crate::space::Rect;

/// Error returned by [`FieldStore::add`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A field with this id is already in the store.
    #[error("field id already exists: {0}")]
    DuplicateId(FieldId),
}

/// Sparse geometry proposal. Only present values are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeometryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Full replacement ratios; ignored for simple fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_widths: Option<Vec<f64>>,
}

impl GeometryPatch {
    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Self::default() }
    }

    #[must_use]
    pub fn size(width: f64, height: f64) -> Self {
        Self { width: Some(width), height: Some(height), ..Self::default() }
    }

    #[must_use]
    pub fn columns(column_widths: Vec<f64>) -> Self {
        Self { column_widths: Some(column_widths), ..Self::default() }
    }
}

/// In-memory store of the fields of one template.
#[derive(Debug, Clone)]
pub struct FieldStore {
    fields: Vec<Field>,
    config: LayoutConfig,
    page_count: u32,
}

impl FieldStore {
    /// Create an empty single-page store.
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        Self { fields: Vec::new(), config, page_count: 1 }
    }

    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    #[must_use]
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Set the number of pages in the underlying document.
    ///
    /// Fields on pages past the new count move to the last page.
    pub fn set_page_count(&mut self, page_count: u32) {
        let page_count = page_count.max(1);
        self.page_count = page_count;
        for field in &mut self.fields {
            if field.page > page_count {
                debug!(field = %field.id, from = field.page, to = page_count, "field moved to last page");
                field.page = page_count;
            }
        }
    }

    /// Insert a new field after normalizing it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] if a field with the same id exists;
    /// the store is left unchanged.
    pub fn add(&mut self, mut field: Field) -> Result<(), StoreError> {
        if self.contains(&field.id) {
            return Err(StoreError::DuplicateId(field.id));
        }
        self.normalize(&mut field);
        self.fields.push(field);
        Ok(())
    }

    /// Replace every field with a loaded list and return how many were stored.
    ///
    /// Ids repeated within the list are reassigned instead of failing the load.
    pub fn replace_all(&mut self, fields: Vec<Field>) -> usize {
        self.fields.clear();
        for mut field in fields {
            if self.contains(&field.id) {
                let fresh = FieldId::generate();
                warn!(duplicate = %field.id, reassigned = %fresh, "duplicate field id in loaded list");
                field.id = fresh;
            }
            self.normalize(&mut field);
            self.fields.push(field);
        }
        self.fields.len()
    }

    /// Remove a field by id, returning it if it was present.
    pub fn remove(&mut self, id: &FieldId) -> Option<Field> {
        let index = self.fields.iter().position(|f| &f.id == id)?;
        Some(self.fields.remove(index))
    }

    #[must_use]
    pub fn get(&self, id: &FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| &f.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &FieldId) -> bool {
        self.get(id).is_some()
    }

    /// All fields in draw order.
    #[must_use]
    pub fn all(&self) -> &[Field] {
        &self.fields
    }

    /// Fields on page `page`, in draw order.
    #[must_use]
    pub fn by_page(&self, page: u32) -> Vec<&Field> {
        self.fields.iter().filter(|f| f.page == page).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Merge a partial geometry update. Returns false if the field doesn't exist.
    pub fn update(&mut self, id: &FieldId, patch: &GeometryPatch) -> bool {
        self.clamp_and_apply(id, patch).is_some()
    }

    /// Clamp a geometry proposal into the legal range and write it.
    ///
    /// Returns the resulting box, or `None` if the field doesn't exist. Column
    /// widths are written only when they form a valid ratio set for the table.
    pub fn clamp_and_apply(&mut self, id: &FieldId, patch: &GeometryPatch) -> Option<Rect> {
        let config = self.config;
        let field = self.fields.iter_mut().find(|f| &f.id == id)?;
        let rect = clamp_geometry(field.rect(), patch, &config);
        field.x = rect.x;
        field.y = rect.y;
        field.width = rect.width;
        field.height = rect.height;
        if let Some(widths) = &patch.column_widths {
            match field.table_mut() {
                Some(table) => {
                    if !table.set_column_widths(widths, config.min_column_ratio) {
                        debug!(field = %id, ?widths, "column widths rejected");
                    }
                }
                None => debug!(field = %id, "column widths ignored for simple field"),
            }
        }
        Some(rect)
    }

    /// Rename a field. Blank labels are rejected.
    pub fn set_label(&mut self, id: &FieldId, label: &str) -> bool {
        let label = label.trim();
        if label.is_empty() {
            return false;
        }
        let Some(field) = self.get_mut(id) else {
            return false;
        };
        label.clone_into(&mut field.label);
        true
    }

    pub fn set_required(&mut self, id: &FieldId, required: bool) -> bool {
        let Some(field) = self.get_mut(id) else {
            return false;
        };
        field.required = required;
        true
    }

    /// Update display font metadata. Non-positive or non-finite sizes and blank families are ignored.
    pub fn set_font(&mut self, id: &FieldId, size: Option<f64>, family: Option<&str>) -> bool {
        let Some(field) = self.get_mut(id) else {
            return false;
        };
        if let Some(size) = size.filter(|s| s.is_finite() && *s > 0.0) {
            field.font_size = size;
        }
        if let Some(family) = family.map(str::trim).filter(|f| !f.is_empty()) {
            family.clone_into(&mut field.font_family);
        }
        true
    }

    /// Replace the text of one table cell.
    pub fn set_cell(&mut self, id: &FieldId, row: usize, col: usize, text: impl Into<String>) -> bool {
        self.get_mut(id)
            .and_then(Field::table_mut)
            .is_some_and(|table| table.set_cell(row, col, text.into()))
    }

    /// Change a table's row and column count.
    pub fn resize_table(&mut self, id: &FieldId, rows: u32, cols: u32) -> bool {
        let max_cols = self.config.max_table_cols();
        self.get_mut(id)
            .and_then(Field::table_mut)
            .is_some_and(|table| table.resize(rows, cols, max_cols))
    }

    fn get_mut(&mut self, id: &FieldId) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| &f.id == id)
    }

    /// Bring an incoming field in line with every store invariant.
    fn normalize(&self, field: &mut Field) {
        let current = Rect::new(
            finite_or(field.x, 0.0),
            finite_or(field.y, 0.0),
            finite_or(field.width, self.config.min_field_width),
            finite_or(field.height, self.config.min_field_height),
        );
        let rect = clamp_geometry(current, &GeometryPatch::default(), &self.config);
        field.x = rect.x;
        field.y = rect.y;
        field.width = rect.width;
        field.height = rect.height;
        field.page = field.page.clamp(1, self.page_count);
        if field.label.trim().is_empty() {
            field.label = format!("Field {}", self.fields.len() + 1);
        }
        if !field.font_size.is_finite() || field.font_size <= 0.0 {
            field.font_size = DEFAULT_FONT_SIZE;
        }
        if field.font_family.trim().is_empty() {
            DEFAULT_FONT_FAMILY.clone_into(&mut field.font_family);
        }
        if let FieldKind::Table(table) = &mut field.kind {
            *table = TableData::from_parts(
                table.rows(),
                table.cols(),
                table.cells().to_vec(),
                Some(table.column_widths().to_vec()),
                self.config.min_column_ratio,
                self.config.max_table_cols(),
            );
        }
    }
}

impl Default for FieldStore {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

/// Apply `patch` to `current` and clamp the result onto the canvas.
///
/// Sizes are held to `[min, canvas]`. A size proposed without a matching
/// position keeps the top-left edge fixed and is limited to the space left to
/// the canvas edge. Positions are held to `[0, canvas − size]`. Non-finite
/// proposals are ignored.
#[must_use]
pub fn clamp_geometry(current: Rect, patch: &GeometryPatch, config: &LayoutConfig) -> Rect {
    let pick = |proposed: Option<f64>, fallback: f64| proposed.filter(|v| v.is_finite()).unwrap_or(fallback);

    let x = pick(patch.x, current.x);
    let y = pick(patch.y, current.y);
    let mut width = pick(patch.width, current.width).max(config.min_field_width).min(config.canvas_width);
    let mut height = pick(patch.height, current.height).max(config.min_field_height).min(config.canvas_height);

    if patch.width.is_some() && patch.x.is_none() {
        width = width.min(config.canvas_width - x.max(0.0)).max(config.min_field_width);
    }
    if patch.height.is_some() && patch.y.is_none() {
        height = height.min(config.canvas_height - y.max(0.0)).max(config.min_field_height);
    }

    // max/min instead of clamp: never panics, even for an unvalidated config.
    Rect {
        x: x.min(config.canvas_width - width).max(0.0),
        y: y.min(config.canvas_height - height).max(0.0),
        width,
        height,
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}
