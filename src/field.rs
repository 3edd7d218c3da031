//! Field model: placed text slots and tables, in canonical coordinates.
//!
//! A [`Field`] is a page-scoped rectangle with display metadata. Table fields
//! carry a [`TableData`] whose column widths are stored as ratios of the
//! field's width. `TableData` keeps its own invariants (cell matrix shape,
//! ratio count, ratio floor, ratio sum); geometry invariants are enforced by
//! [`crate::store::FieldStore`].

#[cfg(test)]
#[path = "field_test.rs"]
mod field_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::RATIO_EPSILON;
use crate::space::Rect;

/// Opaque, stable identifier of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh random id (UUID v4).
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a field holds.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Free-form text slot.
    Simple,
    /// Grid of text cells with resizable columns.
    Table(TableData),
}

impl FieldKind {
    /// Wire name of the kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Table(_) => "table",
        }
    }
}

/// A placed element on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub id: FieldId,
    pub label: String,
    /// Left edge in canonical coordinates.
    pub x: f64,
    /// Top edge in canonical coordinates.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// 1-based page number.
    pub page: u32,
    /// Pass-through flag; the engine never reads it.
    pub required: bool,
    pub kind: FieldKind,
    pub font_size: f64,
    pub font_family: String,
}

impl Field {
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[must_use]
    pub fn table(&self) -> Option<&TableData> {
        match &self.kind {
            FieldKind::Table(table) => Some(table),
            FieldKind::Simple => None,
        }
    }

    pub(crate) fn table_mut(&mut self) -> Option<&mut TableData> {
        match &mut self.kind {
            FieldKind::Table(table) => Some(table),
            FieldKind::Simple => None,
        }
    }

    /// Canonical x of each interior column boundary, left to right.
    ///
    /// Boundary `i` separates column `i` from column `i + 1`. Empty for simple
    /// fields and single-column tables.
    #[must_use]
    pub fn column_boundaries(&self) -> Vec<f64> {
        let Some(table) = self.table() else {
            return Vec::new();
        };
        let mut offset = 0.0;
        let mut boundaries = Vec::with_capacity(table.column_widths.len().saturating_sub(1));
        for ratio in table.column_widths.iter().take(table.column_widths.len().saturating_sub(1)) {
            offset += ratio;
            boundaries.push(self.x + self.width * offset);
        }
        boundaries
    }
}

/// Table sub-structure of a [`FieldKind::Table`] field.
#[derive(Debug, Clone, PartialEq)]
pub struct TableData {
    rows: u32,
    cols: u32,
    cells: Vec<Vec<String>>,
    column_widths: Vec<f64>,
}

impl TableData {
    /// An empty `rows × cols` table with equal column widths.
    ///
    /// `rows` is raised to at least one; `cols` is clamped to `1..=max_cols`.
    #[must_use]
    pub fn new(rows: u32, cols: u32, max_cols: u32) -> Self {
        let rows = rows.max(1);
        let cols = cols.clamp(1, max_cols.max(1));
        Self {
            rows,
            cols,
            cells: vec![vec![String::new(); cols as usize]; rows as usize],
            column_widths: equal_ratios(cols as usize),
        }
    }

    /// Build a table from possibly inconsistent parts.
    ///
    /// The cell matrix is padded or truncated to `rows × cols`. Column widths
    /// that have the wrong count, contain non-positive or non-finite entries,
    /// or fall below `min_ratio` after rescaling to sum to one are replaced by
    /// an equal split.
    #[must_use]
    pub fn from_parts(
        rows: u32,
        cols: u32,
        cells: Vec<Vec<String>>,
        column_widths: Option<Vec<f64>>,
        min_ratio: f64,
        max_cols: u32,
    ) -> Self {
        let mut table = Self::new(rows, cols, max_cols);
        for (r, row) in cells.into_iter().take(table.rows as usize).enumerate() {
            for (c, text) in row.into_iter().take(table.cols as usize).enumerate() {
                table.cells[r][c] = text;
            }
        }
        if let Some(widths) = column_widths {
            table.column_widths = normalize_ratios(&widths, table.cols as usize, min_ratio);
        }
        table
    }

    #[must_use]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    #[must_use]
    pub fn cells(&self) -> &[Vec<String>] {
        &self.cells
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.cells.get(row).and_then(|r| r.get(col)).map(String::as_str)
    }

    #[must_use]
    pub fn column_widths(&self) -> &[f64] {
        &self.column_widths
    }

    /// Replace the text of one cell. Returns false when out of range.
    pub(crate) fn set_cell(&mut self, row: usize, col: usize, text: String) -> bool {
        let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) else {
            return false;
        };
        *cell = text;
        true
    }

    /// Write a full set of column ratios if they satisfy every table invariant.
    pub(crate) fn set_column_widths(&mut self, widths: &[f64], min_ratio: f64) -> bool {
        if !ratios_valid(widths, self.cols as usize, min_ratio) {
            return false;
        }
        self.column_widths = widths.to_vec();
        true
    }

    /// Change the table shape, keeping the text of surviving cells.
    ///
    /// Column ratios reset to an equal split when the column count changes.
    /// Returns false when the shape is unchanged.
    pub(crate) fn resize(&mut self, rows: u32, cols: u32, max_cols: u32) -> bool {
        let rows = rows.max(1);
        let cols = cols.clamp(1, max_cols.max(1));
        if rows == self.rows && cols == self.cols {
            return false;
        }
        self.cells.resize_with(rows as usize, Vec::new);
        for row in &mut self.cells {
            row.resize(cols as usize, String::new());
        }
        if cols != self.cols {
            self.column_widths = equal_ratios(cols as usize);
        }
        self.rows = rows;
        self.cols = cols;
        true
    }
}

/// `cols` equal ratios summing to one.
#[must_use]
pub fn equal_ratios(cols: usize) -> Vec<f64> {
    if cols == 0 {
        return Vec::new();
    }
    #[allow(clippy::cast_precision_loss)]
    let share = 1.0 / cols as f64;
    vec![share; cols]
}

fn normalize_ratios(widths: &[f64], cols: usize, min_ratio: f64) -> Vec<f64> {
    if widths.len() != cols || widths.iter().any(|w| !w.is_finite() || *w <= 0.0) {
        return equal_ratios(cols);
    }
    let sum: f64 = widths.iter().sum();
    let scaled: Vec<f64> = widths.iter().map(|w| w / sum).collect();
    if scaled.iter().any(|w| *w < min_ratio - RATIO_EPSILON) {
        return equal_ratios(cols);
    }
    scaled
}

fn ratios_valid(widths: &[f64], cols: usize, min_ratio: f64) -> bool {
    widths.len() == cols
        && widths.iter().all(|w| w.is_finite() && *w >= min_ratio - RATIO_EPSILON)
        && (widths.iter().sum::<f64>() - 1.0).abs() <= RATIO_EPSILON
}
