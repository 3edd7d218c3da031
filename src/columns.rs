//! Table column boundary dragging.
//!
//! Dragging the boundary between columns `i` and `i + 1` moves width between
//! exactly those two columns. Their combined ratio is held constant, so the
//! total of all ratios never changes. Both columns keep at least
//! `min_column_ratio`. The gesture is start-anchored: every step recomputes
//! from the ratios captured at gesture start.

#[cfg(test)]
#[path = "columns_test.rs"]
mod columns_test;

use crate::field::{Field, FieldId};
use crate::store::{FieldStore, GeometryPatch};

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnGesture {
    id: FieldId,
    column: usize,
    start_pointer_x: f64,
    start_widths: Vec<f64>,
}

impl ColumnGesture {
    /// Start dragging the boundary right of `column` on a table field.
    ///
    /// Returns `None` for simple fields and for indices without a column to
    /// their right.
    #[must_use]
    pub fn begin(field: &Field, column: usize, pointer_x: f64) -> Option<Self> {
        let table = field.table()?;
        if column + 1 >= table.column_widths().len() {
            return None;
        }
        Some(Self {
            id: field.id.clone(),
            column,
            start_pointer_x: pointer_x,
            start_widths: table.column_widths().to_vec(),
        })
    }

    #[must_use]
    pub fn id(&self) -> &FieldId {
        &self.id
    }

    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    #[must_use]
    pub fn start_widths(&self) -> &[f64] {
        &self.start_widths
    }

    /// Redistribute width for canonical pointer x and commit the full ratio set.
    ///
    /// Returns the committed ratios, or `None` if the field is gone.
    pub fn step(&self, store: &mut FieldStore, pointer_x: f64) -> Option<Vec<f64>> {
        let table_width = store.get(&self.id)?.width;
        let min_ratio = store.config().min_column_ratio;
        let delta_ratio = (pointer_x - self.start_pointer_x) / table_width;
        let widths = redistribute(&self.start_widths, self.column, delta_ratio, min_ratio)?;
        store.clamp_and_apply(&self.id, &GeometryPatch::columns(widths.clone()))?;
        Some(widths)
    }
}

/// Shift `delta_ratio` of width from column `column + 1` to column `column`.
///
/// Returns `None` when the pair doesn't exist, the delta isn't finite, or the
/// pair is too narrow to hold two minimum-width columns.
#[must_use]
pub fn redistribute(start: &[f64], column: usize, delta_ratio: f64, min_ratio: f64) -> Option<Vec<f64>> {
    let left = *start.get(column)?;
    let right = *start.get(column + 1)?;
    let pair = left + right;
    if !delta_ratio.is_finite() || pair < 2.0 * min_ratio {
        return None;
    }
    let new_left = (left + delta_ratio).clamp(min_ratio, pair - min_ratio);
    let mut widths = start.to_vec();
    widths[column] = new_left;
    widths[column + 1] = pair - new_left;
    Some(widths)
}
