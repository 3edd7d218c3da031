//! JSON wire format: the loaded field list and the save payload.
//!
//! Loading is lenient. Every key is optional and a missing or mistyped value
//! falls back to a default (the store then clamps geometry and fixes labels,
//! fonts and table shape). A list entry that isn't an object is skipped. Only
//! text that isn't a JSON array is an error.
//!
//! The save payload rounds geometry to whole canonical units.

#[cfg(test)]
#[path = "wire_test.rs"]
mod wire_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::config::LayoutConfig;
use crate::consts::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_TABLE_COLS, DEFAULT_TABLE_ROWS};
use crate::field::{Field, FieldId, FieldKind, TableData};

/// Error returned by [`parse_fields`].
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("invalid field list JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One field as it appears in a loaded list.
///
/// A value of the wrong type reads as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldRecord {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub label: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub x: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub y: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub width: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub height: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub page: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub required: Option<bool>,
    #[serde(alias = "type", deserialize_with = "lenient")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub font_size: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub font_family: Option<String>,
    #[serde(alias = "tableData", deserialize_with = "lenient")]
    pub table: Option<TableRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableRecord {
    #[serde(deserialize_with = "lenient")]
    pub rows: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub cols: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub cells: Vec<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    pub column_widths: Option<Vec<f64>>,
}

/// Read any JSON value, then keep it only if it has the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_else(|err| {
        warn!(%err, "unusable value in field list, using default");
        T::default()
    }))
}

impl FieldRecord {
    /// Fill in defaults and build a [`Field`].
    #[must_use]
    pub fn into_field(self, config: &LayoutConfig) -> Field {
        let id = match self.id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => FieldId::new(id),
            None => {
                let id = FieldId::generate();
                warn!(assigned = %id, "loaded field without id");
                id
            }
        };
        let kind = match (self.kind.as_deref(), self.table) {
            (Some("table") | None, Some(table)) => FieldKind::Table(table.into_table(config)),
            (Some("table"), None) => {
                warn!(field = %id, "table field without table data");
                FieldKind::Table(TableData::new(DEFAULT_TABLE_ROWS, DEFAULT_TABLE_COLS, config.max_table_cols()))
            }
            (Some("simple" | "text") | None, _) => FieldKind::Simple,
            (Some(other), _) => {
                warn!(field = %id, kind = other, "unknown field kind, loading as simple");
                FieldKind::Simple
            }
        };
        Field {
            id,
            label: self.label.unwrap_or_default(),
            x: self.x.unwrap_or(0.0),
            y: self.y.unwrap_or(0.0),
            width: self.width.unwrap_or(config.min_field_width),
            height: self.height.unwrap_or(config.min_field_height),
            page: self.page.unwrap_or(1),
            required: self.required.unwrap_or(false),
            kind,
            font_size: self.font_size.unwrap_or(DEFAULT_FONT_SIZE),
            font_family: self.font_family.unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_owned()),
        }
    }
}

impl TableRecord {
    fn into_table(self, config: &LayoutConfig) -> TableData {
        let cols = self
            .cols
            .or_else(|| self.column_widths.as_ref().map(|w| count(w.len())))
            .or_else(|| self.cells.first().map(|row| count(row.len())))
            .unwrap_or(DEFAULT_TABLE_COLS);
        let rows = self.rows.or_else(|| Some(count(self.cells.len())).filter(|n| *n > 0)).unwrap_or(DEFAULT_TABLE_ROWS);
        let table = TableData::from_parts(
            rows,
            cols,
            self.cells,
            self.column_widths.clone(),
            config.min_column_ratio,
            config.max_table_cols(),
        );
        if let Some(widths) = &self.column_widths {
            if widths.len() != table.column_widths().len() {
                warn!(given = widths.len(), cols = table.cols(), "column widths reset to equal split");
            }
        }
        table
    }
}

/// Parse a JSON array of fields.
///
/// # Errors
///
/// Returns [`LoadError::Json`] if the text isn't a JSON array.
pub fn parse_fields(json: &str, config: &LayoutConfig) -> Result<Vec<Field>, LoadError> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let mut fields = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match FieldRecord::deserialize(entry) {
            Ok(record) => fields.push(record.into_field(config)),
            Err(err) => warn!(index, %err, "skipping field list entry"),
        }
    }
    Ok(fields)
}

/// A field in the save payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedField {
    pub id: FieldId,
    pub label: String,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    pub page: u32,
    pub required: bool,
    pub kind: &'static str,
    pub font_size: f64,
    pub font_family: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<ExportedTable>,
}

/// Table sub-structure, exported verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedTable {
    pub rows: u32,
    pub cols: u32,
    pub cells: Vec<Vec<String>>,
    pub column_widths: Vec<f64>,
}

/// Build the save payload for `fields`.
///
/// Geometry is rounded half away from zero. A rounded width or height that
/// would push the box past the rounded canvas edge is trimmed to fit.
#[must_use]
pub fn export_fields(fields: &[Field], config: &LayoutConfig) -> Vec<ExportedField> {
    let canvas_width = round(config.canvas_width);
    let canvas_height = round(config.canvas_height);
    fields
        .iter()
        .map(|f| {
            let x = round(f.x);
            let y = round(f.y);
            ExportedField {
                id: f.id.clone(),
                label: f.label.clone(),
                x,
                y,
                width: round(f.width).min(canvas_width - x),
                height: round(f.height).min(canvas_height - y),
                page: f.page,
                required: f.required,
                kind: f.kind.name(),
                font_size: f.font_size,
                font_family: f.font_family.clone(),
                table: f.table().map(|t| ExportedTable {
                    rows: t.rows(),
                    cols: t.cols(),
                    cells: t.cells().to_vec(),
                    column_widths: t.column_widths().to_vec(),
                }),
            }
        })
        .collect()
}

/// Serialize a save payload as pretty-printed JSON.
///
/// # Errors
///
/// Propagates `serde_json` serialization errors.
pub fn to_json(fields: &[ExportedField]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(fields)
}

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

#[allow(clippy::cast_possible_truncation)]
fn round(value: f64) -> i64 {
    value.round() as i64
}
