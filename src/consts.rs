//! Shared numeric constants for the layout engine.

// ── Canvas ──────────────────────────────────────────────────────

/// Width of the canonical page in canonical pixels (A4 at 150 dpi).
pub const CANVAS_WIDTH: f64 = 1240.0;

/// Height of the canonical page in canonical pixels (A4 at 150 dpi).
pub const CANVAS_HEIGHT: f64 = 1754.0;

/// Smallest display scale the editor will render at.
pub const MIN_SCALE: f64 = 0.3;

/// Largest display scale the editor will render at.
pub const MAX_SCALE: f64 = 2.0;

// ── Field geometry ──────────────────────────────────────────────

pub const MIN_FIELD_WIDTH: f64 = 50.0;
pub const MIN_FIELD_HEIGHT: f64 = 20.0;

/// Both sides of a selection box must reach this size to produce a field.
pub const MIN_CREATE: f64 = 20.0;

/// Smallest share of a table's width a single column may take.
pub const MIN_COLUMN_RATIO: f64 = 0.05;

/// Tolerance for column ratio sums and float comparisons on ratios.
pub const RATIO_EPSILON: f64 = 1e-6;

// ── Metadata defaults ───────────────────────────────────────────

pub const DEFAULT_FONT_SIZE: f64 = 12.0;
pub const DEFAULT_FONT_FAMILY: &str = "Helvetica";

/// Shape of a table record that names the table kind but carries no table data.
pub const DEFAULT_TABLE_ROWS: u32 = 2;
pub const DEFAULT_TABLE_COLS: u32 = 2;

// ── Hit-testing ─────────────────────────────────────────────────

/// Side of the square resize handle centred on a field's bottom-right corner, in display pixels.
pub const RESIZE_HANDLE_PX: f64 = 12.0;

/// Horizontal slop around a table column boundary, in display pixels.
pub const COLUMN_BOUNDARY_SLOP_PX: f64 = 4.0;
