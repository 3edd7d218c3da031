#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{COLUMN_BOUNDARY_SLOP_PX, RESIZE_HANDLE_PX};
use crate::field::{Field, FieldId};
use crate::space::{CanvasSpace, Point, Rect};

/// Which part of a field was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    /// Square handle on the bottom-right corner.
    ResizeHandle,
    /// Boundary between table columns `i` and `i + 1`.
    ColumnBoundary(usize),
}

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub field_id: FieldId,
    pub part: HitPart,
}

/// Find the field part under canonical `pt`.
///
/// `fields` is in draw order; the topmost (last) field wins. Within a field
/// the resize handle beats column boundaries, which beat the body. Handle and
/// boundary sizes are fixed in display pixels and converted with the current
/// scale. Only the handle reaches outside the field's rect; a boundary slop
/// that spills past the left or right edge is clipped.
#[must_use]
pub fn hit_test(pt: Point, fields: &[&Field], space: &CanvasSpace) -> Option<Hit> {
    let half_handle = space.display_dist_to_canonical(RESIZE_HANDLE_PX / 2.0);
    let slop = space.display_dist_to_canonical(COLUMN_BOUNDARY_SLOP_PX);

    fields.iter().rev().find_map(|field| {
        let part = hit_field(pt, field, half_handle, slop)?;
        Some(Hit { field_id: field.id.clone(), part })
    })
}

fn hit_field(pt: Point, field: &Field, half_handle: f64, slop: f64) -> Option<HitPart> {
    let rect = field.rect();
    let handle = Rect::new(rect.right() - half_handle, rect.bottom() - half_handle, half_handle * 2.0, half_handle * 2.0);
    if handle.contains(pt) {
        return Some(HitPart::ResizeHandle);
    }
    if !rect.contains(pt) {
        return None;
    }
    let nearest = field
        .column_boundaries()
        .into_iter()
        .enumerate()
        .map(|(i, x)| (i, (pt.x - x).abs()))
        .filter(|(_, d)| *d <= slop)
        .min_by(|a, b| a.1.total_cmp(&b.1));
    Some(nearest.map_or(HitPart::Body, |(i, _)| HitPart::ColumnBoundary(i)))
}
