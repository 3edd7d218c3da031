#![allow(clippy::float_cmp)]

use super::*;
use crate::field::{FieldKind, TableData};
use crate::selection::TableShape;

// =============================================================
// Helpers
// =============================================================

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn simple(id: &str, x: f64, y: f64, width: f64, height: f64, page: u32) -> Field {
    Field {
        id: FieldId::new(id),
        label: id.to_owned(),
        x,
        y,
        width,
        height,
        page,
        required: false,
        kind: FieldKind::Simple,
        font_size: 12.0,
        font_family: "Helvetica".to_owned(),
    }
}

fn table(id: &str, x: f64, y: f64, width: f64, height: f64, widths: &[f64]) -> Field {
    let cols = u32::try_from(widths.len()).unwrap();
    let mut field = simple(id, x, y, width, height, 1);
    field.kind = FieldKind::Table(TableData::from_parts(2, cols, Vec::new(), Some(widths.to_vec()), 0.05, 20));
    field
}

fn editor_with(fields: Vec<Field>) -> EditorCore {
    let mut editor = EditorCore::default();
    editor.set_page_count(3);
    editor.load_fields(fields);
    editor
}

fn id(s: &str) -> FieldId {
    FieldId::new(s)
}

fn rect_of(editor: &EditorCore, s: &str) -> Rect {
    editor.field(&id(s)).unwrap().rect()
}

fn widths_of(editor: &EditorCore, s: &str) -> Vec<f64> {
    editor.field(&id(s)).unwrap().table().unwrap().column_widths().to_vec()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================
// Construction and data inputs
// =============================================================

#[test]
fn default_editor_is_idle_on_page_one() {
    let editor = EditorCore::default();
    assert_eq!(editor.current_page(), 1);
    assert!(editor.active_gesture_kind().is_none());
    assert!(editor.selection().is_none());
    assert!(editor.pending_selection().is_none());
    assert_eq!(editor.space.scale(), 1.0);
}

#[test]
fn load_fields_replaces_and_clears_transient_state() {
    let mut editor = editor_with(vec![simple("a", 10.0, 10.0, 100.0, 40.0, 1)]);
    editor.select(Some(id("a")));
    editor.on_pointer_down(pt(50.0, 30.0), Button::Primary);
    assert_eq!(editor.load_fields(vec![simple("b", 0.0, 0.0, 60.0, 30.0, 1)]), 1);
    assert!(editor.active_gesture_kind().is_none());
    assert!(editor.selection().is_none());
    assert!(editor.field(&id("a")).is_none());
}

#[test]
fn set_display_width_returns_scale() {
    let mut editor = EditorCore::default();
    assert_eq!(editor.set_display_width(620.0), 0.5);
    assert_eq!(editor.set_display_width(10.0), 0.3);
}

#[test]
fn shrinking_page_count_moves_cursor_and_fields() {
    let mut editor = editor_with(vec![simple("c", 10.0, 10.0, 100.0, 40.0, 3)]);
    editor.set_page(3);
    let actions = editor.set_page_count(2);
    assert!(actions.contains(&Action::PageChanged { page: 2 }));
    assert_eq!(editor.current_page(), 2);
    assert_eq!(editor.field(&id("c")).unwrap().page, 2);
}

#[test]
fn growing_page_count_keeps_cursor() {
    let mut editor = EditorCore::default();
    assert_eq!(editor.set_page_count(5), vec![Action::RenderNeeded]);
    assert_eq!(editor.current_page(), 1);
    assert_eq!(editor.store.page_count(), 5);
}

// =============================================================
// Selection (drag-to-create)
// =============================================================

#[test]
fn drag_on_empty_canvas_requests_field() {
    let mut editor = EditorCore::default();
    editor.on_pointer_down(pt(100.0, 100.0), Button::Primary);
    assert_eq!(editor.active_gesture_kind(), Some(GestureKind::Creating));
    editor.on_pointer_move(pt(150.0, 180.0));
    assert_eq!(editor.selection_preview(), Some(Rect::new(100.0, 100.0, 50.0, 80.0)));
    let actions = editor.on_pointer_up(pt(150.0, 180.0));
    let expected = PendingSelection { rect: Rect::new(100.0, 100.0, 50.0, 80.0), page: 1 };
    assert_eq!(actions[0], Action::FieldCreateRequested { selection: expected });
    assert_eq!(editor.pending_selection(), Some(&expected));
    assert!(editor.selection_preview().is_none());
    assert!(editor.store.is_empty());
}

#[test]
fn small_drag_is_discarded_silently() {
    let mut editor = EditorCore::default();
    editor.on_pointer_down(pt(100.0, 100.0), Button::Primary);
    editor.on_pointer_move(pt(110.0, 112.0));
    let actions = editor.on_pointer_up(pt(110.0, 112.0));
    assert_eq!(actions, vec![Action::RenderNeeded]);
    assert!(editor.pending_selection().is_none());
    assert!(editor.active_gesture_kind().is_none());
}

#[test]
fn pointer_up_point_is_applied_to_selection() {
    let mut editor = EditorCore::default();
    editor.on_pointer_down(pt(100.0, 100.0), Button::Primary);
    editor.on_pointer_up(pt(140.0, 130.0));
    assert_eq!(editor.pending_selection().unwrap().rect, Rect::new(100.0, 100.0, 40.0, 30.0));
}

#[test]
fn selection_is_in_canonical_units() {
    let mut editor = EditorCore::default();
    editor.set_display_width(620.0);
    editor.on_pointer_down(pt(50.0, 50.0), Button::Primary);
    editor.on_pointer_up(pt(75.0, 90.0));
    assert_eq!(editor.pending_selection().unwrap().rect, Rect::new(100.0, 100.0, 50.0, 80.0));
}

#[test]
fn selection_is_clamped_to_canvas() {
    let mut editor = EditorCore::default();
    editor.on_pointer_down(pt(1200.0, 1700.0), Button::Primary);
    editor.on_pointer_up(pt(1400.0, 1900.0));
    assert_eq!(editor.pending_selection().unwrap().rect, Rect::new(1200.0, 1700.0, 40.0, 54.0));
}

#[test]
fn new_selection_discards_old_pending() {
    let mut editor = EditorCore::default();
    editor.on_pointer_down(pt(100.0, 100.0), Button::Primary);
    editor.on_pointer_up(pt(200.0, 200.0));
    editor.on_pointer_down(pt(300.0, 300.0), Button::Primary);
    assert!(editor.pending_selection().is_none());
}

#[test]
fn non_primary_button_is_ignored() {
    let mut editor = EditorCore::default();
    assert!(editor.on_pointer_down(pt(100.0, 100.0), Button::Secondary).is_empty());
    assert!(editor.on_pointer_down(pt(100.0, 100.0), Button::Middle).is_empty());
    assert!(editor.active_gesture_kind().is_none());
}

#[test]
fn non_finite_pointer_is_ignored() {
    let mut editor = EditorCore::default();
    assert!(editor.on_pointer_down(pt(f64::NAN, 10.0), Button::Primary).is_empty());
    editor.on_pointer_down(pt(100.0, 100.0), Button::Primary);
    assert!(editor.on_pointer_move(pt(f64::INFINITY, 10.0)).is_empty());
    assert_eq!(editor.selection_preview(), Some(Rect::new(100.0, 100.0, 0.0, 0.0)));
}

// =============================================================
// Commit / discard
// =============================================================

fn editor_with_pending() -> EditorCore {
    let mut editor = EditorCore::default();
    editor.on_pointer_down(pt(100.0, 100.0), Button::Primary);
    editor.on_pointer_up(pt(300.0, 160.0));
    editor
}

#[test]
fn commit_creates_simple_field() {
    let mut editor = editor_with_pending();
    let meta = FieldMeta { id: Some(id("name")), label: "Name".to_owned(), ..FieldMeta::default() };
    assert_eq!(editor.commit_pending(meta).unwrap(), Some(id("name")));
    let field = editor.field(&id("name")).unwrap();
    assert_eq!(field.rect(), Rect::new(100.0, 100.0, 200.0, 60.0));
    assert_eq!(field.kind, FieldKind::Simple);
    assert!(editor.pending_selection().is_none());
}

#[test]
fn commit_creates_table_field() {
    let mut editor = editor_with_pending();
    let meta = FieldMeta { table: Some(TableShape { rows: 3, cols: 4 }), ..FieldMeta::default() };
    let new_id = editor.commit_pending(meta).unwrap().unwrap();
    let table = editor.field(&new_id).unwrap().table().unwrap();
    assert_eq!((table.rows(), table.cols()), (3, 4));
    assert_eq!(table.column_widths(), &[0.25, 0.25, 0.25, 0.25]);
}

#[test]
fn commit_blank_label_gets_default() {
    let mut editor = editor_with_pending();
    let new_id = editor.commit_pending(FieldMeta::default()).unwrap().unwrap();
    assert_eq!(editor.field(&new_id).unwrap().label, "Field 1");
}

#[test]
fn commit_duplicate_id_keeps_pending() {
    let mut editor = editor_with_pending();
    editor.store.add(simple("dup", 500.0, 500.0, 60.0, 30.0, 1)).unwrap();
    let meta = FieldMeta { id: Some(id("dup")), ..FieldMeta::default() };
    let err = editor.commit_pending(meta).unwrap_err();
    assert_eq!(err, StoreError::DuplicateId(id("dup")));
    assert!(editor.pending_selection().is_some());
    assert_eq!(editor.store.len(), 1);
}

#[test]
fn commit_without_pending_is_none() {
    let mut editor = EditorCore::default();
    assert_eq!(editor.commit_pending(FieldMeta::default()).unwrap(), None);
}

#[test]
fn discard_pending_drops_selection() {
    let mut editor = editor_with_pending();
    assert!(editor.discard_pending());
    assert!(!editor.discard_pending());
    assert!(editor.store.is_empty());
}

// =============================================================
// Move
// =============================================================

#[test]
fn pointer_down_on_body_selects_and_moves() {
    let mut editor = editor_with(vec![simple("a", 10.0, 10.0, 100.0, 40.0, 1)]);
    let actions = editor.on_pointer_down(pt(50.0, 30.0), Button::Primary);
    assert_eq!(actions[0], Action::SelectionChanged { id: Some(id("a")) });
    assert_eq!(editor.active_gesture_kind(), Some(GestureKind::Dragging));
    let actions = editor.on_pointer_move(pt(90.0, 60.0));
    let moved = Rect::new(50.0, 40.0, 100.0, 40.0);
    assert_eq!(actions[0], Action::FieldUpdated { id: id("a"), rect: moved });
    assert_eq!(rect_of(&editor, "a"), moved);
}

#[test]
fn move_keeps_grab_offset() {
    let mut editor = editor_with(vec![simple("a", 10.0, 10.0, 100.0, 40.0, 1)]);
    editor.on_pointer_down(pt(60.0, 20.0), Button::Primary);
    editor.on_pointer_move(pt(300.0, 300.0));
    editor.on_pointer_move(pt(200.0, 100.0));
    assert_eq!(rect_of(&editor, "a"), Rect::new(150.0, 90.0, 100.0, 40.0));
}

#[test]
fn move_is_clamped_to_canvas() {
    let mut editor = editor_with(vec![simple("a", 10.0, 10.0, 100.0, 40.0, 1)]);
    editor.on_pointer_down(pt(20.0, 20.0), Button::Primary);
    editor.on_pointer_move(pt(-40.0, -40.0));
    assert_eq!(rect_of(&editor, "a"), Rect::new(0.0, 0.0, 100.0, 40.0));
    editor.on_pointer_move(pt(5000.0, 5000.0));
    assert_eq!(rect_of(&editor, "a"), Rect::new(1140.0, 1714.0, 100.0, 40.0));
}

#[test]
fn pointer_up_ends_move_without_change() {
    let mut editor = editor_with(vec![simple("a", 10.0, 10.0, 100.0, 40.0, 1)]);
    editor.on_pointer_down(pt(20.0, 20.0), Button::Primary);
    editor.on_pointer_move(pt(30.0, 30.0));
    assert_eq!(editor.on_pointer_up(pt(500.0, 500.0)), vec![Action::RenderNeeded]);
    assert_eq!(rect_of(&editor, "a"), Rect::new(20.0, 20.0, 100.0, 40.0));
    assert!(editor.active_gesture_kind().is_none());
}

#[test]
fn move_at_half_scale_uses_canonical_pointer() {
    let mut editor = editor_with(vec![simple("a", 100.0, 100.0, 100.0, 40.0, 1)]);
    editor.set_display_width(620.0);
    editor.on_pointer_down(pt(60.0, 60.0), Button::Primary);
    editor.on_pointer_move(pt(70.0, 60.0));
    assert_eq!(rect_of(&editor, "a"), Rect::new(120.0, 100.0, 100.0, 40.0));
}

#[test]
fn topmost_field_is_picked() {
    let mut editor = editor_with(vec![
        simple("under", 10.0, 10.0, 100.0, 40.0, 1),
        simple("over", 30.0, 20.0, 100.0, 40.0, 1),
    ]);
    editor.on_pointer_down(pt(50.0, 30.0), Button::Primary);
    assert_eq!(editor.selection(), Some(&id("over")));
}

#[test]
fn fields_on_other_pages_are_not_hit() {
    let mut editor = editor_with(vec![simple("b", 10.0, 10.0, 100.0, 40.0, 2)]);
    editor.on_pointer_down(pt(50.0, 30.0), Button::Primary);
    assert_eq!(editor.active_gesture_kind(), Some(GestureKind::Creating));
    assert!(editor.selection().is_none());
}

// =============================================================
// Resize
// =============================================================

#[test]
fn pointer_down_on_handle_resizes() {
    let mut editor = editor_with(vec![simple("a", 10.0, 10.0, 100.0, 40.0, 1)]);
    editor.on_pointer_down(pt(110.0, 50.0), Button::Primary);
    assert_eq!(editor.active_gesture_kind(), Some(GestureKind::Resizing));
    editor.on_pointer_move(pt(140.0, 70.0));
    assert_eq!(rect_of(&editor, "a"), Rect::new(10.0, 10.0, 130.0, 60.0));
}

#[test]
fn resize_at_half_scale_divides_delta() {
    let mut editor = editor_with(vec![simple("a", 10.0, 10.0, 100.0, 40.0, 1)]);
    editor.set_display_width(620.0);
    editor.on_pointer_down(pt(55.0, 25.0), Button::Primary);
    assert_eq!(editor.active_gesture_kind(), Some(GestureKind::Resizing));
    editor.on_pointer_move(pt(65.0, 30.0));
    assert_eq!(rect_of(&editor, "a"), Rect::new(10.0, 10.0, 120.0, 50.0));
}

#[test]
fn resize_respects_minimum() {
    let mut editor = editor_with(vec![simple("a", 10.0, 10.0, 100.0, 40.0, 1)]);
    editor.on_pointer_down(pt(110.0, 50.0), Button::Primary);
    editor.on_pointer_move(pt(0.0, 0.0));
    assert_eq!(rect_of(&editor, "a"), Rect::new(10.0, 10.0, 50.0, 20.0));
}

// =============================================================
// Column widths
// =============================================================

#[test]
fn pointer_down_left_of_narrow_column_starts_selection() {
    let mut editor = editor_with(vec![table("t", 500.0, 500.0, 100.0, 100.0, &[0.05, 0.95])]);
    editor.set_display_width(372.0);
    editor.on_pointer_down(pt(492.0 * 0.3, 550.0 * 0.3), Button::Primary);
    assert_eq!(editor.active_gesture_kind(), Some(GestureKind::Creating));
    assert_eq!(editor.selection(), None);
}

#[test]
fn pointer_down_on_boundary_resizes_columns() {
    let mut editor = editor_with(vec![table("t", 100.0, 100.0, 200.0, 80.0, &[0.5, 0.5])]);
    editor.on_pointer_down(pt(200.0, 140.0), Button::Primary);
    assert_eq!(editor.active_gesture_kind(), Some(GestureKind::ResizingColumn));
    let actions = editor.on_pointer_move(pt(240.0, 140.0));
    match &actions[0] {
        Action::ColumnsUpdated { id: updated, column_widths } => {
            assert_eq!(updated, &id("t"));
            assert!(approx(column_widths[0], 0.7));
        }
        other => panic!("unexpected action {other:?}"),
    }
    let widths = widths_of(&editor, "t");
    assert!(approx(widths[0], 0.7) && approx(widths[1], 0.3));
    assert_eq!(rect_of(&editor, "t"), Rect::new(100.0, 100.0, 200.0, 80.0));
}

#[test]
fn begin_column_resize_rejects_simple_field() {
    let mut editor = editor_with(vec![simple("a", 10.0, 10.0, 100.0, 40.0, 1)]);
    assert!(!editor.begin_column_resize(&id("a"), 0, 50.0));
    assert!(editor.active_gesture_kind().is_none());
}

#[test]
fn begin_column_resize_rejects_last_column() {
    let mut editor = editor_with(vec![table("t", 100.0, 100.0, 200.0, 80.0, &[0.5, 0.5])]);
    assert!(!editor.begin_column_resize(&id("t"), 1, 300.0));
    assert!(editor.begin_column_resize(&id("t"), 0, 200.0));
}

// =============================================================
// Arbitration
// =============================================================

#[test]
fn resize_cannot_claim_while_moving() {
    let mut editor = editor_with(vec![simple("a", 10.0, 10.0, 100.0, 40.0, 1)]);
    assert!(editor.begin_move(&id("a"), pt(20.0, 20.0)));
    assert!(!editor.begin_resize(&id("a"), pt(110.0, 50.0)));
    assert!(!editor.begin_selection(pt(500.0, 500.0)));
    assert_eq!(editor.active_gesture_kind(), Some(GestureKind::Dragging));
}

#[test]
fn pointer_down_during_gesture_is_ignored() {
    let mut editor = editor_with(vec![simple("a", 10.0, 10.0, 100.0, 40.0, 1)]);
    editor.on_pointer_down(pt(500.0, 500.0), Button::Primary);
    assert!(editor.on_pointer_down(pt(50.0, 30.0), Button::Primary).is_empty());
    assert_eq!(editor.active_gesture_kind(), Some(GestureKind::Creating));
    assert!(editor.selection().is_none());
}

#[test]
fn begin_move_requires_visible_target() {
    let mut editor = editor_with(vec![simple("b", 10.0, 10.0, 100.0, 40.0, 2)]);
    assert!(!editor.begin_move(&id("b"), pt(20.0, 20.0)));
    assert!(!editor.begin_move(&id("missing"), pt(20.0, 20.0)));
    assert!(!editor.begin_resize(&id("b"), pt(0.0, 0.0)));
}

// =============================================================
// Cancellation
// =============================================================

#[test]
fn page_switch_mid_drag_keeps_last_position() {
    let mut editor = editor_with(vec![simple("a", 10.0, 10.0, 100.0, 40.0, 1)]);
    editor.on_pointer_down(pt(20.0, 20.0), Button::Primary);
    editor.on_pointer_move(pt(70.0, 80.0));
    let actions = editor.set_page(2);
    assert!(actions.contains(&Action::GestureCancelled));
    assert!(actions.contains(&Action::PageChanged { page: 2 }));
    assert!(editor.active_gesture_kind().is_none());
    assert_eq!(rect_of(&editor, "a"), Rect::new(60.0, 70.0, 100.0, 40.0));
    assert!(editor.on_pointer_move(pt(300.0, 300.0)).is_empty());
    assert_eq!(rect_of(&editor, "a"), Rect::new(60.0, 70.0, 100.0, 40.0));
}

#[test]
fn page_switch_clears_preview_and_pending() {
    let mut editor = editor_with(Vec::new());
    editor.on_pointer_down(pt(100.0, 100.0), Button::Primary);
    editor.on_pointer_up(pt(200.0, 200.0));
    editor.on_pointer_down(pt(300.0, 300.0), Button::Primary);
    editor.set_page(2);
    assert!(editor.selection_preview().is_none());
    assert!(editor.pending_selection().is_none());
}

#[test]
fn page_switch_clears_selection() {
    let mut editor = editor_with(vec![simple("a", 10.0, 10.0, 100.0, 40.0, 1)]);
    editor.select(Some(id("a")));
    let actions = editor.set_page(2);
    assert_eq!(actions[0], Action::SelectionChanged { id: None });
    assert!(editor.selection().is_none());
}

#[test]
fn page_switch_out_of_range_is_noop() {
    let mut editor = editor_with(Vec::new());
    assert!(editor.set_page(9).is_empty());
    assert!(editor.set_page(0).is_empty());
    assert_eq!(editor.current_page(), 1);
}

#[test]
fn visible_fields_follow_page() {
    let mut editor = editor_with(vec![
        simple("a", 10.0, 10.0, 100.0, 40.0, 1),
        simple("b", 10.0, 10.0, 100.0, 40.0, 2),
    ]);
    editor.set_page(2);
    let visible: Vec<&str> = editor.visible_fields().iter().map(|f| f.id.as_str()).collect();
    assert_eq!(visible, ["b"]);
}

#[test]
fn pointer_leave_cancels_gesture_but_keeps_pending() {
    let mut editor = editor_with_pending();
    editor.on_pointer_down(pt(500.0, 500.0), Button::Primary);
    // The new selection gesture replaced the old pending box.
    assert!(editor.pending_selection().is_none());
    editor.on_pointer_up(pt(600.0, 600.0));
    assert!(editor.pending_selection().is_some());
    assert!(editor.on_pointer_leave().is_empty());
    assert!(editor.pending_selection().is_some());
}

#[test]
fn pointer_leave_mid_resize_keeps_committed_size() {
    let mut editor = editor_with(vec![simple("a", 10.0, 10.0, 100.0, 40.0, 1)]);
    editor.on_pointer_down(pt(110.0, 50.0), Button::Primary);
    editor.on_pointer_move(pt(130.0, 60.0));
    assert_eq!(editor.on_pointer_leave(), vec![Action::GestureCancelled, Action::RenderNeeded]);
    assert!(editor.active_gesture_kind().is_none());
    assert_eq!(rect_of(&editor, "a"), Rect::new(10.0, 10.0, 120.0, 50.0));
}

#[test]
fn escape_cancels_gesture_and_pending() {
    let mut editor = editor_with_pending();
    let actions = editor.on_key_down(&Key("Escape".to_owned()));
    assert_eq!(actions, vec![Action::GestureCancelled, Action::RenderNeeded]);
    assert!(editor.pending_selection().is_none());
    assert!(editor.on_key_down(&Key("Escape".to_owned())).is_empty());
}

// =============================================================
// Delete / select
// =============================================================

#[test]
fn delete_key_removes_selected_field() {
    let mut editor = editor_with(vec![simple("a", 10.0, 10.0, 100.0, 40.0, 1)]);
    editor.select(Some(id("a")));
    let actions = editor.on_key_down(&Key("Delete".to_owned()));
    assert!(actions.contains(&Action::FieldDeleted { id: id("a") }));
    assert!(actions.contains(&Action::SelectionChanged { id: None }));
    assert!(editor.store.is_empty());
}

#[test]
fn backspace_without_selection_is_noop() {
    let mut editor = editor_with(vec![simple("a", 10.0, 10.0, 100.0, 40.0, 1)]);
    assert!(editor.on_key_down(&Key("Backspace".to_owned())).is_empty());
    assert_eq!(editor.store.len(), 1);
}

#[test]
fn deleting_gesture_target_releases_arbiter() {
    let mut editor = editor_with(vec![simple("a", 10.0, 10.0, 100.0, 40.0, 1)]);
    editor.on_pointer_down(pt(20.0, 20.0), Button::Primary);
    let actions = editor.delete_field(&id("a"));
    assert_eq!(actions[0], Action::GestureCancelled);
    assert!(editor.active_gesture_kind().is_none());
    assert!(editor.on_pointer_move(pt(40.0, 40.0)).is_empty());
}

#[test]
fn deleting_unknown_field_is_noop() {
    let mut editor = EditorCore::default();
    assert!(editor.delete_field(&id("nope")).is_empty());
}

#[test]
fn select_ignores_unknown_and_repeated_ids() {
    let mut editor = editor_with(vec![simple("a", 10.0, 10.0, 100.0, 40.0, 1)]);
    assert!(editor.select(Some(id("nope"))).is_empty());
    assert_eq!(editor.select(Some(id("a"))), vec![Action::SelectionChanged { id: Some(id("a")) }]);
    assert!(editor.select(Some(id("a"))).is_empty());
    assert_eq!(editor.select(None), vec![Action::SelectionChanged { id: None }]);
}

#[test]
fn click_on_empty_canvas_deselects() {
    let mut editor = editor_with(vec![simple("a", 10.0, 10.0, 100.0, 40.0, 1)]);
    editor.select(Some(id("a")));
    let actions = editor.on_pointer_down(pt(600.0, 600.0), Button::Primary);
    assert_eq!(actions[0], Action::SelectionChanged { id: None });
}

// =============================================================
// Export and action encoding
// =============================================================

#[test]
fn export_rounds_geometry() {
    let editor = editor_with(vec![simple("a", 10.4, 10.6, 100.5, 40.0, 1)]);
    let exported = editor.export();
    assert_eq!((exported[0].x, exported[0].y, exported[0].width, exported[0].height), (10, 11, 101, 40));
}

#[test]
fn actions_serialize_with_type_tag() {
    let action = Action::ColumnsUpdated { id: id("t"), column_widths: vec![0.5, 0.5] };
    let value = serde_json::to_value(&action).unwrap();
    assert_eq!(value, serde_json::json!({ "type": "columns_updated", "id": "t", "columnWidths": [0.5, 0.5] }));
    let value = serde_json::to_value(Action::RenderNeeded).unwrap();
    assert_eq!(value, serde_json::json!({ "type": "render_needed" }));
}
