#![allow(clippy::float_cmp)]

use super::*;
use crate::field::{Field, FieldKind};
use crate::space::Rect;

fn run(script: &str) -> (EditorCore, Vec<Action>) {
    let mut editor = EditorCore::default();
    let steps = parse_script(script).unwrap();
    let actions = replay(&mut editor, steps).unwrap();
    (editor, actions)
}

// =============================================================
// parse_script
// =============================================================

#[test]
fn parses_events_and_skips_comments() {
    let steps = parse_script(
        "# create a field\n\n{\"event\": \"down\", \"x\": 1, \"y\": 2}\n  {\"event\": \"leave\"}\n",
    )
    .unwrap();
    assert_eq!(
        steps,
        vec![
            ScriptStep { line: 3, event: ScriptEvent::Down { x: 1.0, y: 2.0, button: Button::Primary } },
            ScriptStep { line: 4, event: ScriptEvent::Leave },
        ]
    );
}

#[test]
fn parses_button_and_meta() {
    let steps = parse_script(
        "{\"event\": \"down\", \"x\": 0, \"y\": 0, \"button\": \"secondary\"}\n\
         {\"event\": \"commit\", \"meta\": {\"label\": \"Items\", \"table\": {\"rows\": 2, \"cols\": 3}}}\n\
         {\"event\": \"commit\"}",
    )
    .unwrap();
    assert_eq!(steps[0].event, ScriptEvent::Down { x: 0.0, y: 0.0, button: Button::Secondary });
    let ScriptEvent::Commit { meta } = &steps[1].event else {
        panic!("expected commit");
    };
    assert_eq!(meta.label, "Items");
    assert_eq!(meta.table.map(|t| t.cols), Some(3));
    assert_eq!(steps[2].event, ScriptEvent::Commit { meta: FieldMeta::default() });
}

#[test]
fn parse_error_reports_line() {
    let err = parse_script("{\"event\": \"leave\"}\n{\"event\": \"jump\"}").unwrap_err();
    assert!(matches!(err, ReplayError::Parse { line: 2, .. }));
    assert!(err.to_string().starts_with("script line 2:"));
}

#[test]
fn missing_coordinates_are_an_error() {
    assert!(parse_script("{\"event\": \"move\", \"x\": 3}").is_err());
}

// =============================================================
// replay
// =============================================================

#[test]
fn script_creates_and_commits_field() {
    let (editor, actions) = run(
        "{\"event\": \"viewport\", \"width\": 620}\n\
         {\"event\": \"down\", \"x\": 50, \"y\": 50}\n\
         {\"event\": \"move\", \"x\": 75, \"y\": 90}\n\
         {\"event\": \"up\", \"x\": 75, \"y\": 90}\n\
         {\"event\": \"commit\", \"meta\": {\"id\": \"name\", \"label\": \"Name\"}}",
    );
    let field = editor.field(&FieldId::new("name")).unwrap();
    assert_eq!(field.rect(), Rect::new(100.0, 100.0, 50.0, 80.0));
    assert_eq!(editor.selection(), Some(&FieldId::new("name")));
    assert!(actions.iter().any(|a| matches!(a, Action::FieldCreateRequested { .. })));
}

#[test]
fn script_moves_field_and_switches_page() {
    let mut editor = EditorCore::default();
    editor.set_page_count(2);
    editor.load_fields(vec![Field {
        id: FieldId::new("a"),
        label: "A".to_owned(),
        x: 10.0,
        y: 10.0,
        width: 100.0,
        height: 40.0,
        page: 1,
        required: false,
        kind: FieldKind::Simple,
        font_size: 12.0,
        font_family: "Helvetica".to_owned(),
    }]);
    let steps = parse_script(
        "{\"event\": \"down\", \"x\": 20, \"y\": 20}\n\
         {\"event\": \"move\", \"x\": 70, \"y\": 80}\n\
         {\"event\": \"page\", \"page\": 2}\n\
         {\"event\": \"move\", \"x\": 400, \"y\": 400}",
    )
    .unwrap();
    let actions = replay(&mut editor, steps).unwrap();
    assert_eq!(editor.field(&FieldId::new("a")).unwrap().rect(), Rect::new(60.0, 70.0, 100.0, 40.0));
    assert!(actions.contains(&Action::PageChanged { page: 2 }));
    assert!(editor.active_gesture_kind().is_none());
}

#[test]
fn unfinished_gesture_is_cancelled_at_end() {
    let (editor, actions) = run("{\"event\": \"down\", \"x\": 100, \"y\": 100}");
    assert!(editor.active_gesture_kind().is_none());
    assert_eq!(actions.last(), Some(&Action::RenderNeeded));
    assert!(actions.contains(&Action::GestureCancelled));
}

#[test]
fn discard_and_delete_events() {
    let (editor, _) = run(
        "{\"event\": \"down\", \"x\": 100, \"y\": 100}\n\
         {\"event\": \"up\", \"x\": 200, \"y\": 200}\n\
         {\"event\": \"discard\"}\n\
         {\"event\": \"commit\"}\n\
         {\"event\": \"down\", \"x\": 100, \"y\": 100}\n\
         {\"event\": \"up\", \"x\": 200, \"y\": 200}\n\
         {\"event\": \"commit\", \"meta\": {\"id\": \"x\"}}\n\
         {\"event\": \"delete\", \"id\": \"x\"}",
    );
    assert!(editor.store.is_empty());
}

#[test]
fn duplicate_commit_stops_replay() {
    let mut editor = EditorCore::default();
    let steps = parse_script(
        "{\"event\": \"down\", \"x\": 100, \"y\": 100}\n\
         {\"event\": \"up\", \"x\": 200, \"y\": 200}\n\
         {\"event\": \"commit\", \"meta\": {\"id\": \"x\"}}\n\
         {\"event\": \"down\", \"x\": 300, \"y\": 300}\n\
         {\"event\": \"up\", \"x\": 400, \"y\": 400}\n\
         {\"event\": \"commit\", \"meta\": {\"id\": \"x\"}}",
    )
    .unwrap();
    let err = replay(&mut editor, steps).unwrap_err();
    assert!(matches!(err, ReplayError::Commit { line: 6, .. }));
    assert_eq!(editor.store.len(), 1);
}

#[test]
fn key_and_select_events() {
    let (editor, actions) = run(
        "{\"event\": \"down\", \"x\": 100, \"y\": 100}\n\
         {\"event\": \"up\", \"x\": 200, \"y\": 200}\n\
         {\"event\": \"commit\", \"meta\": {\"id\": \"x\"}}\n\
         {\"event\": \"select\"}\n\
         {\"event\": \"select\", \"id\": \"x\"}\n\
         {\"event\": \"key\", \"key\": \"Delete\"}",
    );
    assert!(editor.store.is_empty());
    assert!(actions.contains(&Action::FieldDeleted { id: FieldId::new("x") }));
}
