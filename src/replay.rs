//! Scripted input replay.
//!
//! A script is newline-delimited JSON, one event object per line, tagged by
//! its `event` key. Blank lines and lines starting with `#` are skipped.
//! Pointer coordinates are display-space, as a host would deliver them.
//!
//! ```text
//! {"event": "viewport", "width": 620}
//! {"event": "down", "x": 50, "y": 50}
//! {"event": "move", "x": 75, "y": 90}
//! {"event": "up", "x": 75, "y": 90}
//! {"event": "commit", "meta": {"label": "Name"}}
//! ```

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use serde::Deserialize;
use tracing::{debug, info};

use crate::arbiter::CancelReason;
use crate::engine::{Action, Button, EditorCore, Key};
use crate::field::FieldId;
use crate::selection::FieldMeta;
use crate::space::Point;
use crate::store::StoreError;

/// One scripted input event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    /// Width available to the editor, in display pixels.
    Viewport { width: f64 },
    Pages { count: u32 },
    Page { page: u32 },
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
    },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    Leave,
    Key { key: String },
    Select { id: Option<FieldId> },
    Commit {
        #[serde(default)]
        meta: FieldMeta,
    },
    Discard,
    Delete { id: FieldId },
}

/// A parsed event and the 1-based script line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptStep {
    pub line: usize,
    pub event: ScriptEvent,
}

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("script line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("script line {line}: {source}")]
    Commit {
        line: usize,
        #[source]
        source: StoreError,
    },
}

/// Parse a script.
///
/// # Errors
///
/// Returns [`ReplayError::Parse`] for the first line that isn't a valid event.
pub fn parse_script(text: &str) -> Result<Vec<ScriptStep>, ReplayError> {
    let mut steps = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let event = serde_json::from_str(trimmed).map_err(|source| ReplayError::Parse { line, source })?;
        steps.push(ScriptStep { line, event });
    }
    Ok(steps)
}

/// Feed one event to `editor` and return the actions it produced.
///
/// # Errors
///
/// Returns the store error when a `commit` names an id already in use.
pub fn apply(editor: &mut EditorCore, event: ScriptEvent) -> Result<Vec<Action>, StoreError> {
    let actions = match event {
        ScriptEvent::Viewport { width } => {
            editor.set_display_width(width);
            vec![Action::RenderNeeded]
        }
        ScriptEvent::Pages { count } => editor.set_page_count(count),
        ScriptEvent::Page { page } => editor.set_page(page),
        ScriptEvent::Down { x, y, button } => editor.on_pointer_down(Point::new(x, y), button),
        ScriptEvent::Move { x, y } => editor.on_pointer_move(Point::new(x, y)),
        ScriptEvent::Up { x, y } => editor.on_pointer_up(Point::new(x, y)),
        ScriptEvent::Leave => editor.on_pointer_leave(),
        ScriptEvent::Key { key } => editor.on_key_down(&Key(key)),
        ScriptEvent::Select { id } => editor.select(id),
        ScriptEvent::Commit { meta } => match editor.commit_pending(meta)? {
            Some(id) => {
                let mut actions = editor.select(Some(id));
                actions.push(Action::RenderNeeded);
                actions
            }
            None => Vec::new(),
        },
        ScriptEvent::Discard => {
            if editor.discard_pending() {
                vec![Action::RenderNeeded]
            } else {
                Vec::new()
            }
        }
        ScriptEvent::Delete { id } => editor.delete_field(&id),
    };
    Ok(actions)
}

/// Run every step in order and collect the actions.
///
/// Transient state left when the script ends (an unfinished gesture or an
/// uncommitted selection) is discarded.
///
/// # Errors
///
/// Stops at the first failing `commit` and returns [`ReplayError::Commit`].
pub fn replay(editor: &mut EditorCore, steps: Vec<ScriptStep>) -> Result<Vec<Action>, ReplayError> {
    let mut actions = Vec::new();
    let total = steps.len();
    for ScriptStep { line, event } in steps {
        debug!(line, ?event, "replay step");
        let produced = apply(editor, event).map_err(|source| ReplayError::Commit { line, source })?;
        actions.extend(produced);
    }
    actions.extend(editor.cancel(CancelReason::Abort));
    info!(steps = total, actions = actions.len(), fields = editor.store.len(), "replay finished");
    Ok(actions)
}
