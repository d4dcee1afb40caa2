//! Tool-call argument selection and checklist progress.

use crate::events::ToolCall;
use crate::text::single_line;
use serde_json::Value;

/// Input keys tried, in order, for the one argument shown inline.
pub const PRIMARY_KEYS: [&str; 7] = [
    "file_path", "path", "pattern", "command", "query", "prompt", "url",
];

const PRIMARY_CHARS: usize = 120;
const REPLACE_CHARS: usize = 40;
const INPUT_PREVIEW_CHARS: usize = 120;

/// What a tool call shows besides its name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallSummary {
    /// The primary argument, shown inline after the name.
    pub primary: Option<String>,
    /// Secondary `key: value` annotations.
    pub annotations: Vec<String>,
}

/// Picks the primary argument and annotations for a call.
#[must_use]
pub fn summarize_call(call: &ToolCall) -> CallSummary {
    let input = &call.input;
    let primary = PRIMARY_KEYS
        .iter()
        .find_map(|key| input.get(*key))
        .map(|value| single_line(&display_value(value), PRIMARY_CHARS));

    let mut annotations = Vec::new();
    for key in ["limit", "offset", "timeout", "cwd"] {
        if let Some(value) = input.get(key) {
            let shown = display_value(value);
            if key == "timeout" {
                annotations.push(format!("{key}: {shown}ms"));
            } else {
                annotations.push(format!("{key}: {shown}"));
            }
        }
    }
    if let (Some(old), Some(new)) = (
        input.get("old_string").and_then(Value::as_str),
        input.get("new_string").and_then(Value::as_str),
    ) {
        annotations.push(format!(
            "replace: \"{}\" → \"{}\"",
            single_line(old, REPLACE_CHARS),
            single_line(new, REPLACE_CHARS)
        ));
    }
    if primary.is_none() && annotations.is_empty() && !input.is_empty() && call.todos().is_none() {
        let compact = Value::Object(input.clone()).to_string();
        annotations.push(format!(
            "input: {}",
            single_line(&compact, INPUT_PREVIEW_CHARS)
        ));
    }
    CallSummary {
        primary,
        annotations,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Status of one checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoStatus {
    /// `completed`
    Done,
    /// `in_progress`
    InProgress,
    /// Anything else.
    Pending,
}

impl TodoStatus {
    fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("completed" | "done") => Self::Done,
            Some("in_progress" | "active") => Self::InProgress,
            _ => Self::Pending,
        }
    }

    /// Glyph shown before the item.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Done => "✔",
            Self::InProgress => "◐",
            Self::Pending => "○",
        }
    }
}

/// One checklist line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    /// The item text.
    pub text: String,
    /// Its status.
    pub status: TodoStatus,
}

/// Decodes checklist items, tolerating missing fields.
#[must_use]
pub fn todo_items(raw: &[Value]) -> Vec<TodoItem> {
    raw.iter()
        .map(|item| {
            let text = ["content", "text", "title"]
                .iter()
                .find_map(|key| item.get(*key).and_then(Value::as_str))
                .unwrap_or("(untitled)")
                .to_string();
            let status = TodoStatus::from_raw(item.get("status").and_then(Value::as_str));
            TodoItem { text, status }
        })
        .collect()
}

/// Completed share as an integer percentage, rounded half up.
#[must_use]
pub const fn completion_percent(completed: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    (completed * 200 + total) / (total * 2)
}
