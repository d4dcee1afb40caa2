//! Decoder for agent stream-json lines.
//!
//! Each non-blank line is one JSON object. Classification goes by field shape
//! rather than trusting the `type` literal alone: content items are matched
//! against an ordered list of shape predicates and anything unmatched is kept
//! raw for best-effort display.
//!
//! Known top-level types:
//! - `assistant` / `user`: a `message` whose `content` list holds text,
//!   thinking, tool calls and tool results
//! - `result`: the final result with usage, cost and duration
//! - `tool_use` / `tool_result`: a tool half emitted outside any message
//! - anything else (`system`, `info`, `progress`, ...): a generic notice

use crate::events::{
    ContentItem, Event, EventKind, FinalResult, Message, Notice, ToolCall, ToolResult, Usage,
};
use crate::text::{capitalize, char_prefix};
use serde_json::{Map, Value};
use thiserror::Error;

/// How much of a malformed line is kept for display.
pub const PARSE_ERROR_PREFIX_CHARS: usize = 200;

const MAX_NOTICE_DETAILS: usize = 6;

/// A line that is not valid JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid JSON ({reason}): {snippet}")]
pub struct ParseError {
    /// Bounded prefix of the offending line.
    pub snippet: String,
    /// Whether the snippet was cut short.
    pub truncated: bool,
    /// The decoder's description of the failure.
    pub reason: String,
}

/// Decodes one raw line.
///
/// Returns `None` for blank lines. Never panics, whatever the input.
#[must_use]
pub fn parse_line(line: &str) -> Option<Result<Event, ParseError>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(json) => Some(Ok(classify(json))),
        Err(e) => {
            let snippet = char_prefix(trimmed, PARSE_ERROR_PREFIX_CHARS);
            tracing::debug!(error = %e, "skipping line that is not valid JSON");
            Some(Err(ParseError {
                snippet: snippet.to_string(),
                truncated: snippet.len() < trimmed.len(),
                reason: e.to_string(),
            }))
        }
    }
}

/// Classifies an already-parsed JSON value.
#[must_use]
pub fn classify(json: Value) -> Event {
    let Some(event_type) = json.get("type").and_then(Value::as_str).map(str::to_owned) else {
        return Event::Unknown(json);
    };
    match event_type.as_str() {
        "result" => Event::Result(parse_result(&json)),
        "assistant" | "user" => match parse_message(&json) {
            Some(message) if event_type == "assistant" => Event::Assistant(message),
            Some(message) => Event::User(message),
            None => Event::Unknown(json),
        },
        "tool_use" => match tool_call_shape(&json) {
            Some(call) => Event::ToolCall(call),
            None => Event::Unknown(json),
        },
        "tool_result" => Event::ToolResult(tool_result_shape(&json)),
        other => {
            let kind = EventKind::from_type(other);
            Event::Notice(parse_notice(kind, other, json))
        }
    }
}

/// Returns `None` when neither content nor usage has a usable shape.
fn parse_message(json: &Value) -> Option<Message> {
    let message = json.get("message").filter(|m| m.is_object());
    let usage = message
        .and_then(|m| m.get("usage"))
        .or_else(|| json.get("usage"))
        .and_then(parse_usage);
    let content = message
        .and_then(|m| m.get("content"))
        .or_else(|| json.get("content"));
    let content = match content {
        Some(Value::String(text)) => vec![ContentItem::Text(text.clone())],
        Some(Value::Array(items)) => items.iter().map(decode_content_item).collect(),
        _ if usage.is_some() => Vec::new(),
        _ => return None,
    };
    let model = message
        .and_then(|m| m.get("model"))
        .and_then(Value::as_str)
        .map(String::from);
    Some(Message {
        content,
        usage,
        model,
    })
}

type Shape = fn(&Value) -> Option<ContentItem>;

/// Shape predicates, tried in order.
const CONTENT_SHAPES: [Shape; 4] = [
    tool_call_item,
    tool_result_item,
    text_item,
    thinking_item,
];

fn tool_call_item(item: &Value) -> Option<ContentItem> {
    tool_call_shape(item).map(ContentItem::ToolCall)
}

fn tool_result_item(item: &Value) -> Option<ContentItem> {
    (item.get("type").and_then(Value::as_str) == Some("tool_result"))
        .then(|| ContentItem::ToolResult(tool_result_shape(item)))
}

fn text_item(item: &Value) -> Option<ContentItem> {
    item.get("text")
        .and_then(Value::as_str)
        .map(|text| ContentItem::Text(text.to_string()))
}

fn thinking_item(item: &Value) -> Option<ContentItem> {
    item.get("thinking")
        .and_then(Value::as_str)
        .map(|text| ContentItem::Thinking(text.to_string()))
}

fn decode_content_item(item: &Value) -> ContentItem {
    CONTENT_SHAPES
        .iter()
        .find_map(|shape| shape(item))
        .unwrap_or_else(|| ContentItem::Unknown(item.clone()))
}

fn tool_call_shape(block: &Value) -> Option<ToolCall> {
    let name = block.get("name").and_then(Value::as_str)?.to_string();
    let id = block
        .get("id")
        .or_else(|| block.get("call_id"))
        .and_then(Value::as_str)
        .map(String::from);
    let input = match block.get("input").or_else(|| block.get("arguments")) {
        Some(Value::Object(map)) => map.clone(),
        Some(Value::String(raw)) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        },
        _ => Map::new(),
    };
    Some(ToolCall { id, name, input })
}

fn tool_result_shape(block: &Value) -> ToolResult {
    let id = block
        .get("tool_use_id")
        .or_else(|| block.get("tool_call_id"))
        .and_then(Value::as_str)
        .map(String::from);
    let content = block
        .get("content")
        .or_else(|| block.get("output"))
        .map(result_text)
        .unwrap_or_default();
    let is_error = block
        .get("is_error")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    ToolResult {
        id,
        content,
        is_error,
    }
}

fn result_text(content: &Value) -> String {
    match content {
        Value::String(text) => text.clone(),
        Value::Array(parts) => parts
            .iter()
            .map(|part| match part.get("text").and_then(Value::as_str) {
                Some(text) => text.to_string(),
                None => part.get("type").and_then(Value::as_str).map_or_else(
                    || part.to_string(),
                    |kind| format!("[{kind}]"),
                ),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn parse_result(json: &Value) -> FinalResult {
    FinalResult {
        text: json
            .get("result")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string(),
        is_error: json
            .get("is_error")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        subtype: json
            .get("subtype")
            .and_then(Value::as_str)
            .map(String::from),
        duration_ms: json.get("duration_ms").and_then(Value::as_u64),
        num_turns: json.get("num_turns").and_then(Value::as_u64),
        total_cost_usd: json.get("total_cost_usd").and_then(Value::as_f64),
        usage: json.get("usage").and_then(parse_usage),
    }
}

fn parse_usage(usage: &Value) -> Option<Usage> {
    let input = usage.get("input_tokens").and_then(Value::as_u64);
    let output = usage.get("output_tokens").and_then(Value::as_u64);
    if input.is_none() && output.is_none() {
        return None;
    }
    Some(Usage {
        input_tokens: input.unwrap_or(0),
        output_tokens: output.unwrap_or(0),
        cache_read_tokens: usage.get("cache_read_input_tokens").and_then(Value::as_u64),
        cache_write_tokens: usage
            .get("cache_creation_input_tokens")
            .and_then(Value::as_u64),
    })
}

fn parse_notice(kind: EventKind, raw_type: &str, json: Value) -> Notice {
    let message_text = json.get("message").and_then(|m| match m {
        Value::String(text) => Some(text.clone()),
        Value::Object(_) => m
            .get("content")
            .or_else(|| m.get("text"))
            .and_then(Value::as_str)
            .map(String::from),
        _ => None,
    });
    let subtype = json.get("subtype").and_then(Value::as_str).map(String::from);
    let mut details = Vec::new();
    let body = match (message_text, subtype) {
        (Some(text), Some(subtype)) => {
            details.push(("subtype".to_string(), subtype));
            Some(text)
        }
        (Some(text), None) => Some(text),
        (None, subtype) => subtype,
    };
    if let Some(fields) = json.as_object() {
        for (key, value) in fields {
            if details.len() >= MAX_NOTICE_DETAILS {
                break;
            }
            if matches!(key.as_str(), "type" | "message" | "subtype") {
                continue;
            }
            let rendered = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => continue,
            };
            details.push((key.clone(), rendered));
        }
    }
    Notice {
        kind,
        label: capitalize(raw_type),
        body,
        details,
        raw: json,
    }
}
