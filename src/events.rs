//! Typed event model for agent stream-json output.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One decoded unit from the input line stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// A user turn, usually carrying tool results back to the agent.
    User(Message),
    /// An assistant turn: text, thinking and tool calls.
    Assistant(Message),
    /// The final result of the agent run.
    Result(FinalResult),
    /// A tool call emitted at the top level of the stream.
    ToolCall(ToolCall),
    /// A tool result emitted at the top level of the stream.
    ToolResult(ToolResult),
    /// A structured status event (system, info, warning, error, debug, progress, ...).
    Notice(Notice),
    /// A valid JSON value with no recognizable shape.
    Unknown(Value),
}

impl Event {
    /// Returns the kind used for labelling and coloring this event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::User(_) => EventKind::User,
            Self::Assistant(_) => EventKind::Assistant,
            Self::Result(_) => EventKind::Result,
            Self::ToolCall(_) => EventKind::ToolCall,
            Self::ToolResult(_) => EventKind::ToolResult,
            Self::Notice(notice) => notice.kind.clone(),
            Self::Unknown(_) => EventKind::Unknown,
        }
    }
}

/// The kind of an event, derived from its `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// `system`
    System,
    /// `user`
    User,
    /// `assistant`
    Assistant,
    /// `result`
    Result,
    /// `tool_use`
    ToolCall,
    /// `tool_result`
    ToolResult,
    /// `info`
    Info,
    /// `warning`
    Warning,
    /// `error`
    Error,
    /// `debug`
    Debug,
    /// `progress`
    Progress,
    /// Any other `type` string, kept verbatim.
    Other(String),
    /// No usable `type` field.
    Unknown,
}

impl EventKind {
    /// Maps a raw `type` literal onto a kind.
    #[must_use]
    pub fn from_type(raw: &str) -> Self {
        match raw {
            "system" => Self::System,
            "user" => Self::User,
            "assistant" => Self::Assistant,
            "result" => Self::Result,
            "tool_use" => Self::ToolCall,
            "tool_result" => Self::ToolResult,
            "info" => Self::Info,
            "warning" => Self::Warning,
            "error" => Self::Error,
            "debug" => Self::Debug,
            "progress" => Self::Progress,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the raw `type` literal for this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Result => "result",
            Self::ToolCall => "tool_use",
            Self::ToolResult => "tool_result",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Debug => "debug",
            Self::Progress => "progress",
            Self::Other(raw) => raw,
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The payload of a `user` or `assistant` event.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Message {
    /// Content items in arrival order.
    pub content: Vec<ContentItem>,
    /// Token counters, when the message carries them.
    pub usage: Option<Usage>,
    /// The model that produced the message, if reported.
    pub model: Option<String>,
}

impl Message {
    /// Returns true if no content item has a recognized shape.
    #[must_use]
    pub fn is_all_unknown(&self) -> bool {
        self.content
            .iter()
            .all(|item| matches!(item, ContentItem::Unknown(_)))
    }
}

/// One entry of a message's `content` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ContentItem {
    /// A tool invocation.
    ToolCall(ToolCall),
    /// The outcome of a tool invocation.
    ToolResult(ToolResult),
    /// Plain text.
    Text(String),
    /// Extended thinking text.
    Thinking(String),
    /// An item matching no known shape, kept raw.
    Unknown(Value),
}

/// A tool call issued by the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Correlation id; calls without one are rendered on their own.
    pub id: Option<String>,
    /// The name of the tool being called.
    pub name: String,
    /// The input arguments in their original order.
    pub input: Map<String, Value>,
}

impl ToolCall {
    /// Returns the checklist items if this call updates a todo list.
    #[must_use]
    pub fn todos(&self) -> Option<&Vec<Value>> {
        self.input.get("todos").and_then(Value::as_array)
    }
}

/// The result of a tool execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    /// The id of the tool call this result answers.
    pub id: Option<String>,
    /// The textual output of the tool.
    pub content: String,
    /// Whether the tool reported a failure.
    pub is_error: bool,
}

/// A tool call together with its result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolPair {
    /// The call half.
    pub call: ToolCall,
    /// The result half.
    pub result: ToolResult,
}

/// Token usage statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Usage {
    /// Number of input tokens consumed.
    pub input_tokens: u64,
    /// Number of output tokens generated.
    pub output_tokens: u64,
    /// Number of cache read tokens (if applicable).
    pub cache_read_tokens: Option<u64>,
    /// Number of cache write tokens (if applicable).
    pub cache_write_tokens: Option<u64>,
}

impl Usage {
    /// Creates a new Usage with the given token counts.
    #[must_use]
    pub const fn new(input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
            cache_read_tokens: None,
            cache_write_tokens: None,
        }
    }

    /// Returns the total number of tokens (input + output).
    #[must_use]
    pub const fn total_tokens(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// The payload of a `result` event.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FinalResult {
    /// The full result text.
    pub text: String,
    /// Whether the run ended in error.
    pub is_error: bool,
    /// The result subtype, e.g. `success` or `error_max_turns`.
    pub subtype: Option<String>,
    /// Wall-clock duration of the run.
    pub duration_ms: Option<u64>,
    /// Number of agent turns.
    pub num_turns: Option<u64>,
    /// Reported cost in US dollars.
    pub total_cost_usd: Option<f64>,
    /// Aggregate token usage.
    pub usage: Option<Usage>,
}

/// A generic structured event such as `system` or `progress`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    /// The event kind.
    pub kind: EventKind,
    /// Capitalized label derived from the `type` field.
    pub label: String,
    /// Main body text, from `message` or `subtype`.
    pub body: Option<String>,
    /// Other scalar top-level fields as key/value pairs.
    pub details: Vec<(String, String)>,
    /// The raw event for fallback display.
    pub raw: Value,
}
