//! # agent-stream-visualizer
//!
//! Renders the line-delimited JSON event stream of a coding agent
//! (`--output-format stream-json`) as a readable, colorized execution trace.
//!
//! ## Features
//!
//! - Shape-based decoding of a loosely typed event stream
//! - Tool calls paired with their results whichever arrives first
//! - Bounded interim display, with the final result and the last assistant
//!   message reproduced in full
//! - Malformed lines reported inline without stopping the stream
//! - Optional timestamped debug mode
//!
//! ## Example
//!
//! ```no_run
//! use agent_stream_visualizer::{visualize, VisualizerConfig};
//!
//! let stdin = std::io::stdin();
//! let stdout = std::io::stdout();
//! let stats = visualize(stdin.lock(), stdout.lock(), VisualizerConfig::new()).unwrap();
//! eprintln!("{} tool calls paired", stats.paired_tools);
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]

mod config;
mod correlation;
mod error;
mod events;
mod parser;
mod render;
mod session;
mod stream;
mod summary;
mod text;

pub use config::{
    debug_requested, VisualizerConfig, DEBUG_ARGS, DEFAULT_MAX_CHARS, DEFAULT_MAX_LINES,
};
pub use correlation::{CorrelationStore, Registration};
pub use error::{Error, Result};
pub use events::{
    ContentItem, Event, EventKind, FinalResult, Message, Notice, ToolCall, ToolPair, ToolResult,
    Usage,
};
pub use parser::{classify, parse_line, ParseError, PARSE_ERROR_PREFIX_CHARS};
pub use render::style::{Color, Palette};
pub use render::tool::{
    completion_percent, summarize_call, todo_items, CallSummary, TodoItem, TodoStatus,
    PRIMARY_KEYS,
};
pub use render::Renderer;
pub use session::{SessionStats, VisualizerSession};
pub use stream::{visualize, StreamReader};
pub use summary::{LastRendered, SessionSummarizer};
pub use text::{capitalize, char_prefix, single_line, truncate_block, Truncated};
