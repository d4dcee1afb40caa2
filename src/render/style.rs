//! ANSI colors and per-kind labels.

use crate::events::EventKind;
use crate::text::capitalize;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

/// Terminal colors used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// System events.
    Magenta,
    /// User messages.
    Blue,
    /// Assistant messages.
    Green,
    /// Tool calls.
    Cyan,
    /// Tool results.
    Yellow,
    /// Failed tool results and parse errors.
    Red,
    /// Kinds without a dedicated color.
    Neutral,
    /// Secondary annotations.
    Dim,
}

impl Color {
    const fn code(self) -> &'static str {
        match self {
            Self::Magenta => "\x1b[35m",
            Self::Blue => "\x1b[34m",
            Self::Green => "\x1b[32m",
            Self::Cyan => "\x1b[36m",
            Self::Yellow => "\x1b[33m",
            Self::Red => "\x1b[31m",
            Self::Neutral => "\x1b[37m",
            Self::Dim => "\x1b[2m",
        }
    }
}

/// Applies colors, or passes text through untouched when disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Creates a palette; `enabled == false` emits no escape codes.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Wraps `text` in `color`.
    #[must_use]
    pub fn paint(&self, color: Color, text: &str) -> String {
        if self.enabled {
            format!("{}{text}{RESET}", color.code())
        } else {
            text.to_string()
        }
    }

    /// Wraps `text` in bold `color`.
    #[must_use]
    pub fn strong(&self, color: Color, text: &str) -> String {
        if self.enabled {
            format!("{BOLD}{}{text}{RESET}", color.code())
        } else {
            text.to_string()
        }
    }
}

/// Returns the color and label for an event kind.
#[must_use]
pub fn kind_style(kind: &EventKind) -> (Color, String) {
    match kind {
        EventKind::System => (Color::Magenta, "System".to_string()),
        EventKind::User => (Color::Blue, "User".to_string()),
        EventKind::Assistant => (Color::Green, "Assistant".to_string()),
        EventKind::ToolCall => (Color::Cyan, "Tool Use".to_string()),
        EventKind::ToolResult => (Color::Yellow, "Tool Result".to_string()),
        other => (Color::Neutral, capitalize(other.as_str())),
    }
}

/// Color for a tool result, red when it failed.
#[must_use]
pub const fn result_color(is_error: bool) -> Color {
    if is_error {
        Color::Red
    } else {
        Color::Yellow
    }
}
