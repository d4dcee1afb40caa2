//! Close-time summary of the last assistant message.

use crate::events::EventKind;

/// What the session rendered most recently.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LastRendered {
    /// Nothing yet.
    #[default]
    Nothing,
    /// An assistant text message, kept in full.
    AssistantText(String),
    /// A tool call still waiting for its result.
    PendingToolCall,
    /// Anything else, by kind.
    Other(EventKind),
}

/// Tracks render state and fires the closing summary exactly once.
#[derive(Debug, Default)]
pub struct SessionSummarizer {
    last: LastRendered,
    closed: bool,
}

impl SessionSummarizer {
    /// Creates a summarizer in the awaiting-close state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the most recently rendered thing.
    pub fn observe(&mut self, rendered: LastRendered) {
        if !self.closed {
            self.last = rendered;
        }
    }

    /// Returns the most recently rendered thing.
    #[must_use]
    pub const fn last(&self) -> &LastRendered {
        &self.last
    }

    /// Returns true once `close` has been called.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Enters the closed state.
    ///
    /// Returns the full assistant text to re-emit if the last rendered thing
    /// was assistant text. Later calls always return `None`.
    pub fn close(&mut self) -> Option<String> {
        if self.closed {
            return None;
        }
        self.closed = true;
        match std::mem::take(&mut self.last) {
            LastRendered::AssistantText(text) if !text.trim().is_empty() => Some(text),
            _ => None,
        }
    }
}
