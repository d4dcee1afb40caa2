//! Pairing of tool calls with their results.
//!
//! Calls and results share a correlation id but may arrive in either order.
//! Whichever half arrives first is held; the second half pops it and yields
//! the completed pair. An id is never held on both sides at once, and an id
//! is paired at most once.

use crate::events::{ToolCall, ToolPair, ToolResult};
use std::collections::{HashMap, HashSet};

/// Outcome of registering one half of a tool pair.
#[derive(Debug, PartialEq)]
pub enum Registration<'a> {
    /// Both halves are now known; the entry has been removed from the store.
    Paired(ToolPair),
    /// The call was stored and waits for its result.
    AwaitingResult(&'a ToolCall),
    /// The result was stored silently and waits for its call.
    Held,
    /// The id was already paired, or this side is already pending.
    Duplicate,
}

/// Holds tool halves until their counterpart arrives.
///
/// Growth is bounded only by the number of halves that never find their
/// counterpart during the stream.
#[derive(Debug, Default)]
pub struct CorrelationStore {
    pending_calls: HashMap<String, ToolCall>,
    pending_results: HashMap<String, ToolResult>,
    completed: HashSet<String>,
}

impl CorrelationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a call under `id`.
    pub fn register_call(&mut self, id: &str, call: ToolCall) -> Registration<'_> {
        if self.completed.contains(id) || self.pending_calls.contains_key(id) {
            tracing::debug!(id, tool = %call.name, "ignoring duplicate tool call");
            return Registration::Duplicate;
        }
        if let Some(result) = self.pending_results.remove(id) {
            self.completed.insert(id.to_string());
            return Registration::Paired(ToolPair { call, result });
        }
        let stored = self.pending_calls.entry(id.to_string()).or_insert(call);
        Registration::AwaitingResult(stored)
    }

    /// Registers a result under `id`.
    pub fn register_result(&mut self, id: &str, result: ToolResult) -> Registration<'_> {
        if self.completed.contains(id) || self.pending_results.contains_key(id) {
            tracing::debug!(id, "ignoring duplicate tool result");
            return Registration::Duplicate;
        }
        if let Some(call) = self.pending_calls.remove(id) {
            self.completed.insert(id.to_string());
            return Registration::Paired(ToolPair { call, result });
        }
        self.pending_results.insert(id.to_string(), result);
        Registration::Held
    }

    /// Number of calls still waiting for a result.
    #[must_use]
    pub fn pending_call_count(&self) -> usize {
        self.pending_calls.len()
    }

    /// Number of results still waiting for a call.
    #[must_use]
    pub fn pending_result_count(&self) -> usize {
        self.pending_results.len()
    }

    /// Ids of calls still waiting for a result, sorted.
    #[must_use]
    pub fn pending_call_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.pending_calls.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Ids of results still waiting for a call, sorted.
    #[must_use]
    pub fn pending_result_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.pending_results.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of ids paired so far.
    #[must_use]
    pub fn paired_count(&self) -> usize {
        self.completed.len()
    }
}
