//! Visualizer session management.

use crate::config::VisualizerConfig;
use crate::correlation::{CorrelationStore, Registration};
use crate::error::{Error, Result};
use crate::events::{ContentItem, Event, EventKind, Message, ToolCall, ToolResult};
use crate::parser::parse_line;
use crate::render::Renderer;
use crate::summary::{LastRendered, SessionSummarizer};
use std::io::Write;

/// Counters collected over one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Lines fed in, blank ones included.
    pub lines: u64,
    /// Lines that decoded into an event.
    pub events: u64,
    /// Lines that were not valid JSON.
    pub parse_errors: u64,
    /// Blocks written to the sink.
    pub blocks: u64,
    /// Tool calls rendered together with their result.
    pub paired_tools: u64,
    /// Calls still waiting for a result when the session finished.
    pub unpaired_calls: usize,
    /// Results still waiting for a call when the session finished.
    pub unpaired_results: usize,
}

/// One visualizer invocation.
///
/// The session owns all state that outlives a single line: the correlation
/// store, the render state and the output sink. Independent sessions share
/// nothing.
pub struct VisualizerSession<W: Write> {
    sink: W,
    renderer: Renderer,
    store: CorrelationStore,
    summarizer: SessionSummarizer,
    stats: SessionStats,
}

impl<W: Write> VisualizerSession<W> {
    /// Creates a session writing to `sink`.
    pub fn new(sink: W, config: VisualizerConfig) -> Self {
        Self {
            sink,
            renderer: Renderer::new(config),
            store: CorrelationStore::new(),
            summarizer: SessionSummarizer::new(),
            stats: SessionStats::default(),
        }
    }

    /// Decodes and renders one raw input line.
    ///
    /// Malformed lines render a parse error block and never fail.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing to the sink fails.
    pub fn process_line(&mut self, line: &str) -> Result<()> {
        self.stats.lines += 1;
        match parse_line(line) {
            None => Ok(()),
            Some(Ok(event)) => self.process_event(event),
            Some(Err(error)) => {
                self.stats.parse_errors += 1;
                let block = self.renderer.render_parse_error(&error);
                self.emit(&block, LastRendered::Other(EventKind::Unknown))
            }
        }
    }

    /// Renders one decoded event.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing to the sink fails.
    pub fn process_event(&mut self, event: Event) -> Result<()> {
        self.stats.events += 1;
        match event {
            Event::User(message) => self.handle_message(&EventKind::User, message),
            Event::Assistant(message) => self.handle_message(&EventKind::Assistant, message),
            Event::ToolCall(call) => self.handle_call(call),
            Event::ToolResult(result) => self.handle_result(result),
            Event::Result(result) => {
                let block = self.renderer.render_final_result(&result);
                self.emit(&block, LastRendered::Other(EventKind::Result))
            }
            Event::Notice(notice) => {
                let block = self.renderer.render_notice(&notice);
                self.emit(&block, LastRendered::Other(notice.kind))
            }
            Event::Unknown(raw) => {
                let block = self.renderer.render_unknown(&raw);
                self.emit(&block, LastRendered::Other(EventKind::Unknown))
            }
        }
    }

    /// Closes the session: emits the closing summary and flushes the sink.
    ///
    /// Calls and results still unpaired are discarded. Calling this more than
    /// once emits nothing further.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to or flushing the sink fails.
    pub fn finish(&mut self) -> Result<SessionStats> {
        if let Some(text) = self.summarizer.close() {
            let block = self.renderer.render_final_assistant_message(&text);
            self.write_block(&block)?;
        }
        self.stats.unpaired_calls = self.store.pending_call_count();
        self.stats.unpaired_results = self.store.pending_result_count();
        if self.stats.unpaired_calls > 0 || self.stats.unpaired_results > 0 {
            tracing::debug!(
                calls = ?self.store.pending_call_ids(),
                results = ?self.store.pending_result_ids(),
                "discarding unpaired tool halves"
            );
        }
        self.sink.flush().map_err(Error::write)?;
        Ok(self.stats)
    }

    /// Returns the counters collected so far.
    #[must_use]
    pub const fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Returns the correlation store.
    #[must_use]
    pub const fn store(&self) -> &CorrelationStore {
        &self.store
    }

    /// Returns what was rendered most recently.
    #[must_use]
    pub const fn last_rendered(&self) -> &LastRendered {
        self.summarizer.last()
    }

    /// Consumes the session and returns the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn handle_message(&mut self, kind: &EventKind, message: Message) -> Result<()> {
        let all_unknown = message.is_all_unknown();
        let Message { content, usage, .. } = message;
        if content.is_empty() {
            if let Some(usage) = usage {
                let block = self.renderer.render_usage(kind, &usage);
                self.write_block(&block)?;
            }
            self.summarizer.observe(LastRendered::Other(kind.clone()));
            return Ok(());
        }
        let mut usage = usage;
        if content.len() > 1 && all_unknown {
            let block = self.renderer.render_content_summary(kind, content.len());
            self.emit(&block, LastRendered::Other(kind.clone()))?;
        } else {
            for item in content {
                match item {
                    ContentItem::Text(text) => {
                        let block = self.renderer.render_text(kind, &text, usage.take().as_ref());
                        let rendered = if *kind == EventKind::Assistant {
                            LastRendered::AssistantText(text)
                        } else {
                            LastRendered::Other(kind.clone())
                        };
                        self.emit(&block, rendered)?;
                    }
                    ContentItem::Thinking(text) => {
                        let block = self.renderer.render_thinking(&text);
                        self.emit(&block, LastRendered::Other(kind.clone()))?;
                    }
                    ContentItem::ToolCall(call) => self.handle_call(call)?,
                    ContentItem::ToolResult(result) => self.handle_result(result)?,
                    ContentItem::Unknown(raw) => {
                        let block = self.renderer.render_unknown_item(kind, &raw);
                        self.emit(&block, LastRendered::Other(kind.clone()))?;
                    }
                }
            }
        }
        if let Some(usage) = usage {
            let block = self.renderer.render_usage(kind, &usage);
            self.write_block(&block)?;
        }
        Ok(())
    }

    fn handle_call(&mut self, call: ToolCall) -> Result<()> {
        let Some(id) = call.id.clone() else {
            let block = self.renderer.render_call(&call);
            return self.emit(&block, LastRendered::Other(EventKind::ToolCall));
        };
        let rendered = match self.store.register_call(&id, call) {
            Registration::Paired(pair) => {
                self.stats.paired_tools += 1;
                Some((
                    self.renderer.render_unannounced_pair(&pair),
                    LastRendered::Other(EventKind::ToolResult),
                ))
            }
            Registration::AwaitingResult(call) => Some((
                self.renderer.render_pending_call(call),
                LastRendered::PendingToolCall,
            )),
            Registration::Held | Registration::Duplicate => None,
        };
        match rendered {
            Some((block, last)) => self.emit(&block, last),
            None => Ok(()),
        }
    }

    fn handle_result(&mut self, result: ToolResult) -> Result<()> {
        let Some(id) = result.id.clone() else {
            let block = self.renderer.render_result(&result);
            return self.emit(&block, LastRendered::Other(EventKind::ToolResult));
        };
        let block = match self.store.register_result(&id, result) {
            Registration::Paired(pair) => {
                self.stats.paired_tools += 1;
                Some(self.renderer.render_pair(&pair))
            }
            Registration::AwaitingResult(_) | Registration::Held | Registration::Duplicate => None,
        };
        match block {
            Some(block) => self.emit(&block, LastRendered::Other(EventKind::ToolResult)),
            None => Ok(()),
        }
    }

    fn emit(&mut self, block: &str, rendered: LastRendered) -> Result<()> {
        self.write_block(block)?;
        self.summarizer.observe(rendered);
        Ok(())
    }

    fn write_block(&mut self, block: &str) -> Result<()> {
        self.sink
            .write_all(block.as_bytes())
            .map_err(Error::write)?;
        self.stats.blocks += 1;
        Ok(())
    }
}
