//! Formatting of events into bounded, colorized text blocks.
//!
//! Every public `render_*` method returns one block: a header line, an
//! indented body, and a trailing newline. In debug mode each block is
//! prefixed with the render-time timestamp in square brackets. Interim text
//! is truncated; only final results and the closing summary print in full.

pub mod style;
pub mod tool;

use crate::config::VisualizerConfig;
use crate::events::{EventKind, FinalResult, Notice, ToolCall, ToolPair, ToolResult, Usage};
use crate::parser::ParseError;
use crate::text::{single_line, truncate_block};
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use style::{kind_style, result_color, Color, Palette};
use tool::{completion_percent, summarize_call, todo_items, TodoStatus};

const BULLET: &str = "●";
const RESULT_MARK: &str = "⎿";
const BANNER: &str = "═══";

/// Formats events as text blocks.
#[derive(Debug, Clone)]
pub struct Renderer {
    config: VisualizerConfig,
    palette: Palette,
}

impl Renderer {
    /// Creates a renderer for the given configuration.
    #[must_use]
    pub const fn new(config: VisualizerConfig) -> Self {
        let palette = Palette::new(config.color);
        Self { config, palette }
    }

    /// Returns the configuration this renderer was built with.
    #[must_use]
    pub const fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// Renders user or assistant text, truncated, with an optional usage note.
    #[must_use]
    pub fn render_text(&self, kind: &EventKind, text: &str, usage: Option<&Usage>) -> String {
        let (color, label) = kind_style(kind);
        let mut header = self.header(color, &label);
        if let Some(usage) = usage {
            header.push_str(&format!(" {}", self.usage_note(usage)));
        }
        let mut lines = vec![header];
        self.push_truncated(&mut lines, text, "  ");
        self.block(&lines)
    }

    /// Renders extended thinking, dimmed and truncated.
    #[must_use]
    pub fn render_thinking(&self, text: &str) -> String {
        let mut lines = vec![self.header(Color::Dim, "Thinking")];
        let bounded = truncate_block(text, self.config.max_lines, self.config.max_chars);
        for line in bounded.text.lines() {
            lines.push(format!("  {}", self.palette.paint(Color::Dim, line)));
        }
        if bounded.truncated {
            lines.push(format!("  {}", self.ellipsis(bounded.hidden_lines)));
        }
        self.block(&lines)
    }

    /// Renders a usage annotation on its own line.
    #[must_use]
    pub fn render_usage(&self, kind: &EventKind, usage: &Usage) -> String {
        let (color, label) = kind_style(kind);
        let line = format!("{} {}", self.header(color, &label), self.usage_note(usage));
        self.block(&[line])
    }

    /// Renders a message whose content items all have unrecognized shapes.
    #[must_use]
    pub fn render_content_summary(&self, kind: &EventKind, count: usize) -> String {
        let (color, label) = kind_style(kind);
        let line = format!(
            "{} {}",
            self.header(color, &label),
            self.palette.paint(Color::Dim, &format!("{count} content items"))
        );
        self.block(&[line])
    }

    /// Renders a single content item of unknown shape.
    #[must_use]
    pub fn render_unknown_item(&self, kind: &EventKind, raw: &Value) -> String {
        let (color, label) = kind_style(kind);
        let mut lines = vec![self.header(color, &label)];
        lines.push(format!("  {}", self.json_preview(raw)));
        self.block(&lines)
    }

    /// Renders the interim line for a call waiting on its result.
    ///
    /// Checklist calls show their full checklist here instead.
    #[must_use]
    pub fn render_pending_call(&self, call: &ToolCall) -> String {
        if call.todos().is_some() {
            return self.render_todos(call);
        }
        let mut line = self.call_header(call);
        line.push(' ');
        line.push_str(&self.palette.paint(Color::Dim, "(awaiting result…)"));
        self.block(&[line])
    }

    /// Renders a call that carries no correlation id.
    #[must_use]
    pub fn render_call(&self, call: &ToolCall) -> String {
        if call.todos().is_some() {
            return self.render_todos(call);
        }
        let mut lines = vec![self.call_header(call)];
        self.push_annotations(&mut lines, call);
        self.block(&lines)
    }

    /// Renders a call together with its result, after the call was shown.
    ///
    /// Checklist calls only get a compact header here.
    #[must_use]
    pub fn render_pair(&self, pair: &ToolPair) -> String {
        let call = &pair.call;
        let mut lines = Vec::new();
        if let Some(todos) = call.todos() {
            lines.push(format!(
                "{} {}",
                self.call_header(call),
                self.palette
                    .paint(Color::Dim, &format!("({} items)", todos.len()))
            ));
        } else {
            lines.push(self.call_header(call));
            self.push_annotations(&mut lines, call);
        }
        self.push_result(&mut lines, &pair.result, "  ");
        self.block(&lines)
    }

    /// Renders a pair completed by its call, so nothing was shown for the call yet.
    ///
    /// Checklist calls draw their full checklist above the result here, since
    /// no interim block carried it.
    #[must_use]
    pub fn render_unannounced_pair(&self, pair: &ToolPair) -> String {
        if pair.call.todos().is_none() {
            return self.render_pair(pair);
        }
        let mut lines = self.todo_lines(&pair.call);
        self.push_result(&mut lines, &pair.result, "  ");
        self.block(&lines)
    }

    /// Renders a result that carries no correlation id.
    #[must_use]
    pub fn render_result(&self, result: &ToolResult) -> String {
        let mut lines = Vec::new();
        self.push_result(&mut lines, result, "");
        self.block(&lines)
    }

    /// Renders the final result in full.
    #[must_use]
    pub fn render_final_result(&self, result: &FinalResult) -> String {
        let color = if result.is_error { Color::Red } else { Color::Green };
        let mut lines = vec![self
            .palette
            .strong(color, &format!("{BANNER} Final Result {BANNER}"))];
        if !result.text.is_empty() {
            lines.extend(result.text.lines().map(String::from));
        }
        let stats = Self::result_stats(result);
        if !stats.is_empty() {
            lines.push(self.palette.paint(Color::Dim, &stats.join(" | ")));
        }
        self.block(&lines)
    }

    /// Renders the closing summary of the last assistant text, in full.
    #[must_use]
    pub fn render_final_assistant_message(&self, text: &str) -> String {
        let mut lines = vec![self
            .palette
            .strong(Color::Green, &format!("{BANNER} Final Assistant Message {BANNER}"))];
        lines.extend(text.lines().map(String::from));
        self.block(&lines)
    }

    /// Renders a generic structured event.
    #[must_use]
    pub fn render_notice(&self, notice: &Notice) -> String {
        let (color, _) = kind_style(&notice.kind);
        let mut header = self.header(color, &notice.label);
        let mut lines = Vec::new();
        match notice.body.as_deref() {
            Some(body) if body.lines().nth(1).is_none() => {
                header.push_str(&format!(": {}", single_line(body, self.config.max_chars)));
                lines.push(header);
            }
            Some(body) => {
                lines.push(header);
                self.push_truncated(&mut lines, body, "  ");
            }
            None => lines.push(header),
        }
        for (key, value) in &notice.details {
            let shown = single_line(value, self.config.max_chars);
            lines.push(format!("  {}", self.palette.paint(Color::Dim, &format!("{key}: {shown}"))));
        }
        if notice.body.is_none() && notice.details.is_empty() {
            lines.push(format!("  {}", self.json_preview(&notice.raw)));
        }
        self.block(&lines)
    }

    /// Renders a JSON value with no recognizable shape.
    #[must_use]
    pub fn render_unknown(&self, raw: &Value) -> String {
        let lines = vec![
            self.header(Color::Neutral, "Unknown"),
            format!("  {}", self.json_preview(raw)),
        ];
        self.block(&lines)
    }

    /// Renders a line that was not valid JSON.
    #[must_use]
    pub fn render_parse_error(&self, error: &ParseError) -> String {
        let header = format!(
            "{} {}",
            self.palette.strong(Color::Red, &format!("{BULLET} Parse Error")),
            self.palette.paint(Color::Dim, &error.reason)
        );
        let mut snippet = error.snippet.clone();
        if error.truncated {
            snippet.push('…');
        }
        self.block(&[header, format!("  {snippet}")])
    }

    fn header(&self, color: Color, label: &str) -> String {
        self.palette.strong(color, &format!("{BULLET} {label}"))
    }

    fn call_header(&self, call: &ToolCall) -> String {
        let (color, label) = kind_style(&EventKind::ToolCall);
        let mut header = self.header(color, &format!("{label}: {}", call.name));
        if let Some(primary) = summarize_call(call).primary {
            header.push(' ');
            header.push_str(&primary);
        }
        header
    }

    fn push_annotations(&self, lines: &mut Vec<String>, call: &ToolCall) {
        for annotation in summarize_call(call).annotations {
            lines.push(format!("  {}", self.palette.paint(Color::Dim, &annotation)));
        }
    }

    fn push_result(&self, lines: &mut Vec<String>, result: &ToolResult, indent: &str) {
        let label = if result.is_error {
            "Tool Error".to_string()
        } else {
            kind_style(&EventKind::ToolResult).1
        };
        lines.push(format!(
            "{indent}{}",
            self.palette
                .strong(result_color(result.is_error), &format!("{RESULT_MARK} {label}"))
        ));
        if result.content.trim().is_empty() {
            lines.push(format!(
                "{indent}    {}",
                self.palette.paint(Color::Dim, "(no output)")
            ));
        } else {
            self.push_truncated(lines, &result.content, &format!("{indent}    "));
        }
    }

    fn render_todos(&self, call: &ToolCall) -> String {
        self.block(&self.todo_lines(call))
    }

    fn todo_lines(&self, call: &ToolCall) -> Vec<String> {
        let items = call.todos().map(|raw| todo_items(raw)).unwrap_or_default();
        let completed = items
            .iter()
            .filter(|item| item.status == TodoStatus::Done)
            .count();
        let percent = completion_percent(completed, items.len());
        let mut lines = vec![format!(
            "{} {}",
            self.header(Color::Cyan, "Todo List"),
            self.palette.paint(
                Color::Dim,
                &format!("{completed}/{} completed ({percent}%)", items.len())
            )
        )];
        for item in &items {
            let text = single_line(&item.text, self.config.max_chars);
            let line = match item.status {
                TodoStatus::Done => self
                    .palette
                    .paint(Color::Dim, &format!("{} {text}", item.status.glyph())),
                TodoStatus::InProgress => format!(
                    "{} {}",
                    self.palette
                        .strong(Color::Yellow, &format!("{} {text}", item.status.glyph())),
                    self.palette.strong(Color::Yellow, "ACTIVE")
                ),
                TodoStatus::Pending => format!("{} {text}", item.status.glyph()),
            };
            lines.push(format!("  {line}"));
        }
        lines
    }

    fn push_truncated(&self, lines: &mut Vec<String>, text: &str, indent: &str) {
        let bounded = truncate_block(text, self.config.max_lines, self.config.max_chars);
        lines.extend(bounded.text.lines().map(|line| format!("{indent}{line}")));
        if bounded.truncated {
            lines.push(format!("{indent}{}", self.ellipsis(bounded.hidden_lines)));
        }
    }

    fn ellipsis(&self, hidden_lines: usize) -> String {
        let marker = if hidden_lines > 0 {
            format!("… ({hidden_lines} more lines)")
        } else {
            "…".to_string()
        };
        self.palette.paint(Color::Dim, &marker)
    }

    fn usage_note(&self, usage: &Usage) -> String {
        self.palette.paint(
            Color::Dim,
            &format!("({}/{} tokens)", usage.input_tokens, usage.output_tokens),
        )
    }

    fn json_preview(&self, raw: &Value) -> String {
        self.palette
            .paint(Color::Dim, &single_line(&raw.to_string(), self.config.max_chars))
    }

    fn result_stats(result: &FinalResult) -> Vec<String> {
        let mut stats = Vec::new();
        if let Some(subtype) = result.subtype.as_deref().filter(|s| *s != "success") {
            stats.push(format!("status: {subtype}"));
        }
        if let Some(ms) = result.duration_ms {
            stats.push(format!("duration: {}", format_duration_ms(ms)));
        }
        if let Some(turns) = result.num_turns {
            stats.push(format!("turns: {turns}"));
        }
        if let Some(cost) = result.total_cost_usd {
            stats.push(format!("cost: ${cost:.4}"));
        }
        if let Some(usage) = result.usage {
            stats.push(format!(
                "{}/{} tokens",
                usage.input_tokens, usage.output_tokens
            ));
        }
        stats
    }

    fn block(&self, lines: &[String]) -> String {
        let mut out = String::new();
        if self.config.debug {
            let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
            out.push_str(&format!("[{now}] "));
        }
        for line in lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

#[allow(clippy::cast_precision_loss)]
fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{ms}ms")
    } else {
        format!("{:.1}s", ms as f64 / 1000.0)
    }
}
