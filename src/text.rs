//! Char-boundary safe text bounding helpers.

/// Text cut down for interim display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncated {
    /// The visible part.
    pub text: String,
    /// Lines dropped after the visible part.
    pub hidden_lines: usize,
    /// Whether anything at all was dropped.
    pub truncated: bool,
}

/// Returns the longest prefix of `text` holding at most `max_chars` chars.
#[must_use]
pub fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Bounds a multi-line body to `max_lines` lines and `max_chars` chars.
#[must_use]
pub fn truncate_block(text: &str, max_lines: usize, max_chars: usize) -> Truncated {
    let trimmed = text.trim_end();
    let total_lines = trimmed.lines().count();
    let mut kept = trimmed
        .lines()
        .take(max_lines)
        .collect::<Vec<_>>()
        .join("\n");
    let mut truncated = total_lines > max_lines;
    if kept.chars().count() > max_chars {
        kept = char_prefix(&kept, max_chars).to_string();
        truncated = true;
    }
    let shown_lines = kept.lines().count();
    Truncated {
        text: kept,
        hidden_lines: total_lines.saturating_sub(shown_lines),
        truncated,
    }
}

/// Collapses text to its first line, bounded to `max_chars`, with `…` when cut.
#[must_use]
pub fn single_line(text: &str, max_chars: usize) -> String {
    let first = text.trim().lines().next().unwrap_or("");
    let multi_line = text.trim().lines().nth(1).is_some();
    let prefix = char_prefix(first, max_chars);
    if multi_line || prefix.len() < first.len() {
        format!("{prefix}…")
    } else {
        prefix.to_string()
    }
}

/// Capitalizes a `type` literal into a label: `tool_progress` → `Tool progress`.
#[must_use]
pub fn capitalize(raw: &str) -> String {
    let spaced = raw.replace('_', " ");
    let mut chars = spaced.chars();
    chars.next().map_or_else(String::new, |first| {
        format!("{}{}", first.to_uppercase(), chars.as_str())
    })
}
