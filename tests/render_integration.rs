//! Integration tests for block formatting.

use agent_stream_visualizer::{
    completion_percent, single_line, summarize_call, truncate_block, EventKind, FinalResult,
    Notice, ParseError, Renderer, ToolCall, ToolPair, ToolResult, Usage, VisualizerConfig,
};
use serde_json::{json, Map, Value};

fn plain() -> Renderer {
    Renderer::new(VisualizerConfig::new().with_color(false))
}

fn colored() -> Renderer {
    Renderer::new(VisualizerConfig::new())
}

fn tool(name: &str, input: Value) -> ToolCall {
    let Value::Object(input) = input else {
        panic!("input must be an object");
    };
    ToolCall {
        id: Some("id".to_string()),
        name: name.to_string(),
        input,
    }
}

#[test]
fn test_primary_argument_priority() {
    let summary = summarize_call(&tool(
        "Mixed",
        json!({"url": "https://x", "command": "ls", "file_path": "/f"}),
    ));
    assert_eq!(summary.primary.as_deref(), Some("/f"));

    let summary = summarize_call(&tool("Fetch", json!({"prompt": "p", "url": "https://x"})));
    assert_eq!(summary.primary.as_deref(), Some("p"));
}

#[test]
fn test_secondary_annotations() {
    let summary = summarize_call(&tool(
        "Read",
        json!({"file_path": "/f", "offset": 20, "limit": 50, "timeout": 3000, "cwd": "/w"}),
    ));
    assert_eq!(
        summary.annotations,
        ["limit: 50", "offset: 20", "timeout: 3000ms", "cwd: /w"]
    );
}

#[test]
fn test_edit_abbreviated_as_replace() {
    let old = "fn old() {\n    body();\n}";
    let new = "x".repeat(200);
    let summary = summarize_call(&tool(
        "Edit",
        json!({"file_path": "/f.rs", "old_string": old, "new_string": new}),
    ));
    let replace = summary
        .annotations
        .iter()
        .find(|a| a.starts_with("replace: "))
        .expect("no replace annotation");
    assert!(replace.contains("\"fn old() {…\""));
    assert!(!replace.contains("body()"));
    assert!(replace.chars().count() < 120);
}

#[test]
fn test_input_preview_when_nothing_recognized() {
    let summary = summarize_call(&tool("mcp__search", json!({"q": "rust"})));
    assert_eq!(summary.primary, None);
    assert_eq!(summary.annotations, [r#"input: {"q":"rust"}"#]);

    let empty = summarize_call(&tool("Noop", json!({})));
    assert!(empty.annotations.is_empty());
}

#[test]
fn test_completion_percent_rounds() {
    assert_eq!(completion_percent(1, 3), 33);
    assert_eq!(completion_percent(2, 3), 67);
    assert_eq!(completion_percent(1, 8), 13);
    assert_eq!(completion_percent(3, 3), 100);
    assert_eq!(completion_percent(0, 0), 0);
}

#[test]
fn test_todo_block() {
    let call = tool(
        "TodoWrite",
        json!({"todos": [
            {"content": "a", "status": "completed"},
            {"content": "b", "status": "completed"},
            {"content": "c", "status": "in_progress"}
        ]}),
    );
    let block = plain().render_pending_call(&call);
    assert_eq!(
        block,
        "● Todo List 2/3 completed (67%)\n  ✔ a\n  ✔ b\n  ◐ c ACTIVE\n"
    );
}

#[test]
fn test_checklist_drawn_inside_unannounced_pair() {
    let pair = ToolPair {
        call: tool(
            "TodoWrite",
            json!({"todos": [
                {"content": "a", "status": "completed"},
                {"content": "b", "status": "in_progress"}
            ]}),
        ),
        result: ToolResult {
            id: Some("id".to_string()),
            content: "ok".to_string(),
            is_error: false,
        },
    };
    let r = plain();
    assert_eq!(
        r.render_unannounced_pair(&pair),
        "● Todo List 1/2 completed (50%)\n  ✔ a\n  ◐ b ACTIVE\n  ⎿ Tool Result\n      ok\n"
    );
    assert_eq!(
        r.render_pair(&pair),
        "● Tool Use: TodoWrite (2 items)\n  ⎿ Tool Result\n      ok\n"
    );
}

#[test]
fn test_unannounced_pair_matches_pair_for_plain_tools() {
    let pair = ToolPair {
        call: tool("Read", json!({"file_path": "/a.ts"})),
        result: ToolResult {
            id: Some("id".to_string()),
            content: "x".to_string(),
            is_error: false,
        },
    };
    let r = plain();
    assert_eq!(r.render_unannounced_pair(&pair), r.render_pair(&pair));
}

#[test]
fn test_pending_call_is_one_line() {
    let call = tool("Bash", json!({"command": "cargo fmt\ncargo test", "timeout": 1}));
    let block = plain().render_pending_call(&call);
    assert_eq!(block, "● Tool Use: Bash cargo fmt… (awaiting result…)\n");
}

#[test]
fn test_pair_block_layout() {
    let pair = ToolPair {
        call: tool("Read", json!({"file_path": "/a.ts", "limit": 5})),
        result: ToolResult {
            id: Some("id".to_string()),
            content: "l1\nl2".to_string(),
            is_error: false,
        },
    };
    assert_eq!(
        plain().render_pair(&pair),
        "● Tool Use: Read /a.ts\n  limit: 5\n  ⎿ Tool Result\n      l1\n      l2\n"
    );
}

#[test]
fn test_empty_result_marked() {
    let pair = ToolPair {
        call: tool("Write", json!({"file_path": "/b"})),
        result: ToolResult {
            id: Some("id".to_string()),
            content: "  ".to_string(),
            is_error: false,
        },
    };
    assert!(plain().render_pair(&pair).contains("(no output)"));
}

#[test]
fn test_tool_output_truncated() {
    let config = VisualizerConfig::new().with_color(false).with_max_lines(2);
    let pair = ToolPair {
        call: tool("Bash", json!({"command": "seq 5"})),
        result: ToolResult {
            id: Some("id".to_string()),
            content: "1\n2\n3\n4\n5".to_string(),
            is_error: false,
        },
    };
    let block = Renderer::new(config).render_pair(&pair);
    assert!(block.contains("      2\n"));
    assert!(!block.contains("      3\n"));
    assert!(block.contains("… (3 more lines)"));
}

#[test]
fn test_kind_colors() {
    let r = colored();
    assert!(r.render_text(&EventKind::User, "u", None).contains("\x1b[34m"));
    assert!(r.render_text(&EventKind::Assistant, "a", None).contains("\x1b[32m"));
    let call = tool("Read", json!({"file_path": "/a"}));
    assert!(r.render_pending_call(&call).contains("\x1b[36m"));
    let ok = ToolPair {
        call: call.clone(),
        result: ToolResult {
            id: None,
            content: "fine".to_string(),
            is_error: false,
        },
    };
    assert!(r.render_pair(&ok).contains("\x1b[33m"));
    let failed = ToolPair {
        call,
        result: ToolResult {
            id: None,
            content: "boom".to_string(),
            is_error: true,
        },
    };
    let block = r.render_pair(&failed);
    assert!(block.contains("\x1b[31m"));
    assert!(block.contains("Tool Error"));
}

#[test]
fn test_system_notice_is_magenta_and_others_neutral() {
    let r = colored();
    let system = Notice {
        kind: EventKind::System,
        label: "System".to_string(),
        body: Some("init".to_string()),
        details: Vec::new(),
        raw: json!({"type": "system"}),
    };
    assert!(r.render_notice(&system).contains("\x1b[35m"));
    let progress = Notice {
        kind: EventKind::Progress,
        label: "Progress".to_string(),
        body: None,
        details: vec![("step".to_string(), "3".to_string())],
        raw: json!({"type": "progress", "step": 3}),
    };
    let block = r.render_notice(&progress);
    assert!(block.contains("\x1b[37m"));
    assert!(block.contains("Progress"));
}

#[test]
fn test_no_color_emits_no_escapes() {
    let r = plain();
    let blocks = [
        r.render_text(&EventKind::Assistant, "hello", Some(&Usage::new(1, 2))),
        r.render_thinking("pondering"),
        r.render_final_result(&FinalResult {
            text: "done".to_string(),
            ..FinalResult::default()
        }),
        r.render_unknown(&json!({"a": 1})),
    ];
    for block in blocks {
        assert!(!block.contains('\x1b'), "escape code in {block:?}");
    }
}

#[test]
fn test_final_result_stats_line() {
    let block = plain().render_final_result(&FinalResult {
        text: "All ported".to_string(),
        is_error: false,
        subtype: Some("success".to_string()),
        duration_ms: Some(12_300),
        num_turns: Some(4),
        total_cost_usd: Some(0.5),
        usage: Some(Usage::new(100, 200)),
    });
    assert_eq!(
        block,
        "═══ Final Result ═══\nAll ported\nduration: 12.3s | turns: 4 | cost: $0.5000 | 100/200 tokens\n"
    );
}

#[test]
fn test_parse_error_block() {
    let block = plain().render_parse_error(&ParseError {
        snippet: "abc".to_string(),
        truncated: true,
        reason: "expected value".to_string(),
    });
    assert_eq!(block, "● Parse Error expected value\n  abc…\n");
}

#[test]
fn test_debug_prefix_on_every_block() {
    let r = Renderer::new(VisualizerConfig::new().with_color(false).with_debug());
    let blocks = [
        r.render_text(&EventKind::User, "x", None),
        r.render_final_assistant_message("y"),
        r.render_content_summary(&EventKind::Assistant, 2),
        r.render_call(&tool("Read", json!({"file_path": "/a"}))),
    ];
    for block in blocks {
        let stamp = block
            .strip_prefix('[')
            .and_then(|b| b.split_once(']'))
            .map(|(stamp, _)| stamp)
            .expect("missing timestamp");
        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
    }
}

#[test]
fn test_truncation_is_char_safe() {
    let text = "日本語".repeat(1000);
    let bounded = truncate_block(&text, 10, 500);
    assert_eq!(bounded.text.chars().count(), 500);
    assert!(bounded.truncated);
    assert_eq!(bounded.hidden_lines, 0);
    assert_eq!(single_line("ααα\nβ", 2), "αα…");
}

#[test]
fn test_unknown_item_preview_bounded() {
    let config = VisualizerConfig::new().with_color(false).with_max_chars(20);
    let mut big = Map::new();
    big.insert("payload".to_string(), json!("z".repeat(100)));
    let block = Renderer::new(config).render_unknown_item(&EventKind::User, &Value::Object(big));
    assert!(block.starts_with("● User\n"));
    assert!(block.trim_end().ends_with('…'));
    assert!(block.len() < 80);
}
