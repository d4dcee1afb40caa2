//! Integration tests for tool call/result pairing.

use agent_stream_visualizer::{CorrelationStore, Registration, ToolCall, ToolPair, ToolResult};
use serde_json::{json, Map};

fn call(id: &str) -> ToolCall {
    let mut input = Map::new();
    input.insert("file_path".to_string(), json!("/a.ts"));
    ToolCall {
        id: Some(id.to_string()),
        name: "Read".to_string(),
        input,
    }
}

fn result(id: &str) -> ToolResult {
    ToolResult {
        id: Some(id.to_string()),
        content: "contents".to_string(),
        is_error: false,
    }
}

#[test]
fn test_call_first_pairs_on_result() {
    let mut store = CorrelationStore::new();
    assert!(matches!(
        store.register_call("t1", call("t1")),
        Registration::AwaitingResult(c) if c.name == "Read"
    ));
    assert_eq!(store.pending_call_count(), 1);
    let outcome = store.register_result("t1", result("t1"));
    assert_eq!(
        outcome,
        Registration::Paired(ToolPair {
            call: call("t1"),
            result: result("t1"),
        })
    );
    assert_eq!(store.pending_call_count(), 0);
    assert_eq!(store.pending_result_count(), 0);
}

#[test]
fn test_result_first_is_held_silently() {
    let mut store = CorrelationStore::new();
    assert_eq!(store.register_result("t1", result("t1")), Registration::Held);
    assert_eq!(store.pending_result_ids(), ["t1"]);
    assert_eq!(store.pending_call_count(), 0);
    let outcome = store.register_call("t1", call("t1"));
    assert!(matches!(outcome, Registration::Paired(_)));
    assert_eq!(store.pending_result_count(), 0);
}

#[test]
fn test_pair_is_identical_in_both_orders() {
    let mut forward = CorrelationStore::new();
    let _ = forward.register_call("x", call("x"));
    let Registration::Paired(first) = forward.register_result("x", result("x")) else {
        panic!("call-first did not pair");
    };

    let mut reverse = CorrelationStore::new();
    let _ = reverse.register_result("x", result("x"));
    let Registration::Paired(second) = reverse.register_call("x", call("x")) else {
        panic!("result-first did not pair");
    };
    assert_eq!(first, second);
}

#[test]
fn test_id_never_pending_on_both_sides() {
    let mut store = CorrelationStore::new();
    for id in ["a", "b", "c"] {
        let _ = store.register_call(id, call(id));
    }
    let _ = store.register_result("b", result("b"));
    let _ = store.register_result("d", result("d"));
    let calls = store.pending_call_ids();
    let results = store.pending_result_ids();
    assert_eq!(calls, ["a", "c"]);
    assert_eq!(results, ["d"]);
    assert!(calls.iter().all(|id| !results.contains(id)));
}

#[test]
fn test_paired_id_never_pairs_again() {
    let mut store = CorrelationStore::new();
    let _ = store.register_call("t1", call("t1"));
    let _ = store.register_result("t1", result("t1"));
    assert_eq!(store.register_result("t1", result("t1")), Registration::Duplicate);
    assert_eq!(store.register_call("t1", call("t1")), Registration::Duplicate);
    assert_eq!(store.paired_count(), 1);
    assert_eq!(store.pending_call_count(), 0);
    assert_eq!(store.pending_result_count(), 0);
}

#[test]
fn test_repeated_pending_half_is_duplicate() {
    let mut store = CorrelationStore::new();
    let _ = store.register_call("t1", call("t1"));
    assert_eq!(store.register_call("t1", call("t1")), Registration::Duplicate);
    let _ = store.register_result("t2", result("t2"));
    assert_eq!(store.register_result("t2", result("t2")), Registration::Duplicate);
    assert_eq!(store.pending_call_count(), 1);
    assert_eq!(store.pending_result_count(), 1);
}
