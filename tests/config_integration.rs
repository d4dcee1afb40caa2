//! Integration tests for visualizer configuration.

use agent_stream_visualizer::{
    debug_requested, Error, VisualizerConfig, DEFAULT_MAX_CHARS, DEFAULT_MAX_LINES,
};
use std::io::Write;

#[test]
fn test_defaults() {
    let config = VisualizerConfig::default();
    assert!(!config.debug);
    assert!(config.color);
    assert_eq!(config.max_lines, DEFAULT_MAX_LINES);
    assert_eq!(config.max_chars, DEFAULT_MAX_CHARS);
}

#[test]
fn test_config_builder() {
    let config = VisualizerConfig::new()
        .with_debug()
        .with_color(false)
        .with_max_lines(3)
        .with_max_chars(40);
    assert!(config.debug);
    assert!(!config.color);
    assert_eq!(config.max_lines, 3);
    assert_eq!(config.max_chars, 40);
}

#[test]
fn test_debug_argument_detection() {
    assert!(debug_requested(["agent-visualize", "--debug"]));
    assert!(debug_requested(vec!["run".to_string(), "-d".to_string()]));
    assert!(!debug_requested(["agent-visualize", "--debugger", "log.jsonl"]));
    assert!(!debug_requested(Vec::<String>::new()));
    assert!(debug_requested(["agent-visualize", "log.jsonl", "-d"]));
}

#[test]
fn test_toml_display_table() {
    let config = VisualizerConfig::from_toml_str(
        "[display]\ndebug = true\ncolor = false\nmax_lines = 4\n",
    )
    .expect("valid config rejected");
    assert!(config.debug);
    assert!(!config.color);
    assert_eq!(config.max_lines, 4);
    assert_eq!(config.max_chars, DEFAULT_MAX_CHARS);
}

#[test]
fn test_empty_toml_keeps_defaults() {
    let config = VisualizerConfig::from_toml_str("").expect("empty config rejected");
    assert_eq!(config, VisualizerConfig::new());
}

#[test]
fn test_toml_rejects_unknown_and_mistyped_keys() {
    let unknown = VisualizerConfig::from_toml_str("[display]\nshiny = true\n");
    assert!(matches!(unknown, Err(Error::ConfigParse { .. })));
    let mistyped = VisualizerConfig::from_toml_str("[display]\nmax_lines = \"ten\"\n");
    assert!(matches!(mistyped, Err(Error::ConfigParse { .. })));
}

#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "[display]\nmax_chars = 80").expect("write temp file");
    let config = VisualizerConfig::from_file(file.path()).expect("config not loaded");
    assert_eq!(config.max_chars, 80);
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("absent.toml");
    let err = VisualizerConfig::from_file(&missing).expect_err("missing file loaded");
    assert!(matches!(err, Error::ConfigRead { ref path, .. } if *path == missing));
    assert!(err.to_string().contains("absent.toml"));
}
