//! Configuration for a visualizer session.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default number of lines shown for interim text and tool output.
pub const DEFAULT_MAX_LINES: usize = 10;

/// Default number of characters shown for interim text and tool output.
pub const DEFAULT_MAX_CHARS: usize = 500;

/// Command-line arguments that switch debug mode on.
pub const DEBUG_ARGS: &[&str] = &["--debug", "-d"];

/// Returns true if any of `args` is a recognized debug argument.
pub fn debug_requested<I, S>(args: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter()
        .any(|arg| DEBUG_ARGS.contains(&arg.as_ref()))
}

/// Rendering options for a visualizer session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualizerConfig {
    /// Prefix every block with an ISO-8601 timestamp.
    pub debug: bool,
    /// Emit ANSI color codes.
    pub color: bool,
    /// Line cap for interim text and tool output.
    pub max_lines: usize,
    /// Character cap for interim text and tool output.
    pub max_chars: usize,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl VisualizerConfig {
    /// Creates the default configuration: colored, no timestamps.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            debug: false,
            color: true,
            max_lines: DEFAULT_MAX_LINES,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    /// Enables debug mode (timestamped blocks).
    #[must_use]
    pub const fn with_debug(mut self) -> Self {
        self.debug = true;
        self
    }

    /// Turns ANSI color on or off.
    #[must_use]
    pub const fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Sets the line cap for interim display.
    #[must_use]
    pub const fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    /// Sets the character cap for interim display.
    #[must_use]
    pub const fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Applies environment overrides: a non-empty `NO_COLOR` disables color.
    #[must_use]
    pub fn apply_env(self) -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        if no_color {
            self.with_color(false)
        } else {
            self
        }
    }

    /// Parses a TOML document with an optional `[display]` table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] if the document is not valid TOML or a
    /// key has the wrong type.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(source).map_err(|source| Error::ConfigParse { source })?;
        Ok(file.display.apply(Self::new()))
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigRead`] if the file cannot be read, or
    /// [`Error::ConfigParse`] if it is not valid.
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    display: DisplaySection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DisplaySection {
    debug: Option<bool>,
    color: Option<bool>,
    max_lines: Option<usize>,
    max_chars: Option<usize>,
}

impl DisplaySection {
    fn apply(self, mut config: VisualizerConfig) -> VisualizerConfig {
        if let Some(debug) = self.debug {
            config.debug = debug;
        }
        if let Some(color) = self.color {
            config.color = color;
        }
        if let Some(max_lines) = self.max_lines {
            config.max_lines = max_lines;
        }
        if let Some(max_chars) = self.max_chars {
            config.max_chars = max_chars;
        }
        config
    }
}
