//! Error types for the agent-stream-visualizer library.
//!
//! The interpreter itself never fails on bad input. The only errors surfaced
//! here come from the caller's I/O and from loading configuration.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The result type for agent-stream-visualizer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while visualizing a stream.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading from the input source failed.
    #[error("failed to read input stream: {source}")]
    ReadInput {
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Writing to the output sink failed.
    #[error("failed to write output: {source}")]
    WriteOutput {
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The configuration file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    ConfigRead {
        /// Path of the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The configuration file is not valid TOML for this crate.
    #[error("invalid config: {source}")]
    ConfigParse {
        /// The underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

impl Error {
    pub(crate) const fn write(source: io::Error) -> Self {
        Self::WriteOutput { source }
    }

    pub(crate) const fn read(source: io::Error) -> Self {
        Self::ReadInput { source }
    }
}
