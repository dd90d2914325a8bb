//! Error types for configuration loading.

use thiserror::Error;

/// Errors that can occur when loading tuning or settings files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read or written.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing failed.
    #[error("Parse error in '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Values parsed but are out of their valid domain.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
