//! Error types for lexbind

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Failures of the lexer binding sequence
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// The session refused to switch to the external lexer, which means the
    /// lexer library was never loaded.
    #[error("Failed to set LPeg lexer")]
    BackendUnavailable,

    /// The external lexer reported a problem through its status channel
    #[error("{0}")]
    Lexer(String),
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid setting '{key}': {reason}")]
    Invalid { key: String, reason: String },
}
