//! Linter error types.

use std::path::Path;

use thiserror::Error;

/// Errors that can occur while setting up or running the linter.
///
/// Only [`LinterError::RuleLoad`] ever escapes to callers of
/// [`Engine`](crate::Engine); every other variant is folded into a fatal
/// message on the file it concerns.
#[derive(Debug, Error)]
pub enum LinterError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O error.
    #[error("File error: {0}")]
    File(String),

    /// Custom rule loading error.
    #[error("Failed to load rules from '{path}': {message}")]
    RuleLoad { path: String, message: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LinterError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a file error.
    pub fn file(message: impl Into<String>) -> Self {
        Self::File(message.into())
    }

    /// Creates a rule loading error for the given directory or rule file.
    pub fn rule_load(path: &Path, message: impl Into<String>) -> Self {
        Self::RuleLoad {
            path: path.display().to_string(),
            message: message.into(),
        }
    }
}
