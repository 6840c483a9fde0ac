//! Error types for exprpad.

use std::io;
use thiserror::Error;

/// Result type alias for exprpad operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in exprpad operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Storage I/O error.
    #[error("Storage error: {0}")]
    Storage(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Session name was empty after trimming.
    #[error("Session name must not be empty")]
    EmptyName,

    /// Session not found.
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Expression evaluation failed.
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// Invalid argument to a CLI command.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
