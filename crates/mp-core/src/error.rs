//! Error types for the monophoton analysis.

use thiserror::Error;

/// Workspace-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Validation error (malformed config, mismatched binning, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed input record
    #[error("Input error: {0}")]
    Input(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
