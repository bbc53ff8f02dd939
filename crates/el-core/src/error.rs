//! Core error types.

use thiserror::Error;

/// Errors raised while reading logs or writing reports.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error: {path}: {message}")]
    Io { path: String, message: String },

    #[error("log file not found: {0}")]
    NotFound(String),
}

/// Convenience alias for core results.
pub type CoreResult<T> = Result<T, CoreError>;
