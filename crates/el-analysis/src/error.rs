//! Analysis request failures.

use thiserror::Error;

/// Why an analysis request did not produce text.
///
/// Never escapes an `Analyzer`; it is folded into a failed `AnalysisResult`.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("API returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("response contained no message content")]
    EmptyResponse,
}
