//! Analysis result type and the `Analyzer` trait.

use async_trait::async_trait;

/// Prefix on the report text when the analysis could not be obtained.
pub const FAILURE_MARKER: &str = "Error during analysis: ";

/// Outcome of one analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisResult {
    /// Diagnosis text returned by the service.
    Completed(String),
    /// Description of why the request failed.
    Failed(String),
}

impl AnalysisResult {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Text to embed in the report.
    pub fn text(&self) -> String {
        match self {
            Self::Completed(text) => text.clone(),
            Self::Failed(reason) => format!("{FAILURE_MARKER}{reason}"),
        }
    }
}

impl std::fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed(text) => f.write_str(text),
            Self::Failed(reason) => write!(f, "{FAILURE_MARKER}{reason}"),
        }
    }
}

/// Produces diagnosis text for an error block.
///
/// Implementations must not fail: any problem talking to the backing
/// service is reported as [`AnalysisResult::Failed`].
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Analyze one error block.
    async fn analyze(&self, error: &str) -> AnalysisResult;

    /// Name of this analyzer (for logging).
    fn name(&self) -> &str;
}
