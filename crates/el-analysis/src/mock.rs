//! Mock analyzer for testing. Serves canned text and records requests.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::types::{AnalysisResult, Analyzer};

/// An analyzer that never touches the network.
pub struct MockAnalyzer {
    result: AnalysisResult,
    calls: Mutex<Vec<String>>,
}

impl MockAnalyzer {
    /// Always answer with `text`.
    pub fn responding(text: impl Into<String>) -> Self {
        Self::with_result(AnalysisResult::Completed(text.into()))
    }

    /// Always fail with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_result(AnalysisResult::Failed(reason.into()))
    }

    fn with_result(result: AnalysisResult) -> Self {
        Self {
            result,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Error blocks received so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Analyzer for MockAnalyzer {
    async fn analyze(&self, error: &str) -> AnalysisResult {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(error.to_string());
        }
        self.result.clone()
    }

    fn name(&self) -> &str {
        "mock"
    }
}
