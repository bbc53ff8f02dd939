//! Error analysis for errlens.
//!
//! The `Analyzer` trait is the seam between the pipeline and whatever
//! produces the diagnosis text. `OpenAiAnalyzer` calls an OpenAI-compatible
//! chat completions endpoint; `MockAnalyzer` serves canned text for tests.

pub mod error;
pub mod mock;
pub mod openai;
pub mod types;

pub use error::AnalysisError;
pub use mock::MockAnalyzer;
pub use openai::{OpenAiAnalyzer, OpenAiConfig, build_prompt};
pub use types::{AnalysisResult, Analyzer, FAILURE_MARKER};
