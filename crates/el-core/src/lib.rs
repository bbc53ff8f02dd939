//! Core text logic for errlens.
//!
//! Locates the most recent error block in a plaintext log with a small set
//! of pattern rules, and renders the diagnosis report around it. Nothing in
//! here talks to the network; the analysis text is handed in by the caller.

pub mod error;
pub mod extract;
pub mod observe;
pub mod report;
pub mod source;
pub mod types;

// Re-export key types for convenience
pub use error::{CoreError, CoreResult};
pub use extract::{extract_latest, extract_latest_with, find_all};
pub use observe::{DebugObserver, NoopObserver, RecordingObserver};
pub use report::{NO_ERRORS_MESSAGE, Report};
pub use types::{ErrorSpan, PatternRule};
