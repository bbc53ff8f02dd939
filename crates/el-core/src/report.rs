//! Report rendering.

use chrono::NaiveDateTime;
use std::fmt::Write as _;

/// Text returned in place of a report when no error block was found.
pub const NO_ERRORS_MESSAGE: &str = "No errors found in the log file.";

/// Timestamp layout used in the report header.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const SEPARATOR_WIDTH: usize = 50;

/// A rendered-on-demand analysis report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// An error block was found and analyzed.
    Analyzed {
        generated_at: NaiveDateTime,
        source: String,
        error: String,
        analysis: String,
    },
    /// The log held no recognizable error block.
    NoErrors,
}

impl Report {
    pub fn analyzed(
        source: impl Into<String>,
        generated_at: NaiveDateTime,
        error: impl Into<String>,
        analysis: impl Into<String>,
    ) -> Self {
        Self::Analyzed {
            generated_at,
            source: source.into(),
            error: error.into(),
            analysis: analysis.into(),
        }
    }

    /// Whether this report carries an analysis section.
    pub fn has_error(&self) -> bool {
        matches!(self, Self::Analyzed { .. })
    }

    /// Render the full text document.
    pub fn render(&self) -> String {
        let Self::Analyzed {
            generated_at,
            source,
            error,
            analysis,
        } = self
        else {
            return NO_ERRORS_MESSAGE.to_string();
        };

        let rule = "=".repeat(SEPARATOR_WIDTH);
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = writeln!(out, "Log Analysis Report");
        let _ = writeln!(out, "Generated: {}", generated_at.format(TIMESTAMP_FORMAT));
        let _ = writeln!(out, "File Analyzed: {source}");
        let _ = writeln!(out);
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out);
        let _ = writeln!(out, "Most Recent Error:");
        let _ = writeln!(out, "{error}");
        let _ = writeln!(out);
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out);
        let _ = writeln!(out, "Analysis:");
        let _ = writeln!(out, "{analysis}");
        out
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
