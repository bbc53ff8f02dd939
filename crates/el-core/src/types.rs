//! Core extraction types.

use serde::{Deserialize, Serialize};

// ── Pattern Rule ──────────────────────────────────────────────

/// The rule shapes used to recognize an error block.
///
/// Rules are applied independently and their matches pooled, so one log
/// region may be matched by several rules at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternRule {
    /// `[timestamp] [ERROR]` entry carrying a traceback that ends in an
    /// `...Error:` / `...Exception:` line.
    TaggedTraceback,
    /// Bare `Traceback (most recent call last):` block, with or without a
    /// timestamped header.
    PlainTraceback,
    /// Any `[timestamp] [ERROR]` or `[timestamp] [CRITICAL]` entry.
    TaggedLine,
}

impl PatternRule {
    /// Rule application order.
    pub const ALL: [PatternRule; 3] = [
        PatternRule::TaggedTraceback,
        PatternRule::PlainTraceback,
        PatternRule::TaggedLine,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TaggedTraceback => "tagged_traceback",
            Self::PlainTraceback => "plain_traceback",
            Self::TaggedLine => "tagged_line",
        }
    }

    /// Whether matches of this rule start at a timestamped entry header.
    pub(crate) fn is_tagged(&self) -> bool {
        matches!(self, Self::TaggedTraceback | Self::TaggedLine)
    }
}

impl std::fmt::Display for PatternRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Error Span ────────────────────────────────────────────────

/// One matched error block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSpan {
    /// Rule that produced the match.
    pub rule: PatternRule,
    /// Byte offset of the match start in the log text.
    pub start: usize,
    /// Byte offset one past the match end (the next entry boundary).
    pub end: usize,
    /// Matched text with surrounding whitespace trimmed.
    pub text: String,
}

impl ErrorSpan {
    /// Build a span over `log[start..end]`.
    pub(crate) fn new(rule: PatternRule, log: &str, start: usize, end: usize) -> Self {
        Self {
            rule,
            start,
            end,
            text: log[start..end].trim().to_string(),
        }
    }

    /// Whether `other` lies entirely inside this span.
    pub(crate) fn contains(&self, other: &ErrorSpan) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}
