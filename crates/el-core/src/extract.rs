//! Latest error span extraction.
//!
//! Every rule runs over the whole log and the matches are pooled; the match
//! that starts furthest into the text wins. A match always extends to the
//! next line opening with a bracketed timestamp, or to the end of input.

use regex::Regex;
use std::sync::LazyLock;

use crate::observe::{DebugObserver, NoopObserver};
use crate::types::{ErrorSpan, PatternRule};

// Start of a timestamped entry: "[2024-01-15 12:34:56"
static RE_ENTRY_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\[\d{4}-\d{2}-\d{2}[ \t]+\d{2}:\d{2}:\d{2}").unwrap()
});

// Tag may follow other bracketed tokens on the header line ("[ts] [worker-1] [ERROR]")
static RE_ERROR_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\[\d{4}-\d{2}-\d{2}[ \t]+\d{2}:\d{2}:\d{2}[^\n]*?\] \[ERROR\]").unwrap()
});

static RE_SEVERE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\[\d{4}-\d{2}-\d{2}[ \t]+\d{2}:\d{2}:\d{2}[^\n]*?\] \[(?:ERROR|CRITICAL)\]")
        .unwrap()
});

static RE_TRACEBACK_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Traceback \(most recent call last\):").unwrap());

static RE_EXCEPTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w*(?:Error|Exception):").unwrap());

const TRACEBACK: &str = "Traceback";

/// Run every rule over `log` and return all matches, in rule order.
///
/// Matches from different rules may overlap; nothing is deduplicated here.
pub fn find_all(log: &str) -> Vec<ErrorSpan> {
    PatternRule::ALL
        .iter()
        .flat_map(|rule| match rule {
            PatternRule::TaggedTraceback => tagged_traceback(log),
            PatternRule::PlainTraceback => plain_traceback(log),
            PatternRule::TaggedLine => tagged_line(log),
        })
        .collect()
}

/// Return the most recent error block in `log`, if any.
pub fn extract_latest(log: &str) -> Option<ErrorSpan> {
    extract_latest_with(log, &NoopObserver)
}

/// Same as [`extract_latest`], reporting progress to `observer`.
pub fn extract_latest_with(log: &str, observer: &dyn DebugObserver) -> Option<ErrorSpan> {
    observer.debug("Extracting complete error context...");

    let pool = find_all(log);
    tracing::debug!(matches = pool.len(), "pattern rules applied");

    let latest = select_latest(&pool);
    match &latest {
        Some(span) => {
            tracing::debug!(rule = %span.rule, offset = span.start, "latest error span selected");
            observer.debug("Found error with complete context");
        }
        None => observer.debug("No errors found"),
    }
    latest
}

/// Pick the match with the largest start offset.
///
/// A plain traceback sitting inside a tagged entry is reported as that
/// entry. Ties go to the last match in pool order.
fn select_latest(pool: &[ErrorSpan]) -> Option<ErrorSpan> {
    // Tagged spans cover whole entries, so spans from different entries
    // never overlap and only the nearest one at or before a traceback can
    // contain it.
    let mut tagged: Vec<&ErrorSpan> = pool.iter().filter(|s| s.rule.is_tagged()).collect();
    tagged.sort_by_key(|s| s.start);

    let absorbed = |span: &ErrorSpan| {
        if span.rule.is_tagged() {
            return false;
        }
        let idx = tagged.partition_point(|t| t.start <= span.start);
        idx > 0 && tagged[idx - 1].contains(span)
    };

    pool.iter()
        .filter(|span| !absorbed(span))
        .max_by_key(|span| span.start)
        .cloned()
}

/// Byte offset where the entry containing `start` ends.
fn entry_end(log: &str, start: usize) -> usize {
    let from = start + log[start..].chars().next().map_or(0, char::len_utf8);
    RE_ENTRY_START
        .find_at(log, from)
        .map_or(log.len(), |m| m.start())
}

fn tagged_traceback(log: &str) -> Vec<ErrorSpan> {
    RE_ERROR_HEADER
        .find_iter(log)
        .filter_map(|header| {
            let end = entry_end(log, header.start());
            let body = &log[header.end()..end];
            let has_traceback = body
                .find(TRACEBACK)
                .is_some_and(|at| RE_EXCEPTION_LINE.is_match(&body[at + TRACEBACK.len()..]));
            has_traceback.then(|| {
                ErrorSpan::new(PatternRule::TaggedTraceback, log, header.start(), end)
            })
        })
        .collect()
}

fn plain_traceback(log: &str) -> Vec<ErrorSpan> {
    let mut spans = Vec::new();
    let mut pos = 0;

    while let Some(header) = RE_TRACEBACK_HEADER.find_at(log, pos) {
        let end = entry_end(log, header.start());
        if RE_EXCEPTION_LINE.is_match(&log[header.end()..end]) {
            spans.push(ErrorSpan::new(
                PatternRule::PlainTraceback,
                log,
                header.start(),
                end,
            ));
            pos = end;
        } else {
            pos = header.end();
        }
    }

    spans
}

fn tagged_line(log: &str) -> Vec<ErrorSpan> {
    RE_SEVERE_HEADER
        .find_iter(log)
        .map(|header| {
            let end = entry_end(log, header.start());
            ErrorSpan::new(PatternRule::TaggedLine, log, header.start(), end)
        })
        .collect()
}
