//! End-to-end pipeline: read log → extract → analyze → render → write.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use el_analysis::{AnalysisResult, Analyzer};
use el_core::source::{read_log, write_report};
use el_core::{CoreResult, DebugObserver, Report, extract_latest_with};

use crate::config::AppConfig;

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Where the report was written.
    pub output_path: PathBuf,
    /// Whether an error block was found.
    pub error_found: bool,
    /// Whether the analysis request failed.
    pub analysis_failed: bool,
}

/// Build the report for the log at `path`.
///
/// The analyzer is only consulted when an error block was found.
pub async fn generate_report(
    path: &Path,
    analyzer: &dyn Analyzer,
    observer: &dyn DebugObserver,
    generated_at: NaiveDateTime,
) -> CoreResult<(Report, Option<AnalysisResult>)> {
    observer.debug("Starting report generation...");

    let log = read_log(path).await?;
    tracing::debug!(path = %path.display(), bytes = log.len(), "log loaded");

    let Some(span) = extract_latest_with(&log, observer) else {
        return Ok((Report::NoErrors, None));
    };

    tracing::info!(analyzer = analyzer.name(), rule = %span.rule, "analyzing latest error");
    let analysis = analyzer.analyze(&span.text).await;
    if let AnalysisResult::Failed(reason) = &analysis {
        observer.debug(&format!("Error during API call: {reason}"));
    }

    let report = Report::analyzed(
        path.display().to_string(),
        generated_at,
        span.text,
        analysis.text(),
    );
    observer.debug("Report generation completed");
    Ok((report, Some(analysis)))
}

/// Run once with `config`: generate the report and write it out.
///
/// The report is rendered in full before the output file is touched.
pub async fn run(
    config: &AppConfig,
    analyzer: &dyn Analyzer,
    observer: &dyn DebugObserver,
) -> CoreResult<RunSummary> {
    let now = Local::now().naive_local();
    let (report, analysis) =
        generate_report(&config.input_path, analyzer, observer, now).await?;

    write_report(&config.output_path, &report.render()).await?;
    tracing::info!(path = %config.output_path.display(), "report written");

    Ok(RunSummary {
        output_path: config.output_path.clone(),
        error_found: report.has_error(),
        analysis_failed: analysis.is_some_and(|a| a.is_failure()),
    })
}
