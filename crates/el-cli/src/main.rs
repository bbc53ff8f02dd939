//! errlens: diagnose the most recent error in a log file.
//!
//! Reads the log, sends the latest error block to the chat completions
//! API and writes a text report next to it.

use std::path::Path;

use tracing_subscriber::EnvFilter;

use el_analysis::OpenAiAnalyzer;
use el_cli::config::{self, AppConfig, CONFIG_FILE};
use el_cli::observer::TracingObserver;
use el_cli::runner;
use el_core::{DebugObserver, NoopObserver};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,el_cli=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "errlens starting");

    // Credential first: a missing key must stop us before any file I/O
    let api_key = config::resolve_credential()?;
    let config = AppConfig::load(Path::new(CONFIG_FILE))?;
    tracing::info!(
        input = %config.input_path.display(),
        output = %config.output_path.display(),
        model = %config.openai.model,
        "config loaded"
    );

    let analyzer = OpenAiAnalyzer::new(config.openai.clone(), api_key);
    let observer: Box<dyn DebugObserver> = if config.debug {
        Box::new(TracingObserver)
    } else {
        Box::new(NoopObserver)
    };

    let summary = runner::run(&config, &analyzer, observer.as_ref()).await?;
    tracing::info!(
        error_found = summary.error_found,
        analysis_failed = summary.analysis_failed,
        "errlens finished"
    );
    Ok(())
}
