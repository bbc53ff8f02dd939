//! Shared harness: a temp workspace with a log file and a mock
//! chat completions server.

#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use el_analysis::{OpenAiAnalyzer, OpenAiConfig};
use el_cli::config::AppConfig;

/// Log with an early tagged traceback and a later critical entry.
pub const MIXED_LOG: &str = "\
[2024-05-02 08:00:00] [INFO] service starting
[2024-05-02 08:00:03] [ERROR] Traceback (most recent call last):
  File \"/srv/app/db.py\", line 41, in connect
    conn = pool.get()
psycopg2.OperationalError: could not connect to server
[2024-05-02 08:00:04] [INFO] retrying in 5s
[2024-05-02 08:00:09] [ERROR] Traceback (most recent call last):
  File \"/srv/app/handlers.py\", line 88, in create_order
    total = compute(order)
ZeroDivisionError: division by zero
[2024-05-02 08:00:10] [INFO] request finished
";

pub const LATEST_ERROR: &str = "\
[2024-05-02 08:00:09] [ERROR] Traceback (most recent call last):
  File \"/srv/app/handlers.py\", line 88, in create_order
    total = compute(order)
ZeroDivisionError: division by zero";

pub struct Harness {
    pub dir: TempDir,
    pub server: MockServer,
    pub config: AppConfig,
}

impl Harness {
    /// Write `log` into a fresh temp dir and point the config at a mock server.
    pub async fn with_log(log: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let server = MockServer::start().await;
        let input_path: PathBuf = dir.path().join("error.log");
        std::fs::write(&input_path, log).unwrap();

        let config = AppConfig {
            input_path,
            output_path: dir.path().join("log_analysis_report.txt"),
            debug: true,
            openai: OpenAiConfig {
                base_url: server.uri(),
                ..OpenAiConfig::default()
            },
        };
        Self {
            dir,
            server,
            config,
        }
    }

    pub fn analyzer(&self) -> OpenAiAnalyzer {
        OpenAiAnalyzer::new(self.config.openai.clone(), "sk-e2e")
    }

    /// Answer every completion request with `content`.
    pub async fn respond_with(&self, content: &str, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
            })))
            .expect(expected_calls)
            .mount(&self.server)
            .await;
    }

    /// Fail every completion request with `status`.
    pub async fn fail_with(&self, status: u16, message: &str) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(status).set_body_json(serde_json::json!({
                "error": {"message": message}
            })))
            .mount(&self.server)
            .await;
    }

    pub fn written_report(&self) -> String {
        std::fs::read_to_string(&self.config.output_path).unwrap()
    }
}
