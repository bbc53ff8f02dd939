//! OpenAI chat completions client for error diagnosis.
//!
//! Sends the extracted error block with a fixed instruction template and
//! returns the model's answer. One attempt per call; any failure becomes a
//! failed `AnalysisResult` so the report can always be written.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::types::{AnalysisResult, Analyzer};

/// System instruction sent with every request.
const SYSTEM_PROMPT: &str = "You are an expert system analyst specializing in error diagnosis and debugging. Provide technical, actionable analysis focusing on the error and its context.";

/// Build the user prompt embedding `error`.
pub fn build_prompt(error: &str) -> String {
    format!(
        "Analyze this error from a log file. Please provide:
1. Error Type: The specific type of error (e.g., SQL, Runtime, Network, etc.)
2. Root Cause: What specifically caused this error
3. Impact: What operation or functionality was affected
4. Solution: Specific steps to fix this issue
5. Prevention: How to prevent this in future

Log content:
{error}
"
    )
}

/// Settings for the chat completions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    /// API base URL, without the `/chat/completions` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model to use for analysis.
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Upper bound on generated tokens.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_model() -> String {
    "gpt-4-turbo-preview".into()
}
fn default_temperature() -> f64 {
    0.7
}
fn default_max_tokens() -> u32 {
    1000
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Chat completions request body.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat completions response (only fields we need).
#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Error envelope returned with non-2xx statuses.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Analyzer backed by an OpenAI-compatible chat completions API.
pub struct OpenAiAnalyzer {
    client: reqwest::Client,
    config: OpenAiConfig,
    api_key: String,
}

impl OpenAiAnalyzer {
    pub fn new(config: OpenAiConfig, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            api_key: api_key.into(),
        }
    }

    async fn request(&self, error: &str) -> Result<String, AnalysisError> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let prompt = build_prompt(error);

        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&raw)
                .ok()
                .and_then(|b| b.error)
                .map(|e| e.message)
                .unwrap_or(raw);
            return Err(AnalysisError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Decode(e.to_string()))?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AnalysisError::EmptyResponse)
    }
}

#[async_trait]
impl Analyzer for OpenAiAnalyzer {
    async fn analyze(&self, error: &str) -> AnalysisResult {
        tracing::debug!(model = %self.config.model, chars = error.len(), "requesting analysis");
        match self.request(error).await {
            Ok(text) => AnalysisResult::Completed(text),
            Err(e) => {
                tracing::warn!(error = %e, "analysis request failed");
                AnalysisResult::Failed(e.to_string())
            }
        }
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ERROR_BLOCK: &str = "[2024-01-01 10:00:00] [ERROR] Traceback (most recent call last):\n  File x\nValueError: bad";

    /// Helper: build a chat completions response body.
    fn completion(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })
    }

    /// Build an analyzer pointed at the mock server.
    fn analyzer_for(server: &MockServer) -> OpenAiAnalyzer {
        OpenAiAnalyzer::new(
            OpenAiConfig {
                base_url: server.uri(),
                ..OpenAiConfig::default()
            },
            "sk-test",
        )
    }

    #[tokio::test]
    async fn analyze_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4-turbo-preview",
                "temperature": 0.7,
                "max_tokens": 1000
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(
                "1. Error Type: Runtime\n2. Root Cause: bad input",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let result = analyzer_for(&server).analyze(ERROR_BLOCK).await;
        assert_eq!(
            result,
            AnalysisResult::Completed("1. Error Type: Runtime\n2. Root Cause: bad input".into())
        );
    }

    #[tokio::test]
    async fn request_carries_system_and_user_messages() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
            .mount(&server)
            .await;

        analyzer_for(&server).analyze(ERROR_BLOCK).await;

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], SYSTEM_PROMPT);
        assert_eq!(body["messages"][1]["role"], "user");
        assert!(
            body["messages"][1]["content"]
                .as_str()
                .unwrap()
                .contains("ValueError: bad")
        );
    }

    #[tokio::test]
    async fn auth_failure_becomes_marked_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let result = analyzer_for(&server).analyze(ERROR_BLOCK).await;
        assert!(result.is_failure());
        let text = result.text();
        assert!(text.starts_with("Error during analysis: "));
        assert!(text.contains("401"));
        assert!(text.contains("Incorrect API key provided"));
    }

    #[tokio::test]
    async fn quota_failure_with_plain_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let result = analyzer_for(&server).analyze(ERROR_BLOCK).await;
        assert_eq!(
            result,
            AnalysisResult::Failed("API returned 429: rate limited".into())
        );
    }

    #[tokio::test]
    async fn malformed_body_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = analyzer_for(&server).analyze(ERROR_BLOCK).await;
        assert!(result.is_failure());
        assert!(result.text().contains("failed to decode response"));
    }

    #[tokio::test]
    async fn empty_choices_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let result = analyzer_for(&server).analyze(ERROR_BLOCK).await;
        assert_eq!(
            result,
            AnalysisResult::Failed("response contained no message content".into())
        );
    }

    #[tokio::test]
    async fn unreachable_server_is_failure() {
        let server = MockServer::start().await;
        let analyzer = analyzer_for(&server);
        drop(server);

        let result = analyzer.analyze(ERROR_BLOCK).await;
        assert!(result.is_failure());
        assert!(result.text().contains("request failed"));
    }

    #[test]
    fn prompt_lists_five_sections() {
        let prompt = build_prompt("KeyError: 'id'");
        for label in [
            "1. Error Type:",
            "2. Root Cause:",
            "3. Impact:",
            "4. Solution:",
            "5. Prevention:",
        ] {
            assert!(prompt.contains(label), "missing {label}");
        }
        assert!(prompt.ends_with("Log content:\nKeyError: 'id'\n"));
    }

    #[test]
    fn config_defaults() {
        let config = OpenAiConfig::default();
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.model, "gpt-4-turbo-preview");
        assert!((config.temperature - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.max_tokens, 1000);
    }

    #[test]
    fn config_from_toml() {
        let toml_str = r#"
base_url = "http://localhost:8080/v1"
model = "gpt-4o-mini"
max_tokens = 400
"#;
        let config: OpenAiConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_tokens, 400);
        assert!((config.temperature - 0.7).abs() < f64::EPSILON);
    }
}
