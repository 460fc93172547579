//! OpenAI-compatible provider implementation
//!
//! Speaks the `/chat/completions` protocol used by OpenAI and by hosted
//! gateways that mirror it. The default base URL points at the Euri gateway,
//! which serves both the sentiment and SWOT models.
//!
//! # Example
//!
//! ```no_run
//! use pulse_llm::{CompletionRequest, LLMProvider, Message};
//! use pulse_llm::providers::{OpenAIConfig, OpenAIProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = OpenAIConfig::new("sk-...")
//!         .with_api_base("https://api.openai.com/v1")
//!         .with_timeout(60);
//!     let provider = OpenAIProvider::with_config(config)?;
//!
//!     let request = CompletionRequest::builder("gpt-4.1-nano")
//!         .add_message(Message::user("Hello!"))
//!         .max_tokens(100)
//!         .build();
//!
//!     let response = provider.complete(request).await?;
//!     println!("{}", response.text().unwrap_or_default());
//!     Ok(())
//! }
//! ```

use crate::{
    CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message, Result, StopReason,
    TokenUsage,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Default chat-completion gateway
pub const DEFAULT_API_BASE: &str = "https://api.euron.one/api/v1/euri/alpha";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the OpenAI-compatible provider
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key sent as a bearer token
    pub api_key: String,

    /// Base URL; `/chat/completions` is appended
    pub api_base: String,

    /// Request timeout in seconds (default: 120)
    pub timeout_secs: u64,
}

impl OpenAIConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set custom API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Full URL of the chat-completion endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self::new(String::new())
    }
}

/// OpenAI-compatible chat-completion provider
pub struct OpenAIProvider {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIProvider {
    /// Create a new provider with custom configuration
    pub fn with_config(config: OpenAIConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(LLMError::ConfigurationError(
                "API key must not be empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a new provider with API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(OpenAIConfig::new(api_key))
    }

    /// Get the current configuration
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    #[instrument(skip(self, request), fields(model = %request.model, api_base = %self.config.api_base))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        debug!("Sending chat completion request");

        let openai_request = OpenAIRequest {
            model: request.model.clone(),
            messages: build_openai_messages(request.system, request.messages),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(self.config.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&openai_request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;

            return Err(match status.as_u16() {
                401 | 403 => LLMError::AuthenticationFailed,
                429 => LLMError::RateLimitExceeded(error_text),
                400 => LLMError::InvalidRequest(error_text),
                404 => LLMError::ModelNotFound(request.model),
                _ => LLMError::RequestFailed(format!("HTTP {status}: {error_text}")),
            });
        }

        let openai_response: OpenAIResponse = response.json().await.map_err(|e| {
            LLMError::UnexpectedResponse(format!("Failed to parse response: {e}"))
        })?;

        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LLMError::UnexpectedResponse("No choices in response".to_string()))?;

        let usage = openai_response.usage.map(TokenUsage::from).unwrap_or_default();
        let finish_reason = choice.finish_reason.unwrap_or_default();

        debug!(
            "Received response - stop_reason: {}, tokens: {}/{}",
            finish_reason, usage.input_tokens, usage.output_tokens
        );

        Ok(CompletionResponse {
            message: Message::assistant(choice.message.content.unwrap_or_default()),
            stop_reason: map_stop_reason(&finish_reason),
            usage,
        })
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
    #[serde(default)]
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    #[serde(default)]
    prompt_tokens: usize,
    #[serde(default)]
    completion_tokens: usize,
}

impl From<OpenAIUsage> for TokenUsage {
    fn from(usage: OpenAIUsage) -> Self {
        TokenUsage {
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
        }
    }
}

// ============================================================================
// Conversion functions
// ============================================================================

/// System prompt goes first in the messages array
fn build_openai_messages(system: Option<String>, messages: Vec<Message>) -> Vec<OpenAIMessage> {
    system
        .map(Message::system)
        .into_iter()
        .chain(messages)
        .map(|msg| OpenAIMessage {
            role: msg.role.as_str(),
            content: msg.content,
        })
        .collect()
}

fn map_stop_reason(reason: &str) -> StopReason {
    match reason {
        "length" => StopReason::MaxTokens,
        "content_filter" => {
            debug!("Content filtered by provider safety systems");
            StopReason::ContentFilter
        }
        "stop" => StopReason::EndTurn,
        other => {
            debug!("Unknown stop reason: {:?}", other);
            StopReason::EndTurn
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn provider_for(server: &mockito::Server) -> OpenAIProvider {
        let config = OpenAIConfig::new("test-key").with_api_base(server.url());
        OpenAIProvider::with_config(config).unwrap()
    }

    fn request() -> CompletionRequest {
        CompletionRequest::builder("gpt-4.1-nano")
            .add_message(Message::user("Summarize AAPL"))
            .max_tokens(700)
            .temperature(0.7)
            .build()
    }

    #[test]
    fn test_provider_creation() {
        let provider = OpenAIProvider::new("test-key").unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.config().api_key, "test-key");
        assert_eq!(provider.config().api_base, DEFAULT_API_BASE);
        assert_eq!(
            provider.config().completions_url(),
            "https://api.euron.one/api/v1/euri/alpha/chat/completions"
        );
    }

    #[test]
    fn test_empty_key_rejected() {
        let result = OpenAIProvider::new("  ");
        assert!(matches!(result, Err(LLMError::ConfigurationError(_))));
    }

    #[test]
    fn test_api_base_trailing_slash() {
        let config = OpenAIConfig::new("k").with_api_base("http://localhost:1234/v1/");
        assert_eq!(config.completions_url(), "http://localhost:1234/v1/chat/completions");
    }

    #[test]
    fn test_system_message_first() {
        let messages =
            build_openai_messages(Some("You are helpful".to_string()), vec![Message::user("hi")]);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, "You are helpful");
        assert_eq!(messages[1].role, "user");
    }

    #[test]
    fn test_stop_reason_mapping() {
        assert_eq!(map_stop_reason("stop"), StopReason::EndTurn);
        assert_eq!(map_stop_reason("length"), StopReason::MaxTokens);
        assert_eq!(map_stop_reason("content_filter"), StopReason::ContentFilter);
        assert_eq!(map_stop_reason(""), StopReason::EndTurn);
    }

    #[tokio::test]
    async fn test_complete_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-4.1-nano",
                "max_tokens": 700,
                "messages": [{"role": "user", "content": "Summarize AAPL"}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "choices": [{
                        "message": {"role": "assistant", "content": "Strengths: brand"},
                        "finish_reason": "stop"
                    }],
                    "usage": {"prompt_tokens": 12, "completion_tokens": 4}
                })
                .to_string(),
            )
            .create_async()
            .await;

        let response = provider_for(&server).complete(request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.text(), Some("Strengths: brand"));
        assert_eq!(response.stop_reason, StopReason::EndTurn);
        assert_eq!(response.usage.total(), 16);
    }

    #[tokio::test]
    async fn test_complete_without_usage() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"ok"},"finish_reason":null}]}"#)
            .create_async()
            .await;

        let response = provider_for(&server).complete(request()).await.unwrap();
        assert_eq!(response.text(), Some("ok"));
        assert_eq!(response.usage.total(), 0);
    }

    #[tokio::test]
    async fn test_complete_maps_http_errors() {
        let mut server = mockito::Server::new_async().await;
        let _unauthorized = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body("bad key")
            .create_async()
            .await;

        let err = provider_for(&server).complete(request()).await.unwrap_err();
        assert!(matches!(err, LLMError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn test_complete_rejects_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"unexpected": true}"#)
            .create_async()
            .await;

        let err = provider_for(&server).complete(request()).await.unwrap_err();
        assert!(matches!(err, LLMError::UnexpectedResponse(_)));
    }

    #[tokio::test]
    async fn test_complete_rejects_empty_choices() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let err = provider_for(&server).complete(request()).await.unwrap_err();
        assert!(matches!(err, LLMError::UnexpectedResponse(msg) if msg.contains("No choices")));
    }
}
