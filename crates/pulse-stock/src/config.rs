//! Configuration for stock analysis operations
//!
//! A [`PulseConfig`] is built once at process start and handed to each
//! component. Nothing below this module reads the environment.

use crate::error::{Result, StockError};
use pulse_llm::providers::{OpenAIConfig, openai::DEFAULT_API_BASE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default SWOT report file name
pub const DEFAULT_REPORT_PATH: &str = "swot_report.pdf";

/// Sampling parameters for one kind of chat-completion call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionSettings {
    /// Model identifier sent to the gateway
    pub model: String,
    /// Output length bound
    pub max_tokens: usize,
    /// Sampling temperature
    pub temperature: f32,
}

impl CompletionSettings {
    pub fn new(model: impl Into<String>, max_tokens: usize, temperature: f32) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            temperature,
        }
    }

    /// Settings for the news-sentiment digest
    pub fn sentiment_default() -> Self {
        Self::new("gemini-2.0-flash-001", 700, 0.5)
    }

    /// Settings for the SWOT report
    pub fn swot_default() -> Self {
        Self::new("gpt-4.1-nano", 700, 0.7)
    }

    fn validate(&self, purpose: &str) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(StockError::ConfigError(format!(
                "{purpose} model must not be empty"
            )));
        }
        if self.max_tokens == 0 {
            return Err(StockError::ConfigError(format!(
                "{purpose} max_tokens must be greater than 0"
            )));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(StockError::ConfigError(format!(
                "{purpose} temperature must be within [0, 2]"
            )));
        }
        Ok(())
    }
}

/// Configuration for the analysis pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PulseConfig {
    /// API key for the chat-completion gateway
    pub llm_api_key: Option<String>,

    /// Base URL of the chat-completion gateway
    pub llm_api_base: String,

    /// LLM request timeout in seconds
    pub llm_timeout_secs: u64,

    /// Sentiment digest call parameters
    pub sentiment: CompletionSettings,

    /// SWOT report call parameters
    pub swot: CompletionSettings,

    /// Alpha Vantage API key (fallback source and profile enrichment)
    pub alpha_vantage_api_key: Option<String>,

    /// Alpha Vantage requests per minute
    pub alpha_vantage_rate_limit: u32,

    /// Observations kept from the fallback source
    pub fallback_limit: usize,

    /// Market data request timeout
    pub request_timeout: Duration,

    /// Where SWOT reports are written by default
    pub report_path: PathBuf,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            llm_api_key: None,
            llm_api_base: DEFAULT_API_BASE.to_string(),
            llm_timeout_secs: 120,
            sentiment: CompletionSettings::sentiment_default(),
            swot: CompletionSettings::swot_default(),
            alpha_vantage_api_key: None,
            alpha_vantage_rate_limit: 5, // free tier
            fallback_limit: 120,
            request_timeout: Duration::from_secs(30),
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
        }
    }
}

impl PulseConfig {
    /// Create a new configuration builder
    pub fn builder() -> PulseConfigBuilder {
        PulseConfigBuilder::default()
    }

    /// Build the configuration from process environment variables
    ///
    /// Call [`pulse_utils::load_dotenv`] first to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder();

        if let Some(key) = pulse_utils::env_any(&["EURI_API_KEY", "OPENAI_API_KEY"]) {
            builder = builder.llm_api_key(key);
        }
        if let Some(base) = pulse_utils::env_any(&["EURI_API_BASE", "OPENAI_API_BASE"]) {
            builder = builder.llm_api_base(base);
        }
        if let Some(key) = pulse_utils::env_any(&["ALPHA_VANTAGE_KEY", "ALPHA_VANTAGE_API_KEY"]) {
            builder = builder.alpha_vantage_api_key(key);
        }
        if let Some(model) = pulse_utils::env_any(&["SENTIMENT_MODEL"]) {
            builder = builder.sentiment_model(model);
        }
        if let Some(model) = pulse_utils::env_any(&["SWOT_MODEL"]) {
            builder = builder.swot_model(model);
        }
        if let Some(path) = pulse_utils::env_any(&["SWOT_REPORT_PATH"]) {
            builder = builder.report_path(path);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.sentiment.validate("sentiment")?;
        self.swot.validate("swot")?;

        if self.fallback_limit == 0 {
            return Err(StockError::ConfigError(
                "fallback_limit must be greater than 0".to_string(),
            ));
        }

        if self.alpha_vantage_rate_limit == 0 {
            return Err(StockError::ConfigError(
                "alpha_vantage_rate_limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Chat-completion client configuration
    ///
    /// Fails when no LLM API key is configured.
    pub fn llm_config(&self) -> Result<OpenAIConfig> {
        let key = self.llm_api_key.as_deref().ok_or_else(|| {
            StockError::ConfigError(
                "LLM API key not set (EURI_API_KEY or OPENAI_API_KEY)".to_string(),
            )
        })?;

        Ok(OpenAIConfig::new(key)
            .with_api_base(self.llm_api_base.as_str())
            .with_timeout(self.llm_timeout_secs))
    }
}

/// Builder for PulseConfig
#[derive(Debug, Default)]
pub struct PulseConfigBuilder {
    llm_api_key: Option<String>,
    llm_api_base: Option<String>,
    llm_timeout_secs: Option<u64>,
    sentiment: Option<CompletionSettings>,
    sentiment_model: Option<String>,
    swot: Option<CompletionSettings>,
    swot_model: Option<String>,
    alpha_vantage_api_key: Option<String>,
    alpha_vantage_rate_limit: Option<u32>,
    fallback_limit: Option<usize>,
    request_timeout: Option<Duration>,
    report_path: Option<PathBuf>,
}

impl PulseConfigBuilder {
    /// Set the chat-completion API key
    pub fn llm_api_key(mut self, key: impl Into<String>) -> Self {
        self.llm_api_key = Some(key.into());
        self
    }

    /// Set the chat-completion base URL
    pub fn llm_api_base(mut self, base: impl Into<String>) -> Self {
        self.llm_api_base = Some(base.into());
        self
    }

    /// Set the LLM request timeout in seconds
    pub fn llm_timeout_secs(mut self, secs: u64) -> Self {
        self.llm_timeout_secs = Some(secs);
        self
    }

    /// Replace the sentiment call parameters
    pub fn sentiment(mut self, settings: CompletionSettings) -> Self {
        self.sentiment = Some(settings);
        self
    }

    /// Override only the sentiment model
    pub fn sentiment_model(mut self, model: impl Into<String>) -> Self {
        self.sentiment_model = Some(model.into());
        self
    }

    /// Replace the SWOT call parameters
    pub fn swot(mut self, settings: CompletionSettings) -> Self {
        self.swot = Some(settings);
        self
    }

    /// Override only the SWOT model
    pub fn swot_model(mut self, model: impl Into<String>) -> Self {
        self.swot_model = Some(model.into());
        self
    }

    /// Set Alpha Vantage API key
    pub fn alpha_vantage_api_key(mut self, key: impl Into<String>) -> Self {
        self.alpha_vantage_api_key = Some(key.into());
        self
    }

    /// Set Alpha Vantage requests per minute
    pub fn alpha_vantage_rate_limit(mut self, per_minute: u32) -> Self {
        self.alpha_vantage_rate_limit = Some(per_minute);
        self
    }

    /// Set the number of observations kept from the fallback source
    pub fn fallback_limit(mut self, limit: usize) -> Self {
        self.fallback_limit = Some(limit);
        self
    }

    /// Set market data request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the default report path
    pub fn report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = Some(path.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<PulseConfig> {
        let defaults = PulseConfig::default();

        let mut sentiment = self.sentiment.unwrap_or(defaults.sentiment);
        if let Some(model) = self.sentiment_model {
            sentiment.model = model;
        }
        let mut swot = self.swot.unwrap_or(defaults.swot);
        if let Some(model) = self.swot_model {
            swot.model = model;
        }

        let config = PulseConfig {
            llm_api_key: self.llm_api_key,
            llm_api_base: self.llm_api_base.unwrap_or(defaults.llm_api_base),
            llm_timeout_secs: self.llm_timeout_secs.unwrap_or(defaults.llm_timeout_secs),
            sentiment,
            swot,
            alpha_vantage_api_key: self.alpha_vantage_api_key,
            alpha_vantage_rate_limit: self
                .alpha_vantage_rate_limit
                .unwrap_or(defaults.alpha_vantage_rate_limit),
            fallback_limit: self.fallback_limit.unwrap_or(defaults.fallback_limit),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            report_path: self.report_path.unwrap_or(defaults.report_path),
        };

        config.validate()?;
        Ok(config)
    }
}
