//! Error types for stock analysis operations

use thiserror::Error;

/// Stock analysis specific errors
#[derive(Debug, Error)]
pub enum StockError {
    /// Invalid stock symbol provided
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Unsupported history period
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// Data not available for the requested symbol
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// Rate limit exceeded for API
    #[error("Rate limit exceeded for {provider}")]
    RateLimitExceeded { provider: String },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// Alpha Vantage API error
    #[error("Alpha Vantage error: {0}")]
    AlphaVantageError(String),

    /// Technical indicator calculation error
    #[error("Technical indicator error: {0}")]
    IndicatorError(String),

    /// Chat-completion call failed
    #[error("LLM error: {0}")]
    LlmError(#[from] pulse_llm::LLMError),

    /// The model answered without any text
    #[error("Empty completion from model {model}")]
    EmptyCompletion { model: String },

    /// Prompt template failed to render
    #[error("Prompt error: {0}")]
    PromptError(#[from] minijinja::Error),

    /// PDF construction failed
    #[error("Document error: {0}")]
    DocumentError(#[from] lopdf::Error),

    /// Report file could not be written
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for stock operations
pub type Result<T> = std::result::Result<T, StockError>;

/// Convert StockError to the tool layer's error
impl From<StockError> for pulse_tools::ToolError {
    fn from(err: StockError) -> Self {
        match err {
            StockError::InvalidSymbol(_) | StockError::InvalidPeriod(_) => {
                pulse_tools::ToolError::InvalidParams(err.to_string())
            }
            other => pulse_tools::ToolError::ExecutionFailed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StockError::InvalidSymbol("INVALID".to_string());
        assert_eq!(err.to_string(), "Invalid symbol: INVALID");

        let err = StockError::DataUnavailable {
            symbol: "AAPL".to_string(),
            reason: "No data found".to_string(),
        };
        assert_eq!(err.to_string(), "Data not available for AAPL: No data found");
    }

    #[test]
    fn test_error_conversion() {
        let tool_err: pulse_tools::ToolError = StockError::InvalidPeriod("7w".to_string()).into();
        assert!(matches!(tool_err, pulse_tools::ToolError::InvalidParams(_)));

        let tool_err: pulse_tools::ToolError =
            StockError::AlphaVantageError("Test error".to_string()).into();
        match tool_err {
            pulse_tools::ToolError::ExecutionFailed(msg) => {
                assert!(msg.contains("Alpha Vantage error"));
            }
            _ => panic!("Expected ExecutionFailed variant"),
        }
    }
}
