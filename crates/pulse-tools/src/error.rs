//! Error types for tool execution

use thiserror::Error;

/// Result type alias for tool operations
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type for tool execution
#[derive(Error, Debug)]
pub enum ToolError {
    /// Parameters did not match the tool's input schema
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// Tool execution failed
    #[error("Tool execution failed: {0}")]
    ExecutionFailed(String),

    /// No tool registered under that name
    #[error("Tool not found: {0}")]
    NotFound(String),
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::InvalidParams(err.to_string())
    }
}
