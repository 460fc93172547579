//! Error types for MCP operations

use thiserror::Error;

/// Errors that can occur while serving MCP requests
#[derive(Error, Debug)]
pub enum MCPError {
    /// Transport read/write failed
    #[error("MCP transport failed: {0}")]
    TransportFailed(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
