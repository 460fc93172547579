//! Model Context Protocol (MCP) server for stockpulse
//!
//! Exposes the tools of a [`pulse_tools::ToolRegistry`] to an external
//! tool-calling host over the stdio transport (newline-delimited JSON-RPC 2.0).
//!
//! # Example
//!
//! ```no_run
//! use pulse_mcp::{ServerInfo, StdioServer};
//! use pulse_tools::ToolRegistry;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new(ToolRegistry::new());
//! // registry.register(...);
//! let server = StdioServer::new(ServerInfo::new("stockpulse", "0.1.0"), registry);
//! server.run().await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod protocol;
pub mod server;

pub use error::MCPError;
pub use protocol::{JsonRpcRequest, JsonRpcResponse, PROTOCOL_VERSION};
pub use server::{ServerInfo, StdioServer};

/// Result type for MCP operations
pub type Result<T> = std::result::Result<T, MCPError>;
