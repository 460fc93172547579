//! Tool management for stockpulse
//!
//! Tools are named operations with a JSON input schema. The MCP server exposes
//! every tool held by a [`ToolRegistry`] to an external tool-calling host.

pub mod error;
pub mod registry;
pub mod tool;

pub use error::{Result, ToolError};
pub use registry::ToolRegistry;
pub use tool::{Tool, ToolDescriptor};
