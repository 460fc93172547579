//! Tool trait definition

use crate::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Trait for tools exposed to a tool-calling host
///
/// Each tool provides a name, description, and JSON schema for its input.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given parameters
    ///
    /// # Arguments
    ///
    /// * `params` - Tool input as JSON value (should match input_schema)
    ///
    /// # Returns
    ///
    /// Tool output as JSON value
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Get the tool's name
    ///
    /// Must be unique within a ToolRegistry
    fn name(&self) -> &str;

    /// Get the tool's description
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    ///
    /// let schema = json!({
    ///     "type": "object",
    ///     "properties": {
    ///         "ticker": { "type": "string" },
    ///         "period": { "type": "string", "default": "6mo" }
    ///     },
    ///     "required": ["ticker"]
    /// });
    /// assert_eq!(schema["required"][0], "ticker");
    /// ```
    fn input_schema(&self) -> Value;

    /// Describe the tool in the shape a host lists it
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

/// Listing entry for a tool
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}
