//! Tool registry for managing available tools

use crate::{Result, Tool, ToolDescriptor, ToolError};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Registry for managing tools
#[derive(Default)]
pub struct ToolRegistry {
    tools: RwLock<BTreeMap<String, Arc<dyn Tool>>>,
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&self, tool: Arc<dyn Tool>) {
        let mut tools = self.tools.write().unwrap_or_else(PoisonError::into_inner);
        tools.insert(tool.name().to_string(), tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.get(name).cloned()
    }

    /// Descriptors for all registered tools, ordered by name
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.values().map(|tool| tool.descriptor()).collect()
    }

    /// Look up a tool and execute it
    pub async fn call(&self, name: &str, params: Value) -> Result<Value> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        tool.execute(params).await
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        async fn execute(&self, params: Value) -> Result<Value> {
            Ok(json!({ "echo": params }))
        }

        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the input back"
        }

        fn input_schema(&self) -> Value {
            json!({ "type": "object" })
        }
    }

    #[tokio::test]
    async fn test_register_and_call() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());

        registry.register(Arc::new(EchoTool));
        assert_eq!(registry.len(), 1);

        let result = registry.call("echo", json!({"a": 1})).await.unwrap();
        assert_eq!(result["echo"]["a"], 1);
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        let registry = ToolRegistry::new();
        let err = registry.call("missing", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::NotFound(name) if name == "missing"));
    }

    #[test]
    fn test_descriptors() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));

        let descriptors = registry.descriptors();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].name, "echo");

        let listed = serde_json::to_value(&descriptors[0]).unwrap();
        assert_eq!(listed["inputSchema"]["type"], "object");
    }
}
