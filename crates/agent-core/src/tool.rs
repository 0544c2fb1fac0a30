//! Tool System
//!
//! Statically declared tool descriptors plus the registry the dispatch
//! loop resolves against. The same descriptor table is handed to the LLM
//! provider for tool binding and to the tool-turn dispatcher.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{AgentError, Result};
use crate::message::ToolRequest;

/// Result from tool execution
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolResult {
    /// Tool that was called
    pub name: String,

    /// Whether execution succeeded
    pub success: bool,

    /// Output (result text or error description)
    pub output: String,
}

impl ToolResult {
    pub fn success(name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: true,
            output: output.into(),
        }
    }

    pub fn failure(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: false,
            output: error.into(),
        }
    }
}

/// Parameter definition for tool schema
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParameterSchema {
    /// Parameter name
    pub name: String,

    /// JSON Schema type (string, number, boolean, object, array)
    #[serde(rename = "type")]
    pub param_type: String,

    /// Human-readable description
    pub description: String,

    /// Whether this parameter is required
    #[serde(default)]
    pub required: bool,
}

impl ParameterSchema {
    /// Shorthand for a required string parameter, the common case here
    pub fn required_string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: "string".into(),
            description: description.into(),
            required: true,
        }
    }
}

/// Tool descriptor (for LLM function calling)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Unique tool identifier
    pub name: String,

    /// Human-readable description (shown to LLM)
    pub description: String,

    /// Parameter definitions
    pub parameters: Vec<ParameterSchema>,
}

/// Tool trait - implement to add new capabilities
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool's descriptor for LLM binding
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with the given request
    async fn execute(&self, request: &ToolRequest) -> Result<ToolResult>;

    /// Validate arguments before execution (optional)
    fn validate(&self, request: &ToolRequest) -> Result<()> {
        let schema = self.schema();

        for param in &schema.parameters {
            if param.required && !request.arguments.contains_key(&param.name) {
                return Err(AgentError::ToolValidation(format!(
                    "Missing required parameter: {}",
                    param.name
                )));
            }
        }

        Ok(())
    }
}

/// Registry for available tools. Immutable after startup registration.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a new tool
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let schema = tool.schema();
        self.tools.insert(schema.name.clone(), Arc::new(tool));
    }

    /// Register a boxed tool
    pub fn register_boxed(&mut self, tool: Arc<dyn Tool>) {
        let schema = tool.schema();
        self.tools.insert(schema.name.clone(), tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Execute a tool request
    pub async fn execute(&self, request: &ToolRequest) -> Result<ToolResult> {
        let tool = self
            .get(&request.name)
            .ok_or_else(|| AgentError::ToolNotFound(request.name.clone()))?;

        tool.validate(request)?;
        tool.execute(request).await
    }

    /// The full descriptor table (for the provider binding step)
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools.values().map(|t| t.schema()).collect()
    }

    /// Get tool names
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "echo".into(),
                description: "Echo the input back".into(),
                parameters: vec![ParameterSchema::required_string("text", "Text to echo")],
            }
        }

        async fn execute(&self, request: &ToolRequest) -> Result<ToolResult> {
            let text = request.str_arg("text").unwrap_or_default();
            Ok(ToolResult::success("echo", text))
        }
    }

    #[tokio::test]
    async fn test_registry_dispatch() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);

        assert_eq!(registry.len(), 1);
        assert!(registry.get("echo").is_some());
        assert!(registry.get("unknown").is_none());

        let mut args = HashMap::new();
        args.insert("text".to_string(), serde_json::json!("hi"));
        let request = ToolRequest::new("echo", args);

        let result = registry.execute(&request).await.unwrap();
        assert!(result.success);
        assert_eq!(result.output, "hi");
    }

    #[tokio::test]
    async fn test_unknown_tool_is_an_error() {
        let registry = ToolRegistry::new();
        let request = ToolRequest::new("nope", HashMap::new());

        let err = registry.execute(&request).await.unwrap_err();
        assert!(matches!(err, AgentError::ToolNotFound(_)));
    }

    #[tokio::test]
    async fn test_missing_required_parameter() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);

        let request = ToolRequest::new("echo", HashMap::new());
        let err = registry.execute(&request).await.unwrap_err();
        assert!(matches!(err, AgentError::ToolValidation(_)));
    }
}
