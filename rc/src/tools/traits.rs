//! Tool trait definition

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use super::context::ToolContext;

/// A tool that can be called by the coaching agent
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (matches the agent's tool_use name)
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> Value;

    /// Execute the tool
    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult;
}

/// Tool metadata handed to the agent runtime
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Result of a tool execution
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub content: String,
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    /// Create a successful result carrying a JSON payload
    pub fn data<T: Serialize>(payload: &T) -> Self {
        match serde_json::to_string_pretty(&serde_json::json!({ "data": payload })) {
            Ok(content) => Self::success(content),
            Err(e) => Self::error(format!("Failed to serialize result: {}", e)),
        }
    }

    /// Create an error result
    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: true,
        }
    }
}
