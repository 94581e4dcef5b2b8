//! Tool registry for MCP tools.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::generator::SeminarGenerator;

use super::seminar_tool::GenerateSeminarHandler;

/// JSON-RPC error code for an unknown method or tool
pub const METHOD_NOT_FOUND: i32 = pmcp::ErrorCode::METHOD_NOT_FOUND.0;

/// JSON-RPC error code for rejected arguments
pub const INVALID_PARAMS: i32 = pmcp::ErrorCode::INVALID_PARAMS.0;

/// JSON-RPC error code for internal failures
pub const INTERNAL_ERROR: i32 = pmcp::ErrorCode::INTERNAL_ERROR.0;

/// An MCP tool that can be called by the client
#[derive(Clone)]
pub struct Tool {
    /// Tool name (e.g., "generate_seminar_materials")
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// JSON Schema for input parameters
    pub input_schema: Value,

    /// Handler function to execute the tool
    pub handler: Arc<dyn ToolHandler>,
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .finish()
    }
}

/// Protocol-level errors returned to the client instead of a tool response
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    #[error("{0}")]
    MethodNotFound(String),

    #[error("{0}")]
    InvalidParams(String),

    #[error("{0}")]
    Internal(String),
}

impl ToolError {
    /// JSON-RPC error code for this error
    pub fn code(&self) -> i32 {
        match self {
            ToolError::MethodNotFound(_) => METHOD_NOT_FOUND,
            ToolError::InvalidParams(_) => INVALID_PARAMS,
            ToolError::Internal(_) => INTERNAL_ERROR,
        }
    }
}

/// One content block of a tool response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

/// The `{content, isError}` envelope every tool call answers with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    pub content: Vec<TextContent>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolResponse {
    /// A successful response with a single text block
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![TextContent {
                kind: "text".to_string(),
                text: text.into(),
            }],
            is_error: false,
        }
    }

    /// A recovered failure reported inside the response
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::text(text)
        }
    }

    /// Serialize into the wire value
    pub fn into_value(self) -> Result<Value, ToolError> {
        serde_json::to_value(self).map_err(|e| ToolError::Internal(e.to_string()))
    }
}

/// Handler for executing a tool
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync + std::fmt::Debug {
    /// Execute the tool with the given arguments
    async fn execute(&self, args: Value) -> Result<Value, ToolError>;
}

/// Registry for all MCP tools
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Tool>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the registry exposing `generate_seminar_materials` over `generator`
    pub fn for_generator(generator: Arc<SeminarGenerator>) -> Self {
        let mut registry = Self::new();
        registry.register(GenerateSeminarHandler::tool(generator));
        registry
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: Tool) {
        self.tools.insert(tool.name.clone(), tool);
    }

    /// All registered tools, sorted by name
    pub fn all(&self) -> Vec<&Tool> {
        let mut tools: Vec<&Tool> = self.tools.values().collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Tool metadata as advertised to clients
    pub fn list(&self) -> Value {
        let tools: Vec<Value> = self
            .all()
            .into_iter()
            .map(|tool| {
                serde_json::json!({
                    "name": tool.name,
                    "description": tool.description,
                    "inputSchema": tool.input_schema,
                })
            })
            .collect();
        serde_json::json!({ "tools": tools })
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, args: Value) -> Result<Value, ToolError> {
        let tool = self.get(name).ok_or_else(|| {
            tracing::warn!("Rejected call to unknown tool '{}'", name);
            ToolError::MethodNotFound(format!("Unknown tool: {}", name))
        })?;

        tool.handler.execute(args).await
    }
}
