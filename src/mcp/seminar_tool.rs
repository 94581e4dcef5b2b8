//! The `generate_seminar_materials` tool.

use std::sync::Arc;

use serde_json::Value;

use crate::generator::SeminarGenerator;
use crate::models::{GenerationRequest, ADVERTISED_MAX_SLIDES, ADVERTISED_MIN_SLIDES};

use super::tools::{Tool, ToolError, ToolHandler, ToolResponse};

/// Name the tool is registered under
pub const TOOL_NAME: &str = "generate_seminar_materials";

const TOOL_DESCRIPTION: &str =
    "Generate comprehensive seminar materials including PPTX and visualizations for a given topic";

/// Message returned when the arguments fail validation
pub const INVALID_ARGUMENTS: &str = "Invalid seminar generation arguments";

/// Handler for `generate_seminar_materials`
#[derive(Debug, Clone)]
pub struct GenerateSeminarHandler {
    generator: Arc<SeminarGenerator>,
}

impl GenerateSeminarHandler {
    pub fn new(generator: Arc<SeminarGenerator>) -> Self {
        Self { generator }
    }

    /// Input schema advertised for the tool
    pub fn input_schema() -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "topic": {
                    "type": "string",
                    "description": "The topic for the seminar"
                },
                "slides": {
                    "type": "number",
                    "description": "Number of slides (default: 20)",
                    "minimum": ADVERTISED_MIN_SLIDES,
                    "maximum": ADVERTISED_MAX_SLIDES
                },
                "includeVisuals": {
                    "type": "boolean",
                    "description": "Include visualization assets (default: true)"
                }
            },
            "required": ["topic"]
        })
    }

    /// The registrable tool
    pub fn tool(generator: Arc<SeminarGenerator>) -> Tool {
        Tool {
            name: TOOL_NAME.to_string(),
            description: TOOL_DESCRIPTION.to_string(),
            input_schema: Self::input_schema(),
            handler: Arc::new(Self::new(generator)),
        }
    }
}

#[async_trait::async_trait]
impl ToolHandler for GenerateSeminarHandler {
    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let request = GenerationRequest::from_arguments(&args).map_err(|e| {
            tracing::warn!("Rejected {} arguments: {}", TOOL_NAME, e);
            ToolError::InvalidParams(INVALID_ARGUMENTS.to_string())
        })?;

        let response = match self.generator.generate(&request).await {
            Ok(result) => ToolResponse::text(result.status_message()),
            Err(e) => {
                tracing::error!("Seminar generation for '{}' failed: {}", request.topic, e);
                ToolResponse::error(format!("Error generating seminar materials: {}", e))
            }
        };

        response.into_value()
    }
}
