//! Tavily web content extraction tool definition.

use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use serde_json::json;

/// The `tavily-extract` tool.
#[derive(Debug, Clone)]
pub struct TavilyExtractTool;

impl TavilyExtractTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "tavily-extract";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "A powerful web content extraction tool that retrieves and processes raw content from specified URLs, ideal for data collection, content analysis, and research tasks.";

    /// Create the Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: Arc::new(Self::input_schema()),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Parameter schema advertised through `tools/list`.
    pub fn input_schema() -> JsonObject {
        let schema = json!({
            "type": "object",
            "properties": {
                "urls": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "List of URLs to extract content from"
                },
                "extract_depth": {
                    "type": "string",
                    "enum": ["basic", "advanced"],
                    "description": "Depth of extraction - 'basic' or 'advanced', if usrls are linkedin use 'advanced' or if explicitly told to use advanced",
                    "default": "basic"
                },
                "include_images": {
                    "type": "boolean",
                    "description": "Include a list of images extracted from the urls in the response",
                    "default": false
                }
            },
            "required": ["urls"]
        });
        match schema {
            serde_json::Value::Object(map) => map,
            _ => JsonObject::new(),
        }
    }
}
