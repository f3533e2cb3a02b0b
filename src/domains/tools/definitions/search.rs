//! Tavily web search tool definition.
//!
//! Descriptor only: the published name, description, and parameter schema.
//! Argument validation happens against the typed request model when the
//! dispatcher handles a call.

use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use serde_json::json;

/// The `tavily-search` tool.
#[derive(Debug, Clone)]
pub struct TavilySearchTool;

impl TavilySearchTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "tavily-search";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "A powerful web search tool that provides comprehensive, real-time results using Tavily's AI search engine. Returns relevant web content with customizable parameters for result count, content type, and domain filtering. Ideal for gathering current information, news, and detailed web content analysis.";

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
                "query": {
                    "type": "string",
                    "description": "Search query"
                },
                "search_depth": {
                    "type": "string",
                    "enum": ["basic", "advanced"],
                    "description": "The depth of the search. It can be 'basic' or 'advanced'",
                    "default": "basic"
                },
                "topic": {
                    "type": "string",
                    "enum": ["general", "news"],
                    "description": "The category of the search. This will determine which of our agents will be used for the search",
                    "default": "general"
                },
                "days": {
                    "type": "number",
                    "description": "The number of days back from the current date to include in the search results. This specifies the time frame of data to be retrieved. Please note that this feature is only available when using the 'news' search topic",
                    "default": 3
                },
                "time_range": {
                    "type": "string",
                    "description": "The time range back from the current date to include in the search results. This feature is available for both 'general' and 'news' search topics",
                    "enum": ["day", "week", "month", "year", "d", "w", "m", "y"]
                },
                "max_results": {
                    "type": "number",
                    "description": "The maximum number of search results to return",
                    "default": 10,
                    "minimum": 5,
                    "maximum": 20
                },
                "include_images": {
                    "type": "boolean",
                    "description": "Include a list of query-related images in the response",
                    "default": false
                },
                "include_image_descriptions": {
                    "type": "boolean",
                    "description": "Include a list of query-related images and their descriptions in the response",
                    "default": false
                },
                "include_raw_content": {
                    "type": "boolean",
                    "description": "Include the cleaned and parsed HTML content of each search result",
                    "default": false
                },
                "include_domains": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "A list of domains to specifically include in the search results, if the user asks to search on specific sites set this to the domain of the site",
                    "default": []
                },
                "exclude_domains": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "List of domains to specifically exclude, if the user asks to exclude a domain set this to the domain of the site",
                    "default": []
                }
            },
            "required": ["query"]
        });
        match schema {
            serde_json::Value::Object(map) => map,
            _ => JsonObject::new(),
        }
    }
}
