//! Tool Registry - the published tool catalog.
//!
//! A fixed catalog of the two Tavily tools. Listing is deterministic and
//! side-effect-free; execution goes through the dispatcher.

use rmcp::model::Tool;

use super::definitions::{TavilyExtractTool, TavilySearchTool};

/// Central catalog of available tools.
pub struct ToolRegistry;

impl ToolRegistry {
    /// Get all tool names, in listing order.
    pub fn tool_names() -> Vec<&'static str> {
        vec![TavilySearchTool::NAME, TavilyExtractTool::NAME]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools.
    /// Both HTTP and STDIO transports use this to get tool metadata.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![TavilySearchTool::to_tool(), TavilyExtractTool::to_tool()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_tool_names() {
        let names = ToolRegistry::tool_names();
        assert_eq!(names, vec!["tavily-search", "tavily-extract"]);
    }

    #[test]
    fn test_registry_listing_order_is_stable() {
        let tools = ToolRegistry::get_all_tools();
        assert_eq!(tools.len(), 2);
        let names: Vec<_> = tools.iter().map(|t| t.name.to_string()).collect();
        assert_eq!(
            names,
            ToolRegistry::tool_names()
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_registry_tools_carry_schemas() {
        for tool in ToolRegistry::get_all_tools() {
            assert!(tool.description.is_some());
            assert_eq!(tool.input_schema["type"], "object");
            assert!(tool.input_schema.contains_key("properties"));
        }
    }
}
