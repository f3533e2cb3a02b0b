//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the shared tool dispatcher.
//!
//! ## Tool Architecture
//!
//! Tool metadata lives in `domains/tools/definitions/` with one file per
//! tool. Execution goes through a single `ToolDispatcher`, so the stdio and
//! HTTP transports see identical dispatch semantics: credential resolution,
//! then lookup, then validation, then the upstream call.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Implementation, JsonObject, ListToolsResult,
        PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
};
use tracing::{info, instrument};

use super::config::{ApiKey, Config};
use crate::domains::tavily::TavilyGateway;
use crate::domains::tools::{ToolDispatcher, ToolError, ToolRegistry};

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and exposes
/// the same dispatch path to the HTTP transport.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Shared dispatcher executing tool calls.
    dispatcher: Arc<ToolDispatcher>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);
        Self {
            dispatcher: Arc::new(ToolDispatcher::new(config.clone())),
            config,
        }
    }

    /// Create an MCP server with a custom upstream gateway.
    pub fn with_gateway(config: Config, gateway: Arc<dyn TavilyGateway>) -> Self {
        let config = Arc::new(config);
        Self {
            dispatcher: Arc::new(ToolDispatcher::with_gateway(config.clone(), gateway)),
            config,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<Tool> {
        ToolRegistry::get_all_tools()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// `scoped_key` carries the request-scoped credential when the transport
    /// conveys one; stdio never does.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: JsonObject,
        scoped_key: Option<ApiKey>,
    ) -> Result<CallToolResult, ToolError> {
        self.dispatcher.dispatch(name, arguments, scoped_key).await
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Web search and content extraction backed by the Tavily API. \
                 Use tavily-search for real-time web results and tavily-extract \
                 to pull raw content from specific URLs."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name().to_string(),
                version: self.version().to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: ToolRegistry::get_all_tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        info!("Executing tool: {}", request.name);
        let arguments = request.arguments.unwrap_or_default();
        self.dispatcher
            .dispatch(&request.name, arguments, None)
            .await
            .map_err(|e| e.to_mcp_error())
    }
}
