//! Request dispatcher - the single execution path for tool calls.
//!
//! Both transports funnel here, so dispatch order is part of the contract:
//! resolve the credential, look the tool up, validate arguments, then call
//! the gateway. Gateway failures come back as tool-level error results;
//! only the earlier steps raise protocol faults.

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, JsonObject};
use tracing::{debug, error};

use crate::core::config::{ApiKey, Config};
use crate::domains::tavily::{
    ExtractRequest, SearchRequest, TavilyClient, TavilyGateway, TavilyResponse,
};

use super::definitions::{TavilyExtractTool, TavilySearchTool};
use super::error::ToolError;
use super::format::format_response;

/// Executes tool calls against the upstream gateway.
pub struct ToolDispatcher {
    config: Arc<Config>,
    gateway: Arc<dyn TavilyGateway>,
}

impl ToolDispatcher {
    /// Create a dispatcher backed by the live Tavily client.
    pub fn new(config: Arc<Config>) -> Self {
        Self::with_gateway(config, Arc::new(TavilyClient::new()))
    }

    /// Create a dispatcher with a caller-provided gateway.
    pub fn with_gateway(config: Arc<Config>, gateway: Arc<dyn TavilyGateway>) -> Self {
        Self { config, gateway }
    }

    /// Execute the tool `name` with raw JSON `arguments`.
    ///
    /// `scoped_key` is the request-scoped credential when the transport
    /// carries one; it takes precedence over the configured default.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: JsonObject,
        scoped_key: Option<ApiKey>,
    ) -> Result<CallToolResult, ToolError> {
        let api_key = self.resolve_credential(scoped_key)?;

        let outcome = match name {
            TavilySearchTool::NAME => {
                let request: SearchRequest = parse_arguments(arguments)?;
                request.validate().map_err(ToolError::InvalidArguments)?;
                debug!("Dispatching search for query: {}", request.query);
                self.gateway.search(&api_key, &request).await
            }
            TavilyExtractTool::NAME => {
                let request: ExtractRequest = parse_arguments(arguments)?;
                request.validate().map_err(ToolError::InvalidArguments)?;
                debug!("Dispatching extract for {} url(s)", request.urls.len());
                self.gateway.extract(&api_key, &request).await
            }
            other => return Err(ToolError::unknown_tool(other)),
        };

        match outcome {
            Ok(response) => Ok(success_result(&response)),
            Err(api_error) => {
                error!("Tavily call failed: {}", api_error);
                Ok(CallToolResult::error(vec![Content::text(format!(
                    "Tavily API error: {}",
                    api_error
                ))]))
            }
        }
    }

    /// Request-scoped key first, then the configured default.
    fn resolve_credential(&self, scoped_key: Option<ApiKey>) -> Result<ApiKey, ToolError> {
        scoped_key
            .or_else(|| self.config.credentials.tavily_api_key.clone())
            .ok_or(ToolError::MissingCredential)
    }
}

fn parse_arguments<T: serde::de::DeserializeOwned>(arguments: JsonObject) -> Result<T, ToolError> {
    serde_json::from_value(serde_json::Value::Object(arguments))
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

fn success_result(response: &TavilyResponse) -> CallToolResult {
    CallToolResult::success(vec![Content::text(format_response(response))])
}
