//! HTTP transport implementation.
//!
//! HTTP server with JSON-RPC over POST requests.
//! This allows standard HTTP clients (curl, browsers, etc.) to communicate
//! with the MCP server. Unlike stdio, this transport can carry a
//! request-scoped Tavily API key in `params._meta.auth`.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::core::config::ApiKey;
use crate::domains::tools::ToolRegistry;

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<serde_json::Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<serde_json::Value>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<serde_json::Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Method not found error.
    pub fn method_not_found(id: Option<serde_json::Value>) -> Self {
        Self::error(id, -32601, "Method not found")
    }

    /// Invalid request error.
    pub fn invalid_request(id: Option<serde_json::Value>) -> Self {
        Self::error(id, -32600, "Invalid Request")
    }

    /// Invalid params error.
    pub fn invalid_params(id: Option<serde_json::Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32602, msg)
    }

    /// Internal error.
    pub fn internal_error(id: Option<serde_json::Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32603, msg)
    }
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// The MCP server instance.
    server: McpServer,
    /// JSON-RPC endpoint path, echoed by the info endpoint.
    rpc_path: String,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Run the HTTP transport until ctrl-c.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();

        let state = AppState {
            server,
            rpc_path: self.config.rpc_path.clone(),
        };

        // Build router
        let mut app = Router::new()
            .route(&self.config.rpc_path, post(handle_rpc))
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(state);

        // Add CORS if enabled
        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!(
            "Ready - listening on {} (JSON-RPC over HTTP, CORS {})",
            addr, cors_status
        );
        info!("  → JSON-RPC: POST {}", self.config.rpc_path);
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                tokio::signal::ctrl_c().await.ok();
                info!("Received shutdown signal");
            })
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "endpoints": {
            "rpc": state.rpc_path,
            "health": "/health"
        },
        "tools": ToolRegistry::tool_names(),
        "protocol": "JSON-RPC 2.0"
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Handle JSON-RPC requests.
#[instrument(skip_all, fields(method))]
async fn handle_rpc(
    State(state): State<AppState>,
    Json(request): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    tracing::Span::current().record("method", request.method.as_str());
    info!("Received JSON-RPC request: {}", request.method);

    let response = process_request(&state, request).await;

    (StatusCode::OK, Json(response))
}

/// Process a JSON-RPC request and return the response.
async fn process_request(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    // Validate JSON-RPC version
    if request.jsonrpc != "2.0" {
        return JsonRpcResponse::invalid_request(request.id);
    }

    match request.method.as_str() {
        // Initialize the MCP session
        "initialize" => handle_initialize(state, request),

        // List available tools
        "tools/list" => handle_tools_list(state, request),

        // Call a tool
        "tools/call" => handle_tools_call(state, request).await,

        // MCP liveness probe
        "ping" => JsonRpcResponse::success(request.id, serde_json::json!({})),

        // Notifications (no response needed for stateless HTTP)
        method if method.starts_with("notifications/") => {
            info!("Received notification: {}", method);
            JsonRpcResponse::success(request.id, serde_json::json!(null))
        }

        // Unknown method
        _ => {
            warn!("Unknown method: {}", request.method);
            JsonRpcResponse::method_not_found(request.id)
        }
    }
}

/// Handle initialize request.
fn handle_initialize(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing initialize request");

    let result = serde_json::json!({
        "protocolVersion": "2024-11-05",
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": state.server.name(),
            "version": state.server.version()
        },
        "instructions": "Web search and content extraction backed by the Tavily API."
    });

    JsonRpcResponse::success(request.id, result)
}

/// Handle tools/list request.
fn handle_tools_list(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing tools/list request");

    let tools = state.server.list_tools();
    let result = serde_json::json!({
        "tools": tools
    });

    JsonRpcResponse::success(request.id, result)
}

/// Handle tools/call request.
///
/// Protocol faults map to JSON-RPC error codes; upstream API failures ride
/// inside a successful response with `isError` set.
async fn handle_tools_call(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing tools/call request");

    let params = match request.params {
        Some(p) => p,
        None => return JsonRpcResponse::invalid_params(request.id, "Missing params"),
    };

    let name = match params.get("name").and_then(|v| v.as_str()) {
        Some(n) => n.to_string(),
        None => return JsonRpcResponse::invalid_params(request.id, "Missing tool name"),
    };

    let arguments = params
        .get("arguments")
        .and_then(|v| v.as_object())
        .cloned()
        .unwrap_or_default();

    let scoped_key = scoped_api_key(&params);

    match state.server.call_tool(&name, arguments, scoped_key).await {
        Ok(result) => match serde_json::to_value(&result) {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(e) => JsonRpcResponse::internal_error(request.id, e.to_string()),
        },
        Err(fault) => {
            JsonRpcResponse::error(request.id, fault.jsonrpc_code(), fault.to_string())
        }
    }
}

/// Request-scoped credential from `params._meta.auth`, when present.
/// An empty value counts as absent.
fn scoped_api_key(params: &serde_json::Value) -> Option<ApiKey> {
    params
        .get("_meta")
        .and_then(|meta| meta.get("auth"))
        .and_then(|auth| auth.get("TAVILY_API_KEY"))
        .and_then(|key| key.as_str())
        .filter(|key| !key.is_empty())
        .map(ApiKey::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use serde_json::json;

    use crate::core::config::Config;
    use crate::domains::tavily::{
        ExtractRequest, SearchRequest, TavilyError, TavilyGateway, TavilyResponse,
    };

    #[derive(Default)]
    struct RecordingGateway {
        last_key: Mutex<Option<String>>,
    }

    #[async_trait]
    impl TavilyGateway for RecordingGateway {
        async fn search(
            &self,
            api_key: &ApiKey,
            _request: &SearchRequest,
        ) -> Result<TavilyResponse, TavilyError> {
            *self.last_key.lock().unwrap() = Some(api_key.as_str().to_string());
            Ok(TavilyResponse::default())
        }

        async fn extract(
            &self,
            api_key: &ApiKey,
            _request: &ExtractRequest,
        ) -> Result<TavilyResponse, TavilyError> {
            *self.last_key.lock().unwrap() = Some(api_key.as_str().to_string());
            Ok(TavilyResponse::default())
        }
    }

    fn state_with(default_key: Option<&str>) -> (AppState, Arc<RecordingGateway>) {
        let gateway = Arc::new(RecordingGateway::default());
        let mut config = Config::default();
        config.credentials.tavily_api_key = default_key.map(ApiKey::new);
        let state = AppState {
            server: McpServer::with_gateway(config, gateway.clone()),
            rpc_path: "/rest".to_string(),
        };
        (state, gateway)
    }

    fn rpc(method: &str, params: serde_json::Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params: Some(params),
        }
    }

    #[tokio::test]
    async fn test_rejects_wrong_jsonrpc_version() {
        let (state, _) = state_with(Some("tvly-key"));
        let mut request = rpc("tools/list", json!({}));
        request.jsonrpc = "1.0".to_string();

        let response = process_request(&state, request).await;
        assert_eq!(response.error.unwrap().code, -32600);
    }

    #[tokio::test]
    async fn test_unknown_method_not_found() {
        let (state, _) = state_with(Some("tvly-key"));
        let response = process_request(&state, rpc("bogus/method", json!({}))).await;
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_initialize_reports_identity_and_capabilities() {
        let (state, _) = state_with(Some("tvly-key"));
        let response = process_request(&state, rpc("initialize", json!({}))).await;
        let result = response.result.unwrap();

        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], "tavily-mcp");
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_tools_list_returns_catalog() {
        let (state, _) = state_with(Some("tvly-key"));
        let response = process_request(&state, rpc("tools/list", json!({}))).await;
        let result = response.result.unwrap();

        let tools = result["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0]["name"], "tavily-search");
        assert_eq!(tools[1]["name"], "tavily-extract");
        assert_eq!(tools[0]["inputSchema"]["type"], "object");
        assert!(result.get("nextCursor").is_none());
    }

    #[tokio::test]
    async fn test_tools_call_without_credential_is_invalid_request() {
        let (state, _) = state_with(None);
        let response = process_request(
            &state,
            rpc(
                "tools/call",
                json!({"name": "tavily-search", "arguments": {"query": "rust"}}),
            ),
        )
        .await;

        let error = response.error.unwrap();
        assert_eq!(error.code, -32600);
        assert_eq!(error.message, "TAVILY_API_KEY not set");
    }

    #[tokio::test]
    async fn test_tools_call_unknown_tool() {
        let (state, _) = state_with(Some("tvly-key"));
        let response = process_request(
            &state,
            rpc("tools/call", json!({"name": "bogus", "arguments": {}})),
        )
        .await;

        let error = response.error.unwrap();
        assert_eq!(error.code, -32601);
        assert!(error.message.contains("Unknown tool"));
    }

    #[tokio::test]
    async fn test_tools_call_invalid_arguments() {
        let (state, _) = state_with(Some("tvly-key"));
        let response = process_request(
            &state,
            rpc("tools/call", json!({"name": "tavily-search", "arguments": {}})),
        )
        .await;

        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn test_tools_call_success_shape() {
        let (state, _) = state_with(Some("tvly-key"));
        let response = process_request(
            &state,
            rpc(
                "tools/call",
                json!({"name": "tavily-search", "arguments": {"query": "rust"}}),
            ),
        )
        .await;

        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["content"][0]["type"], "text");
        assert_eq!(result["content"][0]["text"], "Detailed Results:");
        assert_ne!(result["isError"], json!(true));
    }

    #[tokio::test]
    async fn test_scoped_key_from_meta_auth() {
        let (state, gateway) = state_with(Some("tvly-default"));
        process_request(
            &state,
            rpc(
                "tools/call",
                json!({
                    "name": "tavily-search",
                    "arguments": {"query": "rust"},
                    "_meta": {"auth": {"TAVILY_API_KEY": "tvly-scoped"}}
                }),
            ),
        )
        .await;

        assert_eq!(
            gateway.last_key.lock().unwrap().as_deref(),
            Some("tvly-scoped")
        );
    }

    #[tokio::test]
    async fn test_empty_scoped_key_falls_back_to_default() {
        let (state, gateway) = state_with(Some("tvly-default"));
        process_request(
            &state,
            rpc(
                "tools/call",
                json!({
                    "name": "tavily-search",
                    "arguments": {"query": "rust"},
                    "_meta": {"auth": {"TAVILY_API_KEY": ""}}
                }),
            ),
        )
        .await;

        assert_eq!(
            gateway.last_key.lock().unwrap().as_deref(),
            Some("tvly-default")
        );
    }

    #[tokio::test]
    async fn test_notifications_acknowledged_with_null() {
        let (state, _) = state_with(Some("tvly-key"));
        let response =
            process_request(&state, rpc("notifications/initialized", json!({}))).await;
        assert!(response.error.is_none());
        assert_eq!(response.result, Some(json!(null)));
    }

    #[tokio::test]
    async fn test_ping_returns_empty_result() {
        let (state, _) = state_with(Some("tvly-key"));
        let response = process_request(&state, rpc("ping", json!({}))).await;
        assert_eq!(response.result, Some(json!({})));
    }
}
