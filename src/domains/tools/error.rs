//! Tool-specific error types.

use rmcp::ErrorData as McpError;
use rmcp::model::ErrorCode;
use thiserror::Error;

/// Protocol-level faults raised during tool dispatch.
///
/// These abort the call with a JSON-RPC error. Upstream API failures are not
/// represented here; the dispatcher returns those inside a successful
/// response with `isError` set.
#[derive(Debug, Error)]
pub enum ToolError {
    /// No credential resolved, neither request-scoped nor process default.
    #[error("TAVILY_API_KEY not set")]
    MissingCredential,

    /// The requested tool is not in the catalog.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Arguments failed deserialization or a range check.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Convert to MCP error for protocol responses.
    pub fn to_mcp_error(&self) -> McpError {
        match self {
            Self::MissingCredential => {
                McpError::new(ErrorCode::INVALID_REQUEST, self.to_string(), None)
            }
            Self::UnknownTool(_) => {
                McpError::new(ErrorCode::METHOD_NOT_FOUND, self.to_string(), None)
            }
            Self::InvalidArguments(_) => McpError::invalid_params(self.to_string(), None),
            Self::Internal(_) => McpError::internal_error(self.to_string(), None),
        }
    }

    /// JSON-RPC error code used by the HTTP transport.
    pub fn jsonrpc_code(&self) -> i32 {
        match self {
            Self::MissingCredential => -32600,
            Self::UnknownTool(_) => -32601,
            Self::InvalidArguments(_) => -32602,
            Self::Internal(_) => -32603,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ToolError::MissingCredential.to_string(),
            "TAVILY_API_KEY not set"
        );
        assert_eq!(
            ToolError::unknown_tool("bogus").to_string(),
            "Unknown tool: bogus"
        );
    }

    #[test]
    fn test_jsonrpc_codes() {
        assert_eq!(ToolError::MissingCredential.jsonrpc_code(), -32600);
        assert_eq!(ToolError::unknown_tool("x").jsonrpc_code(), -32601);
        assert_eq!(ToolError::invalid_arguments("bad").jsonrpc_code(), -32602);
        assert_eq!(ToolError::internal("boom").jsonrpc_code(), -32603);
    }

    #[test]
    fn test_mcp_error_codes() {
        assert_eq!(
            ToolError::MissingCredential.to_mcp_error().code,
            ErrorCode::INVALID_REQUEST
        );
        assert_eq!(
            ToolError::unknown_tool("x").to_mcp_error().code,
            ErrorCode::METHOD_NOT_FOUND
        );
        assert_eq!(
            ToolError::invalid_arguments("bad").to_mcp_error().code,
            ErrorCode::INVALID_PARAMS
        );
        assert_eq!(
            ToolError::internal("boom").to_mcp_error().code,
            ErrorCode::INTERNAL_ERROR
        );
    }
}
