//! STDIO transport implementation.
//!
//! Standard input/output transport for MCP - the default and recommended
//! mode. All logging goes to stderr so stdout stays clean for the protocol.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the STDIO transport until the client disconnects or the process
    /// receives ctrl-c.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        tokio::select! {
            result = service.waiting() => {
                result.map_err(|e| TransportError::ServiceError(e.to_string()))?;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal");
            }
        }

        info!("STDIO transport finished");
        Ok(())
    }
}
