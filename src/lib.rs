//! Tavily MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server that exposes
//! the Tavily web search and content extraction API as MCP tools, with a
//! modular architecture organized by domains.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, the main server,
//!   and transport layer
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: MCP tool catalog, argument validation, and dispatch
//!   - **tavily**: Typed Tavily API client and response model
//!
//! # Example
//!
//! ```rust,no_run
//! use tavily_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config);
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, McpServer};
