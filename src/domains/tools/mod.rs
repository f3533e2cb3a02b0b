//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients to
//! perform specific actions or computations.
//!
//! ## Architecture
//!
//! - `definitions/` - Published tool metadata (one file per tool)
//! - `registry.rs` - Central tool catalog
//! - `dispatcher.rs` - Credential resolution, argument validation, execution
//! - `format.rs` - Rendering of upstream responses into text blocks
//! - `error.rs` - Protocol fault types

pub mod definitions;
mod dispatcher;
mod error;
mod format;
mod registry;

pub use dispatcher::ToolDispatcher;
pub use error::ToolError;
pub use format::format_response;
pub use registry::ToolRegistry;
