//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.
//! Definitions carry published metadata only; execution lives in the
//! dispatcher.

pub mod extract;
pub mod search;

pub use extract::TavilyExtractTool;
pub use search::TavilySearchTool;
