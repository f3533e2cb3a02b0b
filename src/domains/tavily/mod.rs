//! Tavily domain module.
//!
//! Everything that talks to the Tavily API lives here: the typed request and
//! response model, the gateway trait with its reqwest-backed implementation,
//! and the gateway error type.
//!
//! The rest of the crate depends on [`TavilyGateway`], not on the concrete
//! client, so the network edge stays swappable in tests.

mod client;
mod error;
pub mod types;

pub use client::{TavilyClient, TavilyGateway};
pub use error::TavilyError;
pub use types::{ExtractRequest, SearchRequest, TavilyResponse};
