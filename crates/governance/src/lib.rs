#![deny(unused)]
//! Observability setup for the social content MCP server.

pub mod tracing_layer;

pub use tracing_layer::{build_filter, configure_tracing};
