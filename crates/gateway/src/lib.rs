#![deny(unused)]
//! Protocol transports for the social content MCP server.
//!
//! Both transports share the JSON-RPC handling in [`protocol`] and differ
//! only in framing and error mapping.

pub mod protocol;
pub mod server;
pub mod shutdown;
pub mod stdio;

pub use protocol::{JsonRpcRequest, JsonRpcResponse, McpMethod, McpService};
pub use server::{GatewayConfig, GatewayServer};
pub use shutdown::shutdown_signal;
pub use stdio::StdioTransport;
