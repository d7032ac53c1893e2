#![deny(unused)]
//! HTTP backends for the social content MCP server.
//!
//! Two single request/response clients:
//! - [`HttpContentBackend`] calls the content generation API
//! - [`WebhookPublishBackend`] posts to the publishing automation webhook
//!
//! Every call runs under an explicit timeout and fails with
//! [`Error::Timeout`](social_mcp_core::Error::Timeout) instead of hanging.
//! Nothing is retried.

pub mod content_api;
pub mod exchange;
pub mod webhook;

pub use content_api::HttpContentBackend;
pub use webhook::WebhookPublishBackend;
