#![deny(unused)]
//! Tool catalog and dispatch for the social content MCP server.
//!
//! This crate provides:
//! - The tool catalog derived from the platform registry
//! - Tool name classification and registry resolution
//! - Content generator and publisher services
//! - The dispatcher both transports call into

pub mod catalog;
pub mod dispatcher;
pub mod generator;
pub mod publisher;
pub mod routing;

pub use catalog::build_catalog;
pub use dispatcher::SocialToolDispatcher;
pub use generator::ContentGenerator;
pub use publisher::Publisher;
pub use routing::{ResolvedRoute, ToolRoute};
