#![deny(unused)]
//! Core types, traits, and error definitions for the social content MCP server.
//!
//! This crate holds the read-only registry tables, the data model shared by
//! the dispatcher and both transports, and the collaborator traits that the
//! HTTP backends implement.

pub mod config;
pub mod error;
pub mod mocks;
pub mod registry;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::*;
pub use types::*;
