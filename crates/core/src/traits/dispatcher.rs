//! Tool dispatch surface.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::types::{ToolCatalog, ToolOutcome};

/// Name-based tool router consumed by both transports.
#[async_trait]
pub trait ToolDispatcher: Send + Sync {
    /// Advertise every invocable tool.
    fn list_tools(&self) -> ToolCatalog;

    /// Invoke a tool by name with a loosely-typed argument bag.
    ///
    /// Backend and lookup failures inside `generate_*` / `publish_*` come back
    /// as unsuccessful envelopes; only an unrecognized tool name is an `Err`.
    async fn call_tool(&self, name: &str, args: Value) -> Result<ToolOutcome>;
}
