//! JSON-RPC 2.0 envelope types and the MCP method handling shared by both
//! transports.
//!
//! [`McpService::handle`] is the single place methods are routed. Transports
//! differ only in how they map its errors onto the wire.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::sync::Arc;

use social_mcp_core::{
    traits::ToolDispatcher,
    types::ToolOutcome,
    Error, Result,
};

pub const JSONRPC_VERSION: &str = "2.0";
pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "social-media-content-mcp-server";

/// Standard JSON-RPC error codes.
pub mod codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

// =============================================================================
// Envelope Types
// =============================================================================

/// An inbound JSON-RPC request or notification.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRpcRequest {
    /// `None` for notifications.
    pub id: Option<Value>,
    pub method: String,
    pub params: Value,
}

/// Why an inbound frame could not be turned into a request.
#[derive(Debug)]
pub struct RequestRejection {
    /// Best-effort id recovered from the frame, `null` if none.
    pub id: Value,
    pub code: i32,
    pub error: Error,
}

impl JsonRpcRequest {
    /// Parse a raw frame. Missing `params` default to an empty object.
    pub fn parse(frame: &[u8]) -> std::result::Result<Self, RequestRejection> {
        let value: Value = serde_json::from_slice(frame).map_err(|e| RequestRejection {
            id: Value::Null,
            code: codes::PARSE_ERROR,
            error: Error::invalid_request(format!("Parse error: {}", e)),
        })?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> std::result::Result<Self, RequestRejection> {
        let Value::Object(mut object) = value else {
            return Err(RequestRejection {
                id: Value::Null,
                code: codes::INVALID_REQUEST,
                error: Error::invalid_request("request must be a JSON object"),
            });
        };

        let id = object.remove("id");
        let method = match object.remove("method") {
            Some(Value::String(method)) => method,
            other => {
                let shown = other.map(|m| m.to_string()).unwrap_or_else(|| "undefined".into());
                return Err(RequestRejection {
                    id: id.unwrap_or(Value::Null),
                    code: codes::INVALID_REQUEST,
                    error: Error::MethodNotFound(shown),
                });
            }
        };
        let params = match object.remove("params") {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(params) => params,
        };

        Ok(Self { id, method, params })
    }

    /// Notifications carry no id and get no response on stream transports.
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// The id to echo back, `null` when absent.
    pub fn response_id(&self) -> Value {
        self.id.clone().unwrap_or(Value::Null)
    }
}

/// JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

/// An outbound JSON-RPC response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: Value,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
            id,
        }
    }
}

// =============================================================================
// MCP Methods
// =============================================================================

/// MCP methods understood by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum McpMethod {
    Initialize,
    Initialized,
    Ping,
    ToolsList,
    ToolsCall,
    ResourcesList,
    PromptsList,
    Unknown(String),
}

impl McpMethod {
    pub fn parse(method: &str) -> Self {
        match method {
            "initialize" => Self::Initialize,
            "notifications/initialized" => Self::Initialized,
            "ping" => Self::Ping,
            "tools/list" => Self::ToolsList,
            "tools/call" => Self::ToolsCall,
            "resources/list" => Self::ResourcesList,
            "prompts/list" => Self::PromptsList,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// `tools/call` parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// Result of `initialize`.
pub fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {"listChanged": false},
            "resources": {"listChanged": false},
            "prompts": {"listChanged": false},
            "experimental": {}
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

/// Wrap a dispatch outcome in a single text content block.
pub fn call_tool_result(outcome: &ToolOutcome) -> Result<Value> {
    Ok(json!({
        "content": [{"type": "text", "text": outcome.to_pretty_json()?}]
    }))
}

/// A well-formed `tools/call` result flagged as an error.
pub fn call_tool_error_result(error: &Error) -> Value {
    json!({
        "content": [{"type": "text", "text": format!("Error: {}", error)}],
        "isError": true
    })
}

/// Routes MCP methods to the dispatcher.
#[derive(Clone)]
pub struct McpService {
    dispatcher: Arc<dyn ToolDispatcher>,
}

impl McpService {
    pub fn new(dispatcher: Arc<dyn ToolDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Handle one method call, returning its `result` value.
    pub async fn handle(&self, method: &McpMethod, params: &Value) -> Result<Value> {
        match method {
            McpMethod::Initialize => Ok(initialize_result()),
            McpMethod::Initialized | McpMethod::Ping => Ok(json!({})),
            McpMethod::ResourcesList => Ok(json!({"resources": []})),
            McpMethod::PromptsList => Ok(json!({"prompts": []})),
            McpMethod::ToolsList => Ok(serde_json::to_value(self.dispatcher.list_tools())?),
            McpMethod::ToolsCall => {
                let params = parse_call_params(params)?;
                let arguments = params.arguments.unwrap_or_else(|| json!({}));
                let outcome = self.dispatcher.call_tool(&params.name, arguments).await?;
                call_tool_result(&outcome)
            }
            McpMethod::Unknown(name) => Err(Error::MethodNotFound(name.clone())),
        }
    }
}

fn parse_call_params(params: &Value) -> Result<CallToolParams> {
    CallToolParams::deserialize(params)
        .map_err(|e| Error::invalid_request(format!("invalid tools/call params: {}", e)))
}
