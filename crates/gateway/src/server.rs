//! Axum-based HTTP transport for the tool protocol.

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Json, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use social_mcp_core::{registry, traits::ToolDispatcher, Error, Result};

use crate::protocol::{codes, JsonRpcRequest, JsonRpcResponse, McpMethod, McpService};

/// Path of the JSON-RPC endpoint.
pub const MCP_ENDPOINT: &str = "/mcp";

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Enable CORS.
    pub enable_cors: bool,
    /// Enable request tracing.
    pub enable_tracing: bool,
    /// Publishing webhook, reported by `/health`.
    pub webhook_url: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5555,
            enable_cors: true,
            enable_tracing: true,
            webhook_url: String::new(),
        }
    }
}

/// Shared application state.
pub struct AppState {
    pub service: McpService,
    pub webhook_url: String,
}

/// HTTP gateway server.
pub struct GatewayServer {
    config: GatewayConfig,
    state: Arc<AppState>,
}

impl GatewayServer {
    pub fn new(config: GatewayConfig, dispatcher: Arc<dyn ToolDispatcher>) -> Self {
        let state = Arc::new(AppState {
            service: McpService::new(dispatcher),
            webhook_url: config.webhook_url.clone(),
        });
        Self { config, state }
    }

    /// Build the Axum router.
    pub fn build_router(&self) -> Router {
        let mut router = Router::new()
            .route("/health", get(health_handler))
            .route(MCP_ENDPOINT, post(mcp_handler).get(mcp_get_handler))
            .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
            .with_state(self.state.clone());

        if self.config.enable_cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        if self.config.enable_tracing {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::transport(format!("Failed to bind {}: {}", addr, e)))?;

        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: tokio::net::TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local = listener
            .local_addr()
            .map_err(|e| Error::transport(format!("Listener has no local address: {}", e)))?;

        tracing::info!(
            addr = %local,
            endpoint = MCP_ENDPOINT,
            "MCP HTTP server listening"
        );

        axum::serve(listener, self.build_router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| Error::transport(format!("Server error: {}", e)))?;

        tracing::info!("MCP HTTP server stopped");
        Ok(())
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Liveness document served at `/health`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub content_platforms: Vec<&'static str>,
    pub publishing_platforms: Vec<&'static str>,
    pub webhook_url: String,
    pub mode: &'static str,
    pub mcp_endpoint: &'static str,
}

// =============================================================================
// Handlers
// =============================================================================

async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        content_platforms: registry::platform_ids(),
        publishing_platforms: registry::publish_target_ids(),
        webhook_url: state.webhook_url.clone(),
        mode: "http",
        mcp_endpoint: MCP_ENDPOINT,
    })
}

async fn mcp_get_handler() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        "Method Not Allowed - Use POST for JSON-RPC requests",
    )
}

/// Every failure on this transport is reported as an internal error with the
/// request id echoed back.
async fn mcp_handler(State(state): State<Arc<AppState>>, body: Bytes) -> impl IntoResponse {
    let trace_id = Uuid::new_v4().to_string();

    let request = match JsonRpcRequest::parse(&body) {
        Ok(request) => request,
        Err(rejection) => {
            tracing::warn!(trace_id = %trace_id, error = %rejection.error, "Rejected JSON-RPC request");
            return Json(JsonRpcResponse::error(
                rejection.id,
                codes::INTERNAL_ERROR,
                rejection.error.to_string(),
            ));
        }
    };

    tracing::info!(trace_id = %trace_id, method = %request.method, "Processing JSON-RPC request");

    let method = McpMethod::parse(&request.method);
    let response = match state.service.handle(&method, &request.params).await {
        Ok(result) => JsonRpcResponse::success(request.response_id(), result),
        Err(e) => {
            tracing::warn!(trace_id = %trace_id, method = %request.method, error = %e, "JSON-RPC request failed");
            JsonRpcResponse::error(request.response_id(), codes::INTERNAL_ERROR, e.to_string())
        }
    };

    Json(response)
}
