#![deny(unused)]
//! social-content-mcp - MCP server for social media content
//!
//! Exposes per-platform content generation tools backed by a hosted
//! generation API, plus publishing tools that forward content to an
//! automation webhook, over either stdio or HTTP.

use anyhow::Context;
use std::sync::Arc;

use social_mcp_core::config::{AppConfig, TransportMode};
use social_mcp_core::traits::ToolDispatcher;
use social_mcp_gateway::{shutdown_signal, GatewayConfig, GatewayServer, StdioTransport};
use social_mcp_model_gateway::{HttpContentBackend, WebhookPublishBackend};
use social_mcp_skills::SocialToolDispatcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    install_panic_hook();

    let config = AppConfig::load().context("Failed to load configuration")?;
    social_mcp_governance::configure_tracing(&config.logging)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        mode = %config.server.mode,
        "Starting social content MCP server"
    );

    let dispatcher = build_dispatcher(&config)?;

    match config.server.mode {
        TransportMode::Http => {
            let gateway = GatewayConfig {
                host: config.server.host.clone(),
                port: config.server.port,
                enable_cors: true,
                enable_tracing: true,
                webhook_url: config.publisher.webhook_url.clone(),
            };

            GatewayServer::new(gateway, dispatcher)
                .run(shutdown_signal())
                .await
                .inspect_err(|e| tracing::error!(error = %e, "HTTP transport failed"))?;
        }
        TransportMode::Stdio => {
            let transport = StdioTransport::new(dispatcher);
            let outcome = tokio::select! {
                result = transport.run() => result,
                _ = shutdown_signal() => Ok(()),
            };

            // The stdin reader parks a blocking thread that would keep the
            // runtime alive, so leave explicitly.
            if let Err(e) = outcome {
                tracing::error!(error = %e, "stdio transport failed");
                std::process::exit(1);
            }
            tracing::info!("Shutdown complete");
            std::process::exit(0);
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

// =========================================================================
// Wiring
// =========================================================================

fn build_dispatcher(config: &AppConfig) -> anyhow::Result<Arc<dyn ToolDispatcher>> {
    if config.content_api.api_key.is_none() {
        tracing::warn!("No content API key configured; requests are sent unauthenticated");
    }

    let content = HttpContentBackend::new(&config.content_api)?;
    let publishing = WebhookPublishBackend::new(&config.publisher)?;

    tracing::info!(
        content_api = %config.content_api.base_url,
        webhook = %config.publisher.webhook_url,
        "Backends initialized"
    );

    Ok(Arc::new(SocialToolDispatcher::new(
        Arc::new(content),
        Arc::new(publishing),
    )))
}

/// Any panic, on any task, terminates the process.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(panic = %info, "Unrecoverable fault, exiting");
        default_hook(info);
        std::process::exit(1);
    }));
}
