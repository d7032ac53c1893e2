//! Publishing webhook client.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use social_mcp_core::{
    config::PublisherConfig, traits::PublishBackend, types::PublishPayload, Error, Result,
};

use crate::exchange::{build_client, parse_url, send_json};

/// Posts publish payloads to a single automation webhook.
pub struct WebhookPublishBackend {
    client: reqwest::Client,
    webhook_url: Option<url::Url>,
    timeout: Duration,
}

impl WebhookPublishBackend {
    /// An empty webhook URL is accepted; every publish then fails.
    pub fn new(config: &PublisherConfig) -> Result<Self> {
        let webhook_url = if config.webhook_url.is_empty() {
            tracing::warn!("No publishing webhook configured; publish tools will fail");
            None
        } else {
            Some(parse_url(&config.webhook_url, "webhook")?)
        };

        Ok(Self {
            client: build_client()?,
            webhook_url,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }
}

#[async_trait]
impl PublishBackend for WebhookPublishBackend {
    async fn publish(&self, payload: &PublishPayload) -> Result<Value> {
        let url = self
            .webhook_url
            .as_ref()
            .ok_or_else(|| Error::backend("publishing webhook URL is not configured"))?;

        tracing::debug!(url = %url, platform = %payload.platform, "POST publishing webhook");

        let request = self.client.post(url.clone()).json(payload);
        send_json(request, self.timeout, "publishing webhook").await
    }
}
