//! Publisher service: forwards content to the publishing webhook.

use std::sync::Arc;

use social_mcp_core::{
    traits::PublishBackend,
    types::{PublishEnvelope, PublishOptions, PublishPayload, PublishTarget},
};

/// Forwards content for a publish target through a single webhook.
pub struct Publisher {
    backend: Arc<dyn PublishBackend>,
}

impl Publisher {
    pub fn new(backend: Arc<dyn PublishBackend>) -> Self {
        Self { backend }
    }

    /// Publish `content` to `target`. Failures become an unsuccessful envelope.
    pub async fn publish(
        &self,
        target: &PublishTarget,
        content: Option<String>,
        options: PublishOptions,
    ) -> PublishEnvelope {
        tracing::info!(publish_target = %target.id, "Publishing content via webhook");

        let payload = build_payload(target, content.clone(), options);

        match self.backend.publish(&payload).await {
            Ok(response) => PublishEnvelope::succeeded(target.id, content, response),
            Err(e) => {
                tracing::warn!(publish_target = %target.id, error = %e, "Publishing failed");
                PublishEnvelope::failed(target.id, content, &e)
            }
        }
    }
}

/// Build the webhook body. The chat id is only forwarded for targets that use one.
pub fn build_payload(
    target: &PublishTarget,
    content: Option<String>,
    options: PublishOptions,
) -> PublishPayload {
    PublishPayload {
        platform: target.id.to_lowercase(),
        content,
        image_url: options.image_url,
        telegram_chat_id: options
            .telegram_chat_id
            .filter(|_| target.requires_chat_id),
    }
}
