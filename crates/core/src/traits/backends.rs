//! Backend collaborator traits.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::types::{GenerationPayload, PublishPayload};

/// Content generation service.
#[async_trait]
pub trait ContentBackend: Send + Sync {
    /// Generate content through the platform-specific `endpoint`.
    ///
    /// Returns the backend's response body. Non-success statuses, transport
    /// failures and timeouts are errors.
    async fn generate(&self, endpoint: &str, payload: &GenerationPayload) -> Result<Value>;
}

/// Publishing automation webhook.
#[async_trait]
pub trait PublishBackend: Send + Sync {
    /// Forward a payload to the webhook and return its response body.
    async fn publish(&self, payload: &PublishPayload) -> Result<Value>;
}
