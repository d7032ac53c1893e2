//! Content generation API client.

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;
use std::time::Duration;

use social_mcp_core::{
    config::ContentApiConfig, traits::ContentBackend, types::GenerationPayload, Result,
};

use crate::exchange::{build_client, parse_url, send_json};

/// Header carrying the API key, sent only when a key is configured.
pub const API_KEY_HEADER: &str = "x-rapidapi-key";

/// Calls `POST <base>/<endpoint>?noqueue=1` on the generation API.
pub struct HttpContentBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<Secret<String>>,
    timeout: Duration,
}

impl HttpContentBackend {
    pub fn new(config: &ContentApiConfig) -> Result<Self> {
        parse_url(&config.base_url, "content API")?;

        Ok(Self {
            client: build_client()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    /// Full URL for a platform endpoint, without the query string.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }
}

#[async_trait]
impl ContentBackend for HttpContentBackend {
    async fn generate(&self, endpoint: &str, payload: &GenerationPayload) -> Result<Value> {
        let url = self.endpoint_url(endpoint);
        tracing::debug!(url = %url, lang = %payload.lang, length = payload.length, "POST content API");

        let mut request = self
            .client
            .post(&url)
            .query(&[("noqueue", "1")])
            .json(payload);

        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key.expose_secret().as_str());
        }

        send_json(request, self.timeout, "content generation").await
    }
}
