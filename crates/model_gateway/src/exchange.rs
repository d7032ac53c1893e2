//! Shared request/response handling for the backend clients.

use serde_json::Value;
use std::time::Duration;

use social_mcp_core::{Error, Result};

/// Build the HTTP client shared by a backend.
pub fn build_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("social-content-mcp/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| Error::internal(format!("Failed to build HTTP client: {}", e)))
}

/// Parse and validate a backend URL at startup.
pub fn parse_url(raw: &str, what: &str) -> Result<url::Url> {
    url::Url::parse(raw).map_err(|e| Error::Config(format!("Invalid {} URL '{}': {}", what, raw, e)))
}

/// Send `request` and decode its body, failing after `timeout`.
///
/// Non-success statuses are backend errors. A JSON body is returned as-is, a
/// non-JSON body as a string and an empty body as `null`.
pub async fn send_json(
    request: reqwest::RequestBuilder,
    timeout: Duration,
    backend: &str,
) -> Result<Value> {
    let exchange = async {
        let response = request
            .send()
            .await
            .map_err(|e| Error::backend(format!("{} request failed: {}", backend, e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::backend(format!("{} response unreadable: {}", backend, e)))?;

        if !status.is_success() {
            tracing::debug!(
                backend = %backend,
                status = status.as_u16(),
                body = %String::from_utf8_lossy(&body),
                "Backend rejected request"
            );
            return Err(Error::backend(format!(
                "{} request failed with status code {}",
                backend,
                status.as_u16()
            )));
        }

        Ok(decode_body(&body))
    };

    tokio::time::timeout(timeout, exchange)
        .await
        .map_err(|_| {
            Error::timeout(format!(
                "{} did not respond within {}s",
                backend,
                timeout.as_secs()
            ))
        })?
}

fn decode_body(body: &[u8]) -> Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_body() {
        assert_eq!(decode_body(b""), Value::Null);
        assert_eq!(decode_body(b"  \n"), Value::Null);
        assert_eq!(decode_body(br#"{"ok":true}"#), json!({"ok": true}));
        assert_eq!(decode_body(b"Workflow was started"), json!("Workflow was started"));
    }

    #[test]
    fn test_parse_url() {
        assert!(parse_url("http://localhost:5678/webhook/x", "webhook").is_ok());
        assert!(matches!(parse_url("not a url", "webhook"), Err(Error::Config(_))));
    }
}
