use serde::Serialize;
use serde_json::Value;

use super::profile::{ById, EmotionProfile, PlatformProfile, PublishTarget};
use crate::error::Error;

// =============================================================================
// Generation Options
// =============================================================================

/// A caller-supplied `length`, kept as sent when it is not a usable count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RequestedLength {
    Valid(u32),
    Invalid(Value),
}

/// Generation options as supplied by the caller. Absent fields are defaulted
/// by the content generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<RequestedLength>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
}

/// Generation options after defaulting, echoed back on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedOptions {
    pub language: String,
    pub emotion: String,
    pub length: u32,
    pub sentiment: String,
    pub style: String,
}

/// The `requestParameters` echo: resolved on success, as supplied on failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RequestParameters {
    Resolved(ResolvedOptions),
    Supplied(GenerationOptions),
}

/// Optional extras forwarded with published content. Absent keys are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram_chat_id: Option<String>,
}

// =============================================================================
// Result Envelopes
// =============================================================================

/// Outcome of a `generate_*` tool call.
///
/// Success and failure share one shape; callers branch on `success` alone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationEnvelope {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub platform: String,

    /// Backend response body, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,

    pub request_parameters: RequestParameters,
}

impl GenerationEnvelope {
    /// Wrap a backend response.
    pub fn succeeded(
        platform: impl Into<String>,
        content: Value,
        original_text: Option<String>,
        resolved: ResolvedOptions,
    ) -> Self {
        Self {
            success: true,
            error: None,
            platform: platform.into(),
            content: Some(content),
            original_text,
            request_parameters: RequestParameters::Resolved(resolved),
        }
    }

    /// Wrap a failure, echoing the caller's input.
    pub fn failed(
        platform: impl Into<String>,
        original_text: Option<String>,
        supplied: GenerationOptions,
        error: &Error,
    ) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            platform: platform.into(),
            content: None,
            original_text,
            request_parameters: RequestParameters::Supplied(supplied),
        }
    }
}

/// Outcome of a `publish_*` tool call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishEnvelope {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub platform: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Webhook response body, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}

impl PublishEnvelope {
    /// Wrap a webhook response.
    pub fn succeeded(platform: impl Into<String>, content: Option<String>, response: Value) -> Self {
        Self {
            success: true,
            error: None,
            platform: platform.into(),
            content,
            response: Some(response),
        }
    }

    /// Wrap a failure, echoing the caller's content.
    pub fn failed(platform: impl Into<String>, content: Option<String>, error: &Error) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            platform: platform.into(),
            content,
            response: None,
        }
    }
}

// =============================================================================
// Registry Snapshots
// =============================================================================

/// Result of `list_supported_platforms`: identifiers plus the full tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSnapshot {
    pub content_platforms: Vec<&'static str>,
    pub publishing_platforms: Vec<&'static str>,
    pub content_details: ById<PlatformProfile>,
    pub publishing_details: ById<PublishTarget>,
}

/// Result of `list_available_emotions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionSnapshot {
    pub emotions: Vec<&'static str>,
    pub descriptions: ById<EmotionProfile>,
}

/// Transport-agnostic result of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolOutcome {
    Generation(GenerationEnvelope),
    Publish(PublishEnvelope),
    Platforms(PlatformSnapshot),
    Emotions(EmotionSnapshot),
}

impl ToolOutcome {
    /// Whether the backend call (if any) succeeded. Snapshots always do.
    pub fn is_success(&self) -> bool {
        match self {
            Self::Generation(envelope) => envelope.success,
            Self::Publish(envelope) => envelope.success,
            Self::Platforms(_) | Self::Emotions(_) => true,
        }
    }

    /// Render as the pretty-printed JSON placed in a tool result text block.
    pub fn to_pretty_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generation_failure_omits_absent_fields() {
        let envelope = GenerationEnvelope::failed(
            "Twitter",
            None,
            GenerationOptions {
                emotion: Some("excited".into()),
                ..Default::default()
            },
            &Error::backend("status 500"),
        );

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "success": false,
                "error": "Backend error: status 500",
                "platform": "Twitter",
                "requestParameters": {"emotion": "excited"}
            })
        );
    }

    #[test]
    fn test_invalid_length_echoed_as_sent() {
        let envelope = GenerationEnvelope::failed(
            "Twitter",
            Some("hi".into()),
            GenerationOptions {
                length: Some(RequestedLength::Invalid(json!("abc"))),
                ..Default::default()
            },
            &Error::invalid_argument("length must be a whole number"),
        );

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["requestParameters"], json!({"length": "abc"}));
    }

    #[test]
    fn test_publish_success_shape() {
        let envelope = PublishEnvelope::succeeded("x", Some("hi".into()), json!({"ok": true}));
        let value = serde_json::to_value(ToolOutcome::Publish(envelope)).unwrap();
        assert_eq!(
            value,
            json!({"success": true, "platform": "x", "content": "hi", "response": {"ok": true}})
        );
    }
}
