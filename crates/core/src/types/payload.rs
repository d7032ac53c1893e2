use serde::Serialize;

// =============================================================================
// Backend Payloads
// =============================================================================

/// Body posted to the content generation backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationPayload {
    /// Prompt text with style, emotion and sentiment folded in.
    pub text: String,

    /// Target language code.
    pub lang: String,

    /// Requested content length.
    pub length: u32,
}

/// Body posted to the publishing webhook.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishPayload {
    /// Lowercase publish target identifier.
    pub platform: String,

    /// Content to publish.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Optional image to attach.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Chat or channel id, only sent for telegram.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram_chat_id: Option<String>,
}
