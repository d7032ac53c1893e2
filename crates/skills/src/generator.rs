//! Content generator service.
//!
//! Resolves generation defaults against the platform profile, folds style and
//! tone into the prompt, calls the [`ContentBackend`] and wraps the outcome in
//! a [`GenerationEnvelope`]. Never returns an error: every failure becomes an
//! unsuccessful envelope.

use std::sync::Arc;

use social_mcp_core::{
    registry::{self, DEFAULT_EMOTION, DEFAULT_LANGUAGE, DEFAULT_SENTIMENT, MIN_LENGTH},
    traits::ContentBackend,
    types::{
        GenerationEnvelope, GenerationOptions, GenerationPayload, PlatformProfile, RequestedLength,
        ResolvedOptions,
    },
    Error, Result,
};

/// Generates platform-tailored content through a backend.
pub struct ContentGenerator {
    backend: Arc<dyn ContentBackend>,
}

impl ContentGenerator {
    pub fn new(backend: Arc<dyn ContentBackend>) -> Self {
        Self { backend }
    }

    /// Generate content for `platform`.
    pub async fn generate(
        &self,
        platform: &PlatformProfile,
        text: Option<String>,
        options: GenerationOptions,
    ) -> GenerationEnvelope {
        tracing::info!(platform = %platform.id, "Starting content generation");

        match self.request(platform, text.as_deref(), &options).await {
            Ok((content, resolved)) => {
                GenerationEnvelope::succeeded(platform.id, content, text, resolved)
            }
            Err(e) => {
                if e.is_validation() {
                    tracing::info!(platform = %platform.id, error = %e, "Generation options rejected");
                } else {
                    tracing::warn!(platform = %platform.id, error = %e, "Content generation failed");
                }
                GenerationEnvelope::failed(platform.id, text, options, &e)
            }
        }
    }

    async fn request(
        &self,
        platform: &PlatformProfile,
        text: Option<&str>,
        options: &GenerationOptions,
    ) -> Result<(serde_json::Value, ResolvedOptions)> {
        let resolved = resolve_options(platform, options)?;
        let payload = GenerationPayload {
            text: compose_prompt(text, &resolved),
            lang: resolved.language.clone(),
            length: resolved.length,
        };

        tracing::debug!(
            platform = %platform.id,
            endpoint = %platform.endpoint,
            lang = %payload.lang,
            length = payload.length,
            "Calling content generation backend"
        );

        let content = self.backend.generate(platform.endpoint, &payload).await?;
        Ok((content, resolved))
    }
}

/// Apply defaults and check the caller's options against the registry.
pub fn resolve_options(
    platform: &PlatformProfile,
    options: &GenerationOptions,
) -> Result<ResolvedOptions> {
    let emotion = options.emotion.as_deref().unwrap_or(DEFAULT_EMOTION);
    if registry::emotion(emotion).is_none() {
        return Err(Error::invalid_argument(format!(
            "emotion must be one of: {}",
            registry::emotion_ids().join(", ")
        )));
    }

    let length = match &options.length {
        None => platform.default_length,
        Some(RequestedLength::Valid(length)) => *length,
        Some(RequestedLength::Invalid(raw)) => {
            return Err(Error::invalid_argument(format!(
                "length must be a whole number in [{}, {}] for {}, got {}",
                MIN_LENGTH, platform.max_length, platform.id, raw
            )));
        }
    };
    if !(MIN_LENGTH..=platform.max_length).contains(&length) {
        return Err(Error::invalid_argument(format!(
            "length {} is outside [{}, {}] for {}",
            length, MIN_LENGTH, platform.max_length, platform.id
        )));
    }

    Ok(ResolvedOptions {
        language: options
            .language
            .clone()
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        emotion: emotion.to_string(),
        length,
        sentiment: options
            .sentiment
            .clone()
            .unwrap_or_else(|| DEFAULT_SENTIMENT.to_string()),
        style: platform.style.to_string(),
    })
}

/// The backend only accepts text, language and length, so style and tone
/// travel inside the text.
pub fn compose_prompt(text: Option<&str>, resolved: &ResolvedOptions) -> String {
    format!(
        "Content: {}\n\nStyle: {}\nEmotion: {}\nSentiment: {}",
        text.unwrap_or_default(),
        resolved.style,
        resolved.emotion,
        resolved.sentiment
    )
}
