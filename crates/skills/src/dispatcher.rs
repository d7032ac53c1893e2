//! Tool dispatcher shared by every transport.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use social_mcp_core::{
    registry,
    traits::{ContentBackend, PublishBackend, ToolDispatcher},
    types::{
        EmotionSnapshot, GenerationEnvelope, GenerationOptions, PlatformSnapshot, PublishEnvelope,
        PublishOptions, RequestedLength, ToolCatalog, ToolOutcome,
    },
    Error, Result,
};

use crate::catalog::build_catalog;
use crate::generator::ContentGenerator;
use crate::publisher::Publisher;
use crate::routing::{ResolvedRoute, ToolRoute};

/// Routes tool calls to the content generator, the publisher, or the
/// registry snapshots.
pub struct SocialToolDispatcher {
    generator: ContentGenerator,
    publisher: Publisher,
}

impl SocialToolDispatcher {
    pub fn new(content: Arc<dyn ContentBackend>, publishing: Arc<dyn PublishBackend>) -> Self {
        Self {
            generator: ContentGenerator::new(content),
            publisher: Publisher::new(publishing),
        }
    }

    /// Turn a lookup failure for a known tool family into a failure envelope.
    /// Anything else propagates.
    fn reject(route: &ToolRoute, args: &Value, err: Error) -> Result<ToolOutcome> {
        match route {
            ToolRoute::Generate(platform) => Ok(ToolOutcome::Generation(GenerationEnvelope::failed(
                platform.clone(),
                string_arg(args, "text"),
                generation_options(args),
                &err,
            ))),
            ToolRoute::Publish(target) => Ok(ToolOutcome::Publish(PublishEnvelope::failed(
                target.clone(),
                string_arg(args, "content"),
                &err,
            ))),
            _ => Err(err),
        }
    }
}

#[async_trait]
impl ToolDispatcher for SocialToolDispatcher {
    fn list_tools(&self) -> ToolCatalog {
        tracing::debug!("Building tool catalog");
        build_catalog()
    }

    async fn call_tool(&self, name: &str, args: Value) -> Result<ToolOutcome> {
        let route = ToolRoute::classify(name);
        tracing::info!(tool = %name, route = ?route, "Handling tool call");

        let resolved = match route.resolve() {
            Ok(resolved) => resolved,
            Err(err) => {
                tracing::warn!(tool = %name, error = %err, "Tool call rejected");
                return Self::reject(&route, &args, err);
            }
        };

        let outcome = match resolved {
            ResolvedRoute::Generate(platform) => ToolOutcome::Generation(
                self.generator
                    .generate(platform, string_arg(&args, "text"), generation_options(&args))
                    .await,
            ),
            ResolvedRoute::Publish(target) => ToolOutcome::Publish(
                self.publisher
                    .publish(target, string_arg(&args, "content"), publish_options(&args))
                    .await,
            ),
            ResolvedRoute::ListPlatforms => ToolOutcome::Platforms(PlatformSnapshot {
                content_platforms: registry::platform_ids(),
                publishing_platforms: registry::publish_target_ids(),
                content_details: registry::platform_table(),
                publishing_details: registry::publish_target_table(),
            }),
            ResolvedRoute::ListEmotions => ToolOutcome::Emotions(EmotionSnapshot {
                emotions: registry::emotion_ids(),
                descriptions: registry::emotion_table(),
            }),
        };

        tracing::info!(tool = %name, success = outcome.is_success(), "Tool call finished");
        Ok(outcome)
    }
}

// =============================================================================
// Argument coercion
// =============================================================================

/// Strings pass through, `null` and missing keys are absent, anything else is
/// rendered as JSON text.
fn string_arg(args: &Value, key: &str) -> Option<String> {
    match args.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Like [`string_arg`], but empty strings are absent too.
fn non_empty_arg(args: &Value, key: &str) -> Option<String> {
    string_arg(args, key).filter(|s| !s.is_empty())
}

/// `null` and a missing key are absent. A non-negative integral number that
/// fits is a length; any other value is kept so the generator can reject it.
fn length_arg(args: &Value) -> Option<RequestedLength> {
    let raw = args.get("length").filter(|raw| !raw.is_null())?;
    let length = raw
        .as_u64()
        .or_else(|| {
            raw.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= f64::from(u32::MAX))
                .map(|f| f as u64)
        })
        .and_then(|n| u32::try_from(n).ok());

    Some(match length {
        Some(length) => RequestedLength::Valid(length),
        None => RequestedLength::Invalid(raw.clone()),
    })
}

fn generation_options(args: &Value) -> GenerationOptions {
    GenerationOptions {
        language: string_arg(args, "language"),
        emotion: string_arg(args, "emotion"),
        length: length_arg(args),
        sentiment: None,
    }
}

fn publish_options(args: &Value) -> PublishOptions {
    PublishOptions {
        image_url: non_empty_arg(args, "imageUrl"),
        telegram_chat_id: non_empty_arg(args, "telegramChatId"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use social_mcp_core::mocks::{MockContentBackend, MockPublishBackend};

    #[test]
    fn test_string_arg_coercion() {
        let args = json!({"a": "x", "b": null, "c": 42, "d": true});
        assert_eq!(string_arg(&args, "a").as_deref(), Some("x"));
        assert_eq!(string_arg(&args, "b"), None);
        assert_eq!(string_arg(&args, "c").as_deref(), Some("42"));
        assert_eq!(string_arg(&args, "d").as_deref(), Some("true"));
        assert_eq!(string_arg(&args, "missing"), None);
        assert_eq!(string_arg(&Value::Null, "a"), None);
    }

    #[test]
    fn test_length_arg_coercion() {
        assert_eq!(length_arg(&json!({"length": 120})), Some(RequestedLength::Valid(120)));
        assert_eq!(length_arg(&json!({"length": 120.0})), Some(RequestedLength::Valid(120)));
        assert_eq!(
            length_arg(&json!({"length": -5})),
            Some(RequestedLength::Invalid(json!(-5)))
        );
        assert_eq!(length_arg(&json!({"length": null})), None);
        assert_eq!(length_arg(&json!({})), None);
    }

    #[tokio::test]
    async fn test_unusable_length_fails_without_backend_call() {
        for bad in [json!(-5), json!(120.5), json!("abc"), json!(5_000_000_000u64)] {
            let content = Arc::new(MockContentBackend::responding(json!({"text": "ok"})));
            let dispatcher = SocialToolDispatcher::new(
                content.clone(),
                Arc::new(MockPublishBackend::responding(json!({}))),
            );

            let outcome = dispatcher
                .call_tool("generate_twitter_content", json!({"text": "hi", "length": bad}))
                .await
                .unwrap();
            let value = serde_json::to_value(&outcome).unwrap();

            assert_eq!(value["success"], false, "length {}", bad);
            assert!(value["error"].as_str().unwrap().starts_with("Invalid argument: length"));
            assert_eq!(value["requestParameters"], json!({"length": bad}));
            assert_eq!(content.call_count(), 0, "length {}", bad);
        }
    }

    #[tokio::test]
    async fn test_out_of_range_length_fails() {
        let content = Arc::new(MockContentBackend::responding(json!({"text": "ok"})));
        let dispatcher = SocialToolDispatcher::new(
            content.clone(),
            Arc::new(MockPublishBackend::responding(json!({}))),
        );

        let outcome = dispatcher
            .call_tool("generate_twitter_content", json!({"text": "hi", "length": 20}))
            .await
            .unwrap();

        assert!(!outcome.is_success());
        assert_eq!(content.call_count(), 0);
    }

    #[test]
    fn test_publish_options_omit_empty() {
        let options = publish_options(&json!({"imageUrl": "", "telegramChatId": "@c"}));
        assert_eq!(options.image_url, None);
        assert_eq!(options.telegram_chat_id.as_deref(), Some("@c"));
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"telegramChatId": "@c"})
        );
    }
}
