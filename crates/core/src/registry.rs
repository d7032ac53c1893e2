//! Static platform, emotion and publish-target tables.
//!
//! Definition order is significant: the tool catalog and the `list_*` tools
//! enumerate rows in exactly this order.

use crate::types::{ById, EmotionProfile, PlatformProfile, PublishTarget};

/// Language codes accepted by the generation tools.
pub const LANGUAGES: &[&str] = &[
    "en", "tr", "es", "fr", "de", "it", "pt", "ru", "ja", "ko", "zh", "ar",
];

/// Smallest length a caller may request.
pub const MIN_LENGTH: u32 = 50;

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_EMOTION: &str = "friendly";
pub const DEFAULT_SENTIMENT: &str = "neutral";

static PLATFORMS: &[PlatformProfile] = &[
    PlatformProfile {
        id: "Instagram",
        default_length: 150,
        style: "visual-focused with hashtags and emojis",
        max_length: 2200,
        endpoint: "Instagram",
    },
    PlatformProfile {
        id: "Twitter",
        default_length: 280,
        style: "concise and engaging with hashtags",
        max_length: 280,
        endpoint: "Twitter",
    },
    // Keyed `Linkedin`: tool names are recovered by upcasing only the first
    // character, so `LinkedIn` would never be found.
    PlatformProfile {
        id: "Linkedin",
        default_length: 1000,
        style: "professional and industry-focused",
        max_length: 3000,
        endpoint: "LinkedIn",
    },
    PlatformProfile {
        id: "Facebook",
        default_length: 1000,
        style: "community-focused and engaging",
        max_length: 63206,
        endpoint: "Facebook",
    },
    PlatformProfile {
        id: "TikTok",
        default_length: 100,
        style: "trending and viral with short expressions",
        max_length: 2200,
        endpoint: "TikTok",
    },
    PlatformProfile {
        id: "Pinterest",
        default_length: 160,
        style: "descriptive and inspiring",
        max_length: 500,
        endpoint: "Pinterest",
    },
    PlatformProfile {
        id: "YouTube",
        default_length: 200,
        style: "descriptive with call-to-action",
        max_length: 5000,
        endpoint: "YouTube",
    },
    PlatformProfile {
        id: "Blog",
        default_length: 300,
        style: "SEO-optimized and informative",
        max_length: 10000,
        endpoint: "Blog",
    },
    PlatformProfile {
        id: "Reddit",
        default_length: 150,
        style: "conversational and community-focused",
        max_length: 40000,
        endpoint: "Reddit",
    },
    PlatformProfile {
        id: "Medium",
        default_length: 250,
        style: "in-depth analysis and insights",
        max_length: 10000,
        endpoint: "Medium",
    },
];

static EMOTIONS: &[EmotionProfile] = &[
    EmotionProfile { id: "excited", description: "energetic, enthusiastic, passionate" },
    EmotionProfile { id: "professional", description: "formal, authoritative, trustworthy" },
    EmotionProfile { id: "friendly", description: "warm, approachable, conversational" },
    EmotionProfile { id: "inspiring", description: "motivational, uplifting, encouraging" },
    EmotionProfile { id: "informative", description: "educational, clear, factual" },
    EmotionProfile { id: "humorous", description: "funny, witty, entertaining" },
    EmotionProfile { id: "nostalgic", description: "nostalgic, thoughtful, emotional" },
    EmotionProfile { id: "urgent", description: "urgent, pressing, action-oriented" },
    EmotionProfile { id: "casual", description: "relaxed, informal, laid-back" },
    EmotionProfile { id: "grateful", description: "thankful, appreciative, heartfelt" },
];

static PUBLISH_TARGETS: &[PublishTarget] = &[
    PublishTarget { id: "x", name: "X (Twitter)", requires_auth: true, requires_chat_id: false },
    PublishTarget { id: "facebook", name: "Facebook", requires_auth: true, requires_chat_id: false },
    PublishTarget { id: "linkedin", name: "LinkedIn", requires_auth: true, requires_chat_id: false },
    PublishTarget { id: "instagram", name: "Instagram", requires_auth: true, requires_chat_id: false },
    PublishTarget { id: "telegram", name: "Telegram", requires_auth: false, requires_chat_id: true },
];

/// Look up a platform profile by its canonical identifier.
pub fn platform(id: &str) -> Option<&'static PlatformProfile> {
    PLATFORMS.iter().find(|p| p.id == id)
}

/// Look up an emotion by identifier.
pub fn emotion(id: &str) -> Option<&'static EmotionProfile> {
    EMOTIONS.iter().find(|e| e.id == id)
}

/// Look up a publish target by identifier.
pub fn publish_target(id: &str) -> Option<&'static PublishTarget> {
    PUBLISH_TARGETS.iter().find(|t| t.id == id)
}

pub fn platforms() -> &'static [PlatformProfile] {
    PLATFORMS
}

pub fn emotions() -> &'static [EmotionProfile] {
    EMOTIONS
}

pub fn publish_targets() -> &'static [PublishTarget] {
    PUBLISH_TARGETS
}

/// Platform identifiers in definition order.
pub fn platform_ids() -> Vec<&'static str> {
    PLATFORMS.iter().map(|p| p.id).collect()
}

/// Emotion identifiers in definition order.
pub fn emotion_ids() -> Vec<&'static str> {
    EMOTIONS.iter().map(|e| e.id).collect()
}

/// Publish target identifiers in definition order.
pub fn publish_target_ids() -> Vec<&'static str> {
    PUBLISH_TARGETS.iter().map(|t| t.id).collect()
}

pub fn platform_table() -> ById<PlatformProfile> {
    ById(PLATFORMS)
}

pub fn emotion_table() -> ById<EmotionProfile> {
    ById(EMOTIONS)
}

pub fn publish_target_table() -> ById<PublishTarget> {
    ById(PUBLISH_TARGETS)
}
