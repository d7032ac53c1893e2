use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

// =============================================================================
// Registry Profiles
// =============================================================================

/// Presentation rules for generating content on one social network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformProfile {
    /// Canonical identifier, e.g. `Instagram` or `Linkedin`.
    #[serde(skip)]
    pub id: &'static str,

    /// Length used when the caller does not ask for one.
    pub default_length: u32,

    /// Free-text description of the platform's house style.
    pub style: &'static str,

    /// Upper bound for a caller-supplied length.
    pub max_length: u32,

    /// Path segment used when calling the generation backend.
    pub endpoint: &'static str,
}

/// A named emotional tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmotionProfile {
    /// Identifier, e.g. `friendly`.
    pub id: &'static str,
    /// Descriptive tone text.
    pub description: &'static str,
}

impl Serialize for EmotionProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.description)
    }
}

/// A destination the publishing webhook can forward content to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishTarget {
    /// Lowercase identifier, e.g. `x` or `telegram`.
    #[serde(skip)]
    pub id: &'static str,

    /// Human-readable name.
    pub name: &'static str,

    /// Informational only; authentication lives in the webhook workflow.
    pub requires_auth: bool,

    /// Whether a chat id must accompany the content. Only serialized when set.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub requires_chat_id: bool,
}

/// A registry row addressable by its identifier.
pub trait Identified {
    fn id(&self) -> &'static str;
}

impl Identified for PlatformProfile {
    fn id(&self) -> &'static str {
        self.id
    }
}

impl Identified for EmotionProfile {
    fn id(&self) -> &'static str {
        self.id
    }
}

impl Identified for PublishTarget {
    fn id(&self) -> &'static str {
        self.id
    }
}

/// A registry table serialized as an `identifier -> row` object in definition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ById<T: 'static>(pub &'static [T]);

impl<T: Identified + Serialize> Serialize for ById<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for row in self.0 {
            map.serialize_entry(row.id(), row)?;
        }
        map.end()
    }
}
