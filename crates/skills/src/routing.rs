//! Tool name classification.
//!
//! Routing happens in two steps. [`ToolRoute::classify`] looks only at the
//! shape of the name; [`ToolRoute::resolve`] then looks the recovered
//! identifier up in the registry.

use social_mcp_core::{
    registry,
    types::{PlatformProfile, PublishTarget},
    Error, Result,
};

use crate::catalog::{
    CONTENT_SUFFIX, GENERATE_PREFIX, LIST_EMOTIONS_TOOL, LIST_PLATFORMS_TOOL, PUBLISH_PREFIX,
};

/// Shape of a tool name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolRoute {
    /// `generate_<platform>_content`, carrying the recovered platform identifier.
    Generate(String),
    /// `publish_<target>_content`, carrying the target identifier.
    Publish(String),
    ListPlatforms,
    ListEmotions,
    Unknown(String),
}

/// A route whose identifier exists in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedRoute {
    Generate(&'static PlatformProfile),
    Publish(&'static PublishTarget),
    ListPlatforms,
    ListEmotions,
}

impl ToolRoute {
    /// Classify a tool name. Total: every string maps to exactly one variant.
    pub fn classify(name: &str) -> Self {
        if let Some(rest) = strip_affixes(name, GENERATE_PREFIX) {
            return Self::Generate(upcase_first(rest));
        }
        if let Some(rest) = strip_affixes(name, PUBLISH_PREFIX) {
            return Self::Publish(rest.to_string());
        }
        match name {
            LIST_PLATFORMS_TOOL => Self::ListPlatforms,
            LIST_EMOTIONS_TOOL => Self::ListEmotions,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Look the route's identifier up in the registry.
    pub fn resolve(&self) -> Result<ResolvedRoute> {
        match self {
            Self::Generate(id) => registry::platform(id)
                .map(ResolvedRoute::Generate)
                .ok_or_else(|| Error::UnsupportedPlatform(id.clone())),
            Self::Publish(id) => registry::publish_target(id)
                .map(ResolvedRoute::Publish)
                .ok_or_else(|| Error::UnsupportedPublishTarget(id.clone())),
            Self::ListPlatforms => Ok(ResolvedRoute::ListPlatforms),
            Self::ListEmotions => Ok(ResolvedRoute::ListEmotions),
            Self::Unknown(name) => Err(Error::unknown_tool(name.clone())),
        }
    }
}

/// Strip `prefix` and the `_content` suffix. When the two overlap
/// (`generate_content`) only the prefix is removed.
fn strip_affixes<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    if !name.ends_with(CONTENT_SUFFIX) {
        return None;
    }
    let rest = name.strip_prefix(prefix)?;
    Some(rest.strip_suffix(CONTENT_SUFFIX).unwrap_or(rest))
}

/// Uppercase the first character only: `linkedin` becomes `Linkedin`, not
/// `LinkedIn`. Registry keys are spelled to match.
fn upcase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
