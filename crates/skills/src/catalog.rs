//! Tool catalog builder.
//!
//! Tool names follow a fixed convention that [`crate::routing::ToolRoute`]
//! parses back apart:
//! - `generate_<lowercase platform>_content` for every platform profile
//! - `list_supported_platforms`, `list_available_emotions`
//! - `publish_<target>_content` for every publish target

use social_mcp_core::{
    registry::{self, LANGUAGES, MIN_LENGTH},
    types::{InputSchema, PlatformProfile, PropertySchema, PublishTarget, ToolCatalog, ToolDescriptor},
};

pub const GENERATE_PREFIX: &str = "generate_";
pub const PUBLISH_PREFIX: &str = "publish_";
pub const CONTENT_SUFFIX: &str = "_content";
pub const LIST_PLATFORMS_TOOL: &str = "list_supported_platforms";
pub const LIST_EMOTIONS_TOOL: &str = "list_available_emotions";

/// Name of the generation tool for a platform.
pub fn generation_tool_name(platform: &PlatformProfile) -> String {
    format!(
        "{}{}{}",
        GENERATE_PREFIX,
        platform.id.to_lowercase(),
        CONTENT_SUFFIX
    )
}

/// Name of the publishing tool for a target.
pub fn publish_tool_name(target: &PublishTarget) -> String {
    format!("{}{}{}", PUBLISH_PREFIX, target.id, CONTENT_SUFFIX)
}

/// Build the full catalog from the registry: generation tools, the two
/// listing tools, then publishing tools.
pub fn build_catalog() -> ToolCatalog {
    let mut tools: Vec<ToolDescriptor> = registry::platforms()
        .iter()
        .map(generation_tool)
        .collect();

    tools.push(ToolDescriptor {
        name: LIST_PLATFORMS_TOOL.to_string(),
        description: "List all supported social media platforms with their characteristics"
            .to_string(),
        input_schema: InputSchema::empty(),
    });
    tools.push(ToolDescriptor {
        name: LIST_EMOTIONS_TOOL.to_string(),
        description: "List all available emotions/moods for content enhancement".to_string(),
        input_schema: InputSchema::empty(),
    });

    tools.extend(registry::publish_targets().iter().map(publish_tool));

    ToolCatalog { tools }
}

fn generation_tool(platform: &PlatformProfile) -> ToolDescriptor {
    let schema = InputSchema::empty()
        .require(
            "text",
            PropertySchema::string("The base text content to transform for social media"),
        )
        .optional(
            "language",
            PropertySchema::string(
                "Target language code (en, tr, es, fr, de, etc.). If not provided, will be auto-detected.",
            )
            .one_of(LANGUAGES.iter().copied()),
        )
        .optional(
            "emotion",
            PropertySchema::string("Desired emotional tone. If not provided, will be auto-detected.")
                .one_of(registry::emotion_ids()),
        )
        .optional(
            "length",
            PropertySchema::bounded_number(
                format!(
                    "Custom content length. If not provided, platform default ({}) will be used.",
                    platform.default_length
                ),
                MIN_LENGTH,
                platform.max_length,
            ),
        );

    ToolDescriptor {
        name: generation_tool_name(platform),
        description: format!(
            "Generate {} content optimized for the platform. You can provide optional parameters or let AI detect them automatically.",
            platform.id
        ),
        input_schema: schema,
    }
}

fn publish_tool(target: &PublishTarget) -> ToolDescriptor {
    let mut schema = InputSchema::empty()
        .require(
            "content",
            PropertySchema::string("Content to publish on the platform"),
        )
        .optional(
            "imageUrl",
            PropertySchema::string("Optional image URL to include with the content"),
        );

    if target.requires_chat_id {
        schema = schema.require(
            "telegramChatId",
            PropertySchema::string("Telegram channel or chat ID (e.g., @channel or chat_id)"),
        );
    }

    let mut description = format!("Publish content to {} via the publishing webhook.", target.name);
    if target.requires_auth {
        description.push_str(" Requires authentication setup in the webhook workflow.");
    }

    ToolDescriptor {
        name: publish_tool_name(target),
        description,
        input_schema: schema,
    }
}
