use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use secrecy::Secret;
use serde::Deserialize;

/// Base URL of the content generation API used when `API_HOST` is unset.
pub const DEFAULT_CONTENT_API_URL: &str =
    "https://ai-social-media-content-generator-viral-content-creator.p.rapidapi.com";

/// Timeout applied to every outbound backend call, in seconds.
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub content_api: ContentApiConfig,
    pub publisher: PublisherConfig,
    pub logging: LoggingConfig,
}

/// Which transport the process serves the tool protocol on.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Stdio,
    Http,
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stdio => f.write_str("stdio"),
            Self::Http => f.write_str("http"),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub mode: TransportMode,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContentApiConfig {
    pub base_url: String,
    pub api_key: Option<Secret<String>>,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PublisherConfig {
    pub webhook_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub filter: String,
    pub json: bool,
}

/// Flat environment variables honoured on top of the layered sources,
/// as `(variable, config key)` pairs.
const LEGACY_ENV_OVERRIDES: &[(&str, &str)] = &[
    ("API_HOST", "content_api.base_url"),
    ("RAPIDAPI_KEY", "content_api.api_key"),
    ("N8N_WEBHOOK_URL", "publisher.webhook_url"),
    ("MCP_HOST", "server.host"),
    ("MCP_PORT", "server.port"),
    ("MCP_MODE", "server.mode"),
];

impl AppConfig {
    /// Load configuration from files and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load configuration, resolving the flat variables through `lookup`.
    pub fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // Map APP__SERVER__PORT=5555 to server.port
            .add_source(Environment::with_prefix("APP").separator("__"));

        for (var, key) in LEGACY_ENV_OVERRIDES {
            let value = lookup(var).filter(|v| !v.is_empty());
            builder = builder.set_override_option(*key, value)?;
        }

        builder.build()?.try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5555)?
            .set_default("server.mode", "stdio")?
            .set_default("content_api.base_url", DEFAULT_CONTENT_API_URL)?
            .set_default("content_api.timeout_secs", DEFAULT_BACKEND_TIMEOUT_SECS)?
            .set_default("publisher.webhook_url", "")?
            .set_default("publisher.timeout_secs", DEFAULT_BACKEND_TIMEOUT_SECS)?
            .set_default("logging.filter", "info")?
            .set_default("logging.json", false)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 5555,
                mode: TransportMode::Stdio,
            },
            content_api: ContentApiConfig {
                base_url: DEFAULT_CONTENT_API_URL.into(),
                api_key: None,
                timeout_secs: DEFAULT_BACKEND_TIMEOUT_SECS,
            },
            publisher: PublisherConfig {
                webhook_url: String::new(),
                timeout_secs: DEFAULT_BACKEND_TIMEOUT_SECS,
            },
            logging: LoggingConfig {
                filter: "info".into(),
                json: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_overrides() {
        let config = AppConfig::load_with(lookup_from(&[])).unwrap();

        assert_eq!(config.server.port, 5555);
        assert_eq!(config.server.mode, TransportMode::Stdio);
        assert_eq!(config.content_api.base_url, DEFAULT_CONTENT_API_URL);
        assert!(config.content_api.api_key.is_none());
        assert_eq!(config.content_api.timeout_secs, 30);
        assert_eq!(config.publisher.webhook_url, "");
    }

    #[test]
    fn test_flat_variables_override_defaults() {
        let config = AppConfig::load_with(lookup_from(&[
            ("API_HOST", "http://localhost:9000"),
            ("RAPIDAPI_KEY", "secret-key"),
            ("N8N_WEBHOOK_URL", "http://localhost:5678/webhook/social"),
            ("MCP_PORT", "8080"),
            ("MCP_MODE", "http"),
        ]))
        .unwrap();

        assert_eq!(config.content_api.base_url, "http://localhost:9000");
        assert_eq!(
            config.content_api.api_key.as_ref().unwrap().expose_secret(),
            "secret-key"
        );
        assert_eq!(
            config.publisher.webhook_url,
            "http://localhost:5678/webhook/social"
        );
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.mode, TransportMode::Http);
    }

    #[test]
    fn test_empty_api_key_is_absent() {
        let config = AppConfig::load_with(lookup_from(&[("RAPIDAPI_KEY", "")])).unwrap();
        assert!(config.content_api.api_key.is_none());
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let result = AppConfig::load_with(lookup_from(&[("MCP_MODE", "carrier-pigeon")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_api_key_is_redacted_in_debug() {
        let config = AppConfig::load_with(lookup_from(&[("RAPIDAPI_KEY", "secret-key")])).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret-key"));
    }
}
