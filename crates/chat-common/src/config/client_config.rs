//! Client configuration
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present) or builds it programmatically.

use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::telemetry::TracingConfig;

/// Client configuration
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    /// Bot token sent in the `Authorization` header
    pub token: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_api_version")]
    pub api_version: u8,
    #[serde(default = "default_cdn_base")]
    pub cdn_base: String,
    /// Whole-request timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

// Default value functions
fn default_api_base() -> String {
    "https://discord.com/api".to_string()
}

fn default_api_version() -> u8 {
    10
}

fn default_cdn_base() -> String {
    "https://cdn.discordapp.com".to_string()
}

fn default_request_timeout_ms() -> u64 {
    15_000
}

fn default_user_agent() -> String {
    format!(
        "DiscordBot (https://github.com/chat-client/chat-client, {})",
        env!("CARGO_PKG_VERSION")
    )
}

impl ClientConfig {
    /// Configuration with defaults for everything but the token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base: default_api_base(),
            api_version: default_api_version(),
            cdn_base: default_cdn_base(),
            request_timeout_ms: default_request_timeout_ms(),
            user_agent: default_user_agent(),
            env: Environment::default(),
        }
    }

    /// Point REST calls somewhere else (proxies, test servers)
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    #[must_use]
    pub fn with_api_version(mut self, version: u8) -> Self {
        self.api_version = version;
        self
    }

    #[must_use]
    pub fn with_cdn_base(mut self, cdn_base: impl Into<String>) -> Self {
        self.cdn_base = cdn_base.into();
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn with_env(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    /// Versioned REST root, e.g. `https://discord.com/api/v10`
    #[must_use]
    pub fn api_url(&self) -> String {
        format!("{}/v{}", self.api_base.trim_end_matches('/'), self.api_version)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Tracing setup matching the configured environment
    #[must_use]
    pub fn tracing_config(&self) -> TracingConfig {
        if self.env.is_production() {
            TracingConfig::production()
        } else {
            TracingConfig::development()
        }
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if `CHAT_TOKEN` is missing or a variable cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("CHAT_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingVar("CHAT_TOKEN"))?;

        let mut config = Self::new(token);

        if let Some(base) = lookup("CHAT_API_BASE") {
            config.api_base = base;
        }
        if let Some(version) = lookup("CHAT_API_VERSION") {
            config.api_version = version
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CHAT_API_VERSION", version))?;
        }
        if let Some(cdn) = lookup("CHAT_CDN_BASE") {
            config.cdn_base = cdn;
        }
        if let Some(timeout) = lookup("CHAT_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = timeout
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CHAT_REQUEST_TIMEOUT_SECS", timeout))?;
            config.request_timeout_ms = secs.saturating_mul(1_000);
        }
        // Finer grained; wins over the seconds variable
        if let Some(timeout) = lookup("CHAT_REQUEST_TIMEOUT_MS") {
            config.request_timeout_ms = timeout
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CHAT_REQUEST_TIMEOUT_MS", timeout))?;
        }
        if let Some(agent) = lookup("CHAT_USER_AGENT") {
            config.user_agent = agent;
        }
        if let Some(env) = lookup("CHAT_ENV") {
            config.env =
                Environment::parse(&env).ok_or(ConfigError::InvalidValue("CHAT_ENV", env))?;
        }

        Ok(config)
    }
}

// Keep the token out of logs
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("api_version", &self.api_version)
            .field("cdn_base", &self.cdn_base)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("user_agent", &self.user_agent)
            .field("env", &self.env)
            .finish()
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
