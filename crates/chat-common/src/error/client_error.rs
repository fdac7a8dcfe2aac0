//! Client error types
//!
//! Unified error handling for every client operation. Local policy failures
//! (missing cached state, managed resources, missing permissions) are detected
//! before any request is sent; transport failures are wrapped unchanged.

use chat_model::{ModelError, Permissions, Snowflake};

use super::HttpError;
use crate::config::ConfigError;

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Client-wide error type
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    // State errors
    /// The current user's member record for the guild is not cached
    #[error("Guild member state missing for guild {guild_id}")]
    GuildMemberMissing { guild_id: Snowflake },

    #[error("Guild not cached: {0}")]
    GuildNotCached(Snowflake),

    #[error("Emoji not cached: {0}")]
    EmojiNotCached(Snowflake),

    // Authorization errors
    /// Resource is controlled by an external integration
    #[error("Emoji {0} is managed by an integration")]
    ManagedEmoji(Snowflake),

    #[error("Missing permission: {0}")]
    MissingPermission(Permissions),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Wrapped errors
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// Get an error code string
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::GuildMemberMissing { .. } => "GUILD_MEMBER_MISSING",
            Self::GuildNotCached(_) => "GUILD_NOT_CACHED",
            Self::EmojiNotCached(_) => "EMOJI_NOT_CACHED",
            Self::ManagedEmoji(_) => "EMOJI_MANAGED",
            Self::MissingPermission(_) => "MISSING_PERMISSIONS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Http(_) => "HTTP_ERROR",
            Self::Model(e) => e.code(),
            Self::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Check if the error was raised without touching the network
    #[must_use]
    pub fn is_local(&self) -> bool {
        !matches!(self, Self::Http(_))
    }

    /// Check if this is an authorization error
    #[must_use]
    pub fn is_authorization(&self) -> bool {
        match self {
            Self::ManagedEmoji(_) | Self::MissingPermission(_) => true,
            Self::Http(e) => e.status() == Some(403),
            _ => false,
        }
    }
}
