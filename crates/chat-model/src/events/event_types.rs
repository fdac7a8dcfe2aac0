//! Gateway event types
//!
//! Names sent in the `t` field of dispatch messages. Only the events that feed
//! the entity cache are listed; everything else is ignored by the client.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gateway event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GatewayEventType {
    /// Sent after successful Identify
    Ready,

    // Guild events
    /// Guild available, joined, or created
    GuildCreate,
    /// Left guild, kicked, or guild deleted
    GuildDelete,

    /// Full replacement of a guild's emoji list
    GuildEmojisUpdate,

    // Role events
    GuildRoleCreate,
    GuildRoleUpdate,
    GuildRoleDelete,

    /// Member updated (roles, nickname)
    GuildMemberUpdate,
}

impl GatewayEventType {
    /// Get the string representation of the event type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "READY",
            Self::GuildCreate => "GUILD_CREATE",
            Self::GuildDelete => "GUILD_DELETE",
            Self::GuildEmojisUpdate => "GUILD_EMOJIS_UPDATE",
            Self::GuildRoleCreate => "GUILD_ROLE_CREATE",
            Self::GuildRoleUpdate => "GUILD_ROLE_UPDATE",
            Self::GuildRoleDelete => "GUILD_ROLE_DELETE",
            Self::GuildMemberUpdate => "GUILD_MEMBER_UPDATE",
        }
    }

    /// Parse an event type from a string
    #[must_use]
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "READY" => Some(Self::Ready),
            "GUILD_CREATE" => Some(Self::GuildCreate),
            "GUILD_DELETE" => Some(Self::GuildDelete),
            "GUILD_EMOJIS_UPDATE" => Some(Self::GuildEmojisUpdate),
            "GUILD_ROLE_CREATE" => Some(Self::GuildRoleCreate),
            "GUILD_ROLE_UPDATE" => Some(Self::GuildRoleUpdate),
            "GUILD_ROLE_DELETE" => Some(Self::GuildRoleDelete),
            "GUILD_MEMBER_UPDATE" => Some(Self::GuildMemberUpdate),
            _ => None,
        }
    }
}

impl fmt::Display for GatewayEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
