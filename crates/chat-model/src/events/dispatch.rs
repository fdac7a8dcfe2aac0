//! Typed dispatch payloads

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::GatewayEventType;
use crate::entities::{Role, User};
use crate::error::ModelError;
use crate::payloads::{EmojiPayload, GuildPayload, UnavailableGuild};
use crate::value_objects::Snowflake;

/// `READY` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ready {
    pub user: User,
    #[serde(default)]
    pub guilds: Vec<UnavailableGuild>,
    pub session_id: String,
}

/// `GUILD_EMOJIS_UPDATE` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildEmojisUpdate {
    pub guild_id: Snowflake,
    pub emojis: Vec<EmojiPayload>,
}

/// `GUILD_ROLE_CREATE` / `GUILD_ROLE_UPDATE` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildRoleUpsert {
    pub guild_id: Snowflake,
    pub role: Role,
}

/// `GUILD_ROLE_DELETE` payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildRoleDelete {
    pub guild_id: Snowflake,
    pub role_id: Snowflake,
}

/// `GUILD_MEMBER_UPDATE` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildMemberUpdate {
    pub guild_id: Snowflake,
    pub user: User,
    #[serde(default)]
    pub roles: Vec<Snowflake>,
    #[serde(default)]
    pub nick: Option<String>,
}

/// A dispatch the cache knows how to apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayEvent {
    Ready(Box<Ready>),
    GuildCreate(Box<GuildPayload>),
    GuildDelete(UnavailableGuild),
    GuildEmojisUpdate(GuildEmojisUpdate),
    GuildRoleCreate(GuildRoleUpsert),
    GuildRoleUpdate(GuildRoleUpsert),
    GuildRoleDelete(GuildRoleDelete),
    GuildMemberUpdate(Box<GuildMemberUpdate>),
}

impl GatewayEvent {
    /// Decode the `t` / `d` pair of a dispatch message
    ///
    /// Returns `Ok(None)` for event names the cache does not consume.
    pub fn from_dispatch(name: &str, data: Value) -> Result<Option<Self>, ModelError> {
        let Some(kind) = GatewayEventType::from_name(name) else {
            return Ok(None);
        };

        let event = match kind {
            GatewayEventType::Ready => Self::Ready(Box::new(serde_json::from_value(data)?)),
            GatewayEventType::GuildCreate => {
                Self::GuildCreate(Box::new(serde_json::from_value(data)?))
            }
            GatewayEventType::GuildDelete => Self::GuildDelete(serde_json::from_value(data)?),
            GatewayEventType::GuildEmojisUpdate => {
                Self::GuildEmojisUpdate(serde_json::from_value(data)?)
            }
            GatewayEventType::GuildRoleCreate => {
                Self::GuildRoleCreate(serde_json::from_value(data)?)
            }
            GatewayEventType::GuildRoleUpdate => {
                Self::GuildRoleUpdate(serde_json::from_value(data)?)
            }
            GatewayEventType::GuildRoleDelete => {
                Self::GuildRoleDelete(serde_json::from_value(data)?)
            }
            GatewayEventType::GuildMemberUpdate => {
                Self::GuildMemberUpdate(Box::new(serde_json::from_value(data)?))
            }
        };

        Ok(Some(event))
    }

    pub fn kind(&self) -> GatewayEventType {
        match self {
            Self::Ready(_) => GatewayEventType::Ready,
            Self::GuildCreate(_) => GatewayEventType::GuildCreate,
            Self::GuildDelete(_) => GatewayEventType::GuildDelete,
            Self::GuildEmojisUpdate(_) => GatewayEventType::GuildEmojisUpdate,
            Self::GuildRoleCreate(_) => GatewayEventType::GuildRoleCreate,
            Self::GuildRoleUpdate(_) => GatewayEventType::GuildRoleUpdate,
            Self::GuildRoleDelete(_) => GatewayEventType::GuildRoleDelete,
            Self::GuildMemberUpdate(_) => GatewayEventType::GuildMemberUpdate,
        }
    }
}
