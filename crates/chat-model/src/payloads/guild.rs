use serde::{Deserialize, Serialize};

use crate::entities::{GuildMember, Role};
use crate::payloads::EmojiPayload;
use crate::value_objects::Snowflake;

/// Guild object as carried by `GUILD_CREATE`
///
/// Only the parts the cache keeps are modelled; unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildPayload {
    pub id: Snowflake,
    pub name: String,
    pub owner_id: Snowflake,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub emojis: Vec<EmojiPayload>,
    /// Members sent with the guild; always includes the current user
    #[serde(default)]
    pub members: Vec<GuildMember>,
}

/// Guild that is unavailable or that the current user was removed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnavailableGuild {
    pub id: Snowflake,
    #[serde(default)]
    pub unavailable: bool,
}
