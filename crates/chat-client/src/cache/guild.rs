//! Cached guild state

use chat_model::{GuildMember, GuildPayload, Permissions, Role, Snowflake};
use std::collections::HashMap;
use tracing::warn;

use crate::structures::GuildEmoji;

/// Everything the client keeps about one guild
#[derive(Debug, Clone)]
pub struct CachedGuild {
    pub id: Snowflake,
    pub name: String,
    pub owner_id: Snowflake,
    pub roles: HashMap<Snowflake, Role>,
    /// Members keyed by user id
    pub members: HashMap<Snowflake, GuildMember>,
    pub emojis: HashMap<Snowflake, GuildEmoji>,
}

impl CachedGuild {
    /// Build from a `GUILD_CREATE` payload
    ///
    /// Emojis without an id and members without a user are skipped.
    pub fn from_payload(payload: &GuildPayload) -> Self {
        let roles = payload.roles.iter().map(|r| (r.id, r.clone())).collect();

        let members = payload
            .members
            .iter()
            .filter_map(|m| m.user_id().map(|id| (id, m.clone())))
            .collect();

        let emojis = payload
            .emojis
            .iter()
            .filter_map(|p| match GuildEmoji::new(payload.id, p) {
                Ok(emoji) => Some((emoji.id(), emoji)),
                Err(e) => {
                    warn!(guild_id = %payload.id, error = %e, "Skipping malformed emoji");
                    None
                }
            })
            .collect();

        Self {
            id: payload.id,
            name: payload.name.clone(),
            owner_id: payload.owner_id,
            roles,
            members,
            emojis,
        }
    }

    /// The @everyone role, whose id equals the guild id
    pub fn everyone_role(&self) -> Option<&Role> {
        self.roles.get(&self.id)
    }

    /// Guild-level permissions of a member
    ///
    /// `None` when the member is not cached. The owner and administrators
    /// hold every permission.
    pub fn member_permissions(&self, user_id: Snowflake) -> Option<Permissions> {
        let member = self.members.get(&user_id)?;

        if user_id == self.owner_id {
            return Some(Permissions::ALL);
        }

        let base = self
            .everyone_role()
            .map_or(Permissions::empty(), |r| r.permissions);
        let permissions = member
            .roles
            .iter()
            .filter_map(|id| self.roles.get(id))
            .fold(base, |acc, role| acc | role.permissions);

        if permissions.contains(Permissions::ADMINISTRATOR) {
            Some(Permissions::ALL)
        } else {
            Some(permissions)
        }
    }
}
