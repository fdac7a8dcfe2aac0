//! Role restriction of a single emoji

use chat_common::{ClientError, ClientResult};
use chat_http::EditEmoji;
use chat_model::{Role, Snowflake};
use std::collections::HashSet;

use crate::client::Client;
use crate::structures::GuildEmoji;

/// Manages which roles may use an emoji
///
/// Every change is sent as a full role list through the emoji manager, so the
/// emoji passed in is only used as the starting point.
pub struct GuildEmojiRoleManager<'a> {
    client: &'a Client,
    emoji: &'a GuildEmoji,
}

impl<'a> GuildEmojiRoleManager<'a> {
    /// Create a new GuildEmojiRoleManager
    pub fn new(client: &'a Client, emoji: &'a GuildEmoji) -> Self {
        Self { client, emoji }
    }

    pub fn ids(&self) -> &HashSet<Snowflake> {
        self.emoji.role_ids()
    }

    /// Cached roles the emoji is restricted to; unknown ids are skipped
    pub fn cache(&self) -> Vec<Role> {
        let mut roles = self
            .client
            .cache()
            .with_guild(self.emoji.guild_id(), |g| {
                self.ids()
                    .iter()
                    .filter_map(|id| g.roles.get(id).cloned())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        roles.sort_by_key(|r| r.id);
        roles
    }

    pub async fn add(
        &self,
        roles: impl IntoIterator<Item = Snowflake>,
        reason: Option<&str>,
    ) -> ClientResult<GuildEmoji> {
        let added = self.resolve(roles)?;
        let mut next = self.ids().clone();
        next.extend(added);
        self.send(next, reason).await
    }

    pub async fn remove(
        &self,
        roles: impl IntoIterator<Item = Snowflake>,
        reason: Option<&str>,
    ) -> ClientResult<GuildEmoji> {
        let removed: HashSet<Snowflake> = roles.into_iter().collect();
        let next = self.ids().difference(&removed).copied().collect();
        self.send(next, reason).await
    }

    /// Replace the restriction; an empty list opens the emoji to everyone
    pub async fn set(
        &self,
        roles: impl IntoIterator<Item = Snowflake>,
        reason: Option<&str>,
    ) -> ClientResult<GuildEmoji> {
        let next = self.resolve(roles)?;
        self.send(next, reason).await
    }

    /// Check that every role exists in the cached guild
    fn resolve(
        &self,
        roles: impl IntoIterator<Item = Snowflake>,
    ) -> ClientResult<HashSet<Snowflake>> {
        let guild_id = self.emoji.guild_id();
        let roles: HashSet<Snowflake> = roles.into_iter().collect();

        let unknown = self
            .client
            .cache()
            .with_guild(guild_id, |g| {
                roles.iter().find(|id| !g.roles.contains_key(*id)).copied()
            })
            .ok_or(ClientError::GuildNotCached(guild_id))?;

        match unknown {
            Some(id) => Err(ClientError::Validation(format!("Unknown role: {id}"))),
            None => Ok(roles),
        }
    }

    async fn send(
        &self,
        roles: HashSet<Snowflake>,
        reason: Option<&str>,
    ) -> ClientResult<GuildEmoji> {
        let mut roles: Vec<Snowflake> = roles.into_iter().collect();
        roles.sort_unstable();

        self.client
            .guild_emojis(self.emoji.guild_id())
            .edit(self.emoji.id(), EditEmoji::roles(roles), reason)
            .await
    }
}
