//! Guild emoji manager
//!
//! Performs the network side of emoji operations and keeps the cache in step
//! with every successful response.

use chat_common::{ClientError, ClientResult};
use chat_http::{CreateEmoji, EditEmoji};
use chat_model::{EmojiPayload, Permissions, Snowflake, User};
use std::collections::HashSet;
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::client::Client;
use crate::structures::GuildEmoji;

/// Emoji manager for one guild
pub struct GuildEmojiManager<'a> {
    client: &'a Client,
    guild_id: Snowflake,
}

impl<'a> GuildEmojiManager<'a> {
    /// Create a new GuildEmojiManager
    pub fn new(client: &'a Client, guild_id: Snowflake) -> Self {
        Self { client, guild_id }
    }

    pub fn guild_id(&self) -> Snowflake {
        self.guild_id
    }

    /// Cached emojis, ordered by id
    pub fn cache(&self) -> Vec<GuildEmoji> {
        self.client.cache().emojis(self.guild_id)
    }

    pub fn get(&self, emoji_id: Snowflake) -> Option<GuildEmoji> {
        self.client.cache().emoji(self.guild_id, emoji_id)
    }

    /// Get an emoji, hitting the API only when it is not cached or `force` is set
    #[instrument(skip(self), fields(guild_id = %self.guild_id))]
    pub async fn fetch(&self, emoji_id: Snowflake, force: bool) -> ClientResult<GuildEmoji> {
        if !force {
            if let Some(emoji) = self.get(emoji_id) {
                debug!(emoji_id = %emoji_id, "Emoji served from cache");
                return Ok(emoji);
            }
        }

        let payload = self
            .client
            .rest()
            .get_guild_emoji(self.guild_id, emoji_id)
            .await?;

        self.client.cache().upsert_emoji(self.guild_id, &payload)
    }

    /// Fetch every emoji of the guild
    ///
    /// Cached emojis the API no longer returns are dropped.
    #[instrument(skip(self), fields(guild_id = %self.guild_id))]
    pub async fn fetch_all(&self) -> ClientResult<Vec<GuildEmoji>> {
        let payloads = self.client.rest().get_guild_emojis(self.guild_id).await?;

        let emojis = payloads
            .iter()
            .map(|p| self.client.cache().upsert_emoji(self.guild_id, p))
            .collect::<ClientResult<Vec<_>>>()?;

        let returned: HashSet<Snowflake> = emojis.iter().map(GuildEmoji::id).collect();
        self.client.cache().with_guild_mut(self.guild_id, |g| {
            g.emojis.retain(|id, _| returned.contains(id));
        });

        debug!(count = emojis.len(), "Emojis fetched");

        Ok(emojis)
    }

    /// Upload a new emoji
    #[instrument(skip(self, data), fields(guild_id = %self.guild_id, name = %data.name))]
    pub async fn create(
        &self,
        data: CreateEmoji,
        reason: Option<&str>,
    ) -> ClientResult<GuildEmoji> {
        data.validate()
            .map_err(|e| ClientError::Validation(e.to_string()))?;

        let payload = self
            .client
            .rest()
            .create_guild_emoji(self.guild_id, &data, reason)
            .await?;
        let emoji = self.client.cache().upsert_emoji(self.guild_id, &payload)?;

        info!(emoji_id = %emoji.id(), "Emoji created");

        Ok(emoji)
    }

    /// Edit an emoji and return its updated state
    #[instrument(skip(self, data), fields(guild_id = %self.guild_id))]
    pub async fn edit(
        &self,
        emoji_id: Snowflake,
        data: EditEmoji,
        reason: Option<&str>,
    ) -> ClientResult<GuildEmoji> {
        data.validate()
            .map_err(|e| ClientError::Validation(e.to_string()))?;

        let payload = self
            .client
            .rest()
            .edit_guild_emoji(self.guild_id, emoji_id, &data, reason)
            .await?;
        let emoji = self.client.cache().upsert_emoji(self.guild_id, &payload)?;

        info!(emoji_id = %emoji_id, "Emoji edited");

        Ok(emoji)
    }

    /// Delete an emoji; the cache entry is dropped once the API confirms
    #[instrument(skip(self), fields(guild_id = %self.guild_id))]
    pub async fn delete(&self, emoji_id: Snowflake, reason: Option<&str>) -> ClientResult<()> {
        self.client
            .rest()
            .delete_guild_emoji(self.guild_id, emoji_id, reason)
            .await?;
        self.client.cache().remove_emoji(self.guild_id, emoji_id);

        info!(emoji_id = %emoji_id, "Emoji deleted");

        Ok(())
    }

    /// Fetch the creator of a cached emoji
    pub async fn fetch_author(&self, emoji_id: Snowflake) -> ClientResult<Option<User>> {
        let mut emoji = self
            .get(emoji_id)
            .ok_or(ClientError::EmojiNotCached(emoji_id))?;
        emoji.fetch_author(self.client).await
    }

    /// Re-fetch `emoji` to learn its author
    ///
    /// Managed emojis, a missing member record, and a missing
    /// `MANAGE_GUILD_EXPRESSIONS` are all rejected before any request.
    #[instrument(skip(self, emoji), fields(guild_id = %self.guild_id, emoji_id = %emoji.id()))]
    pub(crate) async fn fetch_author_payload(
        &self,
        emoji: &GuildEmoji,
    ) -> ClientResult<EmojiPayload> {
        if emoji.managed() {
            return Err(ClientError::ManagedEmoji(emoji.id()));
        }

        let permissions = self.client.cache().current_member_permissions(self.guild_id)?;
        if !permissions.has(Permissions::MANAGE_GUILD_EXPRESSIONS) {
            return Err(ClientError::MissingPermission(
                Permissions::MANAGE_GUILD_EXPRESSIONS,
            ));
        }

        let payload = self
            .client
            .rest()
            .get_guild_emoji(self.guild_id, emoji.id())
            .await?;
        self.client.cache().upsert_emoji(self.guild_id, &payload)?;

        Ok(payload)
    }
}
