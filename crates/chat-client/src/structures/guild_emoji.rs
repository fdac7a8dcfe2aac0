//! Guild emoji - a custom emoji owned by a guild
//!
//! A `GuildEmoji` is a local projection of server state. It is built from a
//! payload, merged with fresher payloads through [`GuildEmoji::patch`], and
//! cloned whenever a snapshot has to outlive an update. Network operations are
//! forwarded to the guild's [`GuildEmojiManager`](crate::GuildEmojiManager).

use chat_common::ClientResult;
use chat_http::EditEmoji;
use chat_model::{
    emoji_url, EmojiPayload, ModelError, PartialEmoji, Permissions, Snowflake, User,
};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::fmt;

use crate::client::Client;
use crate::managers::GuildEmojiRoleManager;

/// Custom guild emoji
#[derive(Debug, Clone)]
pub struct GuildEmoji {
    pub(crate) id: Snowflake,
    pub(crate) guild_id: Snowflake,
    pub(crate) name: String,
    pub(crate) animated: bool,
    pub(crate) managed: bool,
    pub(crate) available: bool,
    pub(crate) require_colons: bool,
    pub(crate) author: Option<User>,
    pub(crate) role_ids: HashSet<Snowflake>,
}

impl GuildEmoji {
    /// Build an emoji of `guild_id` from a payload
    ///
    /// Fails when the payload carries no id.
    pub fn new(guild_id: Snowflake, payload: &EmojiPayload) -> Result<Self, ModelError> {
        let id = payload.id.ok_or(ModelError::MissingField("id"))?;

        let mut emoji = Self {
            id,
            guild_id,
            name: String::new(),
            animated: false,
            managed: false,
            available: true,
            require_colons: true,
            author: None,
            role_ids: HashSet::new(),
        };
        emoji.patch(payload);

        Ok(emoji)
    }

    /// Merge the keys present in `payload`; absent keys keep their value
    ///
    /// The payload's id is ignored: an emoji's identity never changes.
    pub fn patch(&mut self, payload: &EmojiPayload) {
        if let Some(name) = &payload.name {
            self.name.clone_from(name);
        }
        if let Some(animated) = payload.animated {
            self.animated = animated;
        }
        if let Some(managed) = payload.managed {
            self.managed = managed;
        }
        if let Some(available) = payload.available {
            self.available = available;
        }
        if let Some(require_colons) = payload.require_colons {
            self.require_colons = require_colons;
        }
        if let Some(roles) = &payload.roles {
            self.role_ids = roles.iter().copied().collect();
        }
        if let Some(user) = &payload.user {
            self.author = Some(user.clone());
        }
    }

    pub fn id(&self) -> Snowflake {
        self.id
    }

    pub fn guild_id(&self) -> Snowflake {
        self.guild_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn animated(&self) -> bool {
        self.animated
    }

    /// Owned by an integration; such emojis cannot be edited or deleted
    pub fn managed(&self) -> bool {
        self.managed
    }

    /// False when the guild lost the boost level the emoji needs
    pub fn available(&self) -> bool {
        self.available
    }

    pub fn require_colons(&self) -> bool {
        self.require_colons
    }

    /// Creator, if a payload or [`fetch_author`](Self::fetch_author) provided it
    pub fn author(&self) -> Option<&User> {
        self.author.as_ref()
    }

    /// Roles the emoji is restricted to; empty means everyone may use it
    pub fn role_ids(&self) -> &HashSet<Snowflake> {
        &self.role_ids
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.id.created_at()
    }

    pub fn url(&self, cdn_base: &str) -> String {
        emoji_url(cdn_base, self.id, self.animated)
    }

    /// Project onto the shape used by reactions and components
    pub fn as_partial(&self) -> PartialEmoji {
        PartialEmoji::custom(self.id, self.name.clone(), self.animated)
    }

    /// Manager for the emoji's role restriction
    pub fn roles<'a>(&'a self, client: &'a Client) -> GuildEmojiRoleManager<'a> {
        GuildEmojiRoleManager::new(client, self)
    }

    /// Equality over every mirrored field, the author and `animated` included
    pub(crate) fn same_state(&self, other: &Self) -> bool {
        self == other && self.animated == other.animated && self.author == other.author
    }

    /// Whether the current user may delete this emoji
    ///
    /// Errors when the current user's member record for the guild is not
    /// cached, since permissions cannot be computed without it.
    pub fn deletable(&self, client: &Client) -> ClientResult<bool> {
        let permissions = client.cache().current_member_permissions(self.guild_id)?;
        Ok(!self.managed && permissions.has(Permissions::MANAGE_GUILD_EXPRESSIONS))
    }

    /// Fetch the creator and merge the fresh payload into `self`
    ///
    /// The author may still be `None` afterwards if the API omits it.
    pub async fn fetch_author(&mut self, client: &Client) -> ClientResult<Option<User>> {
        let payload = client
            .guild_emojis(self.guild_id)
            .fetch_author_payload(self)
            .await?;
        self.patch(&payload);
        Ok(self.author.clone())
    }

    /// Edit the emoji through the guild's emoji manager
    pub async fn edit(
        &self,
        client: &Client,
        data: EditEmoji,
        reason: Option<&str>,
    ) -> ClientResult<GuildEmoji> {
        client
            .guild_emojis(self.guild_id)
            .edit(self.id, data, reason)
            .await
    }

    pub async fn set_name(
        &self,
        client: &Client,
        name: impl Into<String>,
        reason: Option<&str>,
    ) -> ClientResult<GuildEmoji> {
        self.edit(client, EditEmoji::name(name), reason).await
    }

    /// Delete the emoji and return the state it had before deletion
    ///
    /// The returned value is not marked stale; it is a plain snapshot.
    pub async fn delete(
        &self,
        client: &Client,
        reason: Option<&str>,
    ) -> ClientResult<GuildEmoji> {
        let snapshot = self.clone();
        client
            .guild_emojis(self.guild_id)
            .delete(self.id, reason)
            .await?;
        Ok(snapshot)
    }
}

// Entity comparison covers the fields an update can change, not the author
impl PartialEq for GuildEmoji {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.managed == other.managed
            && self.available == other.available
            && self.require_colons == other.require_colons
            && self.role_ids == other.role_ids
    }
}

impl Eq for GuildEmoji {}

// Raw payloads treat a missing `managed` or `roles` key as false / unrestricted
impl PartialEq<EmojiPayload> for GuildEmoji {
    fn eq(&self, other: &EmojiPayload) -> bool {
        let roles: HashSet<Snowflake> = other.roles.iter().flatten().copied().collect();

        other.id == Some(self.id)
            && other.name.as_deref() == Some(self.name.as_str())
            && other.managed.unwrap_or(false) == self.managed
            && roles == self.role_ids
    }
}

impl PartialEq<GuildEmoji> for EmojiPayload {
    fn eq(&self, other: &GuildEmoji) -> bool {
        other == self
    }
}

impl fmt::Display for GuildEmoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_partial(), f)
    }
}
