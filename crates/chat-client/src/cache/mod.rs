//! Entity cache
//!
//! Process-local mirror of server state, filled by gateway dispatches and by
//! REST responses. Guilds live in a `DashMap` so readers never block each
//! other; every accessor hands out clones rather than references.

mod guild;

pub use guild::CachedGuild;

use chat_common::{ClientError, ClientResult};
use chat_model::events::{GuildEmojisUpdate, GuildMemberUpdate};
use chat_model::{
    EmojiPayload, GatewayEvent, GuildMember, GuildPayload, ModelError, Permissions, Role,
    Snowflake, User,
};
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::structures::GuildEmoji;

/// Emoji differences produced by a `GUILD_EMOJIS_UPDATE`
#[derive(Debug, Clone, Default)]
pub struct EmojiChanges {
    pub guild_id: Snowflake,
    pub created: Vec<GuildEmoji>,
    /// `(before, after)` pairs; `before` is a snapshot taken prior to patching
    ///
    /// Any mirrored field counts as a change, `animated` and the author included.
    pub updated: Vec<(GuildEmoji, GuildEmoji)>,
    pub deleted: Vec<GuildEmoji>,
}

impl EmojiChanges {
    fn new(guild_id: Snowflake) -> Self {
        Self {
            guild_id,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }
}

/// What applying a gateway event changed
#[derive(Debug, Clone)]
pub enum CacheUpdate {
    Ready { user: User },
    GuildAvailable(Snowflake),
    GuildRemoved(Snowflake),
    Emojis(EmojiChanges),
    RoleUpserted { guild_id: Snowflake, role_id: Snowflake },
    RoleDeleted { guild_id: Snowflake, role_id: Snowflake },
    MemberUpdated { guild_id: Snowflake, user_id: Snowflake },
    /// The event referenced state the cache does not hold
    Ignored,
}

/// Session-scoped entity cache
#[derive(Default)]
pub struct Cache {
    guilds: DashMap<Snowflake, CachedGuild>,
    current_user: RwLock<Option<User>>,
}

impl Cache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_user(&self) -> Option<User> {
        self.current_user.read().clone()
    }

    pub fn current_user_id(&self) -> Option<Snowflake> {
        self.current_user.read().as_ref().map(|u| u.id)
    }

    pub fn set_current_user(&self, user: User) {
        *self.current_user.write() = Some(user);
    }

    // ========================================================================
    // Guilds
    // ========================================================================

    /// Insert or replace a guild from its full payload
    pub fn insert_guild(&self, payload: &GuildPayload) {
        let guild = CachedGuild::from_payload(payload);
        debug!(
            guild_id = %guild.id,
            emojis = guild.emojis.len(),
            members = guild.members.len(),
            "Guild cached"
        );
        self.guilds.insert(guild.id, guild);
    }

    pub fn remove_guild(&self, guild_id: Snowflake) -> Option<CachedGuild> {
        self.guilds.remove(&guild_id).map(|(_, guild)| guild)
    }

    pub fn contains_guild(&self, guild_id: Snowflake) -> bool {
        self.guilds.contains_key(&guild_id)
    }

    /// Run `f` against a cached guild
    pub fn with_guild<R>(
        &self,
        guild_id: Snowflake,
        f: impl FnOnce(&CachedGuild) -> R,
    ) -> Option<R> {
        self.guilds.get(&guild_id).map(|guild| f(&guild))
    }

    /// Run `f` against a cached guild with write access
    pub fn with_guild_mut<R>(
        &self,
        guild_id: Snowflake,
        f: impl FnOnce(&mut CachedGuild) -> R,
    ) -> Option<R> {
        self.guilds.get_mut(&guild_id).map(|mut guild| f(&mut guild))
    }

    // ========================================================================
    // Emojis
    // ========================================================================

    pub fn emoji(&self, guild_id: Snowflake, emoji_id: Snowflake) -> Option<GuildEmoji> {
        self.with_guild(guild_id, |g| g.emojis.get(&emoji_id).cloned())
            .flatten()
    }

    /// All cached emojis of a guild, ordered by id
    pub fn emojis(&self, guild_id: Snowflake) -> Vec<GuildEmoji> {
        let mut emojis = self
            .with_guild(guild_id, |g| g.emojis.values().cloned().collect::<Vec<_>>())
            .unwrap_or_default();
        emojis.sort_by_key(GuildEmoji::id);
        emojis
    }

    /// Patch the cached emoji with `payload`, or insert it if unknown
    ///
    /// Returns the resulting state. When the guild itself is not cached the
    /// emoji is built but not stored.
    pub fn upsert_emoji(
        &self,
        guild_id: Snowflake,
        payload: &EmojiPayload,
    ) -> ClientResult<GuildEmoji> {
        let id = payload.id.ok_or(ModelError::MissingField("id"))?;

        let Some(mut guild) = self.guilds.get_mut(&guild_id) else {
            return Ok(GuildEmoji::new(guild_id, payload)?);
        };

        let emoji = match guild.emojis.entry(id) {
            Entry::Occupied(mut entry) => {
                entry.get_mut().patch(payload);
                entry.get().clone()
            }
            Entry::Vacant(entry) => entry.insert(GuildEmoji::new(guild_id, payload)?).clone(),
        };

        Ok(emoji)
    }

    pub fn remove_emoji(&self, guild_id: Snowflake, emoji_id: Snowflake) -> Option<GuildEmoji> {
        self.with_guild_mut(guild_id, |g| g.emojis.remove(&emoji_id))
            .flatten()
    }

    // ========================================================================
    // Members
    // ========================================================================

    pub fn member(&self, guild_id: Snowflake, user_id: Snowflake) -> Option<GuildMember> {
        self.with_guild(guild_id, |g| g.members.get(&user_id).cloned())
            .flatten()
    }

    pub fn remove_member(&self, guild_id: Snowflake, user_id: Snowflake) -> Option<GuildMember> {
        self.with_guild_mut(guild_id, |g| g.members.remove(&user_id))
            .flatten()
    }

    /// Guild permissions of the current user
    ///
    /// Fails with [`ClientError::GuildMemberMissing`] when the current user or
    /// their member record is unknown.
    pub fn current_member_permissions(&self, guild_id: Snowflake) -> ClientResult<Permissions> {
        let user_id = self.current_user_id();

        let guild = self
            .guilds
            .get(&guild_id)
            .ok_or(ClientError::GuildNotCached(guild_id))?;

        user_id
            .and_then(|id| guild.member_permissions(id))
            .ok_or(ClientError::GuildMemberMissing { guild_id })
    }

    // ========================================================================
    // Gateway events
    // ========================================================================

    /// Apply a gateway event and report what changed
    pub fn apply(&self, event: &GatewayEvent) -> CacheUpdate {
        match event {
            GatewayEvent::Ready(ready) => {
                self.set_current_user(ready.user.clone());
                debug!(user_id = %ready.user.id, guilds = ready.guilds.len(), "Session ready");
                CacheUpdate::Ready {
                    user: ready.user.clone(),
                }
            }
            GatewayEvent::GuildCreate(payload) => {
                self.insert_guild(payload);
                CacheUpdate::GuildAvailable(payload.id)
            }
            GatewayEvent::GuildDelete(guild) => match self.remove_guild(guild.id) {
                Some(_) => CacheUpdate::GuildRemoved(guild.id),
                None => CacheUpdate::Ignored,
            },
            GatewayEvent::GuildEmojisUpdate(update) => self.apply_emojis_update(update),
            GatewayEvent::GuildRoleCreate(upsert) | GatewayEvent::GuildRoleUpdate(upsert) => {
                self.upsert_role(upsert.guild_id, &upsert.role)
            }
            GatewayEvent::GuildRoleDelete(delete) => {
                self.delete_role(delete.guild_id, delete.role_id)
            }
            GatewayEvent::GuildMemberUpdate(update) => self.apply_member_update(update),
        }
    }

    fn apply_emojis_update(&self, update: &GuildEmojisUpdate) -> CacheUpdate {
        let Some(mut entry) = self.guilds.get_mut(&update.guild_id) else {
            debug!(guild_id = %update.guild_id, "Emoji update for uncached guild");
            return CacheUpdate::Ignored;
        };
        let guild = &mut *entry;

        let mut changes = EmojiChanges::new(guild.id);
        let mut present = HashSet::with_capacity(update.emojis.len());

        for payload in &update.emojis {
            let Some(id) = payload.id else {
                warn!(guild_id = %guild.id, "Emoji without id in update");
                continue;
            };
            present.insert(id);

            if let Some(existing) = guild.emojis.get_mut(&id) {
                let before = existing.clone();
                existing.patch(payload);
                if !existing.same_state(&before) {
                    changes.updated.push((before, existing.clone()));
                }
            } else if let Ok(emoji) = GuildEmoji::new(guild.id, payload) {
                changes.created.push(emoji.clone());
                guild.emojis.insert(id, emoji);
            }
        }

        let gone: Vec<Snowflake> = guild
            .emojis
            .keys()
            .filter(|id| !present.contains(id))
            .copied()
            .collect();
        for id in gone {
            if let Some(emoji) = guild.emojis.remove(&id) {
                changes.deleted.push(emoji);
            }
        }

        debug!(
            guild_id = %guild.id,
            created = changes.created.len(),
            updated = changes.updated.len(),
            deleted = changes.deleted.len(),
            "Emojis updated"
        );

        CacheUpdate::Emojis(changes)
    }

    fn upsert_role(&self, guild_id: Snowflake, role: &Role) -> CacheUpdate {
        match self.with_guild_mut(guild_id, |g| g.roles.insert(role.id, role.clone())) {
            Some(_) => CacheUpdate::RoleUpserted {
                guild_id,
                role_id: role.id,
            },
            None => CacheUpdate::Ignored,
        }
    }

    fn delete_role(&self, guild_id: Snowflake, role_id: Snowflake) -> CacheUpdate {
        let removed = self.with_guild_mut(guild_id, |g| {
            for member in g.members.values_mut() {
                member.roles.retain(|id| *id != role_id);
            }
            g.roles.remove(&role_id).is_some()
        });

        match removed {
            Some(true) => CacheUpdate::RoleDeleted { guild_id, role_id },
            _ => CacheUpdate::Ignored,
        }
    }

    fn apply_member_update(&self, update: &GuildMemberUpdate) -> CacheUpdate {
        let user_id = update.user.id;
        let applied = self.with_guild_mut(update.guild_id, |g| {
            let member = g
                .members
                .entry(user_id)
                .or_insert_with(|| GuildMember::new(update.user.clone()));
            member.user = Some(update.user.clone());
            member.roles.clone_from(&update.roles);
            member.nick.clone_from(&update.nick);
        });

        match applied {
            Some(()) => CacheUpdate::MemberUpdated {
                guild_id: update.guild_id,
                user_id,
            },
            None => CacheUpdate::Ignored,
        }
    }
}
