//! # chat-client
//!
//! Client session for the chat platform: a [`Client`] handle owning the REST
//! client and the entity [`Cache`], the [`GuildEmoji`] structure, and the
//! managers that perform network operations on its behalf.
//!
//! Structures hold no reference back to the client. Operations that need the
//! network or the cache take the [`Client`] explicitly and resolve the parent
//! guild through its id.

pub mod cache;
pub mod client;
pub mod managers;
pub mod structures;

#[cfg(test)]
mod test_support;

// Re-export commonly used types at crate root
pub use cache::{Cache, CacheUpdate, CachedGuild, EmojiChanges};
pub use client::Client;
pub use managers::{GuildEmojiManager, GuildEmojiRoleManager};
pub use structures::GuildEmoji;

pub use chat_common::{ClientConfig, ClientError, ClientResult, HttpError};
pub use chat_http::{CreateEmoji, EditEmoji, RestTransport};
pub use chat_model::{EmojiPayload, Permissions, Snowflake};
