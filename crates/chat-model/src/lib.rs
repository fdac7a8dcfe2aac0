//! # chat-model
//!
//! Wire model of the chat platform: identifiers, permission bits, entity
//! payloads, and the gateway dispatches the client cache consumes.
//! This crate performs no I/O.

pub mod entities;
pub mod error;
pub mod events;
pub mod payloads;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{emoji_url, GuildMember, PartialEmoji, Role, User};
pub use error::ModelError;
pub use events::{GatewayEvent, GatewayEventType};
pub use payloads::{EmojiPayload, GuildPayload, UnavailableGuild};
pub use value_objects::{Permissions, Snowflake, SnowflakeParseError};
