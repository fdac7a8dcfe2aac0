//! Resource managers
//!
//! Managers borrow the [`Client`](crate::Client) for the duration of a call
//! and own no state of their own.

mod guild_emoji_manager;
mod guild_emoji_role_manager;

pub use guild_emoji_manager::GuildEmojiManager;
pub use guild_emoji_role_manager::GuildEmojiRoleManager;
