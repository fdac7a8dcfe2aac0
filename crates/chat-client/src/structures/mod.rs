//! Cached structures built from API payloads

mod guild_emoji;

pub use guild_emoji::GuildEmoji;
