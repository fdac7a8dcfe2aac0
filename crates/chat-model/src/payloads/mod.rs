//! Raw payloads - partial entity representations as received from the API
//!
//! Every field is optional so the same type covers full objects, partial
//! updates, and gateway dispatches.

mod emoji;
mod guild;

pub use emoji::EmojiPayload;
pub use guild::{GuildPayload, UnavailableGuild};
