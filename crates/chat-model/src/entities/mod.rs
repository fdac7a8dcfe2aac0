//! Entities as the API describes them

mod emoji;
mod member;
mod role;
mod user;

pub use emoji::{emoji_url, PartialEmoji};
pub use member::GuildMember;
pub use role::Role;
pub use user::User;
