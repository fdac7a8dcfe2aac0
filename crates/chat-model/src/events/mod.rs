//! Gateway dispatch events consumed by the entity cache

mod dispatch;
mod event_types;

pub use dispatch::{
    GatewayEvent, GuildEmojisUpdate, GuildMemberUpdate, GuildRoleDelete, GuildRoleUpsert, Ready,
};
pub use event_types::GatewayEventType;
