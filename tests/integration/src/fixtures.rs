//! Test fixtures and dispatch payloads
//!
//! Provides reusable gateway payloads for seeding the client cache.

use serde_json::{json, Value};

pub const STUB_TOKEN: &str = "stub-token";

pub const GUILD_ID: u64 = 4_000;
pub const SELF_ID: u64 = 40;
pub const OWNER_ID: u64 = 41;
pub const CURATOR_ROLE_ID: u64 = 4_100;
pub const EMOJI_ID: u64 = 4_200;
pub const MANAGED_EMOJI_ID: u64 = 4_201;

/// `READY` dispatch for the current user
pub fn ready() -> Value {
    json!({
        "user": {"id": SELF_ID.to_string(), "username": "emoji_bot", "bot": true},
        "guilds": [{"id": GUILD_ID.to_string(), "unavailable": true}],
        "session_id": "integration"
    })
}

/// `GUILD_CREATE` dispatch; the current user holds the curator role when
/// `curator` is set
pub fn guild_create(curator: bool) -> Value {
    let self_roles: Vec<String> = if curator {
        vec![CURATOR_ROLE_ID.to_string()]
    } else {
        Vec::new()
    };

    json!({
        "id": GUILD_ID.to_string(),
        "name": "Integration Guild",
        "owner_id": OWNER_ID.to_string(),
        "roles": [
            {"id": GUILD_ID.to_string(), "name": "@everyone", "permissions": "1024"},
            {"id": CURATOR_ROLE_ID.to_string(), "name": "curator", "permissions": "1073741824"}
        ],
        "emojis": [
            server_emoji(EMOJI_ID, "wave", false, false),
            server_emoji(MANAGED_EMOJI_ID, "sub_hype", true, false)
        ],
        "members": [
            {"user": {"id": SELF_ID.to_string(), "username": "emoji_bot"}, "roles": self_roles},
            {"user": {"id": OWNER_ID.to_string(), "username": "owner"}, "roles": []}
        ]
    })
}

/// Emoji object as the API returns it, optionally with its creator
pub fn server_emoji(id: u64, name: &str, managed: bool, with_user: bool) -> Value {
    let mut emoji = json!({
        "id": id.to_string(),
        "name": name,
        "roles": [],
        "require_colons": true,
        "managed": managed,
        "animated": false,
        "available": true
    });
    if with_user {
        emoji["user"] = json!({"id": OWNER_ID.to_string(), "username": "owner"});
    }
    emoji
}
