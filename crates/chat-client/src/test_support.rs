//! Shared fixtures for unit tests

use async_trait::async_trait;
use chat_common::{ClientConfig, HttpError};
use chat_http::{ApiRequest, RestTransport};
use chat_model::events::Ready;
use chat_model::{
    EmojiPayload, GatewayEvent, GuildMember, GuildPayload, Permissions, Role, Snowflake, User,
};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::client::Client;

pub const GUILD_ID: u64 = 100;
pub const SELF_ID: u64 = 10;
pub const OWNER_ID: u64 = 11;
pub const CURATOR_ROLE_ID: u64 = 300;
pub const GRANTED_ROLE_ID: u64 = 301;
pub const EMOJI_ID: u64 = 200;
pub const MANAGED_EMOJI_ID: u64 = 201;

type Scripted = Result<Option<Value>, HttpError>;

/// Transport replaying scripted responses in order
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue the result of the next request
    pub fn respond(&self, response: Scripted) {
        self.responses.lock().push_back(response);
    }

    /// Requests seen so far
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl RestTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<Option<Value>, HttpError> {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(HttpError::Transport("no scripted response".into())))
    }
}

pub fn self_user() -> User {
    let mut user = User::new(Snowflake::new(SELF_ID), "emoji_bot");
    user.bot = true;
    user
}

pub fn ready_event() -> GatewayEvent {
    GatewayEvent::Ready(Box::new(Ready {
        user: self_user(),
        guilds: Vec::new(),
        session_id: "session".into(),
    }))
}

/// Guild owned by someone else; the current user is a plain member
pub fn guild_payload() -> GuildPayload {
    let guild_id = Snowflake::new(GUILD_ID);

    let managed = EmojiPayload {
        managed: Some(true),
        ..EmojiPayload::new(Snowflake::new(MANAGED_EMOJI_ID), "sub_hype")
    }
    .with_roles([Snowflake::new(CURATOR_ROLE_ID)]);

    GuildPayload {
        id: guild_id,
        name: "Emoji Lab".into(),
        owner_id: Snowflake::new(OWNER_ID),
        roles: vec![
            Role::new(guild_id, "@everyone", Permissions::VIEW_CHANNEL),
            Role::new(
                Snowflake::new(CURATOR_ROLE_ID),
                "curator",
                Permissions::MANAGE_GUILD_EXPRESSIONS,
            ),
        ],
        emojis: vec![
            EmojiPayload::new(Snowflake::new(EMOJI_ID), "wave")
                .with_roles([Snowflake::new(CURATOR_ROLE_ID)]),
            managed,
        ],
        members: vec![
            GuildMember::new(self_user()),
            GuildMember::new(User::new(Snowflake::new(OWNER_ID), "owner")),
        ],
    }
}

/// Client whose cache holds [`guild_payload`] with the current user granted
/// `permissions` through an extra role
pub fn cached_client(permissions: Permissions) -> (Client, Arc<MockTransport>) {
    let transport = MockTransport::new();
    let client = Client::with_transport(ClientConfig::new("test-token"), transport.clone());

    let mut guild = guild_payload();
    guild.roles.push(Role::new(
        Snowflake::new(GRANTED_ROLE_ID),
        "granted",
        permissions,
    ));
    if let Some(member) = guild
        .members
        .iter_mut()
        .find(|m| m.user_id() == Some(Snowflake::new(SELF_ID)))
    {
        member.roles.push(Snowflake::new(GRANTED_ROLE_ID));
    }

    client.cache().apply(&ready_event());
    client.cache().apply(&GatewayEvent::GuildCreate(Box::new(guild)));

    (client, transport)
}
