//! Client handle

use chat_common::{ClientConfig, ClientResult};
use chat_http::{HttpTransport, RestClient, RestTransport};
use chat_model::{GatewayEvent, Snowflake};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use crate::cache::{Cache, CacheUpdate};
use crate::managers::GuildEmojiManager;

/// Cheaply cloneable handle to a client session
///
/// Owns the REST client and the entity cache. Entities never hold a `Client`;
/// they are passed one when an operation needs it.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: ClientConfig,
    rest: RestClient,
    cache: Cache,
}

impl Client {
    /// Create a client talking to the configured API over HTTP
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client from `CHAT_*` environment variables
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Create a client over a custom transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn RestTransport>) -> Self {
        info!(api = %config.api_url(), "Client created");
        Self {
            inner: Arc::new(ClientInner {
                config,
                rest: RestClient::new(transport),
                cache: Cache::new(),
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn rest(&self) -> &RestClient {
        &self.inner.rest
    }

    pub fn cache(&self) -> &Cache {
        &self.inner.cache
    }

    /// Emoji manager for a guild
    pub fn guild_emojis(&self, guild_id: Snowflake) -> GuildEmojiManager<'_> {
        GuildEmojiManager::new(self, guild_id)
    }

    /// Feed a gateway dispatch (`t` and `d` fields) into the cache
    pub fn handle_dispatch(&self, name: &str, data: Value) -> ClientResult<CacheUpdate> {
        match GatewayEvent::from_dispatch(name, data)? {
            Some(event) => Ok(self.cache().apply(&event)),
            None => {
                debug!(event = name, "Dispatch ignored");
                Ok(CacheUpdate::Ignored)
            }
        }
    }
}
