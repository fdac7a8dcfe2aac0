//! Typed REST endpoints
//!
//! Thin wrappers that build an [`ApiRequest`], hand it to the transport, and
//! decode the response. No caching and no permission checks happen here.

use chat_common::HttpError;
use chat_model::{EmojiPayload, Snowflake};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::requests::{CreateEmoji, EditEmoji};
use crate::routing::{ApiRequest, Route};
use crate::transport::RestTransport;

/// REST client over any [`RestTransport`]
#[derive(Clone)]
pub struct RestClient {
    transport: Arc<dyn RestTransport>,
}

impl RestClient {
    pub fn new(transport: Arc<dyn RestTransport>) -> Self {
        Self { transport }
    }

    /// Get the underlying transport
    pub fn transport(&self) -> &Arc<dyn RestTransport> {
        &self.transport
    }

    /// `GET /guilds/{guild_id}/emojis/{emoji_id}`
    pub async fn get_guild_emoji(
        &self,
        guild_id: Snowflake,
        emoji_id: Snowflake,
    ) -> Result<EmojiPayload, HttpError> {
        let request = ApiRequest::get(Route::GuildEmoji { guild_id, emoji_id });
        self.fire(request).await
    }

    /// `GET /guilds/{guild_id}/emojis`
    pub async fn get_guild_emojis(
        &self,
        guild_id: Snowflake,
    ) -> Result<Vec<EmojiPayload>, HttpError> {
        let request = ApiRequest::get(Route::GuildEmojis { guild_id });
        self.fire(request).await
    }

    /// `POST /guilds/{guild_id}/emojis`
    pub async fn create_guild_emoji(
        &self,
        guild_id: Snowflake,
        data: &CreateEmoji,
        reason: Option<&str>,
    ) -> Result<EmojiPayload, HttpError> {
        let request = ApiRequest::post(Route::GuildEmojis { guild_id })
            .with_body(to_body(data)?)
            .with_reason(reason);
        self.fire(request).await
    }

    /// `PATCH /guilds/{guild_id}/emojis/{emoji_id}`
    pub async fn edit_guild_emoji(
        &self,
        guild_id: Snowflake,
        emoji_id: Snowflake,
        data: &EditEmoji,
        reason: Option<&str>,
    ) -> Result<EmojiPayload, HttpError> {
        let request = ApiRequest::patch(Route::GuildEmoji { guild_id, emoji_id })
            .with_body(to_body(data)?)
            .with_reason(reason);
        self.fire(request).await
    }

    /// `DELETE /guilds/{guild_id}/emojis/{emoji_id}`
    pub async fn delete_guild_emoji(
        &self,
        guild_id: Snowflake,
        emoji_id: Snowflake,
        reason: Option<&str>,
    ) -> Result<(), HttpError> {
        let request =
            ApiRequest::delete(Route::GuildEmoji { guild_id, emoji_id }).with_reason(reason);
        self.transport.send(request).await.map(|_| ())
    }

    async fn fire<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, HttpError> {
        let body = self
            .transport
            .send(request)
            .await?
            .ok_or_else(|| HttpError::Decode("expected a response body".into()))?;

        serde_json::from_value(body).map_err(|e| HttpError::Decode(e.to_string()))
    }
}

fn to_body<T: Serialize>(data: &T) -> Result<Value, HttpError> {
    serde_json::to_value(data).map_err(|e| HttpError::Decode(e.to_string()))
}
