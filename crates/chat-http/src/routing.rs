//! Routes and request descriptions

use chat_model::Snowflake;
use reqwest::Method;
use serde_json::Value;
use std::fmt;

/// REST resources the client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/guilds/{guild_id}/emojis`
    GuildEmojis { guild_id: Snowflake },
    /// `/guilds/{guild_id}/emojis/{emoji_id}`
    GuildEmoji {
        guild_id: Snowflake,
        emoji_id: Snowflake,
    },
}

impl Route {
    /// Path relative to the versioned API root
    pub fn path(&self) -> String {
        match self {
            Self::GuildEmojis { guild_id } => format!("/guilds/{guild_id}/emojis"),
            Self::GuildEmoji { guild_id, emoji_id } => {
                format!("/guilds/{guild_id}/emojis/{emoji_id}")
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// A single REST call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub route: Route,
    pub body: Option<Value>,
    /// Audit log reason, sent as `X-Audit-Log-Reason`
    pub reason: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, route: Route) -> Self {
        Self {
            method,
            route,
            body: None,
            reason: None,
        }
    }

    pub fn get(route: Route) -> Self {
        Self::new(Method::GET, route)
    }

    pub fn post(route: Route) -> Self {
        Self::new(Method::POST, route)
    }

    pub fn patch(route: Route) -> Self {
        Self::new(Method::PATCH, route)
    }

    pub fn delete(route: Route) -> Self {
        Self::new(Method::DELETE, route)
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_reason(mut self, reason: Option<&str>) -> Self {
        self.reason = reason.map(str::to_owned);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_route_paths() {
        let guild_id = Snowflake::new(10);
        assert_eq!(Route::GuildEmojis { guild_id }.path(), "/guilds/10/emojis");
        assert_eq!(
            Route::GuildEmoji {
                guild_id,
                emoji_id: Snowflake::new(20)
            }
            .to_string(),
            "/guilds/10/emojis/20"
        );
    }

    #[test]
    fn test_request_builder() {
        let route = Route::GuildEmojis {
            guild_id: Snowflake::new(1),
        };
        let request = ApiRequest::post(route)
            .with_body(json!({"name": "x"}))
            .with_reason(Some("cleanup"));

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.reason.as_deref(), Some("cleanup"));
        assert_eq!(request.body, Some(json!({"name": "x"})));
    }
}
