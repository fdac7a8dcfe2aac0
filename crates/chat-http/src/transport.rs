//! Request transport
//!
//! [`RestTransport`] is the port every REST call goes through. The production
//! implementation is [`HttpTransport`]; tests substitute their own.

use async_trait::async_trait;
use chat_common::{ClientConfig, HttpError};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::routing::ApiRequest;

const AUDIT_LOG_REASON: &str = "X-Audit-Log-Reason";

/// Sends a request and returns the decoded JSON body
///
/// `Ok(None)` means the call succeeded without a body (204 No Content).
#[async_trait]
pub trait RestTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Option<Value>, HttpError>;
}

/// `reqwest`-backed transport
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    api_url: String,
}

/// Error body returned by the API on non-success statuses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<u32>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RateLimitBody {
    retry_after: f64,
    #[serde(default)]
    global: bool,
}

impl HttpTransport {
    /// Build a transport from client configuration
    pub fn new(config: &ClientConfig) -> Result<Self, HttpError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bot {}", config.token))
            .map_err(|_| HttpError::Transport("token contains invalid header characters".into()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|_| HttpError::Transport("invalid user agent".into()))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| HttpError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_url: config.api_url(),
        })
    }

    fn url(&self, request: &ApiRequest) -> String {
        format!("{}{}", self.api_url, request.route.path())
    }

    async fn into_result(response: Response) -> Result<Option<Value>, HttpError> {
        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?;

        if status.is_success() {
            if bytes.is_empty() {
                return Ok(None);
            }
            return serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| HttpError::Decode(e.to_string()));
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let body: RateLimitBody =
                serde_json::from_slice(&bytes).unwrap_or(RateLimitBody {
                    retry_after: 0.0,
                    global: false,
                });
            warn!(retry_after = body.retry_after, global = body.global, "Rate limited");
            return Err(HttpError::RateLimited {
                retry_after: body.retry_after,
                global: body.global,
            });
        }

        let body: Option<ApiErrorBody> = serde_json::from_slice(&bytes).ok();
        let (code, message) = match body {
            Some(b) => (
                b.code,
                b.message
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string()),
            ),
            None => (None, String::from_utf8_lossy(&bytes).into_owned()),
        };

        Err(HttpError::Status {
            status: status.as_u16(),
            code,
            message,
        })
    }
}

#[async_trait]
impl RestTransport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, route = %request.route))]
    async fn send(&self, request: ApiRequest) -> Result<Option<Value>, HttpError> {
        let mut builder = self
            .client
            .request(request.method.clone(), self.url(&request));

        if let Some(reason) = request.reason.as_deref() {
            builder = builder.header(AUDIT_LOG_REASON, urlencoding::encode(reason).into_owned());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?;

        debug!(status = response.status().as_u16(), "Response received");

        Self::into_result(response).await
    }
}
