//! Test helpers for integration tests
//!
//! Provides an in-process stub of the emoji endpoints and a client wired to
//! it through the real HTTP transport.

use std::collections::{BTreeMap, VecDeque};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chat_client::{Client, ClientConfig};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::STUB_TOKEN;

/// A request as the stub saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub audit_reason: Option<String>,
    pub body: Option<Value>,
}

/// In-memory emoji store behind the stub routes
#[derive(Default)]
pub struct StubApi {
    emojis: Mutex<BTreeMap<u64, Value>>,
    requests: Mutex<Vec<RecordedRequest>>,
    failures: Mutex<VecDeque<(StatusCode, Value)>>,
    next_id: AtomicU64,
}

impl StubApi {
    /// Store an emoji as the server knows it
    pub fn put_emoji(&self, emoji: Value) {
        let id = emoji["id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();
        self.emojis.lock().insert(id, emoji);
    }

    pub fn has_emoji(&self, id: u64) -> bool {
        self.emojis.lock().contains_key(&id)
    }

    /// Answer the next request with an error status and body
    pub fn fail_next(&self, status: StatusCode, body: Value) {
        self.failures.lock().push_back((status, body));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Record the request and hand back an injected failure, if any
    fn record(
        &self,
        method: Method,
        uri: &Uri,
        headers: &HeaderMap,
        body: Option<Value>,
    ) -> Option<Response> {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        };

        self.requests.lock().push(RecordedRequest {
            method,
            path: uri.path().to_owned(),
            authorization: header("authorization"),
            audit_reason: header("x-audit-log-reason"),
            body,
        });

        self.failures.lock()
            .pop_front()
            .map(|(status, body)| (status, Json(body)).into_response())
    }
}

fn unknown_emoji() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"code": 10014, "message": "Unknown Emoji"})),
    )
        .into_response()
}

async fn list_emojis(
    State(stub): State<Arc<StubApi>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    if let Some(failure) = stub.record(method, &uri, &headers, None) {
        return failure;
    }
    let emojis: Vec<Value> = stub.emojis.lock().values().cloned().collect();
    Json(emojis).into_response()
}

async fn create_emoji(
    State(stub): State<Arc<StubApi>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(failure) = stub.record(method, &uri, &headers, Some(body.clone())) {
        return failure;
    }

    let id = 9_000 + stub.next_id.fetch_add(1, Ordering::SeqCst);
    let animated = body["image"]
        .as_str()
        .is_some_and(|image| image.starts_with("data:image/gif"));
    let emoji = json!({
        "id": id.to_string(),
        "name": body["name"],
        "roles": body.get("roles").cloned().unwrap_or_else(|| json!([])),
        "user": {"id": "1", "username": "stub_owner"},
        "require_colons": true,
        "managed": false,
        "animated": animated,
        "available": true
    });
    stub.emojis.lock().insert(id, emoji.clone());

    (StatusCode::CREATED, Json(emoji)).into_response()
}

async fn get_emoji(
    State(stub): State<Arc<StubApi>>,
    Path((_guild_id, emoji_id)): Path<(u64, u64)>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    if let Some(failure) = stub.record(method, &uri, &headers, None) {
        return failure;
    }
    match stub.emojis.lock().get(&emoji_id) {
        Some(emoji) => Json(emoji.clone()).into_response(),
        None => unknown_emoji(),
    }
}

async fn modify_emoji(
    State(stub): State<Arc<StubApi>>,
    Path((_guild_id, emoji_id)): Path<(u64, u64)>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(failure) = stub.record(method, &uri, &headers, Some(body.clone())) {
        return failure;
    }

    let mut emojis = stub.emojis.lock();
    let Some(emoji) = emojis.get_mut(&emoji_id) else {
        return unknown_emoji();
    };
    for key in ["name", "roles"] {
        if let Some(value) = body.get(key) {
            emoji[key] = value.clone();
        }
    }

    Json(emoji.clone()).into_response()
}

async fn delete_emoji(
    State(stub): State<Arc<StubApi>>,
    Path((_guild_id, emoji_id)): Path<(u64, u64)>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    if let Some(failure) = stub.record(method, &uri, &headers, None) {
        return failure;
    }
    match stub.emojis.lock().remove(&emoji_id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => unknown_emoji(),
    }
}

fn stub_router(stub: Arc<StubApi>) -> Router {
    Router::new()
        .route(
            "/api/v10/guilds/:guild_id/emojis",
            get(list_emojis).post(create_emoji),
        )
        .route(
            "/api/v10/guilds/:guild_id/emojis/:emoji_id",
            get(get_emoji).patch(modify_emoji).delete(delete_emoji),
        )
        .with_state(stub)
}

/// Stub server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub stub: Arc<StubApi>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a stub server on an ephemeral port
    pub async fn start() -> Result<Self> {
        chat_common::try_init_tracing().ok();

        let stub = Arc::new(StubApi::default());
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let app = stub_router(stub.clone());
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            stub,
            _handle: handle,
        })
    }

    /// Get base URL for the stub API
    pub fn api_base(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Build a client that talks to this server over HTTP
    pub fn client(&self) -> Result<Client> {
        let config = ClientConfig::new(STUB_TOKEN).with_api_base(self.api_base());
        Ok(Client::new(config)?)
    }
}
