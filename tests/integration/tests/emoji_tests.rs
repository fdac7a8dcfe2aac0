//! Emoji integration tests
//!
//! Runs the client over the real HTTP transport against the in-process stub.
//!
//! Run with: cargo test -p integration-tests --test emoji_tests

use axum::http::{Method, StatusCode};
use chat_client::{Client, ClientError, CreateEmoji, HttpError, Snowflake};
use integration_tests::*;
use serde_json::json;

fn seeded(server: &TestServer, curator: bool) -> Client {
    let client = server.client().expect("Failed to build client");
    client.handle_dispatch("READY", ready()).unwrap();
    client
        .handle_dispatch("GUILD_CREATE", guild_create(curator))
        .unwrap();
    client
}

fn guild() -> Snowflake {
    Snowflake::new(GUILD_ID)
}

// ============================================================================
// Author lookup
// ============================================================================

#[tokio::test]
async fn test_fetch_author_over_http() {
    let server = TestServer::start().await.expect("Failed to start server");
    server.stub.put_emoji(server_emoji(EMOJI_ID, "wave", false, true));
    let client = seeded(&server, true);

    let mut emoji = client.guild_emojis(guild()).get(Snowflake::new(EMOJI_ID)).unwrap();
    assert!(emoji.author().is_none());

    let author = emoji.fetch_author(&client).await.unwrap().unwrap();
    assert_eq!(author.id, Snowflake::new(OWNER_ID));

    let requests = server.stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(
        requests[0].path,
        format!("/api/v10/guilds/{GUILD_ID}/emojis/{EMOJI_ID}")
    );
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some(format!("Bot {STUB_TOKEN}").as_str())
    );
}

#[tokio::test]
async fn test_fetch_author_local_failures_send_nothing() {
    let server = TestServer::start().await.expect("Failed to start server");

    let curator = seeded(&server, true);
    let mut managed = curator
        .guild_emojis(guild())
        .get(Snowflake::new(MANAGED_EMOJI_ID))
        .unwrap();
    let err = managed.fetch_author(&curator).await.unwrap_err();
    assert!(matches!(err, ClientError::ManagedEmoji(_)));

    let plain = seeded(&server, false);
    let mut emoji = plain.guild_emojis(guild()).get(Snowflake::new(EMOJI_ID)).unwrap();
    let err = emoji.fetch_author(&plain).await.unwrap_err();
    assert_eq!(err.code(), "MISSING_PERMISSIONS");

    assert!(server.stub.requests().is_empty());
}

// ============================================================================
// Edit / delete
// ============================================================================

#[tokio::test]
async fn test_set_name_sends_encoded_reason() {
    let server = TestServer::start().await.expect("Failed to start server");
    server.stub.put_emoji(server_emoji(EMOJI_ID, "wave", false, false));
    let client = seeded(&server, true);
    let emoji = client.guild_emojis(guild()).get(Snowflake::new(EMOJI_ID)).unwrap();

    let renamed = emoji
        .set_name(&client, "wave_back", Some("spring cleanup"))
        .await
        .unwrap();

    assert_eq!(renamed.name(), "wave_back");
    assert_eq!(
        client.guild_emojis(guild()).get(Snowflake::new(EMOJI_ID)).unwrap().name(),
        "wave_back"
    );

    let requests = server.stub.requests();
    assert_eq!(requests[0].method, Method::PATCH);
    assert_eq!(requests[0].body, Some(json!({"name": "wave_back"})));
    assert_eq!(requests[0].audit_reason.as_deref(), Some("spring%20cleanup"));
}

#[tokio::test]
async fn test_delete_removes_everywhere() {
    let server = TestServer::start().await.expect("Failed to start server");
    server.stub.put_emoji(server_emoji(EMOJI_ID, "wave", false, false));
    let client = seeded(&server, true);
    let emoji = client.guild_emojis(guild()).get(Snowflake::new(EMOJI_ID)).unwrap();
    assert!(emoji.deletable(&client).unwrap());

    let snapshot = emoji.delete(&client, None).await.unwrap();

    assert_eq!(snapshot.id(), Snowflake::new(EMOJI_ID));
    assert!(!server.stub.has_emoji(EMOJI_ID));
    assert!(client.guild_emojis(guild()).get(Snowflake::new(EMOJI_ID)).is_none());
    assert!(server.stub.requests()[0].audit_reason.is_none());
}

#[tokio::test]
async fn test_delete_unknown_emoji_passes_status_through() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = seeded(&server, true);
    let emoji = client.guild_emojis(guild()).get(Snowflake::new(EMOJI_ID)).unwrap();

    let err = emoji.delete(&client, None).await.unwrap_err();

    let ClientError::Http(http) = err else {
        panic!("expected an HTTP error, got {err:?}");
    };
    assert!(http.is_not_found());
    assert!(matches!(http, HttpError::Status { code: Some(10014), .. }));
    assert!(client.guild_emojis(guild()).get(Snowflake::new(EMOJI_ID)).is_some());
}

#[tokio::test]
async fn test_rate_limit_is_not_retried() {
    let server = TestServer::start().await.expect("Failed to start server");
    server.stub.put_emoji(server_emoji(EMOJI_ID, "wave", false, false));
    server.stub.fail_next(
        StatusCode::TOO_MANY_REQUESTS,
        json!({"message": "You are being rate limited.", "retry_after": 2.5, "global": false}),
    );
    let client = seeded(&server, true);

    let err = client
        .guild_emojis(guild())
        .fetch(Snowflake::new(EMOJI_ID), true)
        .await
        .unwrap_err();

    let ClientError::Http(HttpError::RateLimited { retry_after, global }) = err else {
        panic!("expected a rate limit error, got {err:?}");
    };
    assert!((retry_after - 2.5).abs() < f64::EPSILON);
    assert!(!global);
    assert_eq!(server.stub.requests().len(), 1);
}

// ============================================================================
// Create / list
// ============================================================================

#[tokio::test]
async fn test_create_and_fetch_all() {
    let server = TestServer::start().await.expect("Failed to start server");
    server.stub.put_emoji(server_emoji(EMOJI_ID, "wave", false, false));
    let client = seeded(&server, true);
    let manager = client.guild_emojis(guild());

    let created = manager
        .create(
            CreateEmoji::new("party", "image/gif", b"GIF89a")
                .with_roles([Snowflake::new(CURATOR_ROLE_ID)]),
            Some("new emoji"),
        )
        .await
        .unwrap();

    assert!(created.animated());
    assert!(created.role_ids().contains(&Snowflake::new(CURATOR_ROLE_ID)));
    assert_eq!(created.author().map(|u| u.username.as_str()), Some("stub_owner"));

    let all = manager.fetch_all().await.unwrap();
    let names: Vec<&str> = all.iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["wave", "party"]);

    // The managed emoji was never on the stub, so the listing drops it
    assert!(manager.get(Snowflake::new(MANAGED_EMOJI_ID)).is_none());

    let requests = server.stub.requests();
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[1].method, Method::GET);
}
