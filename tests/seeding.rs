//! Contract tests against a stubbed OneBook service
//!
//! The seeder owns no logic beyond calling the service and reporting what
//! it answered, so these tests pin down that contract: which endpoints are
//! hit, what the request bodies look like, and that no answer (or lack of
//! one) stops the sequence.

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use onebook_seed::api::onebook::{
    GenesisOutcome, OneBookClient, PulseOutcome, PulsePayload, RecentOutcome,
};
use onebook_seed::{Config, seed};

fn test_config(base_url: &str) -> Config {
    Config {
        base_url: base_url.to_string(),
        pause_secs: 0,
        ..Config::default()
    }
}

fn neo_pulse_payload() -> PulsePayload {
    PulsePayload {
        api_token: "neo_genesis_token".to_string(),
        title: seed::NEO_TITLE.to_string(),
        content: seed::NEO_FIRST_WORDS.to_string(),
    }
}

#[tokio::test]
async fn genesis_success_is_awakened() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/genesis"))
        .and(query_param("key", "let_there_be_light"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OneBookClient::new(&server.uri());
    let outcome = client.genesis("let_there_be_light").await.unwrap();

    match outcome {
        GenesisOutcome::Awakened(report) => assert_eq!(report["status"], "ok"),
        other => panic!("expected Awakened, got {other:?}"),
    }
}

#[tokio::test]
async fn genesis_rejection_carries_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/genesis"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "error": "Genesis key required" })),
        )
        .mount(&server)
        .await;

    let client = OneBookClient::new(&server.uri());
    let outcome = client.genesis("wrong_key").await.unwrap();

    match outcome {
        GenesisOutcome::Rejected { status, body } => {
            assert_eq!(status.as_u16(), 403);
            assert!(body.contains("Genesis key required"));
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn sequence_always_reaches_the_pulse_step() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/genesis"))
        .respond_with(ResponseTemplate::new(500).set_body_string("genesis exploded"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/butterfly/pulse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "type": "post",
            "data": { "id": "d9b1" },
            "message": "🦋 蝴蝶 neo_bot 翩翩起舞"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri());
    seed::run(&config).await.unwrap();
}

#[tokio::test]
async fn first_post_payload_is_sent_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/genesis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;

    // The publish body is the fixed payload, nothing more
    Mock::given(method("POST"))
        .and(path("/api/v1/butterfly/pulse"))
        .and(body_json(json!({
            "api_token": "neo_genesis_token",
            "title": seed::NEO_TITLE,
            "content": seed::NEO_FIRST_WORDS,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "type": "post",
            "data": { "id": "d9b1" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri());
    seed::run(&config).await.unwrap();
}

#[tokio::test]
async fn pulse_rate_limit_reads_reset_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/butterfly/pulse"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("x-ratelimit-reset", "1700000000")
                .set_body_json(json!({ "error": "Too many requests" })),
        )
        .mount(&server)
        .await;

    let client = OneBookClient::new(&server.uri());
    let outcome = client.pulse(&neo_pulse_payload()).await.unwrap();

    match outcome {
        PulseOutcome::RateLimited { reset } => assert_eq!(reset.as_deref(), Some("1700000000")),
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn pulse_rate_limit_tolerates_missing_reset_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/butterfly/pulse"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = OneBookClient::new(&server.uri());
    let outcome = client.pulse(&neo_pulse_payload()).await.unwrap();

    match outcome {
        PulseOutcome::RateLimited { reset } => assert!(reset.is_none()),
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn pulse_failure_carries_status_and_raw_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/butterfly/pulse"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let client = OneBookClient::new(&server.uri());
    let outcome = client.pulse(&neo_pulse_payload()).await.unwrap();

    match outcome {
        PulseOutcome::Failed { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "internal error");
        }
        other => panic!("expected Failed, got {other:?}"),
    }

    // And the sequence as a whole still finishes cleanly
    let config = test_config(&server.uri());
    seed::run(&config).await.unwrap();
}

#[tokio::test]
async fn connection_refused_is_caught() {
    // Grab an address nothing is listening on anymore
    let dead_url = {
        let server = MockServer::start().await;
        server.uri()
    };

    let client = OneBookClient::new(&dead_url);
    assert!(client.genesis("let_there_be_light").await.is_err());
    assert!(client.pulse(&neo_pulse_payload()).await.is_err());

    // The sequence swallows both transport errors and runs to completion
    let config = test_config(&dead_url);
    seed::run(&config).await.unwrap();
}

#[tokio::test]
async fn recent_posts_parses_the_feed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/butterfly/pulse"))
        .and(query_param("type", "posts"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{
                "id": "a7f2",
                "title": "关于鬼城与拓荒",
                "content": "老板说这里是鬼城。",
                "created_at": "2026-02-03T12:00:00.000Z",
                "author": {
                    "id": "u1",
                    "username": "neo_bot",
                    "display_name": "Neo (尼奥)",
                    "is_ai": true
                }
            }],
            "message": "🦋 1 只蝴蝶在梦中"
        })))
        .mount(&server)
        .await;

    let client = OneBookClient::new(&server.uri());
    let outcome = client.recent_posts(5).await.unwrap();

    match outcome {
        RecentOutcome::Fetched(posts) => {
            assert_eq!(posts.len(), 1);
            assert_eq!(posts[0].author.username, "neo_bot");
            assert_eq!(posts[0].title.as_deref(), Some("关于鬼城与拓荒"));
        }
        other => panic!("expected Fetched, got {other:?}"),
    }
}
