mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use link_gate::api::handlers::shorten_handler;
use link_gate::domain::repositories::ShortLinkRepository;
use serde_json::json;

fn server(state: link_gate::AppState) -> TestServer {
    let app = Router::new()
        .route("/shorten", post(shorten_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_shorten_success() {
    let ctx = common::create_test_state();
    let server = server(ctx.state.clone());

    let response = server
        .post("/shorten")
        .json(&json!({ "originalUrl": "https://example.com/some/long/path" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let short_id = json["shortId"].as_str().unwrap();
    assert_eq!(short_id.len(), 6);
    assert_eq!(
        json["shortUrl"],
        format!("{}/{}", common::BASE_URL, short_id)
    );

    let stored = ctx
        .repository
        .find_by_short_id(short_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.original_url, "https://example.com/some/long/path");
    assert_eq!(stored.clicks, 0);
}

#[tokio::test]
async fn test_shorten_same_url_twice_gives_distinct_ids() {
    let ctx = common::create_test_state();
    let server = server(ctx.state.clone());

    let first = server
        .post("/shorten")
        .json(&json!({ "originalUrl": "https://dup.example.com" }))
        .await
        .json::<serde_json::Value>();
    let second = server
        .post("/shorten")
        .json(&json!({ "originalUrl": "https://dup.example.com" }))
        .await
        .json::<serde_json::Value>();

    assert_ne!(first["shortId"], second["shortId"]);
    assert_eq!(ctx.repository.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_shorten_relative_url_rejected() {
    let ctx = common::create_test_state();
    let server = server(ctx.state.clone());

    let response = server
        .post("/shorten")
        .json(&json!({ "originalUrl": "/just/a/path" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["code"], "invalid_input");
    assert!(json["error"].is_string());
    assert_eq!(ctx.repository.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_shorten_unsupported_scheme_rejected() {
    let ctx = common::create_test_state();
    let server = server(ctx.state.clone());

    let response = server
        .post("/shorten")
        .json(&json!({ "originalUrl": "javascript:alert(1)" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(ctx.repository.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_shorten_empty_url_rejected() {
    let ctx = common::create_test_state();
    let server = server(ctx.state);

    let response = server
        .post("/shorten")
        .json(&json!({ "originalUrl": "" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["code"], "invalid_input");
    assert_eq!(json["details"]["fields"][0], "original_url");
}

#[tokio::test]
async fn test_shorten_missing_field() {
    let ctx = common::create_test_state();
    let server = server(ctx.state.clone());

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["code"], "invalid_input");
    assert!(json["details"]["reason"].as_str().unwrap().contains("originalUrl"));
    assert_eq!(ctx.repository.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_shorten_non_string_url() {
    let ctx = common::create_test_state();
    let server = server(ctx.state.clone());

    let response = server
        .post("/shorten")
        .json(&json!({ "originalUrl": 42 }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<serde_json::Value>()["code"], "invalid_input");
    assert_eq!(ctx.repository.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_shorten_non_json_body() {
    let ctx = common::create_test_state();
    let server = server(ctx.state);

    let response = server.post("/shorten").text("originalUrl=x").await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<serde_json::Value>()["code"], "invalid_input");
}
