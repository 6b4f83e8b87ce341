mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use link_gate::api::handlers::verify_handler;
use serde_json::json;

fn server(state: link_gate::AppState) -> TestServer {
    let app = Router::new()
        .route("/verify/{short_id}", post(verify_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_verify_success_returns_redirect_url() {
    let ctx = common::create_test_state();
    common::create_test_link(&ctx.repository, "aB3xZ9", "https://example.com/dest").await;
    let server = server(ctx.state.clone());

    let response = server
        .post("/verify/aB3xZ9")
        .json(&json!({ "captchaToken": common::VALID_TOKEN }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["success"], true);
    assert_eq!(json["redirectUrl"], "https://example.com/dest");
    assert_eq!(common::clicks(&ctx.repository, "aB3xZ9").await, 0);
}

#[tokio::test]
async fn test_verify_rejected_token_has_no_redirect() {
    let ctx = common::create_test_state();
    common::create_test_link(&ctx.repository, "aB3xZ9", "https://example.com/dest").await;
    let server = server(ctx.state.clone());

    let response = server
        .post("/verify/aB3xZ9")
        .json(&json!({ "captchaToken": "forged" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["code"], "captcha_rejected");
    assert!(json.get("redirectUrl").is_none());
    assert_eq!(ctx.captcha.calls(), 1);
}

#[tokio::test]
async fn test_verify_missing_token_skips_provider() {
    let ctx = common::create_test_state();
    common::create_test_link(&ctx.repository, "aB3xZ9", "https://example.com/dest").await;
    let server = server(ctx.state.clone());

    let response = server.post("/verify/aB3xZ9").json(&json!({})).await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<serde_json::Value>()["code"], "captcha_rejected");
    assert_eq!(ctx.captcha.calls(), 0);
}

#[tokio::test]
async fn test_verify_unknown_id_after_valid_captcha() {
    let ctx = common::create_test_state();
    let server = server(ctx.state.clone());

    let response = server
        .post("/verify/missing1")
        .json(&json!({ "captchaToken": common::VALID_TOKEN }))
        .await;

    response.assert_status_not_found();
    assert_eq!(response.json::<serde_json::Value>()["code"], "not_found");
}

#[tokio::test]
async fn test_verify_unknown_id_with_bad_captcha_reports_captcha() {
    let ctx = common::create_test_state();
    let server = server(ctx.state.clone());

    let response = server
        .post("/verify/missing1")
        .json(&json!({ "captchaToken": "forged" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_verify_malformed_body_is_invalid_input() {
    let ctx = common::create_test_state();
    common::create_test_link(&ctx.repository, "aB3xZ9", "https://example.com/dest").await;
    let server = server(ctx.state.clone());

    let response = server
        .post("/verify/aB3xZ9")
        .json(&json!({ "captchaToken": 7 }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["code"], "invalid_input");
    assert!(json.get("redirectUrl").is_none());
    assert_eq!(ctx.captcha.calls(), 0);
}
