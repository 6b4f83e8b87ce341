//! Handler for the final gate transition.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{Extensions, HeaderMap},
};

use crate::api::dto::verify::{VerifyRequest, VerifyResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Checks the CAPTCHA token and releases the destination URL.
///
/// # Endpoint
///
/// `POST /verify/{short_id}`
///
/// # Request Body
///
/// ```json
/// { "captchaToken": "03AFcWeA..." }
/// ```
///
/// # Response
///
/// ```json
/// { "success": true, "redirectUrl": "https://example.com/some/long/path" }
/// ```
///
/// # Errors
///
/// - **400** `invalid_input` - malformed body
/// - **400** `captcha_rejected` - token missing or rejected by the provider
/// - **404** `not_found` - unknown identifier (only after the CAPTCHA passed)
pub async fn verify_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    extensions: Extensions,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<VerifyResponse>, AppError> {
    let Json(payload) = payload?;
    let remote_ip = client_ip(&headers, &extensions, state.behind_proxy).map(|ip| ip.to_string());

    let verified = state
        .gate_service
        .verify(&short_id, payload.captcha_token.as_deref(), remote_ip)
        .await?;

    Ok(Json(VerifyResponse {
        success: true,
        redirect_url: verified.redirect_url,
    }))
}
