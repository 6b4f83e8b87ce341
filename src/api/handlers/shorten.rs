//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for one destination URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "originalUrl": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// ```json
/// { "shortUrl": "https://s.example.com/aB3xZ9", "shortId": "aB3xZ9" }
/// ```
///
/// # Errors
///
/// - **400** `invalid_input` - malformed body, missing, relative or non-http(s) URL
/// - **500** `generation_exhausted` - no free identifier after retries
/// - **500** `internal_error` - storage failure
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state.link_service.shorten(&payload.original_url).await?;
    let short_url = state.link_service.short_url(&state.base_url, &link.short_id);

    Ok(Json(ShortenResponse {
        short_url,
        short_id: link.short_id,
    }))
}
