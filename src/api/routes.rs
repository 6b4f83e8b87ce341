//! JSON API route configuration.

use crate::api::handlers::{shorten_handler, verify_handler};
use crate::state::AppState;
use axum::{Router, routing::post};

/// Public JSON endpoints, rate limited by the caller.
///
/// # Endpoints
///
/// - `POST /shorten`            - Create a short link
/// - `POST /verify/{short_id}`  - Check the CAPTCHA and release the destination
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/verify/{short_id}", post(verify_handler))
}
