//! Gate page route configuration.

use crate::state::AppState;
use crate::web::handlers::{gate1_handler, gate2_handler, gate3_handler};
use axum::{Router, routing::get};

/// Public gate pages.
///
/// # Endpoints
///
/// - `GET /{short_id}`        - Gate 1 (counts the visit)
/// - `GET /step2/{short_id}`  - Gate 2
/// - `GET /step3/{short_id}`  - Gate 3 with CAPTCHA
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/{short_id}", get(gate1_handler))
        .route("/step2/{short_id}", get(gate2_handler))
        .route("/step3/{short_id}", get(gate3_handler))
}
