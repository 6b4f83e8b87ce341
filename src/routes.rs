//! Top-level router configuration combining API and gate page routes.
//!
//! # Route Structure
//!
//! - `POST /shorten`            - Create a short link (rate limited)
//! - `POST /verify/{short_id}`  - CAPTCHA check, returns the destination (rate limited)
//! - `GET  /health`             - Health check: storage, cache
//! - `GET  /{short_id}`         - Gate 1
//! - `GET  /step2/{short_id}`   - Gate 2
//! - `GET  /step3/{short_id}`   - Gate 3 (CAPTCHA)
//! - `/static/*`                - Ad loader and blocker detector scripts
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the JSON endpoints
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers. With
///   `state.behind_proxy` set, rate limiting reads the client IP from
///   `X-Forwarded-For` / `X-Real-IP` instead of the peer socket address.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_router = rate_limit::apply(api::routes::public_routes(), state.behind_proxy);

    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(api_router)
        .merge(web::routes::public_routes())
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
