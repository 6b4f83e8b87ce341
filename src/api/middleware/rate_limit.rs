//! Rate limiting middleware using token bucket algorithm.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Replenish interval in seconds for one request token.
const REPLENISH_SECONDS: u64 = 1;
const BURST_SIZE: u32 = 30;

/// Applies the per-IP rate limiter to `router`.
///
/// # Limits
///
/// - **Replenish**: one request per second
/// - **Burst**: 30 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Keys on the socket peer address. With `behind_proxy`, reads
/// `X-Forwarded-For`, `X-Real-IP` and `Forwarded` first.
///
/// # Example
///
/// ```rust,ignore
/// let api = rate_limit::apply(
///     Router::new().route("/shorten", post(shorten_handler)),
///     config.behind_proxy,
/// );
/// ```
pub fn apply<S>(router: Router<S>, behind_proxy: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    if behind_proxy {
        router.layer(layer(SmartIpKeyExtractor))
    } else {
        router.layer(layer(PeerIpKeyExtractor))
    }
}

fn layer<K>(key_extractor: K) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>
where
    K: KeyExtractor,
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(key_extractor)
            .per_second(REPLENISH_SECONDS)
            .burst_size(BURST_SIZE)
            .finish()
            .expect("non-zero rate limit quota"),
    );

    GovernorLayer::new(governor_conf)
}
