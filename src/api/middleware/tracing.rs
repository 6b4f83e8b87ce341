//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub type HttpTraceLayer = TraceLayer<SharedClassifier<ServerErrorsAsFailures>>;

/// Span per request at `INFO` with method, URI and version; the response is
/// logged at `INFO` with status and latency in milliseconds.
///
/// ```text
/// INFO request{method=GET uri=/step2/aB3xZ9 version=HTTP/1.1}: finished processing request latency=3 ms status=200
/// INFO request{method=POST uri=/verify/aB3xZ9 version=HTTP/1.1}: finished processing request latency=181 ms status=400
/// ```
pub fn layer() -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
