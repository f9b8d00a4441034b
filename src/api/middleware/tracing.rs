//! HTTP request/response tracing middleware.

use axum::http::Request;
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};

use super::account::ACCOUNT_HEADER;

/// Opens an `INFO` span per request tagged with the calling account.
///
/// The account id is copied from the header as-is; it is only validated
/// later by [`super::AccountId`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountSpan;

impl<B> MakeSpan<B> for AccountSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let account = request
            .headers()
            .get(ACCOUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            version = ?request.version(),
            account = %account,
        )
    }
}

/// Creates a tracing middleware for HTTP requests.
///
/// # Logging Behavior
///
/// **On Request:** a span with method, URI, HTTP version and account id.
///
/// **On Response:** an `INFO` event with status code and latency in milliseconds.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=POST uri=/api/links version=HTTP/1.1 account=6f1c…}: finished processing request latency=12 ms status=201
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, AccountSpan> {
    TraceLayer::new_for_http()
        .make_span_with(AccountSpan)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
