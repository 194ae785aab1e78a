//! # HTTP Request Tracing Middleware
//!
//! Axum middleware that opens a span per request carrying the request's
//! correlation ID as `trace_id`, so every log record emitted while handling
//! the request is tagged with it.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use http::HeaderValue;
use tracing::Instrument;

use super::correlation::{CorrelationId, TRACE_ID_HEADER};

/// Axum middleware that correlates a request with its log records
///
/// This middleware:
/// - Resolves the correlation ID from the request headers (or generates one)
/// - Inserts it into the request extensions for handlers
/// - Runs the request inside an `http_request` span with `trace_id` set
/// - Logs completion with status code and latency
/// - Echoes the ID in the `x-trace-id` response header
pub async fn trace_http_requests(mut request: Request, next: Next) -> Response {
    let correlation_id = CorrelationId::from_headers(request.headers());
    request.extensions_mut().insert(correlation_id.clone());

    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let span = tracing::info_span!(
        "http_request",
        method = %method,
        path = %path,
        trace_id = %correlation_id,
    );

    let mut response = async move {
        let response = next.run(request).await;
        let status_code = response.status().as_u16();
        let elapsed_ms = start.elapsed().as_millis() as u64;

        if status_code >= 500 {
            tracing::warn!(status_code, elapsed_ms, "Request failed");
        } else {
            tracing::info!(status_code, elapsed_ms, "Request completed");
        }
        response
    }
    .instrument(span)
    .await;

    if let Ok(value) = HeaderValue::from_str(correlation_id.as_str()) {
        response.headers_mut().insert(TRACE_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::logging::test_support::BufferWriter;
    use crate::observability::logging::RedactingJsonLayer;
    use axum::{body::Body, http::StatusCode, routing::get, Extension, Router};
    use http::Request;
    use tower::ServiceExt;
    use tracing_subscriber::layer::SubscriberExt;

    async fn test_handler(Extension(id): Extension<CorrelationId>) -> String {
        tracing::info!("handling");
        id.to_string()
    }

    fn app() -> Router {
        Router::new()
            .route("/test", get(test_handler))
            .layer(axum::middleware::from_fn(trace_http_requests))
    }

    #[tokio::test]
    async fn test_incoming_trace_id_is_echoed() {
        let request = Request::builder()
            .uri("/test")
            .header("x-request-id", "req-42")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[TRACE_ID_HEADER], "req-42");
    }

    #[tokio::test]
    async fn test_generated_trace_id_reaches_handler() {
        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();

        let response = app().oneshot(request).await.unwrap();
        let header = response.headers()[TRACE_ID_HEADER].to_str().unwrap().to_string();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body, header.as_bytes());
    }

    #[test]
    fn test_request_logs_carry_trace_id() {
        let writer = BufferWriter::default();
        let subscriber = tracing_subscriber::registry()
            .with(RedactingJsonLayer::new("assignment", writer.clone()));

        tracing::subscriber::with_default(subscriber, || {
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            runtime.block_on(async {
                let request = Request::builder()
                    .uri("/test")
                    .header(TRACE_ID_HEADER, "trace-7")
                    .body(Body::empty())
                    .unwrap();
                app().oneshot(request).await.unwrap();
            });
        });

        let records = writer.records();
        let handled = records.iter().find(|r| r["msg"] == "handling").unwrap();
        let completed = records.iter().find(|r| r["msg"] == "Request completed").unwrap();

        assert_eq!(handled["trace_id"], "trace-7");
        assert_eq!(completed["trace_id"], "trace-7");
        assert_eq!(completed["status_code"], 200);
        assert_eq!(completed["path"], "/test");
    }
}
