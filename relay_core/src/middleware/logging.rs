//! Request tracing for the relay

use axum::body::Body;
use http::{Request, Response};
use std::time::Duration;
use tower_http::classify::{ServerErrorsAsFailures, ServerErrorsFailureClass, SharedClassifier};
use tower_http::trace::{DefaultOnBodyChunk, DefaultOnEos, DefaultOnRequest, TraceLayer};
use tracing::{info_span, Span};

pub const CONTACT_PATH: &str = "/api/contact";
pub const HEALTH_PATH: &str = "/health";

type MakeSpanFn = fn(&Request<Body>) -> Span;
type OnResponseFn = fn(&Response<Body>, Duration, &Span);
type OnFailureFn = fn(ServerErrorsFailureClass, Duration, &Span);

pub type RelayTraceLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    MakeSpanFn,
    DefaultOnRequest,
    OnResponseFn,
    DefaultOnBodyChunk,
    DefaultOnEos,
    OnFailureFn,
>;

/// Which part of the site a request hit. Asset paths are not recorded.
pub fn route_label(path: &str) -> &'static str {
    match path {
        CONTACT_PATH => "contact",
        HEALTH_PATH => "health",
        _ => "spa",
    }
}

fn make_span(request: &Request<Body>) -> Span {
    let path = request.uri().path();
    let route = route_label(path);

    if route == "contact" {
        info_span!(
            "http_request",
            method = %request.method(),
            route,
            path = %path,
        )
    } else {
        info_span!("http_request", method = %request.method(), route)
    }
}

fn on_response(response: &Response<Body>, latency: Duration, _span: &Span) {
    let status = response.status().as_u16();
    let latency_ms = latency.as_millis() as u64;

    match status {
        405 => tracing::warn!(status, latency_ms, "method not allowed on contact endpoint"),
        400..=499 => tracing::warn!(status, latency_ms, "client error response"),
        500..=599 => tracing::error!(status, latency_ms, "server error response"),
        _ => tracing::info!(status, latency_ms, "request completed"),
    }
}

fn on_failure(error: ServerErrorsFailureClass, latency: Duration, _span: &Span) {
    tracing::error!(
        latency_ms = latency.as_millis() as u64,
        error = %error,
        "request failed"
    );
}

pub fn logging_layer() -> RelayTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(make_span as MakeSpanFn)
        .on_response(on_response as OnResponseFn)
        .on_failure(on_failure as OnFailureFn)
}
