//! Request logging middleware
//!
//! Every request gets an id, echoed in the `x-request-id` response header and
//! attached to all events emitted while it is handled.

use std::time::Instant;

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

const REQUEST_ID: &str = "x-request-id";

/// Request logging middleware
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let request_id = request
        .headers()
        .get(REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let span = info_span!("request", request_id = %request_id, method = %method, path = %path);
    let mut response = next.run(request).instrument(span.clone()).await;

    let status = response.status();
    let duration_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);

    span.in_scope(|| match status {
        s if s.is_server_error() => {
            warn!(status = s.as_u16(), duration_ms = %duration_ms, "Request failed")
        }
        // Expired sessions bounce to the login view constantly
        s if s == StatusCode::UNAUTHORIZED || s == StatusCode::NOT_FOUND => {
            debug!(status = s.as_u16(), duration_ms = %duration_ms, "Request rejected")
        }
        s if s.is_client_error() => {
            warn!(status = s.as_u16(), duration_ms = %duration_ms, "Request rejected")
        }
        s => info!(status = s.as_u16(), duration_ms = %duration_ms, "Request completed"),
    });

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID), value);
    }

    response
}
