//! Rate limiting middleware
//!
//! Fixed windows per client IP and path bucket, counted in the cache store.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::{
    constants::{self, API_BASE_PATH},
    error::AppError,
    state::AppState,
};

/// Rate limit middleware
///
/// Requests without connection info (in-process tests) are not limited. A
/// cache failure lets the request through.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>().copied()
    else {
        return next.run(request).await;
    };

    let bucket = path_bucket(request.uri().path());
    let (limit, window) = get_rate_limit(request.uri().path());
    let key = format!("rate_limit:{}:{}", addr.ip(), bucket);

    match state.cache().incr_window(&key, window).await {
        Ok(count) if count > limit => {
            warn!(ip = %addr.ip(), bucket, "Rate limit exceeded");
            AppError::TooManyRequests.into_response()
        }
        Ok(_) => next.run(request).await,
        Err(e) => {
            warn!(error = %e, "Rate limit check failed");
            next.run(request).await
        }
    }
}

fn is_under(path: &str, segment: &str) -> bool {
    path.strip_prefix(API_BASE_PATH)
        .and_then(|rest| rest.strip_prefix(segment))
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

fn is_upload(path: &str) -> bool {
    is_under(path, "/candidate/document") || is_under(path, "/candidate/videos")
}

/// Get rate limit for a path
fn get_rate_limit(path: &str) -> (i64, i64) {
    if is_under(path, "/auth") {
        (
            constants::rate_limits::AUTH_MAX_REQUESTS,
            constants::rate_limits::AUTH_WINDOW_SECS,
        )
    } else if is_upload(path) {
        (
            constants::rate_limits::UPLOAD_MAX_REQUESTS,
            constants::rate_limits::UPLOAD_WINDOW_SECS,
        )
    } else {
        (
            constants::rate_limits::GENERAL_MAX_REQUESTS,
            constants::rate_limits::GENERAL_WINDOW_SECS,
        )
    }
}

/// Get bucket for path (for grouping similar endpoints)
fn path_bucket(path: &str) -> &'static str {
    if is_under(path, "/auth") {
        "auth"
    } else if is_upload(path) {
        "uploads"
    } else if is_under(path, "/jury") {
        "jury"
    } else if is_under(path, "/admin") {
        "admin"
    } else {
        "general"
    }
}
