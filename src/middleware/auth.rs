//! Authentication middleware
//!
//! Resolves the bearer token into a [`SessionContext`] once per request and
//! stores it in the request extensions for handlers to extract.

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::{error::AppError, models::SessionContext, services::SessionService, state::AppState};

impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionContext>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Optional session wrapper (never fails)
pub struct OptionalSession(pub Option<SessionContext>);

impl<S> FromRequestParts<S> for OptionalSession
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalSession(parts.extensions.get::<SessionContext>().cloned()))
    }
}

fn bearer_token(request: &Request<Body>) -> Option<String> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    let Some(token) = bearer_token(&request) else {
        debug!(path = %path, "Auth failed: missing or malformed Authorization header");
        return Err(AppError::Unauthorized);
    };

    let session = SessionService::resolve(state.data(), state.cache(), state.config(), &token)
        .await
        .inspect_err(|e| debug!(path = %path, error = ?e, "Auth failed"))?;

    debug!(
        path = %path,
        principal_id = %session.principal_id,
        role = ?session.role,
        "Session resolved"
    );

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

/// Optional authentication middleware (doesn't fail if no token)
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(&request) {
        match SessionService::resolve(state.data(), state.cache(), state.config(), &token).await {
            Ok(session) => {
                request.extensions_mut().insert(session);
            }
            Err(e) => debug!(error = ?e, "Ignoring unusable token"),
        }
    }

    next.run(request).await
}

/// Admin-only routes
pub async fn require_admin(
    session: SessionContext,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    session.require_admin()?;
    Ok(next.run(request).await)
}

/// Routes for jury members and presidents
pub async fn require_jury(
    session: SessionContext,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    session.require_jury()?;
    Ok(next.run(request).await)
}

/// Candidate-only routes
pub async fn require_candidate(
    session: SessionContext,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    session.require_candidate()?;
    Ok(next.run(request).await)
}
