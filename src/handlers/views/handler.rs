//! View handler implementations

use axum::{Json, extract::Query};

use crate::{error::AppResult, middleware::OptionalSession, services::SessionService};

use super::{request::ResolveViewQuery, response::ViewResponse};

/// Resolve an in-app path for the caller's role
pub async fn resolve_view(
    OptionalSession(session): OptionalSession,
    Query(query): Query<ResolveViewQuery>,
) -> AppResult<Json<ViewResponse>> {
    let decision = SessionService::resolve_view(&query.path, session.as_ref())?;
    Ok(Json(decision.into()))
}
