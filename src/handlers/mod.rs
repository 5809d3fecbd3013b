//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod admin;
pub mod auth;
pub mod candidates;
pub mod files;
pub mod health;
pub mod jury;
pub mod views;

use axum::{Router, middleware};

use crate::{
    middleware::{
        auth_middleware, optional_auth_middleware, require_admin, require_candidate, require_jury,
    },
    state::AppState,
};

/// Create all API routes
///
/// Role gates run after the session is resolved and before any handler
/// touches role-specific data.
pub fn routes(state: &AppState) -> Router<AppState> {
    let authenticated = || middleware::from_fn_with_state(state.clone(), auth_middleware);

    Router::new()
        .merge(health::routes())
        .nest("/auth", auth::routes(state))
        .nest(
            "/views",
            views::routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                optional_auth_middleware,
            )),
        )
        .nest(
            "/candidate",
            candidates::routes()
                .route_layer(middleware::from_fn(require_candidate))
                .route_layer(authenticated()),
        )
        .nest(
            "/jury",
            jury::routes()
                .route_layer(middleware::from_fn(require_jury))
                .route_layer(authenticated()),
        )
        .nest(
            "/admin",
            admin::routes()
                .route_layer(middleware::from_fn(require_admin))
                .route_layer(authenticated()),
        )
}
