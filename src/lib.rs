//! JEE Contest - submissions, jury scoring and rankings
//!
//! This library provides the core functionality of the JEE contest platform:
//! candidates register and upload their pitch material, jury members score
//! them on a three-criterion rubric, and administrators follow the rankings.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Scoring**: Pure ranking and board computations
//! - **Store**: Record, object and cache collaborators behind traits
//! - **Models**: Domain models and DTOs

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod export;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod scoring;
pub mod services;
pub mod state;
pub mod store;
pub mod utils;

use std::time::Duration;

use axum::{Router, extract::DefaultBodyLimit, middleware as axum_middleware};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;

/// Build the full application router
pub fn app(state: AppState) -> Router {
    let config = state.config();
    let timeout = Duration::from_secs(config.server.request_timeout_secs);
    let max_upload_bytes = config.storage.max_upload_bytes;

    Router::new()
        .nest(constants::API_BASE_PATH, handlers::routes(&state))
        .nest(constants::FILES_BASE_PATH, handlers::files::routes())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit_middleware,
        ))
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
