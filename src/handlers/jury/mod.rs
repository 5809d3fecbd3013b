//! Jury area handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Jury routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handler::get_dashboard))
        .route("/candidates/{id}", get(handler::get_notation))
        .route("/candidates/{id}/evaluation", put(handler::submit_evaluation))
        .route(
            "/candidates/{id}/evaluation/adjust",
            post(handler::adjust_evaluation),
        )
}
