//! Admin management handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::state::AppState;

/// Admin routes
pub fn routes() -> Router<AppState> {
    Router::new()
        // Candidate directory
        .route("/candidates", get(handler::list_candidates))
        .route("/candidates/export", get(handler::export_candidates))
        .route("/candidates/{id}", delete(handler::delete_candidate))
        // Jury directory
        .route(
            "/juries",
            get(handler::list_juries).post(handler::create_staff),
        )
        .route("/juries/{id}", delete(handler::delete_staff))
        // Results
        .route("/results", get(handler::get_results))
        .route("/results/export", get(handler::export_results))
}
