//! Candidate area handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Candidate routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(handler::get_profile))
        .route("/document", post(handler::upload_document))
        .route("/videos", post(handler::upload_video))
}
