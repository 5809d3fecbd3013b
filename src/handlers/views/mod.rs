//! View routing handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{Router, routing::get};

use crate::state::AppState;

/// View routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/resolve", get(handler::resolve_view))
}
