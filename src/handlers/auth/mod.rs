//! Authentication handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::{middleware::auth_middleware, state::AppState};

/// Authentication routes
pub fn routes(state: &AppState) -> Router<AppState> {
    let authenticated = Router::new()
        .route("/logout", post(handler::logout))
        .route("/me", get(handler::get_current_session))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
        .merge(authenticated)
}
