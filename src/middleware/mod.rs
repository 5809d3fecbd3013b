//! HTTP middleware

pub mod auth;
pub mod logging;
pub mod rate_limit;

pub use auth::{
    OptionalSession, auth_middleware, optional_auth_middleware, require_admin, require_candidate,
    require_jury,
};
pub use logging::logging_middleware;
pub use rate_limit::rate_limit_middleware;
