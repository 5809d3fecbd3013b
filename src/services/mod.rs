//! Business logic services

pub mod admin_service;
pub mod auth_service;
pub mod scoring_service;
pub mod session_service;
pub mod submission_service;

pub use admin_service::AdminService;
pub use auth_service::AuthService;
pub use scoring_service::ScoringService;
pub use session_service::SessionService;
pub use submission_service::SubmissionService;
