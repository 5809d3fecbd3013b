//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod account_repo;
pub mod evaluation_repo;
pub mod profile_repo;

pub use account_repo::AccountRepository;
pub use evaluation_repo::EvaluationRepository;
pub use profile_repo::ProfileRepository;
