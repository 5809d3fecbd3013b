//! PostgreSQL persistence
//!
//! Three tables back the contest: `accounts` (credentials), `profiles`
//! (candidate, jury and admin records keyed by the account id) and
//! `evaluations` (one rubric row per candidate and jury member). The
//! repositories are driven by [`crate::store::PgDataStore`].

pub mod connection;
pub mod repositories;

use sqlx::PgPool;

pub use connection::{create_pool, verify_schema};

/// Apply the embedded migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
