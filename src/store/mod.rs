//! Collaborator boundaries
//!
//! The service owns no storage of its own: records, uploaded objects and
//! short-lived session/rate-limit keys live behind these traits. Production
//! wiring uses PostgreSQL, the filesystem and Redis; the in-memory
//! implementations back tests and the `memory` backend mode.

pub mod filesystem;
pub mod memory;
pub mod postgres;
pub mod redis_cache;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        Account, Evaluation, EvaluationFilter, NewEvaluation, NewProfile, Profile, ProfileFilter,
        VideoEntry,
    },
};

pub use filesystem::FsObjectStore;
pub use memory::{MemoryCacheStore, MemoryDataStore, MemoryObjectStore};
pub use postgres::PgDataStore;
pub use redis_cache::RedisCacheStore;

/// Records: accounts, profiles and evaluations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Create a login account; duplicate emails are a `Conflict`
    async fn create_account(&self, email: &str, password_hash: &str) -> AppResult<Uuid>;

    async fn find_account_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Remove an account with its profile and every evaluation it is part of
    async fn delete_account(&self, id: Uuid) -> AppResult<bool>;

    async fn insert_profile(&self, profile: NewProfile) -> AppResult<Profile>;

    async fn find_profile(&self, id: Uuid) -> AppResult<Option<Profile>>;

    async fn list_profiles(&self, filter: ProfileFilter) -> AppResult<Vec<Profile>>;

    /// Replace the document reference of a profile
    async fn set_document_url(&self, id: Uuid, url: &str) -> AppResult<Profile>;

    /// Replace the video list of a profile
    async fn set_videos(&self, id: Uuid, videos: Vec<VideoEntry>) -> AppResult<Profile>;

    /// Insert, or update the existing row for the same (candidate, jury) pair
    async fn upsert_evaluation(&self, evaluation: NewEvaluation) -> AppResult<Evaluation>;

    async fn find_evaluation(&self, candidate_id: Uuid, jury_id: Uuid)
    -> AppResult<Option<Evaluation>>;

    async fn list_evaluations(&self, filter: EvaluationFilter) -> AppResult<Vec<Evaluation>>;
}

/// Binary objects with public locations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, name: &str, bytes: Vec<u8>) -> AppResult<()>;

    async fn get(&self, name: &str) -> AppResult<Option<Vec<u8>>>;

    async fn delete(&self, name: &str) -> AppResult<()>;

    /// Publicly dereferenceable location of `name`
    fn public_url(&self, name: &str) -> String;
}

/// Expiring keys for revoked sessions and rate-limit windows
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn set_flag(&self, key: &str, ttl_secs: u64) -> AppResult<()>;

    async fn has_flag(&self, key: &str) -> AppResult<bool>;

    /// Increment a counter, starting a window of `window_secs` on first use
    async fn incr_window(&self, key: &str, window_secs: i64) -> AppResult<i64>;
}

/// Object names are single path segments
pub fn is_valid_object_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_names() {
        assert!(is_valid_object_name("0b1e-video-1760000000000.mp4"));
        assert!(!is_valid_object_name("../etc/passwd"));
        assert!(!is_valid_object_name(".."));
        assert!(!is_valid_object_name("a/b"));
        assert!(!is_valid_object_name(""));
    }
}
