//! PostgreSQL-backed records

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::{AccountRepository, EvaluationRepository, ProfileRepository},
    error::AppResult,
    models::{
        Account, Evaluation, EvaluationFilter, NewEvaluation, NewProfile, Profile, ProfileFilter,
        VideoEntry,
    },
};

use super::DataStore;

/// [`DataStore`] over a connection pool
#[derive(Clone)]
pub struct PgDataStore {
    pool: PgPool,
}

impl PgDataStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DataStore for PgDataStore {
    async fn create_account(&self, email: &str, password_hash: &str) -> AppResult<Uuid> {
        AccountRepository::create(&self.pool, email, password_hash).await
    }

    async fn find_account_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        AccountRepository::find_by_email(&self.pool, email).await
    }

    async fn delete_account(&self, id: Uuid) -> AppResult<bool> {
        AccountRepository::delete(&self.pool, &id).await
    }

    async fn insert_profile(&self, profile: NewProfile) -> AppResult<Profile> {
        ProfileRepository::create(&self.pool, &profile).await
    }

    async fn find_profile(&self, id: Uuid) -> AppResult<Option<Profile>> {
        ProfileRepository::find_by_id(&self.pool, &id).await
    }

    async fn list_profiles(&self, filter: ProfileFilter) -> AppResult<Vec<Profile>> {
        ProfileRepository::list(&self.pool, &filter).await
    }

    async fn set_document_url(&self, id: Uuid, url: &str) -> AppResult<Profile> {
        ProfileRepository::set_document_url(&self.pool, &id, url).await
    }

    async fn set_videos(&self, id: Uuid, videos: Vec<VideoEntry>) -> AppResult<Profile> {
        ProfileRepository::set_videos(&self.pool, &id, &videos).await
    }

    async fn upsert_evaluation(&self, evaluation: NewEvaluation) -> AppResult<Evaluation> {
        EvaluationRepository::upsert(&self.pool, &evaluation).await
    }

    async fn find_evaluation(
        &self,
        candidate_id: Uuid,
        jury_id: Uuid,
    ) -> AppResult<Option<Evaluation>> {
        EvaluationRepository::find(&self.pool, &candidate_id, &jury_id).await
    }

    async fn list_evaluations(&self, filter: EvaluationFilter) -> AppResult<Vec<Evaluation>> {
        EvaluationRepository::list(&self.pool, &filter).await
    }
}
