//! Evaluation repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Evaluation, EvaluationFilter, NewEvaluation},
};

/// Repository for evaluation database operations
pub struct EvaluationRepository;

impl EvaluationRepository {
    /// Insert or update the evaluation of a (candidate, jury) pair
    ///
    /// Concurrent submissions for the same pair are settled by the unique
    /// constraint; the last writer wins.
    pub async fn upsert(pool: &PgPool, evaluation: &NewEvaluation) -> AppResult<Evaluation> {
        let scores = evaluation.scores;

        let row = sqlx::query_as::<_, Evaluation>(
            r#"
            WITH upserted AS (
                INSERT INTO evaluations
                    (candidate_id, jury_id, elocution, relevance, originality, total_score)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (candidate_id, jury_id) DO UPDATE
                SET
                    elocution = EXCLUDED.elocution,
                    relevance = EXCLUDED.relevance,
                    originality = EXCLUDED.originality,
                    total_score = EXCLUDED.total_score,
                    updated_at = NOW()
                RETURNING *
            )
            SELECT u.*, p.full_name AS jury_name
            FROM upserted u
            LEFT JOIN profiles p ON p.id = u.jury_id
            "#,
        )
        .bind(evaluation.candidate_id)
        .bind(evaluation.jury_id)
        .bind(scores.elocution)
        .bind(scores.relevance)
        .bind(scores.originality)
        .bind(scores.total())
        .fetch_one(pool)
        .await?;

        Ok(row)
    }

    /// Find the evaluation of a (candidate, jury) pair
    pub async fn find(
        pool: &PgPool,
        candidate_id: &Uuid,
        jury_id: &Uuid,
    ) -> AppResult<Option<Evaluation>> {
        let row = sqlx::query_as::<_, Evaluation>(
            r#"
            SELECT e.*, p.full_name AS jury_name
            FROM evaluations e
            LEFT JOIN profiles p ON p.id = e.jury_id
            WHERE e.candidate_id = $1 AND e.jury_id = $2
            "#,
        )
        .bind(candidate_id)
        .bind(jury_id)
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }

    /// List evaluations matching the equality filter, oldest first
    pub async fn list(pool: &PgPool, filter: &EvaluationFilter) -> AppResult<Vec<Evaluation>> {
        let rows = sqlx::query_as::<_, Evaluation>(
            r#"
            SELECT e.*, p.full_name AS jury_name
            FROM evaluations e
            JOIN profiles c ON c.id = e.candidate_id
            LEFT JOIN profiles p ON p.id = e.jury_id
            WHERE
                ($1::uuid IS NULL OR e.candidate_id = $1)
                AND ($2::uuid IS NULL OR e.jury_id = $2)
                AND ($3::text IS NULL OR c.competition = $3)
            ORDER BY e.created_at, e.id
            "#,
        )
        .bind(filter.candidate_id)
        .bind(filter.jury_id)
        .bind(filter.competition.map(|c| c.key()))
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}
