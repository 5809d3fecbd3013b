//! Jury response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::Evaluation;

/// Stored evaluation
#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub jury_id: Uuid,
    pub elocution: i32,
    pub relevance: i32,
    pub originality: i32,
    pub total_score: i32,
    pub updated_at: DateTime<Utc>,
}

impl From<Evaluation> for EvaluationResponse {
    fn from(evaluation: Evaluation) -> Self {
        Self {
            id: evaluation.id,
            candidate_id: evaluation.candidate_id,
            jury_id: evaluation.jury_id,
            elocution: evaluation.elocution,
            relevance: evaluation.relevance,
            originality: evaluation.originality,
            total_score: evaluation.total_score,
            updated_at: evaluation.updated_at,
        }
    }
}
