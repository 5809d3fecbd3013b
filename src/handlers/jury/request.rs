//! Jury request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::{MAX_SUB_SCORE, MIN_SUB_SCORE},
    models::{Criterion, RubricScores},
};

/// Full rubric submission
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitEvaluationRequest {
    #[validate(range(min = MIN_SUB_SCORE, max = MAX_SUB_SCORE))]
    pub elocution: i32,

    #[validate(range(min = MIN_SUB_SCORE, max = MAX_SUB_SCORE))]
    pub relevance: i32,

    #[validate(range(min = MIN_SUB_SCORE, max = MAX_SUB_SCORE))]
    pub originality: i32,
}

impl From<SubmitEvaluationRequest> for RubricScores {
    fn from(request: SubmitEvaluationRequest) -> Self {
        Self {
            elocution: request.elocution,
            relevance: request.relevance,
            originality: request.originality,
        }
    }
}

/// Increment or decrement one criterion
#[derive(Debug, Deserialize)]
pub struct AdjustEvaluationRequest {
    pub criterion: Criterion,
    pub delta: i32,
}
