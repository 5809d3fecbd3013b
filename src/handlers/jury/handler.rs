//! Jury handler implementations

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::SessionContext,
    services::{
        ScoringService,
        scoring_service::{Dashboard, NotationSheet},
    },
    state::AppState,
};

use super::{
    request::{AdjustEvaluationRequest, SubmitEvaluationRequest},
    response::EvaluationResponse,
};

/// Member or president board, depending on the role
pub async fn get_dashboard(
    State(state): State<AppState>,
    session: SessionContext,
) -> AppResult<Json<Dashboard>> {
    let dashboard = ScoringService::dashboard(state.data(), &session).await?;
    Ok(Json(dashboard))
}

/// Notation page data for one candidate
pub async fn get_notation(
    State(state): State<AppState>,
    session: SessionContext,
    Path(candidate_id): Path<Uuid>,
) -> AppResult<Json<NotationSheet>> {
    let sheet = ScoringService::notation(state.data(), &session, candidate_id).await?;
    Ok(Json(sheet))
}

/// Submit or replace the caller's evaluation
pub async fn submit_evaluation(
    State(state): State<AppState>,
    session: SessionContext,
    Path(candidate_id): Path<Uuid>,
    Json(payload): Json<SubmitEvaluationRequest>,
) -> AppResult<Json<EvaluationResponse>> {
    payload.validate()?;

    let evaluation =
        ScoringService::submit(state.data(), &session, candidate_id, payload.into()).await?;
    Ok(Json(evaluation.into()))
}

/// Step one criterion up or down
pub async fn adjust_evaluation(
    State(state): State<AppState>,
    session: SessionContext,
    Path(candidate_id): Path<Uuid>,
    Json(payload): Json<AdjustEvaluationRequest>,
) -> AppResult<Json<EvaluationResponse>> {
    let evaluation = ScoringService::adjust(
        state.data(),
        &session,
        candidate_id,
        payload.criterion,
        payload.delta,
    )
    .await?;
    Ok(Json(evaluation.into()))
}
