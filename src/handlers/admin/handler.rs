//! Admin handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    handlers::auth::ProfileResponse,
    models::SessionContext,
    services::AdminService,
    state::AppState,
};

use super::{
    request::{CandidateQuery, CreateStaffRequest},
    response::{CandidateListResponse, CsvFile, JuryListResponse, ResultsResponse},
};

/// List candidates, newest first
pub async fn list_candidates(
    State(state): State<AppState>,
    Query(query): Query<CandidateQuery>,
) -> AppResult<Json<CandidateListResponse>> {
    let directory =
        AdminService::candidate_directory(state.data(), query.search.as_deref(), query.competition)
            .await?;

    Ok(Json(CandidateListResponse {
        total: directory.candidates.len(),
        counts: directory.counts,
        candidates: directory
            .candidates
            .into_iter()
            .map(ProfileResponse::from)
            .collect(),
    }))
}

/// Export the candidate directory
pub async fn export_candidates(
    State(state): State<AppState>,
    Query(query): Query<CandidateQuery>,
) -> AppResult<CsvFile> {
    let body =
        AdminService::export_candidates(state.data(), query.search.as_deref(), query.competition)
            .await?;

    Ok(CsvFile {
        file_name: "candidats.csv",
        body,
    })
}

/// Delete a candidate
pub async fn delete_candidate(
    State(state): State<AppState>,
    session: SessionContext,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    AdminService::delete_candidate(state.data(), &session, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List jury members by category
pub async fn list_juries(State(state): State<AppState>) -> AppResult<Json<JuryListResponse>> {
    let groups = AdminService::list_juries(state.data()).await?;
    Ok(Json(JuryListResponse { groups }))
}

/// Create a staff account
pub async fn create_staff(
    State(state): State<AppState>,
    Json(payload): Json<CreateStaffRequest>,
) -> AppResult<(StatusCode, Json<ProfileResponse>)> {
    payload.validate()?;

    let profile = AdminService::create_staff(
        state.data(),
        &payload.email,
        &payload.password,
        &payload.full_name,
        &payload.role,
        payload.speciality.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(profile.into())))
}

/// Delete a jury member or administrator
pub async fn delete_staff(
    State(state): State<AppState>,
    session: SessionContext,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    AdminService::delete_staff(state.data(), &session, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Rankings of every category
pub async fn get_results(State(state): State<AppState>) -> AppResult<Json<ResultsResponse>> {
    let (rankings, summary) = AdminService::results_with_summary(state.data()).await?;
    Ok(Json(ResultsResponse { rankings, summary }))
}

/// Export the rankings
pub async fn export_results(State(state): State<AppState>) -> AppResult<CsvFile> {
    let body = AdminService::export_results(state.data()).await?;

    Ok(CsvFile {
        file_name: "resultats.csv",
        body,
    })
}
