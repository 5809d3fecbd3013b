//! Candidate handler implementations

use axum::{
    Json,
    extract::{Multipart, State},
};

use crate::{
    error::{AppError, AppResult},
    handlers::auth::ProfileResponse,
    models::SessionContext,
    services::SubmissionService,
    state::AppState,
};

use super::{request::UploadForm, response::UploadResponse};

/// Own profile
pub async fn get_profile(
    State(state): State<AppState>,
    session: SessionContext,
) -> AppResult<Json<ProfileResponse>> {
    session.require_candidate()?;

    let profile = state
        .data()
        .find_profile(session.principal_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(profile.into()))
}

/// Upload or replace the candidate's document
pub async fn upload_document(
    State(state): State<AppState>,
    session: SessionContext,
    multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    session.require_candidate()?;

    let mut form = UploadForm::read(multipart).await?;
    let file = form.require_file()?;

    let profile =
        SubmissionService::attach_document(state.data(), state.objects(), session.principal_id, file)
            .await?;

    Ok(Json(UploadResponse {
        message: "Document uploaded".to_string(),
        profile: profile.into(),
    }))
}

/// Upload a video with its title
pub async fn upload_video(
    State(state): State<AppState>,
    session: SessionContext,
    multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let category = session.require_candidate()?;

    let mut form = UploadForm::read(multipart).await?;
    let file = form.require_file()?;
    let title = form.title.unwrap_or_default();

    let profile = SubmissionService::attach_video(
        state.data(),
        state.objects(),
        session.principal_id,
        category,
        &title,
        file,
    )
    .await?;

    Ok(Json(UploadResponse {
        message: "Video uploaded".to_string(),
        profile: profile.into(),
    }))
}
