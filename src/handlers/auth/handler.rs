//! Authentication handler implementations

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::{
    error::AppResult,
    models::SessionContext,
    services::AuthService,
    state::AppState,
};

use super::{
    request::{LoginRequest, RegisterRequest},
    response::{CurrentSessionResponse, LoginResponse, LogoutResponse, RegisterResponse},
};

/// Register a new candidate
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    // Validate request
    payload.validate()?;

    let profile = AuthService::register_candidate(
        state.data(),
        state.config(),
        &payload.full_name,
        &payload.phone,
        &payload.password,
        payload.competition,
    )
    .await?;

    let response = RegisterResponse {
        message: "Registration successful".to_string(),
        profile: profile.into(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Login with an email or phone number and password
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    payload.validate()?;

    let outcome = AuthService::login(
        state.data(),
        state.config(),
        &payload.identifier,
        &payload.password,
    )
    .await?;

    Ok(Json(LoginResponse {
        access_token: outcome.token.token,
        token_type: "Bearer".to_string(),
        expires_in: outcome.token.expires_in,
        role: outcome.role,
        home: outcome.role.home_path(),
        profile: outcome.profile.into(),
    }))
}

/// Sign out: the presented token stops working
pub async fn logout(
    State(state): State<AppState>,
    session: SessionContext,
) -> AppResult<Json<LogoutResponse>> {
    AuthService::logout(state.cache(), &session).await?;

    Ok(Json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    }))
}

/// Get the current session
pub async fn get_current_session(session: SessionContext) -> Json<CurrentSessionResponse> {
    let home = session.role.home_path();
    Json(CurrentSessionResponse { session, home })
}
