//! Authentication response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Profile, Role, SessionContext, VideoEntry};

/// Profile as returned to clients
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub full_name: String,
    pub role: String,
    pub speciality: Option<String>,
    pub competition: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub document_url: Option<String>,
    pub videos: Vec<VideoEntry>,
    pub created_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            full_name: profile.full_name,
            role: profile.role,
            speciality: profile.speciality,
            competition: profile.competition,
            phone: profile.phone,
            email: profile.email,
            document_url: profile.document_url,
            videos: profile.videos,
            created_at: profile.created_at,
        }
    }
}

/// Authentication token response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub role: Role,
    /// View to open after login
    pub home: &'static str,
    pub profile: ProfileResponse,
}

/// Registration success response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub profile: ProfileResponse,
}

/// Logout response
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// Current session response (for /me endpoint)
#[derive(Debug, Serialize)]
pub struct CurrentSessionResponse {
    pub session: SessionContext,
    pub home: &'static str,
}
