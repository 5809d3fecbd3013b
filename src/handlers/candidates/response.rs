//! Candidate response DTOs

use serde::Serialize;

use crate::handlers::auth::ProfileResponse;

/// Upload success response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub profile: ProfileResponse,
}
