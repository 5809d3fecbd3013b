//! Admin request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::{MAX_FULL_NAME_LENGTH, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH},
    models::Category,
};

/// Candidate directory filters
#[derive(Debug, Default, Deserialize)]
pub struct CandidateQuery {
    /// Case-insensitive substring of the name, or part of the phone number
    pub search: Option<String>,
    pub competition: Option<Category>,
}

/// Create a jury member, jury president or administrator
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStaffRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = MIN_PASSWORD_LENGTH, max = MAX_PASSWORD_LENGTH))]
    pub password: String,

    #[validate(length(min = 1, max = MAX_FULL_NAME_LENGTH))]
    pub full_name: String,

    /// `jury` or `admin`
    pub role: String,

    /// Required for jury: `slam`, `agro_pitch`, or the `president_` variants
    pub speciality: Option<String>,
}
