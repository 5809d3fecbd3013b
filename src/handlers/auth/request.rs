//! Authentication request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::{MAX_FULL_NAME_LENGTH, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH},
    models::Category,
};

/// Candidate registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = MAX_FULL_NAME_LENGTH))]
    pub full_name: String,

    /// Spaces are ignored
    #[validate(length(min = 1, max = 32))]
    pub phone: String,

    #[validate(length(min = MIN_PASSWORD_LENGTH, max = MAX_PASSWORD_LENGTH))]
    pub password: String,

    pub competition: Category,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Either an email or a phone number
    #[validate(length(min = 1))]
    pub identifier: String,

    #[validate(length(min = 1))]
    pub password: String,
}
