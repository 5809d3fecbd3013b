//! Utility functions

pub mod crypto;
pub mod time;
pub mod validation;

pub use crypto::sha256_hex;
pub use time::{format_upload_date, now_utc};
pub use validation::{normalize_phone, validate_email, validate_password};
