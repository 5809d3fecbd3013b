//! Input validation utilities

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, MIN_PHONE_DIGITS};

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]+$").expect("phone pattern compiles"));

/// Strip whitespace from a phone number and check what remains
pub fn normalize_phone(raw: &str) -> Result<String, &'static str> {
    let phone: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    if !PHONE_RE.is_match(&phone) {
        return Err("Phone number can only contain digits");
    }
    if phone.trim_start_matches('+').len() < MIN_PHONE_DIGITS {
        return Err("Phone number is too short");
    }
    Ok(phone)
}

/// Validate email format (basic validation)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err("Invalid email format");
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err("Invalid email format");
    }
    if !domain.contains('.') {
        return Err("Invalid email domain");
    }
    Ok(())
}

/// Validate password length
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    let len = password.chars().count() as u64;
    if len < MIN_PASSWORD_LENGTH {
        return Err("Password must be at least 6 characters");
    }
    if len > MAX_PASSWORD_LENGTH {
        return Err("Password must be at most 128 characters");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone(" 70 12 34 56 ").unwrap(), "70123456");
        assert_eq!(normalize_phone("+226 70123456").unwrap(), "+22670123456");
        assert!(normalize_phone("7012").is_err());
        assert!(normalize_phone("70-12-34-56").is_err());
        assert!(normalize_phone("").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("jury@jee.bf").is_ok());
        assert!(validate_email("jury.jee.bf").is_err());
        assert!(validate_email("@jee.bf").is_err());
        assert!(validate_email("jury@localhost").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret").is_ok());
        assert!(validate_password("short").is_err());
    }
}
