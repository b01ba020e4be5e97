//! Input validation for signup and credential changes
//!
//! Single source of truth for field validation so the services and any
//! outer surface agree on what counts as a valid email or password.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::ValidationError;

/// Practical subset of RFC 5322, compiled once and reused.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("Invalid email regex pattern")
});

/// Minimum password length accepted at signup and reset.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validates an email address.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::MissingField("email"));
    }

    if email.len() > 254 {
        return Err(ValidationError::InvalidEmail);
    }

    if EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Validates a password. Length is measured in characters, not bytes, so a
/// multibyte password is not over-counted.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::MissingField("password"));
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::WeakPassword);
    }

    Ok(())
}

/// Validates a display name.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingField("name"));
    }

    Ok(())
}
