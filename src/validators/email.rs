use std::sync::LazyLock;

use regex::Regex;

use super::ValidationError;

/// Something, an `@`, something, a dot, something. No whitespace, one `@`.
#[allow(clippy::unwrap_used)]
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

const MAX_EMAIL_LENGTH: usize = 254;

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmailEmpty);
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::EmailTooLong);
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::EmailInvalidFormat);
    }

    Ok(())
}

/// Permissive structural check: an `@` and a dot in the domain part.
pub fn is_valid_email(email: &str) -> bool {
    validate_email(email).is_ok()
}
