use super::ValidationError;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Minimum-length gate. Length is counted in characters, not bytes.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::PasswordEmpty);
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    Ok(())
}

pub fn is_valid_password(password: &str) -> bool {
    validate_password(password).is_ok()
}
