use super::ValidationError;

const MAX_USERNAME_LENGTH: usize = 100;

/// Normalizes an optional display name.
///
/// Missing or blank input means "no username"; otherwise the trimmed value
/// is kept as long as it fits.
pub fn validate_username(username: Option<&str>) -> Result<Option<String>, ValidationError> {
    let Some(trimmed) = username.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if trimmed.chars().count() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooLong(MAX_USERNAME_LENGTH));
    }

    Ok(Some(trimmed.to_owned()))
}
