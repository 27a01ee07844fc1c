//! Input checks for signup and login.
//!
//! These are sanity checks, not policy engines: the email check is
//! structural only and the password rule is a single minimum length.

pub mod email;
pub mod password;
pub mod username;

pub use email::{is_valid_email, validate_email};
pub use password::{MIN_PASSWORD_LENGTH, is_valid_password, validate_password};
pub use username::validate_username;

use crate::AuthError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmailEmpty,
    EmailTooLong,
    EmailInvalidFormat,
    PasswordEmpty,
    PasswordTooShort(usize),
    UsernameTooLong(usize),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmailEmpty => write!(f, "Email cannot be empty"),
            Self::EmailTooLong => write!(f, "Email is too long (max 254 characters)"),
            Self::EmailInvalidFormat => write!(f, "Invalid email format"),
            Self::PasswordEmpty => write!(f, "Password cannot be empty"),
            Self::PasswordTooShort(min) => {
                write!(f, "Password must be at least {min} characters")
            }
            Self::UsernameTooLong(max) => {
                write!(f, "Username is too long (max {max} characters)")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for AuthError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::EmailEmpty
            | ValidationError::EmailTooLong
            | ValidationError::EmailInvalidFormat => AuthError::InvalidEmail,
            ValidationError::PasswordEmpty | ValidationError::PasswordTooShort(_) => {
                AuthError::InvalidPassword
            }
            ValidationError::UsernameTooLong(_) => AuthError::Validation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_to_auth_error() {
        assert_eq!(
            AuthError::from(ValidationError::EmailInvalidFormat),
            AuthError::InvalidEmail
        );
        assert_eq!(
            AuthError::from(ValidationError::PasswordTooShort(8)),
            AuthError::InvalidPassword
        );
        assert_eq!(
            AuthError::from(ValidationError::UsernameTooLong(100)),
            AuthError::Validation("Username is too long (max 100 characters)".to_owned())
        );
    }
}
