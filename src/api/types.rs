use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::Session;
use crate::{AuthError, AuthUser, SecretString};

/// Missing fields deserialize as empty so the action can answer with
/// `MissingCredentials` instead of a body parse error.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: SecretString,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: SecretString,
}

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub username: Option<String>,
}

impl From<AuthUser> for UserResponse {
    fn from(user: AuthUser) -> Self {
        UserResponse {
            id: user.id,
            email: user.email,
            username: user.username,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub user: UserResponse,
}

/// Body of `GET /auth/user`. `user` is `null` when anonymous.
#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub user: Option<UserResponse>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// The session this request was made with.
    pub current: bool,
}

impl SessionResponse {
    pub fn from_session(session: Session, current_id: &str) -> Self {
        SessionResponse {
            current: session.id == current_id,
            id: session.id,
            created_at: session.created_at,
            expires_at: session.expires_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        let code = match &err {
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::UserAlreadyExists => "USER_ALREADY_EXISTS",
            AuthError::MissingCredentials => "MISSING_CREDENTIALS",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::InvalidEmail => "INVALID_EMAIL",
            AuthError::InvalidPassword => "INVALID_PASSWORD",
            AuthError::PasswordHashError => "PASSWORD_HASH_ERROR",
            AuthError::Unauthenticated => "UNAUTHENTICATED",
            AuthError::SessionNotFound => "SESSION_NOT_FOUND",
            AuthError::Validation(_) => "VALIDATION_ERROR",
            AuthError::DatabaseError(_) => "DATABASE_ERROR",
            AuthError::ConfigurationError(_) => "CONFIGURATION_ERROR",
        };

        // storage and configuration details stay in the logs
        let error = match &err {
            AuthError::DatabaseError(_) | AuthError::ConfigurationError(_) => {
                "Internal server error".to_owned()
            }
            _ => err.to_string(),
        };

        ErrorResponse {
            error,
            code: code.to_owned(),
        }
    }
}
