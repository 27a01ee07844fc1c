use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::AuthError;
use crate::api::ErrorResponse;

/// [`AuthError`] rendered as a `{error, code}` JSON body.
#[derive(Debug)]
pub struct ApiError {
    pub error: AuthError,
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        ApiError { error }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.error {
            AuthError::MissingCredentials
            | AuthError::InvalidEmail
            | AuthError::InvalidPassword
            | AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials | AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthError::UserAlreadyExists => StatusCode::CONFLICT,
            AuthError::UserNotFound | AuthError::SessionNotFound => StatusCode::NOT_FOUND,
            AuthError::PasswordHashError
            | AuthError::DatabaseError(_)
            | AuthError::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::from(self.error.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AuthError::MissingCredentials, StatusCode::BAD_REQUEST),
            (AuthError::InvalidEmail, StatusCode::BAD_REQUEST),
            (AuthError::InvalidPassword, StatusCode::BAD_REQUEST),
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (AuthError::UserAlreadyExists, StatusCode::CONFLICT),
            (AuthError::SessionNotFound, StatusCode::NOT_FOUND),
            (
                AuthError::DatabaseError("locked".to_owned()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status_code(), status);
        }
    }
}
