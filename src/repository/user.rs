use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AuthError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// `user_` followed by 16 random characters.
    pub id: String,
    pub email: String,
    pub username: Option<String>,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when an account is created. Timestamps are set by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: String,
    pub email: String,
    pub username: Option<String>,
    pub hashed_password: String,
}

#[cfg(any(test, feature = "mocks"))]
impl AuthUser {
    pub fn mock() -> Self {
        Self::mock_from_credentials("test@example.com", "fakehashedpassword")
    }

    pub fn mock_from_credentials(email: &str, hashed_password: &str) -> Self {
        let now = Utc::now();
        AuthUser {
            id: crate::crypto::generate_user_id(),
            email: email.to_owned(),
            username: None,
            hashed_password: hashed_password.to_owned(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// # Errors
    ///
    /// `UserAlreadyExists` when the email is taken, `DatabaseError` otherwise.
    async fn create_user(&self, user: &NewUser) -> Result<AuthUser, AuthError>;

    async fn find_user_by_id(&self, id: &str) -> Result<Option<AuthUser>, AuthError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError>;

    /// Deletes the account. The store removes the user's sessions with it.
    ///
    /// # Errors
    ///
    /// `UserNotFound` when no row matched.
    async fn delete_user(&self, id: &str) -> Result<(), AuthError>;
}
