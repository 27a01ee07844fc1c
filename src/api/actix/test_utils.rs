//! Helpers for testing handlers behind [`SessionAuth`](super::SessionAuth).

use actix_web::cookie::Cookie;
use actix_web::test::TestRequest;

use crate::clock::Clock;
use crate::crypto::{Argon2Hasher, PasswordHasher, generate_random_string, generate_user_id};
use crate::session::{SessionManager, SessionToken};
use crate::{AuthError, AuthUser, NewUser, SecretString, SessionRepository, UserRepository};

/// Creates a user and signs them in.
pub struct TestUserBuilder<'a, U, R, C> {
    users: &'a U,
    manager: &'a SessionManager<R, C>,
    email: String,
    password: String,
    username: Option<String>,
}

impl<'a, U, R, C> TestUserBuilder<'a, U, R, C>
where
    U: UserRepository,
    R: SessionRepository,
    C: Clock,
{
    pub fn new(users: &'a U, manager: &'a SessionManager<R, C>) -> Self {
        Self {
            users,
            manager,
            email: format!("test-{}@example.com", generate_random_string(12)),
            password: "testpassword123".to_owned(),
            username: None,
        }
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub async fn build(self) -> Result<(AuthUser, SessionToken), AuthError> {
        let hashed_password = Argon2Hasher::default().hash(&SecretString::new(self.password))?;

        let user = self
            .users
            .create_user(&NewUser {
                id: generate_user_id(),
                email: self.email,
                username: self.username,
                hashed_password,
            })
            .await?;

        let (token, _) = self.manager.create_session(&user.id).await?;

        Ok((user, token))
    }
}

pub trait ActingAs {
    /// Attaches `token` as the `session` cookie.
    #[must_use]
    fn acting_as(self, token: &SessionToken) -> Self;
}

impl ActingAs for TestRequest {
    fn acting_as(self, token: &SessionToken) -> Self {
        self.cookie(Cookie::new(
            "session",
            token.encode().expose_secret().to_owned(),
        ))
    }
}
