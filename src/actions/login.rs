use crate::clock::{Clock, SystemClock};
use crate::crypto::{Argon2Hasher, PasswordHasher};
use crate::session::{Session, SessionManager, SessionToken};
use crate::{AuthError, AuthUser, SecretString, SessionRepository, UserRepository};

/// Hashed in place of a real check when the email is unknown.
const TIMING_DUMMY_PASSWORD: &str = "parlor-login-timing-dummy";

/// Checks credentials and opens a session.
pub struct LoginAction<U, R, C = SystemClock, H = Argon2Hasher> {
    users: U,
    sessions: SessionManager<R, C>,
    hasher: H,
}

impl<U, R, C> LoginAction<U, R, C>
where
    U: UserRepository,
    R: SessionRepository,
    C: Clock,
{
    pub fn new(users: U, sessions: SessionManager<R, C>) -> Self {
        Self::with_hasher(users, sessions, Argon2Hasher::default())
    }
}

impl<U, R, C, H> LoginAction<U, R, C, H>
where
    U: UserRepository,
    R: SessionRepository,
    C: Clock,
    H: PasswordHasher,
{
    pub fn with_hasher(users: U, sessions: SessionManager<R, C>, hasher: H) -> Self {
        LoginAction {
            users,
            sessions,
            hasher,
        }
    }

    /// Unknown emails and wrong passwords both return `InvalidCredentials`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "login", skip_all, err)
    )]
    pub async fn execute(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<(AuthUser, SessionToken, Session), AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let Some(user) = self.users.find_user_by_email(email).await? else {
            // spend the same hashing work as a real check
            let _ = self.hasher.hash(&SecretString::new(TIMING_DUMMY_PASSWORD));
            log::info!(target: "parlor_auth", "msg=\"login failed\", reason=\"unknown email\"");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.hashed_password)? {
            log::info!(
                target: "parlor_auth",
                "msg=\"login failed\", reason=\"wrong password\", user_id={}",
                user.id
            );
            return Err(AuthError::InvalidCredentials);
        }

        let (token, session) = self.sessions.create_session(&user.id).await?;

        log::info!(target: "parlor_auth", "msg=\"login success\", user_id={}", user.id);

        Ok((user, token, session))
    }
}
