use chrono::Duration;

use super::{Session, SessionConfig, SessionToken};
use crate::clock::{Clock, SystemClock};
use crate::crypto::{
    generate_session_id, generate_session_secret, hash_session_secret, verify_session_secret,
};
use crate::{AuthError, SessionRepository};

pub const SESSION_LIFETIME_DAYS: i64 = 30;

/// Creates, resolves and revokes sessions.
///
/// The manager holds no state besides its configuration; every call goes to
/// the repository. Expired rows are deleted lazily when they are looked up,
/// and in bulk by [`SessionManager::delete_expired_sessions`].
#[derive(Clone)]
pub struct SessionManager<R, C = SystemClock> {
    repository: R,
    clock: C,
    lifetime: Duration,
    revoke_on_secret_mismatch: bool,
}

impl<R: SessionRepository> SessionManager<R> {
    pub fn new(repository: R) -> Self {
        Self::with_clock(repository, SystemClock)
    }
}

impl<R: SessionRepository, C: Clock> SessionManager<R, C> {
    pub fn with_clock(repository: R, clock: C) -> Self {
        Self {
            repository,
            clock,
            lifetime: Duration::days(SESSION_LIFETIME_DAYS),
            revoke_on_secret_mismatch: false,
        }
    }

    #[must_use]
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }

    #[must_use]
    pub fn with_revoke_on_secret_mismatch(mut self, revoke: bool) -> Self {
        self.revoke_on_secret_mismatch = revoke;
        self
    }

    /// Applies the session policy from a [`SessionConfig`].
    #[must_use]
    pub fn with_config(self, config: &SessionConfig) -> Self {
        self.with_lifetime(config.session_lifetime)
            .with_revoke_on_secret_mismatch(config.revoke_on_secret_mismatch)
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Starts a session for `user_id`.
    ///
    /// The returned token is the only place the plaintext secret exists; the
    /// stored row carries its SHA-256 digest.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "session.create", skip(self), err)
    )]
    pub async fn create_session(&self, user_id: &str) -> Result<(SessionToken, Session), AuthError> {
        let id = generate_session_id();
        let secret = generate_session_secret();
        let now = self.clock.now();

        let session = Session {
            id: id.clone(),
            user_id: user_id.to_owned(),
            secret_hash: hash_session_secret(secret.expose_secret()),
            created_at: now,
            expires_at: now + self.lifetime,
        };

        self.repository.create_session(&session).await?;

        log::info!(
            target: "parlor_auth::session",
            "msg=\"session created\", user_id={user_id}, expires_at={}",
            session.expires_at
        );

        Ok((SessionToken::new(id, secret), session))
    }

    /// Looks up a session by id, deleting it if it has expired.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "session.get_valid", skip(self), err)
    )]
    pub async fn get_valid_session(&self, session_id: &str) -> Result<Option<Session>, AuthError> {
        let Some(session) = self.repository.find_session(session_id).await? else {
            return Ok(None);
        };

        if session.is_expired_at(self.clock.now()) {
            self.repository.delete_session(&session.id).await?;
            log::debug!(
                target: "parlor_auth::session",
                "msg=\"expired session removed\", user_id={}",
                session.user_id
            );
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Resolves a token to its session if the id exists, has not expired and
    /// the secret matches the stored digest.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "session.validate", skip_all, err)
    )]
    pub async fn validate_session_token(
        &self,
        token: &SessionToken,
    ) -> Result<Option<Session>, AuthError> {
        let Some(session) = self.get_valid_session(token.id()).await? else {
            return Ok(None);
        };

        if !verify_session_secret(token.secret().expose_secret(), &session.secret_hash) {
            log::warn!(
                target: "parlor_auth::session",
                "msg=\"session secret mismatch\", user_id={}, revoked={}",
                session.user_id,
                self.revoke_on_secret_mismatch
            );
            if self.revoke_on_secret_mismatch {
                self.repository.delete_session(&session.id).await?;
            }
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Revokes one session. Unknown ids are ignored.
    pub async fn delete_session(&self, session_id: &str) -> Result<(), AuthError> {
        self.repository.delete_session(session_id).await
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "session.delete_expired", skip(self), err)
    )]
    pub async fn delete_expired_sessions(&self) -> Result<u64, AuthError> {
        let removed = self
            .repository
            .delete_expired_sessions(self.clock.now())
            .await?;

        log::info!(
            target: "parlor_auth::session",
            "msg=\"expired sessions pruned\", count={removed}"
        );

        Ok(removed)
    }

    /// The user's unexpired sessions, newest first.
    pub async fn list_user_sessions(&self, user_id: &str) -> Result<Vec<Session>, AuthError> {
        let now = self.clock.now();
        let sessions = self.repository.find_user_sessions(user_id).await?;
        Ok(sessions
            .into_iter()
            .filter(|s| !s.is_expired_at(now))
            .collect())
    }

    /// Revokes every session the user holds ("log out everywhere").
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "session.delete_for_user", skip(self), err)
    )]
    pub async fn delete_user_sessions(&self, user_id: &str) -> Result<u64, AuthError> {
        let removed = self.repository.delete_user_sessions(user_id).await?;

        log::info!(
            target: "parlor_auth::session",
            "msg=\"user sessions revoked\", user_id={user_id}, count={removed}"
        );

        Ok(removed)
    }
}
