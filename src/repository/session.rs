//! Session repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::AuthError;
use crate::session::Session;

/// Persistence for session rows.
///
/// Rows are written once and only ever deleted; there is no update path.
/// Expiry decisions belong to [`SessionManager`](crate::SessionManager),
/// which passes its own notion of "now" into the bulk delete.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Inserts a new session row.
    async fn create_session(&self, session: &Session) -> Result<(), AuthError>;

    /// Finds a session by its public id.
    async fn find_session(&self, session_id: &str) -> Result<Option<Session>, AuthError>;

    /// Deletes a session. Deleting a missing id is not an error.
    async fn delete_session(&self, session_id: &str) -> Result<(), AuthError>;

    /// Deletes every row with `expires_at < now`.
    ///
    /// Returns the number of sessions removed.
    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64, AuthError>;

    /// All sessions owned by a user, newest first.
    async fn find_user_sessions(&self, user_id: &str) -> Result<Vec<Session>, AuthError>;

    /// Deletes all sessions owned by a user.
    ///
    /// Returns the number of sessions removed.
    async fn delete_user_sessions(&self, user_id: &str) -> Result<u64, AuthError>;
}
