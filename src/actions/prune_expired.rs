//! Run periodically (cron, a timer task) to keep the sessions table from
//! growing without bound. Lazy expiry only removes rows that are looked up.

use crate::clock::{Clock, SystemClock};
use crate::session::SessionManager;
use crate::{AuthError, SessionRepository};

pub struct PruneExpiredSessionsAction<R, C = SystemClock> {
    sessions: SessionManager<R, C>,
}

impl<R: SessionRepository, C: Clock> PruneExpiredSessionsAction<R, C> {
    pub fn new(sessions: SessionManager<R, C>) -> Self {
        Self { sessions }
    }

    /// Returns the number of sessions removed.
    pub async fn execute(&self) -> Result<u64, AuthError> {
        self.sessions.delete_expired_sessions().await
    }
}
