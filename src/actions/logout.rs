use crate::clock::{Clock, SystemClock};
use crate::session::SessionManager;
use crate::{AuthError, SessionRepository};

pub struct LogoutAction<R, C = SystemClock> {
    sessions: SessionManager<R, C>,
}

impl<R: SessionRepository, C: Clock> LogoutAction<R, C> {
    pub fn new(sessions: SessionManager<R, C>) -> Self {
        LogoutAction { sessions }
    }

    /// Deletes the session. Logging out twice is not an error.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "logout", skip_all, err)
    )]
    pub async fn execute(&self, session_id: &str) -> Result<(), AuthError> {
        self.sessions.delete_session(session_id).await?;

        log::info!(target: "parlor_auth", "msg=\"logout success\"");

        Ok(())
    }
}
