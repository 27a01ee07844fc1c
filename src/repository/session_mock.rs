#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::session::SessionRepository;
use crate::AuthError;
use crate::session::Session;

/// In-memory session store.
///
/// [`MockSessionRepository::set_unavailable`] makes every call fail with a
/// `DatabaseError`, which is how the fail-open paths are tested.
#[derive(Clone, Default)]
pub struct MockSessionRepository {
    pub sessions: Arc<Mutex<Vec<Session>>>,
    unavailable: Arc<AtomicBool>,
}

impl MockSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), AuthError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AuthError::DatabaseError("session store unavailable".to_owned()));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn create_session(&self, session: &Session) -> Result<(), AuthError> {
        self.check_available()?;
        let mut sessions = self.sessions.lock().unwrap();
        if sessions.iter().any(|s| s.id == session.id) {
            return Err(AuthError::DatabaseError(
                "UNIQUE constraint failed: sessions.id".to_owned(),
            ));
        }
        sessions.push(session.clone());
        drop(sessions);
        Ok(())
    }

    async fn find_session(&self, session_id: &str) -> Result<Option<Session>, AuthError> {
        self.check_available()?;
        let sessions = self.sessions.lock().unwrap();
        Ok(sessions.iter().find(|s| s.id == session_id).cloned())
    }

    async fn delete_session(&self, session_id: &str) -> Result<(), AuthError> {
        self.check_available()?;
        self.sessions
            .lock()
            .unwrap()
            .retain(|s| s.id != session_id);
        Ok(())
    }

    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64, AuthError> {
        self.check_available()?;
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|s| s.expires_at >= now);
        let pruned = before.saturating_sub(sessions.len());
        drop(sessions);
        Ok(u64::try_from(pruned).unwrap_or(u64::MAX))
    }

    async fn find_user_sessions(&self, user_id: &str) -> Result<Vec<Session>, AuthError> {
        self.check_available()?;
        let mut found: Vec<Session> = self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn delete_user_sessions(&self, user_id: &str) -> Result<u64, AuthError> {
        self.check_available()?;
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|s| s.user_id != user_id);
        let removed = before.saturating_sub(sessions.len());
        drop(sessions);
        Ok(u64::try_from(removed).unwrap_or(u64::MAX))
    }
}
