use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::session::Session;
use crate::{AuthError, SessionRepository};

#[derive(Clone)]
pub struct SqliteSessionRepository {
    pool: SqlitePool,
}

impl SqliteSessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct SessionRecord {
    id: String,
    user_id: String,
    secret_hash: Vec<u8>,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl From<SessionRecord> for Session {
    fn from(row: SessionRecord) -> Self {
        Session {
            id: row.id,
            user_id: row.user_id,
            secret_hash: row.secret_hash,
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }
}

fn database_error(operation: &str, e: &sqlx::Error) -> AuthError {
    log::error!(target: "parlor_auth::session", "msg=\"database error\", operation=\"{operation}\", error=\"{e}\"");
    AuthError::DatabaseError(e.to_string())
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, session), fields(user_id = %session.user_id), err)
    )]
    async fn create_session(&self, session: &Session) -> Result<(), AuthError> {
        sqlx::query(
            "INSERT INTO sessions (id, user_id, secret_hash, created_at, expires_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&session.id)
        .bind(&session.user_id)
        .bind(&session.secret_hash)
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("create_session", &e))?;

        Ok(())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, err))]
    async fn find_session(&self, session_id: &str) -> Result<Option<Session>, AuthError> {
        let row: Option<SessionRecord> = sqlx::query_as(
            "SELECT id, user_id, secret_hash, created_at, expires_at FROM sessions WHERE id = ?",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("find_session", &e))?;

        Ok(row.map(Into::into))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, err))]
    async fn delete_session(&self, session_id: &str) -> Result<(), AuthError> {
        sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("delete_session", &e))?;

        Ok(())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64, AuthError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at < ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("delete_expired_sessions", &e))?;

        Ok(result.rows_affected())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_user_sessions(&self, user_id: &str) -> Result<Vec<Session>, AuthError> {
        let rows: Vec<SessionRecord> = sqlx::query_as(
            "SELECT id, user_id, secret_hash, created_at, expires_at FROM sessions WHERE user_id = ? ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("find_user_sessions", &e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn delete_user_sessions(&self, user_id: &str) -> Result<u64, AuthError> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("delete_user_sessions", &e))?;

        Ok(result.rows_affected())
    }
}
