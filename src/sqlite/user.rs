use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::{AuthError, AuthUser, NewUser, UserRepository};

#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRecord {
    id: String,
    email: String,
    username: Option<String>,
    hashed_password: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRecord> for AuthUser {
    fn from(row: UserRecord) -> Self {
        AuthUser {
            id: row.id,
            email: row.email,
            username: row.username,
            hashed_password: row.hashed_password,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn database_error(operation: &str, e: &sqlx::Error) -> AuthError {
    log::error!(target: "parlor_auth", "msg=\"database error\", operation=\"{operation}\", error=\"{e}\"");
    AuthError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, user), fields(user_id = %user.id), err)
    )]
    async fn create_user(&self, user: &NewUser) -> Result<AuthUser, AuthError> {
        let now = Utc::now();
        let row: UserRecord = sqlx::query_as(
            "INSERT INTO users (id, email, username, hashed_password, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?) RETURNING id, email, username, hashed_password, created_at, updated_at"
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.hashed_password)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::UserAlreadyExists,
            _ => database_error("create_user", &e),
        })?;

        Ok(row.into())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_user_by_id(&self, id: &str) -> Result<Option<AuthUser>, AuthError> {
        let row: Option<UserRecord> = sqlx::query_as(
            "SELECT id, email, username, hashed_password, created_at, updated_at FROM users WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("find_user_by_id", &e))?;

        Ok(row.map(Into::into))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, email), err))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
        let row: Option<UserRecord> = sqlx::query_as(
            "SELECT id, email, username, hashed_password, created_at, updated_at FROM users WHERE email = ?"
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("find_user_by_email", &e))?;

        Ok(row.map(Into::into))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn delete_user(&self, id: &str) -> Result<(), AuthError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("delete_user", &e))?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }

        Ok(())
    }
}
