//! `SQLite` storage, enabled by the `sqlx_sqlite` feature.
//!
//! Both repositories share one [`SqlitePool`]. The pool is owned by the
//! caller: open it with [`connect`], hand clones to [`create_repositories`],
//! and close it on shutdown.

pub mod migrations;
mod session;
mod user;

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub use session::SqliteSessionRepository;
pub use user::SqliteUserRepository;

use crate::AuthError;

/// Creates the repositories over a shared pool.
pub fn create_repositories(pool: SqlitePool) -> (SqliteUserRepository, SqliteSessionRepository) {
    (
        SqliteUserRepository::new(pool.clone()),
        SqliteSessionRepository::new(pool),
    )
}

/// Opens a pool with foreign keys enforced and applies pending migrations.
///
/// In-memory databases are private to a connection, so they get a single
/// connection that is never recycled.
pub async fn connect(database_url: &str) -> Result<SqlitePool, AuthError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| {
            AuthError::ConfigurationError(format!("invalid database url: {e}"))
        })?
        .foreign_keys(true)
        .create_if_missing(true);

    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
    };

    let pool = pool_options.connect_with(options).await.map_err(|e| {
        log::error!(target: "parlor_auth", "msg=\"database connection failed\", error=\"{e}\"");
        AuthError::DatabaseError(e.to_string())
    })?;

    migrations::run(&pool).await.map_err(|e| {
        log::error!(target: "parlor_auth", "msg=\"migration failed\", error=\"{e}\"");
        AuthError::DatabaseError(e.to_string())
    })?;

    Ok(pool)
}
