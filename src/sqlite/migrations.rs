//! Embedded `SQLite` migrations.
//!
//! Migrations are compiled into the binary and tracked by name in the
//! `_parlor_migrations` table, so running them on every start is cheap.
//!
//! ```rust,ignore
//! use parlor_auth::sqlite::migrations;
//!
//! migrations::run(&pool).await?;
//! ```

use sqlx::{Executor, SqlitePool};

const CORE_MIGRATIONS: &[(&str, &str)] = &[
    (
        "20250101000001_create_users_table",
        include_str!("../../migrations_sqlite/core/20250101000001_create_users_table.sql"),
    ),
    (
        "20250101000002_create_sessions_table",
        include_str!("../../migrations_sqlite/core/20250101000002_create_sessions_table.sql"),
    ),
];

/// Applies every migration that has not run yet, in order.
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    pool.execute(
        r"
        CREATE TABLE IF NOT EXISTS _parlor_migrations (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )
        ",
    )
    .await?;

    run_migrations(pool, CORE_MIGRATIONS).await
}

/// Statements are split on `;`, so migration files must not contain
/// semicolons inside string literals.
async fn run_migrations(pool: &SqlitePool, migrations: &[(&str, &str)]) -> Result<(), sqlx::Error> {
    for (name, sql) in migrations {
        let applied: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM _parlor_migrations WHERE name = ?)")
                .bind(*name)
                .fetch_one(pool)
                .await?;

        if applied {
            continue;
        }

        let mut tx = pool.begin().await?;
        for statement in sql.split(';') {
            let trimmed = statement.trim();
            if !trimmed.is_empty() {
                (&mut *tx).execute(trimmed).await?;
            }
        }
        sqlx::query("INSERT INTO _parlor_migrations (name) VALUES (?)")
            .bind(*name)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        log::info!(target: "parlor_auth", "msg=\"migration applied\", name={name}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_pool() -> SqlitePool {
        sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_run_is_idempotent() {
        let pool = memory_pool().await;

        run(&pool).await.unwrap();
        run(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _parlor_migrations")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, i64::try_from(CORE_MIGRATIONS.len()).unwrap());
    }

    #[tokio::test]
    async fn test_tables_exist() {
        let pool = memory_pool().await;
        run(&pool).await.unwrap();

        for table in ["users", "sessions"] {
            let exists: bool = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?)",
            )
            .bind(table)
            .fetch_one(&pool)
            .await
            .unwrap();
            assert!(exists, "missing table {table}");
        }
    }
}
