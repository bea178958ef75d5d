// Migration Runner

use tracing::info;

use userhub_core::error::Result;

use crate::error::map_sqlx_error;
use crate::pool::ResilientPool;

/// Run database migrations through the resilient pool
pub async fn run_migrations(pool: &ResilientPool) -> Result<()> {
    info!("Running database migrations...");

    let mut conn = pool.acquire().await?;

    let table_exists: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
    )
    .fetch_one(&mut *conn)
    .await
    .map_err(map_sqlx_error)?;

    let current_version: i64 = if table_exists > 0 {
        sqlx::query_scalar("SELECT version FROM schema_version ORDER BY version DESC LIMIT 1")
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_sqlx_error)?
            .unwrap_or(0)
    } else {
        0
    };
    drop(conn);

    info!("Current schema version: {}", current_version);

    if current_version < 1 {
        info!("Applying migration 001: users table");
        apply_migration(pool, 1, include_str!("../migrations/001_create_users.sql")).await?;
    }

    info!("All migrations applied successfully");
    Ok(())
}

/// Apply a single migration SQL file atomically
async fn apply_migration(pool: &ResilientPool, version: i64, sql: &str) -> Result<()> {
    let mut tx = pool.begin().await?;

    // Split by semicolon and execute each statement
    for statement in sql.split(';') {
        let clean_statement: String = statement
            .lines()
            .filter(|line| !line.trim().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string();

        if !clean_statement.is_empty() {
            sqlx::query(&clean_statement)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;
        }
    }

    sqlx::query("INSERT INTO schema_version (version) VALUES (?)")
        .bind(version)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

    tx.commit().await.map_err(map_sqlx_error)
}
