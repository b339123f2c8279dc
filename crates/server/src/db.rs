use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database '{url}': {source} (check if the data directory is writable)")]
    Connection { url: String, source: sqlx::Error },
    #[error("Failed to run database migrations: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, DatabaseError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map_err(|e| DatabaseError::Connection {
            url: database_url.to_string(),
            source: e,
        })?;

    // WAL keeps reads open while an upsert commits
    sqlx::query("PRAGMA journal_mode=WAL")
        .execute(&pool)
        .await
        .map_err(|e| DatabaseError::Connection {
            url: database_url.to_string(),
            source: e,
        })?;

    // Parallel ingest runs wait for the lock instead of failing
    sqlx::query("PRAGMA busy_timeout=5000")
        .execute(&pool)
        .await
        .map_err(|e| DatabaseError::Connection {
            url: database_url.to_string(),
            source: e,
        })?;

    sqlx::migrate!("../../migrations").run(&pool).await?;

    Ok(pool)
}
