// SQLite UserRepository Implementation

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use userhub_core::domain::{User, UserId};
use userhub_core::error::{AppError, Result};
use userhub_core::port::UserRepository;

use crate::classify::is_connection_error;
use crate::error::map_sqlx_error;
use crate::pool::ResilientPool;

pub struct SqliteUserRepository {
    pool: Arc<ResilientPool>,
}

impl SqliteUserRepository {
    pub fn new(pool: Arc<ResilientPool>) -> Self {
        Self { pool }
    }

    /// Classify a failure that happened during the database call itself.
    /// A broken session closes the whole pool so the next caller is forced
    /// through reconnect; anything else passes through unchanged.
    async fn on_query_error(&self, err: sqlx::Error) -> AppError {
        if is_connection_error(&err) {
            warn!(error = %err, "Connection lost mid-query, closing pool");
            self.pool.close().await;
            AppError::Unavailable(Box::new(err))
        } else {
            map_sqlx_error(err)
        }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, username: &str, email: &str) -> Result<User> {
        let mut conn = self.pool.acquire().await?;

        // Identity comes back from the driver itself; no re-query fallback
        let result = sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (username, email) VALUES (?, ?) RETURNING id",
        )
        .bind(username)
        .bind(email)
        .fetch_one(&mut *conn)
        .await;
        // Hand the connection back before error handling: closing the pool
        // waits for every checked-out connection
        drop(conn);

        match result {
            Ok(id) => Ok(User::new(id, username, email)),
            Err(e) => Err(self.on_query_error(e).await),
        }
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        let mut conn = self.pool.acquire().await?;

        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, email FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await;
        drop(conn);

        match row {
            Ok(found) => Ok(found.map(UserRow::into_user)),
            Err(e) => Err(self.on_query_error(e).await),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.username,
            email: self.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migration::run_migrations;
    use crate::pool::{PoolConnector, PoolSettings};
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
    use std::str::FromStr;
    use std::time::Duration;

    async fn setup_repo(tag: &str) -> (Arc<ResilientPool>, SqliteUserRepository) {
        let settings = PoolSettings {
            database_url: format!("sqlite:file:repo_{tag}?mode=memory&cache=shared"),
            ..PoolSettings::default()
        };
        let pool = Arc::new(ResilientPool::new(settings));
        run_migrations(&pool).await.unwrap();
        (pool.clone(), SqliteUserRepository::new(pool))
    }

    #[tokio::test]
    async fn test_create_then_fetch_round_trip() {
        let (_pool, repo) = setup_repo("roundtrip").await;

        let created = repo.create("alice", "alice@example.com").await.unwrap();
        assert!(created.id > 0);

        let fetched = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_identities_are_distinct() {
        let (_pool, repo) = setup_repo("distinct").await;

        let a = repo.create("alice", "alice@example.com").await.unwrap();
        let b = repo.create("bob", "bob@example.com").await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_find_absent_is_none_not_error() {
        let (_pool, repo) = setup_repo("absent").await;

        let found = repo.find_by_id(999_999).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_passes_through_unchanged() {
        let (pool, repo) = setup_repo("duplicate").await;

        repo.create("alice", "alice@example.com").await.unwrap();
        let err = repo.create("alice", "other@example.com").await.unwrap_err();

        // A constraint violation is a caller error: no unavailable signal,
        // and the pool must still be live
        match err {
            AppError::Database(msg) => assert!(msg.to_uppercase().contains("UNIQUE")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(pool.is_connected().await);
    }

    /// File-backed connector with a rollback journal, so an external change
    /// to the database file is noticed at the next read transaction (WAL
    /// readers go through the wal-index instead)
    struct PlainFileConnector;

    #[async_trait]
    impl PoolConnector for PlainFileConnector {
        async fn create(&self, settings: &PoolSettings) -> sqlx::Result<SqlitePool> {
            let options = SqliteConnectOptions::from_str(&settings.database_url)?
                .create_if_missing(true);

            SqlitePoolOptions::new()
                .max_connections(settings.max_connections)
                .acquire_timeout(settings.acquire_timeout)
                .connect_with(options)
                .await
        }
    }

    #[tokio::test]
    async fn test_connection_loss_mid_query_closes_pool_and_is_unavailable() {
        let path = std::env::temp_dir().join(format!(
            "userhub_repo_corrupt_{}.db",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let settings = PoolSettings {
            database_url: path.to_string_lossy().into_owned(),
            ..PoolSettings::default()
        };
        let pool = Arc::new(ResilientPool::with_connector(
            settings,
            Arc::new(PlainFileConnector),
        ));
        run_migrations(&pool).await.unwrap();

        let repo = SqliteUserRepository::new(pool.clone());
        let user = repo.create("alice", "alice@example.com").await.unwrap();

        // Clobber the database file behind the open connections; the next
        // read transaction re-checks the header and fails at query time,
        // while the connection is still checked out
        std::fs::write(&path, vec![b'x'; 1024]).unwrap();

        let err = tokio::time::timeout(Duration::from_secs(5), repo.find_by_id(user.id))
            .await
            .expect("mid-query failure must resolve, not hang")
            .unwrap_err();

        assert!(err.is_retryable());
        assert!(!pool.is_connected().await);

        let _ = std::fs::remove_file(&path);
    }
}
