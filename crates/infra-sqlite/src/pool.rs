// Resilient SQLite pool
//
// Wraps the lazily-created sqlx pool handle with bounded retry and
// reset-on-connection-failure. The mutex guards handle creation and teardown
// only; acquiring a connection from a live handle, retry sleeps and query
// execution all run outside it, so independent callers do not serialize.

use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::Sqlite;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use userhub_core::error::{AppError, Result};

use crate::classify::is_connection_error;
use crate::error::map_sqlx_error;

/// Pool configuration. Set once at construction, never mutated.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub database_url: String,
    pub min_connections: u32,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    /// Extra acquire attempts beyond the first (total tries = 1 + this)
    pub retry_attempts: u32,
    /// Pause between attempts
    pub retry_delay: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            min_connections: 1,
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
            retry_attempts: 2,
            retry_delay: Duration::from_millis(200),
        }
    }
}

/// Creates the underlying driver pool. Injected so tests can count and
/// fail pool creation deterministically.
#[async_trait]
pub trait PoolConnector: Send + Sync {
    async fn create(&self, settings: &PoolSettings) -> sqlx::Result<SqlitePool>;
}

/// Production connector: WAL mode, busy timeout, foreign keys on
pub struct SqliteConnector;

#[async_trait]
impl PoolConnector for SqliteConnector {
    async fn create(&self, settings: &PoolSettings) -> sqlx::Result<SqlitePool> {
        let options = SqliteConnectOptions::from_str(&settings.database_url)?
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true)
            .create_if_missing(true);

        SqlitePoolOptions::new()
            .min_connections(settings.min_connections)
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect_with(options)
            .await
    }
}

/// Database pool wrapper with lazy connect, bounded retry and atomic reset.
///
/// At most one live handle exists at a time: a reset fully closes the old
/// handle under the lock before any caller can create a new one.
pub struct ResilientPool {
    settings: PoolSettings,
    connector: Arc<dyn PoolConnector>,
    handle: Mutex<Option<SqlitePool>>,
}

impl ResilientPool {
    pub fn new(settings: PoolSettings) -> Self {
        Self::with_connector(settings, Arc::new(SqliteConnector))
    }

    pub fn with_connector(settings: PoolSettings, connector: Arc<dyn PoolConnector>) -> Self {
        Self {
            settings,
            connector,
            handle: Mutex::new(None),
        }
    }

    pub fn settings(&self) -> &PoolSettings {
        &self.settings
    }

    /// Whether a live handle currently exists
    pub async fn is_connected(&self) -> bool {
        self.handle.lock().await.is_some()
    }

    /// Eagerly create the underlying pool. Idempotent when already
    /// connected. Not retried here; retry happens one level up, in the
    /// acquire path.
    pub async fn connect(&self) -> Result<()> {
        self.ensure_pool().await.map(|_| ()).map_err(map_sqlx_error)
    }

    /// Get a live connection, lazily connecting and retrying transient
    /// connection loss up to the configured attempt budget. Exhausted
    /// retries surface `AppError::Unavailable` chaining the last cause;
    /// non-connection failures propagate immediately with no reset.
    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>> {
        self.with_retry("acquire", |pool| async move { pool.acquire().await })
            .await
    }

    /// Begin a transaction, going through the same bounded-retry
    /// acquisition path as `acquire`. Failures inside the open transaction
    /// are the caller's to handle.
    pub async fn begin(&self) -> Result<sqlx::Transaction<'static, Sqlite>> {
        self.with_retry("begin", |pool| async move { pool.begin().await })
            .await
    }

    /// Tear down the handle so the next caller is forced through
    /// reconnect. Safe to call repeatedly or when already absent.
    pub async fn reset(&self) {
        let mut guard = self.handle.lock().await;
        if let Some(pool) = guard.take() {
            pool.close().await;
            info!("Database pool reset, next caller reconnects");
        }
    }

    /// Idempotent full teardown
    pub async fn close(&self) {
        self.reset().await;
    }

    /// Clone the live handle, creating it under the lock when absent.
    /// The clone is used outside the lock so waiting for a free connection
    /// never blocks handle creation or teardown.
    async fn ensure_pool(&self) -> sqlx::Result<SqlitePool> {
        let mut guard = self.handle.lock().await;
        if let Some(pool) = guard.as_ref() {
            return Ok(pool.clone());
        }

        debug!(url = %self.settings.database_url, "Pool handle absent, connecting");
        match self.connector.create(&self.settings).await {
            Ok(pool) => {
                info!("Database pool connected");
                *guard = Some(pool.clone());
                Ok(pool)
            }
            Err(e) => {
                error!(error = %e, "Failed to create database pool");
                Err(e)
            }
        }
    }

    async fn with_retry<T, F, Fut>(&self, operation: &'static str, op: F) -> Result<T>
    where
        F: Fn(SqlitePool) -> Fut,
        Fut: Future<Output = sqlx::Result<T>>,
    {
        let total_tries = 1 + self.settings.retry_attempts;
        let mut attempt = 0u32;

        loop {
            attempt += 1;

            let result = match self.ensure_pool().await {
                Ok(pool) => op(pool).await,
                Err(e) => Err(e),
            };

            match result {
                Ok(value) => return Ok(value),
                Err(e) if is_connection_error(&e) => {
                    warn!(
                        attempt,
                        total_tries,
                        operation,
                        error = %e,
                        "Connection-level failure, resetting pool"
                    );
                    self.reset().await;

                    if attempt < total_tries {
                        tokio::time::sleep(self.settings.retry_delay).await;
                        continue;
                    }
                    return Err(AppError::Unavailable(Box::new(e)));
                }
                // Bad query, constraint violation, configuration error:
                // no retry, no reset
                Err(e) => return Err(map_sqlx_error(e)),
            }
        }
    }
}
