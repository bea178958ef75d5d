// SQLite Unit of Work
//
// Scoped single-connection transaction for multi-statement atomic
// sequences. Acquisition goes through the pool's retry path; once the
// scope is open, failures propagate to the caller untouched.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Sqlite, Transaction as SqlxTransaction};

use userhub_core::domain::{User, UserId};
use userhub_core::error::Result;
use userhub_core::port::{Transaction, UnitOfWork, UserTransaction};

use crate::error::map_sqlx_error;
use crate::pool::ResilientPool;

pub struct SqliteUnitOfWork {
    pool: Arc<ResilientPool>,
}

impl SqliteUnitOfWork {
    pub fn new(pool: Arc<ResilientPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWork for SqliteUnitOfWork {
    async fn begin(&self) -> Result<Box<dyn UserTransaction>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(SqliteUserTransaction { tx }))
    }
}

/// One open transaction holding one connection. Dropping without commit
/// rolls back and releases the connection (sqlx drop semantics).
pub struct SqliteUserTransaction {
    tx: SqlxTransaction<'static, Sqlite>,
}

#[async_trait]
impl Transaction for SqliteUserTransaction {
    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await.map_err(map_sqlx_error)
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.tx.rollback().await.map_err(map_sqlx_error)
    }
}

#[async_trait]
impl UserTransaction for SqliteUserTransaction {
    async fn insert_user(&mut self, username: &str, email: &str) -> Result<User> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (username, email) VALUES (?, ?) RETURNING id",
        )
        .bind(username)
        .bind(email)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(User::new(id, username, email))
    }

    async fn find_user(&mut self, id: UserId) -> Result<Option<User>> {
        let row: Option<(i64, String, String)> = sqlx::query_as(
            "SELECT id, username, email FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(|(id, username, email)| User::new(id, username, email)))
    }
}
