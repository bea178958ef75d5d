// Transaction port for atomic multi-statement sequences

use crate::domain::{User, UserId};
use crate::error::Result;
use async_trait::async_trait;

/// Transaction trait for atomic multi-step operations.
///
/// The connection backing the scope is released when the boxed transaction
/// is consumed (or dropped, which rolls back).
#[async_trait]
pub trait Transaction: Send {
    /// Commit the transaction
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Rollback the transaction
    async fn rollback(self: Box<Self>) -> Result<()>;
}

/// Scoped acquisition of a single connection for atomic sequences
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Begin a new transaction scope
    async fn begin(&self) -> Result<Box<dyn UserTransaction>>;
}

/// User operations available within a transaction scope
#[async_trait]
pub trait UserTransaction: Transaction {
    /// Insert a user (within the transaction)
    async fn insert_user(&mut self, username: &str, email: &str) -> Result<User>;

    /// Find a user by identity (within the transaction)
    async fn find_user(&mut self, id: UserId) -> Result<Option<User>>;
}
