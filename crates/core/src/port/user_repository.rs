// User Repository Port (Interface)

use crate::domain::{User, UserId};
use crate::error::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// Repository interface for User persistence.
///
/// Both operations may fail with `AppError::Unavailable` when the database
/// cannot be reached, or with a passthrough `AppError::Database` for any
/// other driver failure.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; the identity is assigned by the database
    async fn create(&self, username: &str, email: &str) -> Result<User>;

    /// Find a user by identity. Absence is `Ok(None)`, never an error.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>>;
}
