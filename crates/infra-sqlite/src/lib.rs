// Userhub Infrastructure - SQLite Adapter
// Implements: UserRepository, UnitOfWork on top of a resilient pool wrapper

mod classify;
mod error;
mod migration;
mod pool;
mod unit_of_work;
mod user_repository;

pub use classify::is_connection_error;
pub use error::map_sqlx_error;
pub use migration::run_migrations;
pub use pool::{PoolConnector, PoolSettings, ResilientPool, SqliteConnector};
pub use unit_of_work::{SqliteUnitOfWork, SqliteUserTransaction};
pub use user_repository::SqliteUserRepository;

// Note: sqlx::Error conversion lives here (orphan rules prevent a
// From<sqlx::Error> impl on the core error type)
