// Port Layer - Interfaces for external dependencies

pub mod transaction;
pub mod user_repository;

// Re-exports
pub use transaction::{Transaction, UnitOfWork, UserTransaction};
pub use user_repository::UserRepository;

#[cfg(test)]
pub use user_repository::MockUserRepository;
