// Domain Layer - Pure business logic and entities

pub mod command;
pub mod error;
pub mod user;

// Re-exports
pub use command::{Command, CreateUser, GetUser};
pub use error::DomainError;
pub use user::{User, UserId};
