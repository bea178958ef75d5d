// Application Layer - Use Cases and Command Dispatch

pub mod dispatcher;
pub mod service;

// Re-exports
pub use dispatcher::{CommandBus, CommandOutcome};
pub use service::UserService;
