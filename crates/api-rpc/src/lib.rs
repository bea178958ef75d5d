//! Userhub JSON-RPC boundary
//!
//! Exposes the user commands over JSON-RPC 2.0 and maps application errors
//! to numeric RPC codes. The database-unavailable condition becomes a
//! dedicated retryable code so clients can back off and try again.

pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use handler::RpcHandler;
pub use server::{RpcServer, RpcServerConfig};
