// Command Types
//
// One closed sum type over the commands the service accepts. Dispatch is an
// exhaustive match (see application::dispatcher), so an unhandled command
// kind cannot exist at runtime.

use serde::{Deserialize, Serialize};

use crate::domain::user::UserId;

/// Create a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
}

/// Fetch a user by identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUser {
    pub user_id: UserId,
}

/// The closed set of commands accepted by the command bus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Command {
    CreateUser(CreateUser),
    GetUser(GetUser),
}

impl Command {
    /// Stable name of the command kind, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Command::CreateUser(_) => "create_user",
            Command::GetUser(_) => "get_user",
        }
    }
}
