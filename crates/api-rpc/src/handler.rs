//! RPC Method Handlers
//!
//! Bridges JSON-RPC methods to the command bus.

use std::sync::Arc;

use jsonrpsee::types::ErrorObjectOwned;
use tracing::debug;
use uuid::Uuid;

use userhub_core::application::{CommandBus, CommandOutcome};
use userhub_core::domain::{Command, CreateUser, GetUser};
use userhub_core::error::AppError;

use crate::error::to_rpc_error;
use crate::types::{CreateUserRequest, GetUserRequest, UserResponse};

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    bus: Arc<CommandBus>,
}

impl RpcHandler {
    pub fn new(bus: Arc<CommandBus>) -> Self {
        Self { bus }
    }

    /// user.create.v1
    pub async fn create_user(
        &self,
        req: CreateUserRequest,
    ) -> Result<UserResponse, ErrorObjectOwned> {
        let request_id = Uuid::new_v4().to_string();
        debug!(request_id = %request_id, "user.create.v1");

        let outcome = self
            .bus
            .dispatch(
                Command::CreateUser(CreateUser {
                    username: req.username,
                    email: req.email,
                }),
                &request_id,
            )
            .await
            .map_err(to_rpc_error)?;

        match outcome {
            CommandOutcome::User(user) => Ok(user.into()),
            other => Err(to_rpc_error(AppError::Internal(format!(
                "unexpected outcome for create_user: {other:?}"
            )))),
        }
    }

    /// user.get.v1
    pub async fn get_user(&self, req: GetUserRequest) -> Result<UserResponse, ErrorObjectOwned> {
        let request_id = Uuid::new_v4().to_string();
        debug!(request_id = %request_id, user_id = req.user_id, "user.get.v1");

        let outcome = self
            .bus
            .dispatch(Command::GetUser(GetUser { user_id: req.user_id }), &request_id)
            .await
            .map_err(to_rpc_error)?;

        match outcome {
            CommandOutcome::MaybeUser(Some(user)) => Ok(user.into()),
            CommandOutcome::MaybeUser(None) => Err(to_rpc_error(AppError::NotFound(format!(
                "User {} not found",
                req.user_id
            )))),
            other => Err(to_rpc_error(AppError::Internal(format!(
                "unexpected outcome for get_user: {other:?}"
            )))),
        }
    }
}
