//! JSON-RPC Server
//!
//! Serves the user API over JSON-RPC 2.0 on localhost TCP.

use std::sync::Arc;

use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::RpcModule;
use tracing::info;

use crate::handler::RpcHandler;
use crate::types::{CreateUserRequest, GetUserRequest};

const DEFAULT_RPC_HOST: &str = "127.0.0.1";
const DEFAULT_RPC_PORT: u16 = 9530;

/// RPC Server Configuration
pub struct RpcServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
        }
    }
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

impl RpcServer {
    pub fn new(config: RpcServerConfig, handler: RpcHandler) -> Self {
        Self {
            config,
            handler: Arc::new(handler),
        }
    }

    /// Start the JSON-RPC server.
    ///
    /// Binds to localhost only; this service has no external surface.
    pub async fn start(self) -> Result<ServerHandle, String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        info!(
            host = %self.config.host,
            port = %self.config.port,
            "Starting JSON-RPC server"
        );

        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|e| format!("Failed to build server on {}: {}", addr, e))?;

        let mut module = RpcModule::new(());

        let handler = self.handler.clone();
        module
            .register_async_method("user.create.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: CreateUserRequest = params.parse()?;
                    handler.create_user(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("user.get.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: GetUserRequest = params.parse()?;
                    handler.get_user(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        info!("JSON-RPC server started successfully");

        let handle = server.start(module);
        Ok(handle)
    }
}
