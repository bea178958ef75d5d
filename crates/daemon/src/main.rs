//! Userhub - Main Entry Point
//!
//! Composition root: wires the resilient pool, repository, unit of work,
//! command bus and RPC server, and owns the init/shutdown call pair.

mod settings;

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use userhub_api_rpc::{RpcHandler, RpcServer, RpcServerConfig};
use userhub_core::application::{CommandBus, UserService};
use userhub_infra_sqlite::{run_migrations, ResilientPool, SqliteUserRepository};

use crate::settings::Settings;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging
    let log_format = std::env::var("USERHUB_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("userhub=info"))
        .expect("Failed to create env filter");

    match log_format.as_str() {
        "json" => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            // Development: pretty formatting with colors
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    info!("Userhub v{} starting...", VERSION);

    // 2. Load configuration
    let settings = Settings::from_env();
    info!(db_path = %settings.db_path, "Initializing database...");

    // SQLite creates the file but not its directory
    if !settings.db_path.starts_with("sqlite:") {
        if let Some(parent) = std::path::Path::new(&settings.db_path).parent() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // 3. Initialize the pool. A failure here is tolerated: the pool
    // reconnects lazily on the first request.
    let pool = Arc::new(ResilientPool::new(settings.pool_settings()));
    if let Err(e) = pool.connect().await {
        warn!(error = %e, "Pool init failed at startup (will retry on demand)");
    }

    // Migrations go through the pool's retry path; without a schema the
    // daemon cannot serve anything, so this one is fatal.
    run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    // 4. Wire dependencies
    let user_repo = Arc::new(SqliteUserRepository::new(pool.clone()));
    let service = UserService::new(user_repo);
    let bus = Arc::new(CommandBus::new(service));

    // 5. Start JSON-RPC server
    let rpc_config = RpcServerConfig {
        host: settings.rpc_host.clone(),
        port: settings.rpc_port,
    };
    let rpc_server = RpcServer::new(rpc_config, RpcHandler::new(bus));
    let rpc_handle = rpc_server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("RPC server start failed: {}", e))?;

    info!("System ready. Press Ctrl+C to shutdown");

    // 6. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received. Exiting gracefully...");

    // 7. Graceful shutdown: stop accepting requests, then tear the pool down
    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    pool.close().await;

    info!("Shutdown complete.");
    Ok(())
}
