//! Userhub CLI - Command-line client for the Userhub service

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tabled::{Table, Tabled};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9530";

/// Retryable code returned when the database is temporarily unreachable
const CODE_DB_UNAVAILABLE: i32 = 5003;
const CODE_NOT_FOUND: i32 = 4001;

#[derive(Parser)]
#[command(name = "userhub")]
#[command(about = "Userhub service CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "USERHUB_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new user
    CreateUser {
        /// Username (alphanumeric with ._-)
        #[arg(short, long)]
        username: String,

        /// Email address
        #[arg(short, long)]
        email: String,
    },

    /// Fetch a user by id
    GetUser {
        /// User id
        user_id: i64,
    },
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

#[derive(Deserialize, Tabled)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::CreateUser { username, email } => {
            let result = call(
                &cli.rpc_url,
                "user.create.v1",
                json!({ "username": username, "email": email }),
            )
            .await?;
            let user: UserRow = serde_json::from_value(result)?;
            println!("{}", "User created".green());
            println!("{}", Table::new([user]));
        }
        Commands::GetUser { user_id } => {
            let result = call(&cli.rpc_url, "user.get.v1", json!({ "user_id": user_id })).await?;
            let user: UserRow = serde_json::from_value(result)?;
            println!("{}", Table::new([user]));
        }
    }

    Ok(())
}

async fn call(rpc_url: &str, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let response: JsonRpcResponse = reqwest::Client::new()
        .post(rpc_url)
        .json(&request)
        .send()
        .await
        .with_context(|| format!("Failed to reach {rpc_url}"))?
        .json()
        .await
        .context("Invalid JSON-RPC response")?;

    if let Some(err) = response.error {
        match err.code {
            CODE_DB_UNAVAILABLE => {
                eprintln!("{}", err.message.yellow());
                bail!("service temporarily unavailable, retry later");
            }
            CODE_NOT_FOUND => {
                eprintln!("{}", err.message.yellow());
                bail!("not found");
            }
            code => bail!("RPC error {code}: {}", err.message),
        }
    }

    response
        .result
        .context("JSON-RPC response carried neither result nor error")
}
