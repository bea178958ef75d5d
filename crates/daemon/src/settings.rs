//! Environment-backed configuration
//!
//! Every knob has a default; the daemon starts with no configuration at all.

use std::time::Duration;

use userhub_infra_sqlite::PoolSettings;

const DEFAULT_DB_PATH: &str = "~/.userhub/users.db";
const DEFAULT_RPC_HOST: &str = "127.0.0.1";
const DEFAULT_RPC_PORT: u16 = 9530;

#[derive(Debug, Clone)]
pub struct Settings {
    pub db_path: String,
    pub rpc_host: String,
    pub rpc_port: u16,
    pub pool_min: u32,
    pub pool_max: u32,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
}

impl Settings {
    pub fn from_env() -> Self {
        let db_path =
            std::env::var("USERHUB_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());

        Self {
            // Tilde-expanded whether it came from the env or the default
            db_path: shellexpand::tilde(&db_path).into_owned(),
            rpc_host: std::env::var("USERHUB_RPC_HOST")
                .unwrap_or_else(|_| DEFAULT_RPC_HOST.to_string()),
            rpc_port: env_parse("USERHUB_RPC_PORT", DEFAULT_RPC_PORT),
            pool_min: env_parse("USERHUB_POOL_MIN", 1),
            pool_max: env_parse("USERHUB_POOL_MAX", 5),
            retry_attempts: env_parse("USERHUB_RETRY_ATTEMPTS", 2),
            retry_delay_ms: env_parse("USERHUB_RETRY_DELAY_MS", 200),
        }
    }

    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            database_url: self.db_path.clone(),
            min_connections: self.pool_min,
            max_connections: self.pool_max,
            retry_attempts: self.retry_attempts,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
            ..PoolSettings::default()
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let settings = Settings::from_env();
        assert!(settings.pool_max >= settings.pool_min);

        let pool = settings.pool_settings();
        assert_eq!(pool.retry_attempts, 2);
        assert_eq!(pool.retry_delay, Duration::from_millis(200));
    }

    #[test]
    fn test_db_path_from_env_is_tilde_expanded() {
        std::env::set_var("USERHUB_DB_PATH", "~/custom/users.db");
        let settings = Settings::from_env();
        std::env::remove_var("USERHUB_DB_PATH");

        assert!(!settings.db_path.starts_with('~'));
        assert!(settings.db_path.ends_with("custom/users.db"));
    }
}
