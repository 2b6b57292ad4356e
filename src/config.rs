use std::net::SocketAddr;

use crate::error::{AppError, AppResult};

/// Runtime configuration, read once at startup.
///
/// Environment variables:
/// - REMARK_ADDR: bind address (default: 127.0.0.1:8000)
/// - DATABASE_URL: sqlx SQLite URL (default: sqlite:remark.db?mode=rwc)
/// - REMARK_MAX_CONNECTIONS: pool size (default: 5)
/// - REMARK_SEED: "1"/"true" to insert demo data on startup
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub max_connections: u32,
    pub seed_demo: bool,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        let bind_addr = std::env::var("REMARK_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8000".to_string())
            .parse::<SocketAddr>()
            .map_err(|err| AppError::Config(format!("invalid REMARK_ADDR: {err}")))?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:remark.db?mode=rwc".to_string());

        let max_connections = match std::env::var("REMARK_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse::<u32>()
                .map_err(|err| AppError::Config(format!("invalid REMARK_MAX_CONNECTIONS: {err}")))?,
            Err(_) => 5,
        };

        let seed_demo = std::env::var("REMARK_SEED")
            .map(|raw| matches!(raw.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            bind_addr,
            database_url,
            max_connections,
            seed_demo,
        })
    }
}
