//! Server configuration from environment variables.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | HOST | 0.0.0.0 | Bind address |
//! | PORT | 3000 | Bind port |
//! | DATABASE_URL | postgres://localhost/flownote | PostgreSQL connection string |
//! | FLOWNOTE_STORAGE | postgres | `postgres` or `memory` |
//! | DB_MAX_CONNECTIONS | 10 | Pool size |
//! | DB_CONNECT_TIMEOUT_SECS | 30 | Seconds to wait for a pooled connection |
//! | ALLOWED_ORIGINS | localhost dev origins | Comma-separated CORS origins |
//! | LOG_FORMAT | text | `text` or `json` |
//! | LOG_FILE | (unset) | Daily-rotated log file path |
//! | LOG_ANSI | (auto) | Force ANSI colors on or off |

use std::net::SocketAddr;

use flownote_core::{defaults, Error, Result};
use flownote_db::pool::{PoolConfig, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_MAX_CONNECTIONS};

/// Where notes are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Postgres,
    Memory,
}

impl std::str::FromStr for StorageKind {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            _ => Err(format!("Invalid storage kind: {}", s)),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    pub file: Option<String>,
    pub ansi: Option<bool>,
}

/// Full server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub storage: StorageKind,
    pub db_max_connections: u32,
    pub db_connect_timeout_secs: u64,
    pub allowed_origins: Vec<String>,
    pub log: LogConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: defaults::SERVER_HOST.to_string(),
            port: defaults::SERVER_PORT,
            database_url: defaults::DATABASE_URL.to_string(),
            storage: StorageKind::Postgres,
            db_max_connections: DEFAULT_MAX_CONNECTIONS,
            db_connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            allowed_origins: split_origins(defaults::ALLOWED_ORIGINS),
            log: LogConfig {
                format: LogFormat::Text,
                file: None,
                ansi: None,
            },
        }
    }
}

impl ApiConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("PORT must be a port number, got {port:?}")))?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            config.database_url = url;
        }
        if let Some(storage) = lookup("FLOWNOTE_STORAGE") {
            config.storage = storage.parse().map_err(Error::Config)?;
        }
        if let Some(max) = lookup("DB_MAX_CONNECTIONS") {
            config.db_max_connections = max
                .trim()
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    Error::Config(format!(
                        "DB_MAX_CONNECTIONS must be a positive integer, got {max:?}"
                    ))
                })?;
        }
        if let Some(secs) = lookup("DB_CONNECT_TIMEOUT_SECS") {
            config.db_connect_timeout_secs = secs
                .trim()
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    Error::Config(format!(
                        "DB_CONNECT_TIMEOUT_SECS must be a positive integer, got {secs:?}"
                    ))
                })?;
        }
        if let Some(origins) = lookup("ALLOWED_ORIGINS") {
            config.allowed_origins = split_origins(&origins);
        }

        config.log.format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };
        config.log.file = lookup("LOG_FILE").filter(|f| !f.is_empty());
        config.log.ansi = lookup("LOG_ANSI").map(|v| v == "true" || v == "1");

        Ok(config)
    }

    /// Pool settings for the PostgreSQL store.
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig::new(self.db_max_connections, self.db_connect_timeout_secs)
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| Error::Config(format!("invalid bind address: {e}")))
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
