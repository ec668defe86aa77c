use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub auto_sync: bool,
    pub sync_interval: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: format!("sqlite:{}?mode=rwc", default_database_path().display()),
                max_connections: 5,
                connection_timeout: 30,
            },
            api: ApiConfig {
                // Local backend the development proxy forwards /api to.
                base_url: "http://localhost:8001".to_string(),
                request_timeout: 30,
            },
            sync: SyncConfig {
                auto_sync: true,
                sync_interval: 300, // 5 minutes
            },
        }
    }
}

fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("./data"))
        .join("faithschool")
        .join("faithschool.db")
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("FAITHSCHOOL_DATABASE_URL") {
            if !v.trim().is_empty() {
                cfg.database.url = v;
            }
        }
        if let Ok(v) = std::env::var("FAITHSCHOOL_API_BASE_URL") {
            if !v.trim().is_empty() {
                cfg.api.base_url = v.trim_end_matches('/').to_string();
            }
        }
        if let Ok(v) = std::env::var("FAITHSCHOOL_API_TIMEOUT") {
            if let Some(value) = parse_u64(&v) {
                cfg.api.request_timeout = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("FAITHSCHOOL_AUTO_SYNC") {
            cfg.sync.auto_sync = parse_bool(&v, cfg.sync.auto_sync);
        }
        if let Ok(v) = std::env::var("FAITHSCHOOL_SYNC_INTERVAL") {
            if let Some(value) = parse_u64(&v) {
                cfg.sync.sync_interval = value.max(1);
            }
        }

        cfg
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.database.max_connections == 0 {
            return Err("Database max_connections must be greater than 0".to_string());
        }
        if self.database.url.trim().is_empty() {
            return Err("Database url must not be empty".to_string());
        }
        if self.api.base_url.trim().is_empty() {
            return Err("API base_url must not be empty".to_string());
        }
        if self.api.request_timeout == 0 {
            return Err("API request_timeout must be greater than 0".to_string());
        }
        if self.sync.sync_interval == 0 {
            return Err("Sync interval must be greater than 0".to_string());
        }
        Ok(())
    }

    /// In-memory configuration used by tests and ephemeral sessions. A
    /// single connection, since every SQLite memory connection is its own
    /// database.
    pub fn in_memory() -> Self {
        let mut cfg = Self::default();
        cfg.database.url = "sqlite::memory:".to_string();
        cfg.database.max_connections = 1;
        cfg
    }
}

fn parse_bool(s: &str, default: bool) -> bool {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

fn parse_u64(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}
