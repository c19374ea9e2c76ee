//! Application configuration.
//!
//! ## Loading Strategy
//! 1. `.env` is read into the process environment if present
//! 2. Environment variables win when the full set is present
//! 3. Otherwise the loader probes for a TOML config file
//!
//! ## Environment Variables
//! - `LOADQUOTE_DB_PATH`: Database file path
//! - `LOADQUOTE_DB_POOL_SIZE`: Connection pool size (optional, default 4)
//!
//! ## File Locations
//! The loader probes `./loadquote.toml`, `./config.toml` and
//! `../loadquote.toml` in that order.

use std::path::{Path, PathBuf};

use loadquote_domain::{LoadQuoteError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const DEFAULT_POOL_SIZE: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

fn default_pool_size() -> u32 {
    DEFAULT_POOL_SIZE
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration, preferring environment variables over files.
    pub fn load() -> Result<Self> {
        // Not an error if absent; the environment may be set directly.
        dotenvy::dotenv().ok();

        match Self::from_env() {
            Ok(config) => {
                info!("configuration loaded from environment");
                Ok(config)
            }
            Err(err) => {
                debug!(error = %err, "environment incomplete, probing config files");
                Self::from_probed_file()
            }
        }
    }

    /// Build configuration from environment variables only.
    pub fn from_env() -> Result<Self> {
        let path = std::env::var("LOADQUOTE_DB_PATH")
            .map_err(|_| LoadQuoteError::Config("LOADQUOTE_DB_PATH is not set".into()))?;
        let pool_size = match std::env::var("LOADQUOTE_DB_POOL_SIZE") {
            Ok(raw) => raw.parse::<u32>().map_err(|err| {
                LoadQuoteError::Config(format!("invalid LOADQUOTE_DB_POOL_SIZE: {err}"))
            })?,
            Err(_) => DEFAULT_POOL_SIZE,
        };

        Ok(Self { database: DatabaseConfig { path: PathBuf::from(path), pool_size } })
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            LoadQuoteError::Config(format!("cannot read {}: {err}", path.display()))
        })?;
        toml::from_str(&raw).map_err(|err| {
            LoadQuoteError::Config(format!("cannot parse {}: {err}", path.display()))
        })
    }

    fn from_probed_file() -> Result<Self> {
        const CANDIDATES: [&str; 3] = ["loadquote.toml", "config.toml", "../loadquote.toml"];
        for candidate in CANDIDATES {
            let path = Path::new(candidate);
            if path.exists() {
                info!(path = %path.display(), "configuration loaded from file");
                return Self::from_file(path);
            }
        }
        Err(LoadQuoteError::Config(
            "no configuration found in environment or config files".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_round_trip_with_defaulted_pool_size() {
        let config: AppConfig =
            toml::from_str("[database]\npath = \"/tmp/loadquote.db\"\n").unwrap();
        assert_eq!(config.database.path, PathBuf::from("/tmp/loadquote.db"));
        assert_eq!(config.database.pool_size, DEFAULT_POOL_SIZE);
    }

    #[test]
    fn explicit_pool_size_is_kept() {
        let config: AppConfig =
            toml::from_str("[database]\npath = \"db.sqlite\"\npool_size = 8\n").unwrap();
        assert_eq!(config.database.pool_size, 8);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = AppConfig::from_file(Path::new("/nonexistent/loadquote.toml")).unwrap_err();
        assert!(matches!(err, LoadQuoteError::Config(_)));
    }
}
