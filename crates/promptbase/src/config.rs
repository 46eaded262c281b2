//! Config file support for promptbase.
//!
//! Loads configuration from `promptbase.toml` in the working directory.

use anyhow::{Context, Result};
use promptbase_db::Database;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The config file name
pub const CONFIG_FILE_NAME: &str = "promptbase.toml";

/// Application configuration loaded from `promptbase.toml`
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Database settings
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Settings for the backing store
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from the given path.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if file exists and parses successfully
    /// - `Ok(None)` if file does not exist
    /// - `Err(...)` if file exists but fails to parse (hard error)
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(Some(config))
    }

    /// Database path from the config file, if set.
    pub fn database_path(&self) -> Option<PathBuf> {
        self.database.path.clone()
    }
}

/// Resolve the database path. Priority: `--db` flag (clap also feeds
/// `PROMPTBASE_DB` through it) > config file > platform default.
pub fn resolve_db_path(flag: Option<PathBuf>, file_config: &AppConfig) -> PathBuf {
    flag.or_else(|| file_config.database_path())
        .unwrap_or_else(Database::default_path)
}
