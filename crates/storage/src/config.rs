//! Store configuration via `capstore.toml`
//!
//! A config file names the database file, the bucket the store is bound to,
//! and optional engine tuning. Missing fields fall back to defaults.

use capstore_core::{CacheError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name looked up by the CLI when none is given.
pub const CONFIG_FILE_NAME: &str = "capstore.toml";

/// Default name of the bucket holding captured requests.
pub const REQUESTS_BUCKET_NAME: &str = "rqbucket";

/// Default database file name.
pub const DEFAULT_DATABASE_PATH: &str = "requests.db";

/// Store configuration loaded from `capstore.toml`.
///
/// # Example
///
/// ```toml
/// path = "requests.db"
/// bucket = "rqbucket"
/// # cache_size = 67108864
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the database file.
    #[serde(default = "default_path")]
    pub path: String,
    /// Bucket the store reads and writes.
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Engine page cache size in bytes. Engine default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_size: Option<usize>,
}

fn default_path() -> String {
    DEFAULT_DATABASE_PATH.to_string()
}

fn default_bucket() -> String {
    REQUESTS_BUCKET_NAME.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            bucket: default_bucket(),
            cache_size: None,
        }
    }
}

impl StoreConfig {
    /// Check field values.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Config` if the bucket or path is empty, or the
    /// cache size is zero.
    pub fn validate(&self) -> Result<()> {
        if self.bucket.is_empty() {
            return Err(CacheError::Config("bucket name must not be empty".into()));
        }
        if self.path.is_empty() {
            return Err(CacheError::Config("database path must not be empty".into()));
        }
        if self.cache_size == Some(0) {
            return Err(CacheError::Config("cache_size must be greater than zero".into()));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# capstore configuration
#
# Database file holding captured payloads
path = "requests.db"

# Bucket (table) the store reads and writes
bucket = "rqbucket"

# Engine page cache in bytes (engine default when unset)
# cache_size = 67108864
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CacheError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: StoreConfig = toml::from_str(&content).map_err(|e| {
            CacheError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CacheError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
