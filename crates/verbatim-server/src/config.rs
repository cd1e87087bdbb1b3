//! Configuration file parsing for the server.
//!
//! Loads settings from TOML files including bind address, log filter and
//! the storage backend.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use verbatim_store::{BoxedStore, MemoryStore, SqliteStore, StoreError};

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// Storage backend could not be opened
    #[error("Failed to open storage: {0}")]
    Storage(#[from] StoreError),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 8080)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// tracing-subscriber filter directive (e.g., "info,verbatim_server=debug")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Record storage
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Storage configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Which key-value backend to use
    #[serde(default)]
    pub backend: StorageBackend,

    /// Database path, required by the sqlite backend
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Key-value backend selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local map, lost on exit
    #[default]
    Memory,
    /// SQLite database file
    Sqlite,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    8080
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            log_filter: default_log_filter(),
            storage: StorageConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field requirements
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.backend == StorageBackend::Sqlite && self.storage.path.is_none() {
            return Err(ConfigError::MissingField("storage.path".to_string()));
        }
        Ok(())
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }

    /// Open the configured key-value backend
    pub fn open_store(&self) -> Result<BoxedStore, ConfigError> {
        let store: BoxedStore = match (self.storage.backend, &self.storage.path) {
            (StorageBackend::Memory, _) => Box::new(MemoryStore::new()),
            (StorageBackend::Sqlite, Some(path)) => Box::new(SqliteStore::new(path)?),
            (StorageBackend::Sqlite, None) => {
                return Err(ConfigError::MissingField("storage.path".to_string()))
            }
        };
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.bind_port, 8080);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
    }

    #[test]
    fn test_bind_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            bind_address = "0.0.0.0"
            bind_port = 9000
            log_filter = "debug"

            [storage]
            backend = "sqlite"
            path = "/var/lib/verbatim/records.db"
        "#;

        let config = ServerConfig::from_toml(toml).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.bind_port, 9000);
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(
            config.storage.path.as_deref(),
            Some(Path::new("/var/lib/verbatim/records.db"))
        );
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = ServerConfig::from_toml("").unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
    }

    #[test]
    fn test_sqlite_requires_path() {
        let toml = r#"
            [storage]
            backend = "sqlite"
        "#;

        assert!(matches!(
            ServerConfig::from_toml(toml),
            Err(ConfigError::MissingField(field)) if field == "storage.path"
        ));
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let toml = r#"
            [storage]
            backend = "redis"
        "#;

        assert!(matches!(
            ServerConfig::from_toml(toml),
            Err(ConfigError::TomlParse(_))
        ));
    }
}
