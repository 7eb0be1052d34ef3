//! # Storefront Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PADDOCK_PORT=8080                                                  │
//! │     PADDOCK_SECRET_KEY=...                                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $PADDOCK_CONFIG, or ./paddock.toml                                 │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     127.0.0.1:5000, horses.db, static/uploads, 16 MiB                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # paddock.toml
//! [server]
//! bind_addr = "0.0.0.0"
//! port = 5000
//!
//! [storage]
//! database_path = "horses.db"
//! upload_dir = "static/uploads"
//! max_upload_bytes = 16777216
//!
//! [security]
//! secret_key = "change-me"
//! ```
//!
//! The loaded config is handed to the router state. Nothing reads it from a
//! global.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

use paddock_core::DEFAULT_MAX_UPLOAD_BYTES;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "PADDOCK_CONFIG";

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "paddock.toml";

/// Signing key used when none is configured. Fine for local development only.
pub const DEV_SECRET_KEY: &str = "paddock-dev-secret-change-in-production";

// =============================================================================
// Sections
// =============================================================================

/// Listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind_addr() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            bind_addr: default_bind_addr(),
            port: default_port(),
        }
    }
}

/// Where horses and their images live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Directory uploaded images are written to.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// Ceiling for a whole request body, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("horses.db")
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("static/uploads")
}

fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            database_path: default_database_path(),
            upload_dir: default_upload_dir(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

/// Keys for signing the flash cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecuritySettings {
    #[serde(default = "default_secret_key")]
    pub secret_key: String,
}

fn default_secret_key() -> String {
    DEV_SECRET_KEY.to_string()
}

impl Default for SecuritySettings {
    fn default() -> Self {
        SecuritySettings {
            secret_key: default_secret_key(),
        }
    }
}

// =============================================================================
// Storefront Config
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub security: SecuritySettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else `$PADDOCK_CONFIG`, else `./paddock.toml`)
    /// 3. Environment variables
    ///
    /// An explicitly named file that does not exist is an error; a missing
    /// `./paddock.toml` is not.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let explicit = config_path.or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound(path));
                }
                Self::from_file(&path)?
            }
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file. Sections and keys left out keep their
    /// defaults.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading storefront config from file");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parses TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind_addr.trim().is_empty() {
            return Err(ConfigError::MissingRequired("server.bind_addr".into()));
        }

        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue(
                "server.port must be greater than 0".into(),
            ));
        }

        if self.storage.database_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingRequired("storage.database_path".into()));
        }

        if self.storage.upload_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingRequired("storage.upload_dir".into()));
        }

        if self.storage.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue(
                "storage.max_upload_bytes must be greater than 0".into(),
            ));
        }

        if self.security.secret_key.is_empty() {
            return Err(ConfigError::MissingRequired("security.secret_key".into()));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from any key lookup. Values that don't parse are
    /// reported, not skipped.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("PADDOCK_BIND_ADDR") {
            self.server.bind_addr = addr;
        }

        if let Some(port) = lookup("PADDOCK_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PADDOCK_PORT".to_string()))?;
            debug!(port = self.server.port, "Overriding port from environment");
        }

        if let Some(path) = lookup("PADDOCK_DB_PATH") {
            self.storage.database_path = PathBuf::from(path);
        }

        if let Some(dir) = lookup("PADDOCK_UPLOAD_DIR") {
            self.storage.upload_dir = PathBuf::from(dir);
        }

        if let Some(max) = lookup("PADDOCK_MAX_UPLOAD_BYTES") {
            self.storage.max_upload_bytes = max
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PADDOCK_MAX_UPLOAD_BYTES".to_string()))?;
        }

        if let Some(secret) = lookup("PADDOCK_SECRET_KEY") {
            self.security.secret_key = secret;
        }

        Ok(())
    }

    /// Returns `bind_addr:port`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.bind_addr, self.server.port)
    }

    /// True while the built-in development key is in use.
    pub fn uses_dev_secret(&self) -> bool {
        self.security.secret_key == DEV_SECRET_KEY
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Config file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
