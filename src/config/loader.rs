//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags (applied by the binary after loading)
//! 2. Environment variables
//! 3. `--config <file>`, or `userstore.toml` in the working directory
//! 4. `~/.config/userstore/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants;
use crate::env::Env;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener and CORS settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on, e.g. `127.0.0.1:8000`.
    pub bind: String,
    /// Origins allowed to make cross-origin requests.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: constants::DEFAULT_BIND.to_string(),
            allowed_origins: constants::DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|o| o.to_string())
                .collect(),
        }
    }
}

/// Snapshot file settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_file: PathBuf,
    /// Refuse to start when the snapshot exists but cannot be parsed.
    /// `None` means no layer set it; see [`StorageConfig::is_strict`].
    pub strict: Option<bool>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(constants::DEFAULT_DATA_FILE),
            strict: None,
        }
    }
}

impl StorageConfig {
    pub fn is_strict(&self) -> bool {
        self.strict.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, e.g. `info` or `userstore=debug`.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: constants::DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// `explicit` must exist when given; otherwise `userstore.toml` in
    /// `work_dir` is used if present.
    pub fn load(explicit: Option<&Path>, work_dir: &Path, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // Layer 4: global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        // Layer 3: explicit or local config
        match explicit {
            Some(path) => {
                let file = Self::load_file(path)?;
                config.merge(file);
            }
            None => {
                let local_path = work_dir.join(constants::CONFIG_FILENAME);
                if local_path.exists() {
                    let local = Self::load_file(&local_path)?;
                    config.merge(local);
                }
            }
        }

        // Layer 2: environment variables
        config.apply_env_vars(env);

        Ok(config)
    }

    /// Load a config from a specific file.
    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join("config.toml"))
    }

    /// Parse the configured bind address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: "server.bind",
                value: self.server.bind.clone(),
            })
    }

    /// Merge another config into this one (other takes precedence for non-default values).
    fn merge(&mut self, other: Config) {
        let default_server = ServerConfig::default();
        if other.server.bind != default_server.bind {
            self.server.bind = other.server.bind;
        }
        if other.server.allowed_origins != default_server.allowed_origins {
            self.server.allowed_origins = other.server.allowed_origins;
        }

        let default_storage = StorageConfig::default();
        if other.storage.data_file != default_storage.data_file {
            self.storage.data_file = other.storage.data_file;
        }
        if other.storage.strict.is_some() {
            self.storage.strict = other.storage.strict;
        }

        if other.logging.filter != LoggingConfig::default().filter {
            self.logging.filter = other.logging.filter;
        }
    }

    /// Apply environment variable overrides.
    ///
    /// Runs before logging is set up, so bad values are reported on stderr.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Ok(val) = env.var(constants::ENV_BIND) {
            self.server.bind = val;
        }
        if let Some(origins) = env.list(constants::ENV_ALLOWED_ORIGINS) {
            self.server.allowed_origins = origins;
        }
        if let Ok(val) = env.var(constants::ENV_DATA_FILE) {
            self.storage.data_file = PathBuf::from(val);
        }
        match env.flag(constants::ENV_STRICT) {
            Some(Ok(strict)) => self.storage.strict = Some(strict),
            Some(Err(val)) => {
                eprintln!("Warning: ignoring invalid {} value: {val}", constants::ENV_STRICT)
            }
            None => {}
        }
        if let Ok(val) = env.var(constants::ENV_LOG) {
            self.logging.filter = val;
        }
    }
}
