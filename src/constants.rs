//! App-wide constants.
//!
//! Centralises the service name, config paths, environment variable names,
//! and defaults so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "userstore";

/// Crate version, as reported by `userstore version` and the OpenAPI document.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Target triple the binary was compiled for (set by `build.rs`).
pub const TARGET: &str = env!("TARGET");

/// Local config filename, looked up in the working directory.
pub const CONFIG_FILENAME: &str = "userstore.toml";

/// Directory name under `~/.config/` for the global config.
pub const CONFIG_DIR: &str = "userstore";

/// Title shown in the OpenAPI document.
pub const API_TITLE: &str = "TEST API";

/// Description shown in the OpenAPI document.
pub const API_DESCRIPTION: &str = "Test API that writes and reads data to and from a JSON file";

// ── Defaults ────────────────────────────────────────────────────────

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";
pub const DEFAULT_DATA_FILE: &str = "data.json";
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &["http://localhost", "http://localhost:8080"];

// ── Environment variable names ──────────────────────────────────────

pub const ENV_BIND: &str = "USERSTORE_BIND";
pub const ENV_DATA_FILE: &str = "USERSTORE_DATA_FILE";
pub const ENV_ALLOWED_ORIGINS: &str = "USERSTORE_ALLOWED_ORIGINS";
pub const ENV_STRICT: &str = "USERSTORE_STRICT";
pub const ENV_LOG: &str = "USERSTORE_LOG";
