//! Configuration loading and layering.
//!
//! Handles `userstore.toml` loading, environment variable resolution,
//! and the priority order the binary applies CLI flags on top of.

pub mod loader;

pub use loader::{Config, ConfigError, LoggingConfig, ServerConfig, StorageConfig};
