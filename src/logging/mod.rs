//! Tracing subscriber setup.
//!
//! `RUST_LOG` takes precedence over the configured filter so a single run
//! can be made more verbose without editing the config file. Output goes to
//! stderr so it never mixes with command output on stdout.

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

use crate::env::Env;

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("invalid log filter {directive:?}: {source}")]
    InvalidFilter {
        directive: String,
        source: ParseError,
    },

    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Resolve the filter directive: `RUST_LOG` if set, otherwise `configured`.
pub fn build_filter(configured: &str, env: &Env) -> Result<EnvFilter, LoggingError> {
    let directive = env
        .var(EnvFilter::DEFAULT_ENV)
        .unwrap_or_else(|_| configured.to_string());

    EnvFilter::try_new(&directive).map_err(|source| LoggingError::InvalidFilter {
        directive,
        source,
    })
}

/// Install the global fmt subscriber. Call once, from `main`.
pub fn init(configured: &str, env: &Env) -> Result<(), LoggingError> {
    let filter = build_filter(configured, env)?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_filter_is_used_without_rust_log() {
        let env = Env::mock(Vec::<(&str, &str)>::new());
        let filter = build_filter("userstore=debug", &env).unwrap();
        assert!(filter.to_string().contains("userstore=debug"));
    }

    #[test]
    fn rust_log_takes_precedence() {
        let env = Env::mock([("RUST_LOG", "warn")]);
        let filter = build_filter("debug", &env).unwrap();
        assert!(filter.to_string().contains("warn"));
        assert!(!filter.to_string().contains("debug"));
    }

    #[test]
    fn invalid_directive_is_reported() {
        let env = Env::mock(Vec::<(&str, &str)>::new());
        let err = build_filter("userstore=notalevel", &env).unwrap_err();
        assert!(err.to_string().contains("invalid log filter"), "got: {err}");
    }
}
