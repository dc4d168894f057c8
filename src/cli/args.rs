//! Clap argument types and CLI-over-config overrides.

use clap::Parser;
use std::path::PathBuf;

use userstore::config::Config;

/// User records CRUD service backed by a JSON file.
#[derive(Parser, Debug)]
#[command(name = "userstore", version = userstore::constants::VERSION)]
pub struct Cli {
    /// Config file to load instead of ./userstore.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP service.
    Serve(ServeArgs),

    /// Inspect the stored users without starting the service.
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },

    /// Print version and build information.
    Version,
}

/// Arguments for the `serve` subcommand.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to listen on (e.g. 0.0.0.0:8000).
    #[arg(long)]
    pub bind: Option<String>,

    #[command(flatten)]
    pub storage: StorageArgs,

    /// Allowed CORS origin. Repeat to allow several; replaces the configured list.
    #[arg(long = "origin")]
    pub origins: Vec<String>,
}

/// Snapshot location overrides shared by several commands.
#[derive(clap::Args, Debug)]
pub struct StorageArgs {
    /// Path of the JSON snapshot file.
    #[arg(long)]
    pub data_file: Option<PathBuf>,

    /// Fail instead of starting empty when the snapshot cannot be parsed.
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}

/// Offline user inspection subcommands.
#[derive(clap::Subcommand, Debug)]
pub enum UsersAction {
    /// Print every stored user.
    List(StorageArgs),
    /// Print one user as JSON.
    Get {
        /// The user id.
        id: i64,

        #[command(flatten)]
        storage: StorageArgs,
    },
}

impl StorageArgs {
    /// Apply flags on top of the loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(ref path) = self.data_file {
            config.storage.data_file = path.clone();
        }
        if self.strict {
            config.storage.strict = Some(true);
        }
    }
}

impl ServeArgs {
    /// Apply flags on top of the loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(ref bind) = self.bind {
            config.server.bind = bind.clone();
        }
        if !self.origins.is_empty() {
            config.server.allowed_origins = self.origins.clone();
        }
        self.storage.apply(config);
    }
}
