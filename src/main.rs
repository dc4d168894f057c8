//! userstore — user records CRUD service.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use userstore::config;
use userstore::constants;
use userstore::env;
use userstore::logging;
use userstore::server;
use userstore::store;

use std::process;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tokio::net::TcpListener;

use cli::args::{Cli, Command, ServeArgs, UsersAction};
use config::Config;
use env::Env;
use store::RecordStore;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let env = Env::real();

    let work_dir = std::env::current_dir().context("failed to determine working directory")?;
    let config = Config::load(cli.config.as_deref(), &work_dir, &env)
        .context("failed to load configuration")?;
    logging::init(&config.logging.filter, &env).context("failed to initialise logging")?;

    match cli.command {
        Command::Serve(args) => run_serve(args, config).await,
        Command::Users { action } => run_users(action, config),
        Command::Version => run_version(),
    }
}

/// Print version and build information.
fn run_version() -> Result<()> {
    use colored::Colorize;

    println!(
        "{} {}",
        constants::APP_NAME.bold(),
        constants::VERSION.green().bold()
    );
    println!("{}     {}", "target:".dimmed(), constants::TARGET);
    Ok(())
}

/// Load the store and serve HTTP until Ctrl-C.
async fn run_serve(args: ServeArgs, mut config: Config) -> Result<()> {
    args.apply(&mut config);

    let addr = config.bind_addr()?;
    let cors = server::cors_layer(&config.server.allowed_origins)
        .context("failed to build CORS policy")?;

    let store = RecordStore::open(&config.storage.data_file, config.storage.is_strict())
        .context("failed to load user store")?;
    let app = server::router(server::AppState::new(store), cors);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    server::serve(listener, app, shutdown_signal())
        .await
        .context("server failed")
}

/// Resolves on Ctrl-C. If the handler cannot be installed, never resolves.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

/// Read-only inspection of the snapshot file.
fn run_users(action: UsersAction, mut config: Config) -> Result<()> {
    match action {
        UsersAction::List(storage) => {
            storage.apply(&mut config);
            let store = open_store(&config)?;
            print!("{}", cli::render_users(store.list()));
        }
        UsersAction::Get { id, storage } => {
            storage.apply(&mut config);
            let store = open_store(&config)?;
            let Some(user) = store.find(id) else {
                bail!("user {id} not found in {}", store.path().display());
            };
            println!(
                "{}",
                serde_json::to_string_pretty(user).context("failed to render user")?
            );
        }
    }
    Ok(())
}

fn open_store(config: &Config) -> Result<RecordStore> {
    RecordStore::open(&config.storage.data_file, config.storage.is_strict()).with_context(|| {
        format!(
            "failed to load user store from {}",
            config.storage.data_file.display()
        )
    })
}
