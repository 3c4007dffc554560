//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install the tracing subscriber
//! - Resolve store configuration and dispatch to command handlers
//!
//! All reads and writes go through [`crate::storage::Store`]; the CLI never
//! touches entity files directly.

pub mod args;
pub mod commands;

pub use args::{Cli, Command, DocumentAction};

use anyhow::{Context as _, Result};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::core::config;
use crate::storage::FileStore;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(cli.debug, cli.quiet)?;

    let loaded = config::load(cli.config.as_deref()).context("cannot load configuration")?;
    if let Some(path) = &loaded.path {
        tracing::debug!(path = %path.display(), "loaded config");
    }

    let mut store_config = loaded.config;
    if let Some(root) = cli.root {
        store_config.root = root;
    }

    let ctx = commands::Context {
        store: FileStore::new(store_config),
        quiet: cli.quiet,
    };

    commands::dispatch(cli.command, &ctx)
}

fn init_logging(debug: bool, quiet: bool) -> Result<()> {
    let level = if debug {
        Level::DEBUG
    } else if quiet {
        Level::WARN
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
