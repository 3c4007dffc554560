//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Reads its input (ids, names, or a JSON document)
//! 2. Calls the [`Store`](crate::storage::Store)
//! 3. Writes the result to the given output
//!
//! Handlers take the output stream as a parameter so they can be exercised
//! without a terminal.

mod documents;
mod init;
mod payloads;

pub use documents::{group, profile};
pub use init::init;
pub use payloads::{cloud, ignition};

use std::io::{self, Write};

use anyhow::Result;

use super::args::Command;
use crate::storage::FileStore;

/// Shared state for command handlers.
#[derive(Debug)]
pub struct Context {
    /// The store commands operate on.
    pub store: FileStore,
    /// Suppress confirmation messages.
    pub quiet: bool,
}

/// Dispatch a parsed command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Init => init(ctx, &mut out),
        Command::Profile { action } => profile(ctx, action, &mut out),
        Command::Group { action } => group(ctx, action, &mut out),
        Command::Ignition { name } => ignition(ctx, &name, &mut out),
        Command::Cloud { name } => cloud(ctx, &name, &mut out),
    }?;

    out.flush()?;
    Ok(())
}

/// Print a confirmation line unless quiet.
fn confirm(ctx: &Context, out: &mut impl Write, message: impl std::fmt::Display) -> Result<()> {
    if !ctx.quiet {
        writeln!(out, "{}", message)?;
    }
    Ok(())
}
