//! cli::commands::init
//!
//! Create the store directory layout.

use std::io::Write;

use anyhow::Result;

use super::{confirm, Context};

/// Create the root and the four kind directories.
///
/// Safe to run on an existing store.
pub fn init(ctx: &Context, out: &mut impl Write) -> Result<()> {
    ctx.store.init()?;
    confirm(
        ctx,
        out,
        format_args!("initialized store at {}", ctx.store.paths().root().display()),
    )
}
