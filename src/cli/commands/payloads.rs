//! cli::commands::payloads
//!
//! Print Ignition and Cloud-config payloads exactly as stored.

use std::io::Write;

use anyhow::Result;

use super::Context;
use crate::storage::Store;

/// Print an Ignition config.
pub fn ignition(ctx: &Context, name: &str, out: &mut impl Write) -> Result<()> {
    let content = ctx.store.ignition_get(name)?;
    out.write_all(&content)?;
    Ok(())
}

/// Print a Cloud-config.
pub fn cloud(ctx: &Context, name: &str, out: &mut impl Write) -> Result<()> {
    let content = ctx.store.cloud_get(name)?;
    out.write_all(&content)?;
    Ok(())
}
