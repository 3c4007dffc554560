//! cli::commands::documents
//!
//! Get, list and put for profiles and groups.
//!
//! Documents are printed in their on-disk form (tab-indented JSON), and
//! `put` accepts the same form, so a file printed by `get` can be edited
//! and stored back unchanged.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context as _, Result};

use super::{confirm, Context};
use crate::cli::args::DocumentAction;
use crate::core::entity::{
    encode_document, from_storage_form, to_storage_form, Profile, RichGroup,
};
use crate::storage::Store;

/// Handle `profile get|list|put`.
pub fn profile(ctx: &Context, action: DocumentAction, out: &mut impl Write) -> Result<()> {
    match action {
        DocumentAction::Get { id } => {
            let profile = ctx.store.profile_get(&id)?;
            out.write_all(&encode_document(&profile)?)?;
        }
        DocumentAction::List => {
            let profiles = ctx.store.profile_list()?;
            out.write_all(&encode_document(&profiles)?)?;
        }
        DocumentAction::Put { file } => {
            let input = read_input(&file)?;
            let profile: Profile = serde_json::from_slice(&input)
                .with_context(|| format!("cannot parse profile from {}", file.display()))?;
            ctx.store.profile_put(&profile)?;
            confirm(ctx, out, format_args!("stored profile '{}'", profile.id))?;
        }
    }
    Ok(())
}

/// Handle `group get|list|put`.
pub fn group(ctx: &Context, action: DocumentAction, out: &mut impl Write) -> Result<()> {
    match action {
        DocumentAction::Get { id } => {
            let group = ctx.store.group_get(&id)?;
            out.write_all(&encode_document(&to_storage_form(&group)?)?)?;
        }
        DocumentAction::List => {
            let rich = ctx
                .store
                .group_list()?
                .iter()
                .map(to_storage_form)
                .collect::<Result<Vec<_>, _>>()?;
            out.write_all(&encode_document(&rich)?)?;
        }
        DocumentAction::Put { file } => {
            let input = read_input(&file)?;
            let rich: RichGroup = serde_json::from_slice(&input)
                .with_context(|| format!("cannot parse group from {}", file.display()))?;
            let group = from_storage_form(rich)?;
            ctx.store.group_put(&group)?;
            confirm(ctx, out, format_args!("stored group '{}'", group.id))?;
        }
    }
    Ok(())
}

/// Read a whole file, or stdin for `-`.
fn read_input(file: &Path) -> Result<Vec<u8>> {
    if file == Path::new("-") {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("cannot read stdin")?;
        Ok(buf)
    } else {
        fs::read(file).with_context(|| format!("cannot read {}", file.display()))
    }
}
