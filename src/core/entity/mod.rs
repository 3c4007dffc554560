//! core::entity
//!
//! Entity model for the boot configuration store.
//!
//! # Modules
//!
//! - [`group`] - Groups (machine-matching records) and their on-disk form
//! - [`profile`] - Profiles (boot recipes)
//!
//! # Storage Format
//!
//! Documents are written as JSON indented with a single tab per level so
//! that files stay human-diffable. Groups are never serialized directly:
//! they are converted to [`RichGroup`] first (see [`to_storage_form`]).
//!
//! Ignition and Cloud-config payloads have no entity type. They are opaque
//! text keyed by file name and are never parsed.

pub mod group;
pub mod profile;

pub use group::{from_storage_form, to_storage_form, ConversionError, Group, RichGroup};
pub use profile::{NetBoot, Profile};

use serde::ser::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use thiserror::Error;

use crate::core::paths::is_valid_file_key;

/// Entity validation failures.
///
/// These are detected before any I/O is attempted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntityError {
    /// The entity has an empty identifier.
    #[error("id is required")]
    IdRequired,

    /// The identifier cannot be used as a single file name.
    #[error("invalid id '{0}': must be a plain file name (no separators, not hidden)")]
    InvalidId(String),
}

/// Validate an entity identifier.
///
/// # Errors
///
/// - [`EntityError::IdRequired`] if `id` is empty
/// - [`EntityError::InvalidId`] if `id` cannot be a file base name
///
/// # Example
///
/// ```
/// use bootstore::core::entity::{validate_id, EntityError};
///
/// assert!(validate_id("node1").is_ok());
/// assert_eq!(validate_id(""), Err(EntityError::IdRequired));
/// assert!(validate_id("../etc").is_err());
/// ```
pub fn validate_id(id: &str) -> Result<(), EntityError> {
    if id.is_empty() {
        return Err(EntityError::IdRequired);
    }
    if !is_valid_file_key(id) {
        return Err(EntityError::InvalidId(id.to_string()));
    }
    Ok(())
}

/// Serialize a document as tab-indented JSON with a trailing newline.
pub fn encode_document<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"\t");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}
