//! core::entity::group
//!
//! Groups and their on-disk projection.
//!
//! # Group vs RichGroup
//!
//! A [`Group`] is the in-memory record consumed by the matching engine. It
//! carries typed metadata. A [`RichGroup`] is the shape written to
//! `groups/<id>.json`: identical fields, but the metadata is embedded as raw
//! JSON so the file re-parses to exactly what was written.
//!
//! The two are separate types joined only by [`to_storage_form`] and
//! [`from_storage_form`], which are inverses:
//! `from_storage_form(to_storage_form(g)?)? == g` for every group `g`.
//!
//! # Example
//!
//! ```
//! use bootstore::core::entity::{from_storage_form, to_storage_form, Group};
//! use serde_json::json;
//!
//! let group = Group::new("worker")
//!     .with_profile("coreos-install")
//!     .with_selector("region", "us-east")
//!     .with_metadata("fleet_metadata", json!("role=worker"));
//!
//! let rich = to_storage_form(&group).unwrap();
//! assert_eq!(from_storage_form(rich).unwrap(), group);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::{Map, Value};
use thiserror::Error;

use super::{validate_id, EntityError};

/// Errors converting between [`Group`] and [`RichGroup`].
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Embedded metadata is not valid JSON.
    #[error("malformed group metadata: {0}")]
    MalformedMetadata(String),

    /// Embedded metadata is valid JSON but not an object.
    #[error("group metadata must be a JSON object, found {0}")]
    MetadataNotObject(&'static str),

    /// Metadata could not be encoded.
    #[error("cannot encode group metadata: {0}")]
    Encode(String),
}

/// A named record associating selectors with a profile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    /// Unique identifier; also the file stem on disk.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Identifier of the profile this group boots.
    pub profile: String,
    /// Matching criteria, opaque to the store.
    pub selector: BTreeMap<String, String>,
    /// Free-form metadata handed to templates.
    pub metadata: Map<String, Value>,
}

impl Group {
    /// Create an empty group with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    pub fn with_selector(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.selector.insert(key.into(), value.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Check the group can be stored.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::IdRequired`] if the id is empty, or
    /// [`EntityError::InvalidId`] if it cannot be a file name.
    pub fn validate(&self) -> Result<(), EntityError> {
        validate_id(&self.id)
    }
}

/// The on-disk form of a [`Group`].
///
/// Empty fields are omitted when written and default when read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RichGroup {
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub profile: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub selector: BTreeMap<String, String>,

    /// Metadata as raw JSON, embedded verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Box<RawValue>>,
}

/// Convert a group into its on-disk form.
///
/// Empty metadata is omitted entirely.
pub fn to_storage_form(group: &Group) -> Result<RichGroup, ConversionError> {
    let metadata = if group.metadata.is_empty() {
        None
    } else {
        let raw = serde_json::value::to_raw_value(&group.metadata)
            .map_err(|e| ConversionError::Encode(e.to_string()))?;
        Some(raw)
    };

    Ok(RichGroup {
        id: group.id.clone(),
        name: group.name.clone(),
        profile: group.profile.clone(),
        selector: group.selector.clone(),
        metadata,
    })
}

/// Convert an on-disk group back into a [`Group`].
///
/// Absent or `null` metadata becomes an empty map. Anything other than a
/// JSON object is an error, never an empty group.
pub fn from_storage_form(rich: RichGroup) -> Result<Group, ConversionError> {
    let metadata = match rich.metadata {
        None => Map::new(),
        Some(raw) => {
            let value: Value = serde_json::from_str(raw.get())
                .map_err(|e| ConversionError::MalformedMetadata(e.to_string()))?;
            match value {
                Value::Object(map) => map,
                Value::Null => Map::new(),
                other => return Err(ConversionError::MetadataNotObject(json_type_name(&other))),
            }
        }
    };

    Ok(Group {
        id: rich.id,
        name: rich.name,
        profile: rich.profile,
        selector: rich.selector,
        metadata,
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
