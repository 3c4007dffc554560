//! core::entity::profile
//!
//! Profiles: named boot recipes.
//!
//! The boot fields (kernel, initrd, kernel command line) are references
//! handed to the boot protocol layer. The store does not interpret them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{validate_id, EntityError};

/// A named boot recipe, stored at `profiles/<id>.json`.
///
/// # Example
///
/// ```
/// use bootstore::core::entity::{NetBoot, Profile};
///
/// let profile = Profile {
///     id: "etcd".into(),
///     name: "etcd node".into(),
///     ignition_id: "etcd.ign".into(),
///     boot: Some(NetBoot {
///         kernel: "/assets/coreos/vmlinuz".into(),
///         initrd: vec!["/assets/coreos/initrd.cpio.gz".into()],
///         ..NetBoot::default()
///     }),
///     ..Profile::default()
/// };
/// assert!(profile.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique identifier; also the file stem on disk.
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Name of the Ignition config served to machines using this profile.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ignition_id: String,

    /// Name of the Cloud-config served to machines using this profile.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cloud_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boot: Option<NetBoot>,
}

impl Profile {
    /// Create an empty profile with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Check the profile can be stored.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::IdRequired`] if the id is empty, or
    /// [`EntityError::InvalidId`] if it cannot be a file name.
    pub fn validate(&self) -> Result<(), EntityError> {
        validate_id(&self.id)
    }
}

/// Network boot parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetBoot {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kernel: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub initrd: Vec<String>,

    /// Kernel command line arguments; an empty value is a bare flag.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub cmdline: BTreeMap<String, String>,
}
