//! core::paths
//!
//! Centralized path routing for the store's directory layout.
//!
//! # Storage Layout
//!
//! Every entity lives in its own file under a fixed four-way partition of
//! the store root:
//! - `profiles/<id>.json` - Profile, tab-indented JSON
//! - `groups/<id>.json` - Group in its on-disk (rich) form, tab-indented JSON
//! - `ignition/<name>` - Ignition config payload, verbatim
//! - `cloud/<name>` - Cloud-config payload, verbatim
//!
//! The root also holds `.lock`, the writer lock file.
//!
//! **Hard rule:** no code outside this module joins kind directories or
//! file names onto the root. All paths go through `StorePaths`.
//!
//! # Example
//!
//! ```
//! use bootstore::core::paths::StorePaths;
//! use std::path::PathBuf;
//!
//! let paths = StorePaths::new("/var/lib/bootstore");
//!
//! assert_eq!(
//!     paths.profile_path("etcd"),
//!     PathBuf::from("/var/lib/bootstore/profiles/etcd.json")
//! );
//! assert_eq!(
//!     paths.ignition_path("node.ign"),
//!     PathBuf::from("/var/lib/bootstore/ignition/node.ign")
//! );
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

/// Extension used by JSON-encoded entities.
pub const JSON_EXTENSION: &str = "json";

/// Name of the writer lock file under the store root.
pub const LOCK_FILE_NAME: &str = ".lock";

/// The four entity classes, one subdirectory each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Profile,
    Group,
    Ignition,
    Cloud,
}

impl EntityKind {
    /// All kinds, in layout order.
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Profile,
        EntityKind::Group,
        EntityKind::Ignition,
        EntityKind::Cloud,
    ];

    /// Directory name of this kind under the store root.
    pub fn dir_name(self) -> &'static str {
        match self {
            EntityKind::Profile => "profiles",
            EntityKind::Group => "groups",
            EntityKind::Ignition => "ignition",
            EntityKind::Cloud => "cloud",
        }
    }

    /// Whether entities of this kind are JSON documents keyed by id.
    ///
    /// Config payloads are opaque and keyed by their full file name.
    pub fn is_document(self) -> bool {
        matches!(self, EntityKind::Profile | EntityKind::Group)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Profile => "profile",
            EntityKind::Group => "group",
            EntityKind::Ignition => "ignition config",
            EntityKind::Cloud => "cloud config",
        };
        f.write_str(name)
    }
}

/// Path routing for one store root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    root: PathBuf,
}

impl StorePaths {
    /// Create path routing for the given store root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // =========================================================================
    // Directories
    // =========================================================================

    /// Directory holding all entities of `kind`.
    pub fn kind_dir(&self, kind: EntityKind) -> PathBuf {
        self.root.join(kind.dir_name())
    }

    /// Path to the writer lock file.
    ///
    /// This is `<root>/.lock`.
    pub fn lock_path(&self) -> PathBuf {
        self.root.join(LOCK_FILE_NAME)
    }

    // =========================================================================
    // Entity files
    // =========================================================================

    /// Path to the file backing an entity of `kind`.
    ///
    /// Documents get a `.json` extension appended to their id; config
    /// payload names are used verbatim.
    pub fn entity_path(&self, kind: EntityKind, key: &str) -> PathBuf {
        let dir = self.kind_dir(kind);
        if kind.is_document() {
            dir.join(format!("{}.{}", key, JSON_EXTENSION))
        } else {
            dir.join(key)
        }
    }

    /// This is `<root>/profiles/<id>.json`.
    pub fn profile_path(&self, id: &str) -> PathBuf {
        self.entity_path(EntityKind::Profile, id)
    }

    /// This is `<root>/groups/<id>.json`.
    pub fn group_path(&self, id: &str) -> PathBuf {
        self.entity_path(EntityKind::Group, id)
    }

    /// This is `<root>/ignition/<name>`.
    pub fn ignition_path(&self, name: &str) -> PathBuf {
        self.entity_path(EntityKind::Ignition, name)
    }

    /// This is `<root>/cloud/<name>`.
    pub fn cloud_path(&self, name: &str) -> PathBuf {
        self.entity_path(EntityKind::Cloud, name)
    }

    /// Sibling temp file used while atomically replacing `target`.
    ///
    /// The temp name is hidden so listings skip it.
    pub fn temp_path_for(target: &Path) -> PathBuf {
        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        target.with_file_name(format!(".{}.tmp", name))
    }
}

/// Check that `name` can serve as a single file name inside a kind
/// directory.
///
/// Rejects empty names, `.`/`..`, hidden names, path separators and NUL.
pub fn is_valid_file_key(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\', '\0'])
}
