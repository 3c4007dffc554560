//! storage::file_store
//!
//! File-backed store: one file per entity under a fixed layout.
//!
//! # Layout
//!
//! See [`crate::core::paths`]. Profiles and Groups are tab-indented JSON
//! named `<id>.json`; Ignition and Cloud-config payloads are stored under
//! their own file names and returned verbatim.
//!
//! # Writes
//!
//! - Entities are validated before any filesystem access
//! - All writes are atomic (write hidden temp file, fsync, rename)
//! - Writers hold the store lock from temp file creation to rename
//! - Files get `file_mode` and created directories get `dir_mode`
//!
//! # Reads
//!
//! Reads take no lock. Thanks to the rename, a reader sees either the old
//! or the new file, never a partial one. `List` fails on the first file
//! that does not decode. A file removed between the directory scan and its
//! read is left out of the listing.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::{DirBuilderExt, PermissionsExt};

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{Store, StoreError};
use crate::core::config::StoreConfig;
use crate::core::entity::{
    encode_document, from_storage_form, to_storage_form, Group, Profile, RichGroup,
};
use crate::core::lock::StoreLock;
use crate::core::paths::{is_valid_file_key, EntityKind, StorePaths, JSON_EXTENSION};

/// File-backed [`Store`].
///
/// # Example
///
/// ```no_run
/// use bootstore::core::config::StoreConfig;
/// use bootstore::core::entity::Profile;
/// use bootstore::storage::{FileStore, Store};
///
/// let store = FileStore::new(StoreConfig::new("/var/lib/bootstore"));
/// store.init().unwrap();
///
/// store.profile_put(&Profile::new("etcd")).unwrap();
/// let profile = store.profile_get("etcd").unwrap();
/// assert_eq!(profile.id, "etcd");
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    config: StoreConfig,
    paths: StorePaths,
}

impl FileStore {
    /// Create a store over `config.root`.
    ///
    /// Nothing is touched on disk until the first operation.
    pub fn new(config: StoreConfig) -> Self {
        let paths = StorePaths::new(config.root.clone());
        Self { config, paths }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    /// Create the root and all four kind directories.
    ///
    /// Existing directories are left as they are.
    pub fn init(&self) -> Result<(), StoreError> {
        self.ensure_dir(self.paths.root())?;
        for kind in EntityKind::ALL {
            self.ensure_dir(&self.paths.kind_dir(kind))?;
        }
        debug!(root = %self.paths.root().display(), "initialized store layout");
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Read the whole file backing `key`.
    ///
    /// Keys that cannot name a file in the layout are reported as not
    /// found without touching the filesystem.
    fn read_entity(&self, kind: EntityKind, key: &str) -> Result<(PathBuf, Vec<u8>), StoreError> {
        if !is_valid_file_key(key) {
            return Err(StoreError::not_found(kind, key));
        }

        let path = self.paths.entity_path(kind, key);
        match fs::read(&path) {
            Ok(bytes) => {
                debug!(%kind, id = key, path = %path.display(), "read entity");
                Ok((path, bytes))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::not_found(kind, key))
            }
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    /// Paths of every document of `kind`, keyed by file stem, sorted.
    ///
    /// Hidden entries, directories and files without a `.json` extension
    /// are skipped. A missing kind directory lists as empty.
    fn document_paths(&self, kind: EntityKind) -> Result<Vec<(String, PathBuf)>, StoreError> {
        let dir = self.paths.kind_dir(kind);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(%kind, dir = %dir.display(), "kind directory missing, listing empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::io(dir, e)),
        };

        let mut found = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&dir, e))?;
            let path = entry.path();

            let Some(stem) = document_stem(&path) else {
                continue;
            };
            if !path.is_file() {
                continue;
            }
            found.push((stem, path));
        }
        found.sort();
        Ok(found)
    }

    fn list_documents<T, F>(&self, kind: EntityKind, mut decode: F) -> Result<Vec<T>, StoreError>
    where
        F: FnMut(&Path, &str, &[u8]) -> Result<T, StoreError>,
    {
        let mut items = Vec::new();
        for (stem, path) in self.document_paths(kind)? {
            let bytes = match fs::read(&path) {
                Ok(bytes) => bytes,
                // Removed since the directory scan; the listing no longer includes it.
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    debug!(%kind, path = %path.display(), "entry vanished during listing");
                    continue;
                }
                Err(e) => return Err(StoreError::io(&path, e)),
            };
            match decode(&path, &stem, &bytes) {
                Ok(item) => items.push(item),
                Err(err) => {
                    warn!(%kind, path = %path.display(), error = %err, "aborting listing on undecodable entry");
                    return Err(err);
                }
            }
        }
        debug!(%kind, count = items.len(), "listed entities");
        Ok(items)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Atomically replace the file backing `id` with `bytes`.
    fn write_entity(&self, kind: EntityKind, id: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.ensure_dir(&self.paths.kind_dir(kind))?;

        let _lock = StoreLock::acquire(&self.paths).map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.paths.lock_path());
            StoreError::io(path, e.into_io())
        })?;

        let target = self.paths.entity_path(kind, id);
        let temp = StorePaths::temp_path_for(&target);

        let result = self
            .write_temp(&temp, bytes)
            .and_then(|()| fs::rename(&temp, &target).map_err(|e| StoreError::io(&target, e)));

        match &result {
            Ok(()) => debug!(%kind, id, path = %target.display(), "wrote entity"),
            Err(_) => {
                if let Err(e) = fs::remove_file(&temp) {
                    if e.kind() != std::io::ErrorKind::NotFound {
                        warn!(path = %temp.display(), error = %e, "cannot remove temp file");
                    }
                }
            }
        }
        result
    }

    fn write_temp(&self, temp: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(temp)
            .map_err(|e| StoreError::io(temp, e))?;

        // Set permissions before writing content (Unix only)
        #[cfg(unix)]
        file.set_permissions(fs::Permissions::from_mode(self.config.file_mode))
            .map_err(|e| StoreError::io(temp, e))?;

        file.write_all(bytes).map_err(|e| StoreError::io(temp, e))?;
        file.sync_all().map_err(|e| StoreError::io(temp, e))?;
        Ok(())
    }

    fn ensure_dir(&self, dir: &Path) -> Result<(), StoreError> {
        if dir.is_dir() {
            return Ok(());
        }

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(self.config.dir_mode);
        builder.create(dir).map_err(|e| StoreError::io(dir, e))
    }
}

/// File stem of a listable document, or `None` if the entry should be
/// skipped.
fn document_stem(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    if name.starts_with('.') {
        return None;
    }
    let stem = name.strip_suffix(JSON_EXTENSION)?.strip_suffix('.')?;
    is_valid_file_key(stem).then(|| stem.to_string())
}

fn parse_json<T: DeserializeOwned>(path: &Path, bytes: &[u8]) -> Result<T, StoreError> {
    serde_json::from_slice(bytes).map_err(|e| StoreError::decode(path, e.to_string()))
}

/// Decoded entities must carry the id their file is named after.
fn check_id(path: &Path, expected: &str, found: &str) -> Result<(), StoreError> {
    if expected == found {
        Ok(())
    } else {
        Err(StoreError::decode(
            path,
            format!("id '{}' does not match file name '{}'", found, expected),
        ))
    }
}

fn decode_profile(path: &Path, id: &str, bytes: &[u8]) -> Result<Profile, StoreError> {
    let profile: Profile = parse_json(path, bytes)?;
    check_id(path, id, &profile.id)?;
    Ok(profile)
}

fn decode_group(path: &Path, id: &str, bytes: &[u8]) -> Result<Group, StoreError> {
    let rich: RichGroup = parse_json(path, bytes)?;
    check_id(path, id, &rich.id)?;
    from_storage_form(rich).map_err(|e| StoreError::decode(path, e.to_string()))
}

impl Store for FileStore {
    fn profile_get(&self, id: &str) -> Result<Profile, StoreError> {
        let (path, bytes) = self.read_entity(EntityKind::Profile, id)?;
        decode_profile(&path, id, &bytes)
    }

    fn profile_put(&self, profile: &Profile) -> Result<(), StoreError> {
        profile.validate()?;
        let path = self.paths.profile_path(&profile.id);
        let bytes = encode_document(profile).map_err(|e| StoreError::decode(path, e.to_string()))?;
        self.write_entity(EntityKind::Profile, &profile.id, &bytes)
    }

    fn profile_list(&self) -> Result<Vec<Profile>, StoreError> {
        self.list_documents(EntityKind::Profile, decode_profile)
    }

    fn group_get(&self, id: &str) -> Result<Group, StoreError> {
        let (path, bytes) = self.read_entity(EntityKind::Group, id)?;
        decode_group(&path, id, &bytes)
    }

    fn group_put(&self, group: &Group) -> Result<(), StoreError> {
        group.validate()?;
        let path = self.paths.group_path(&group.id);
        let bytes = to_storage_form(group)
            .map_err(|e| e.to_string())
            .and_then(|rich| encode_document(&rich).map_err(|e| e.to_string()))
            .map_err(|message| StoreError::decode(path, message))?;
        self.write_entity(EntityKind::Group, &group.id, &bytes)
    }

    fn group_list(&self) -> Result<Vec<Group>, StoreError> {
        self.list_documents(EntityKind::Group, decode_group)
    }

    fn ignition_get(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        let (_, bytes) = self.read_entity(EntityKind::Ignition, name)?;
        Ok(bytes)
    }

    fn cloud_get(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        let (_, bytes) = self.read_entity(EntityKind::Cloud, name)?;
        Ok(bytes)
    }
}
