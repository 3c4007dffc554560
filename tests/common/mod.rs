//! Common test utilities.
//!
//! [`FixedStore`] is an in-memory store used two ways: as a [`Store`] in
//! its own right, and as a description of a directory tree that
//! [`FixedStore::seed`] writes out for a [`FileStore`] to read.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::RwLock;

use serde_json::json;
use tempfile::TempDir;

use bootstore::core::config::StoreConfig;
use bootstore::core::entity::{encode_document, to_storage_form, Group, NetBoot, Profile};
use bootstore::core::paths::{EntityKind, StorePaths};
use bootstore::storage::{FileStore, Store, StoreError};

// =============================================================================
// Fixtures
// =============================================================================

/// A group with selectors and metadata.
pub fn group() -> Group {
    Group::new("test-group")
        .with_name("test group")
        .with_profile("g1h2i3j4")
        .with_selector("uuid", "a1b2c3d4")
        .with_selector("mac", "52:54:00:a1:9c:ae")
        .with_selector("os", "installed")
        .with_metadata("pod_network", json!("10.2.0.0/16"))
        .with_metadata("service_name", json!("etcd2"))
}

/// A group with selectors and no metadata.
pub fn group_no_metadata() -> Group {
    Group::new("group-no-metadata")
        .with_selector("uuid", "a1b2c3d4")
        .with_selector("mac", "52:54:00:a1:9c:ae")
        .with_selector("os", "installed")
}

/// A profile with every field set.
pub fn profile() -> Profile {
    Profile {
        id: "g1h2i3j4".into(),
        name: "test profile".into(),
        ignition_id: "ignition.json".into(),
        cloud_id: "cloud-config.yml".into(),
        boot: Some(NetBoot {
            kernel: "/image/kernel".into(),
            initrd: vec!["/image/initrd_a".into(), "/image/initrd_b".into()],
            cmdline: [("a".to_string(), "b".to_string()), ("c".to_string(), String::new())]
                .into_iter()
                .collect(),
        }),
    }
}

/// An Ignition config as a booting machine would fetch it.
pub const IGNITION_CONTENT: &str = r#"{"ignitionVersion":1,"storage":{},"systemd":{"units":[{"name":"etcd2.service","enable":true}]},"networkd":{},"passwd":{}}"#;

// =============================================================================
// FixedStore
// =============================================================================

/// In-memory store with fixed contents.
#[derive(Debug, Default)]
pub struct FixedStore {
    groups: RwLock<HashMap<String, Group>>,
    profiles: RwLock<HashMap<String, Profile>>,
    ignition_configs: HashMap<String, Vec<u8>>,
    cloud_configs: HashMap<String, Vec<u8>>,
}

impl FixedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(self, group: Group) -> Self {
        self.groups
            .write()
            .expect("groups lock")
            .insert(group.id.clone(), group);
        self
    }

    pub fn with_profile(self, profile: Profile) -> Self {
        self.profiles
            .write()
            .expect("profiles lock")
            .insert(profile.id.clone(), profile);
        self
    }

    pub fn with_ignition(mut self, name: &str, content: impl AsRef<[u8]>) -> Self {
        self.ignition_configs
            .insert(name.to_string(), content.as_ref().to_vec());
        self
    }

    pub fn with_cloud(mut self, name: &str, content: impl AsRef<[u8]>) -> Self {
        self.cloud_configs
            .insert(name.to_string(), content.as_ref().to_vec());
        self
    }

    /// Write this store's contents into a fresh temp directory using the
    /// file store layout. Returns the directory, which is removed on drop.
    pub fn seed(&self) -> TempDir {
        let dir = TempDir::new().expect("create temp dir");
        let paths = StorePaths::new(dir.path());
        for kind in EntityKind::ALL {
            fs::create_dir(paths.kind_dir(kind)).expect("create kind dir");
        }

        for profile in self.profiles.read().expect("profiles lock").values() {
            let data = encode_document(profile).expect("encode profile");
            fs::write(paths.profile_path(&profile.id), data).expect("write profile");
        }
        for group in self.groups.read().expect("groups lock").values() {
            let rich = to_storage_form(group).expect("to storage form");
            let data = encode_document(&rich).expect("encode group");
            fs::write(paths.group_path(&group.id), data).expect("write group");
        }
        for (name, content) in &self.ignition_configs {
            fs::write(paths.ignition_path(name), content).expect("write ignition");
        }
        for (name, content) in &self.cloud_configs {
            fs::write(paths.cloud_path(name), content).expect("write cloud config");
        }

        dir
    }
}

impl Store for FixedStore {
    fn profile_get(&self, id: &str) -> Result<Profile, StoreError> {
        self.profiles
            .read()
            .expect("profiles lock")
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Profile, id))
    }

    fn profile_put(&self, profile: &Profile) -> Result<(), StoreError> {
        profile.validate()?;
        self.profiles
            .write()
            .expect("profiles lock")
            .insert(profile.id.clone(), profile.clone());
        Ok(())
    }

    fn profile_list(&self) -> Result<Vec<Profile>, StoreError> {
        Ok(self
            .profiles
            .read()
            .expect("profiles lock")
            .values()
            .cloned()
            .collect())
    }

    fn group_get(&self, id: &str) -> Result<Group, StoreError> {
        self.groups
            .read()
            .expect("groups lock")
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Group, id))
    }

    fn group_put(&self, group: &Group) -> Result<(), StoreError> {
        group.validate()?;
        self.groups
            .write()
            .expect("groups lock")
            .insert(group.id.clone(), group.clone());
        Ok(())
    }

    fn group_list(&self) -> Result<Vec<Group>, StoreError> {
        Ok(self
            .groups
            .read()
            .expect("groups lock")
            .values()
            .cloned()
            .collect())
    }

    fn ignition_get(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        self.ignition_configs
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Ignition, name))
    }

    fn cloud_get(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        self.cloud_configs
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Cloud, name))
    }
}

/// Open a file store over `root` with default permissions.
pub fn file_store(root: &Path) -> FileStore {
    FileStore::new(StoreConfig::new(root))
}
