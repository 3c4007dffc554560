//! core::config::schema
//!
//! Store configuration schema.
//!
//! # Example
//!
//! ```toml
//! root = "/var/lib/bootstore"
//! dir_mode = "0755"
//! file_mode = "0644"
//! ```
//!
//! Modes may be written as octal strings (`"0640"`, `"0o640"`) or as plain
//! integers (`416`).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Default store root.
pub const DEFAULT_ROOT: &str = "/var/lib/bootstore";

/// Default permission bits for created directories.
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Default permission bits for written entity files.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Largest accepted permission value (includes setuid/setgid/sticky).
const MAX_MODE: u32 = 0o7777;

/// Configuration for a [`FileStore`](crate::storage::FileStore).
///
/// Permission bits are per-store values rather than process-wide
/// constants, so separate stores can use separate policies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Root directory of the store layout
    pub root: PathBuf,

    /// Permission bits for directories the store creates
    #[serde(with = "octal_mode")]
    pub dir_mode: u32,

    /// Permission bits for entity files the store writes
    #[serde(with = "octal_mode")]
    pub file_mode: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            dir_mode: DEFAULT_DIR_MODE,
            file_mode: DEFAULT_FILE_MODE,
        }
    }
}

impl StoreConfig {
    /// Configuration rooted at `root` with default permissions.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn with_dir_mode(mut self, mode: u32) -> Self {
        self.dir_mode = mode;
        self
    }

    pub fn with_file_mode(mut self, mode: u32) -> Self {
        self.file_mode = mode;
        self
    }

    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the root is empty or a mode
    /// is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue("root cannot be empty".into()));
        }
        if self.dir_mode > MAX_MODE {
            return Err(ConfigError::InvalidValue(format!(
                "dir_mode {:o} is out of range (max {:o})",
                self.dir_mode, MAX_MODE
            )));
        }
        if self.file_mode > MAX_MODE {
            return Err(ConfigError::InvalidValue(format!(
                "file_mode {:o} is out of range (max {:o})",
                self.file_mode, MAX_MODE
            )));
        }
        Ok(())
    }
}

/// Permission bits as octal strings or integers.
mod octal_mode {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawMode {
        Int(u32),
        Text(String),
    }

    pub fn serialize<S: Serializer>(mode: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{:04o}", mode))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        match RawMode::deserialize(deserializer)? {
            RawMode::Int(mode) => Ok(mode),
            RawMode::Text(text) => {
                let digits = text.strip_prefix("0o").unwrap_or(&text);
                u32::from_str_radix(digits, 8)
                    .map_err(|_| D::Error::custom(format!("invalid octal mode '{}'", text)))
            }
        }
    }
}
