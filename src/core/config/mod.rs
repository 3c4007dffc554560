//! core::config
//!
//! Configuration schema and loading.
//!
//! # Config Locations
//!
//! Searched in order; the first hit wins:
//! 1. An explicit path (e.g. `--config`); it must exist
//! 2. `$BOOTSTORE_CONFIG` if set; it must exist
//! 3. `$XDG_CONFIG_HOME/bootstore/config.toml` (or the platform config dir)
//!
//! If nothing is found, [`StoreConfig::default`] is used.
//!
//! # Example
//!
//! ```no_run
//! use bootstore::core::config::load;
//!
//! let loaded = load(None).unwrap();
//! println!("store root: {}", loaded.config.root.display());
//! ```

pub mod schema;

pub use schema::{StoreConfig, DEFAULT_DIR_MODE, DEFAULT_FILE_MODE, DEFAULT_ROOT};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "BOOTSTORE_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: StoreConfig,
    /// The file it was read from, if any.
    pub path: Option<PathBuf>,
}

/// Load configuration, searching the standard locations.
///
/// # Errors
///
/// Returns an error if an explicitly named file (argument or environment)
/// is missing, or if any file found cannot be parsed or fails validation.
pub fn load(explicit: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => locate(),
    };

    let config = match &path {
        Some(path) => read_file(path)?,
        None => StoreConfig::default(),
    };
    config.validate()?;

    Ok(ConfigLoadResult { config, path })
}

/// Find a config file in the implicit locations.
fn locate() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg_home).join("bootstore/config.toml");
        if path.exists() {
            return Some(path);
        }
    }

    dirs::config_dir()
        .map(|dir| dir.join("bootstore/config.toml"))
        .filter(|path| path.exists())
}

/// Read and parse a config file.
pub fn read_file(path: &Path) -> Result<StoreConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
