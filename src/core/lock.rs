//! core::lock
//!
//! Exclusive writer lock for a store root.
//!
//! # Architecture
//!
//! Every `Put` replaces its target file atomically, so readers never need a
//! lock. Writers do: two writers racing on the same identifier would share
//! a temp file name. The lock serializes writers across threads and
//! processes using an OS-level advisory lock on `<root>/.lock`.
//!
//! # Invariants
//!
//! - Lock must be held from temp file creation until the rename completes
//! - Lock is automatically released on drop (RAII pattern)
//! - [`StoreLock::acquire`] blocks; [`StoreLock::try_acquire`] does not
//!
//! # Example
//!
//! ```ignore
//! use bootstore::core::lock::StoreLock;
//! use bootstore::core::paths::StorePaths;
//!
//! let paths = StorePaths::new("/var/lib/bootstore");
//! let lock = StoreLock::acquire(&paths)?;
//! // ... write entity files ...
//! drop(lock);
//! ```

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

use crate::core::paths::StorePaths;

/// Errors from locking operations.
#[derive(Debug, Error)]
pub enum LockError {
    /// Another writer already holds the lock.
    #[error("store is locked by another writer")]
    AlreadyLocked,

    /// Failed to create or open the lock file.
    #[error("failed to create lock at {path}: {source}")]
    CreateFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to acquire the OS lock.
    #[error("failed to acquire lock at {path}: {source}")]
    AcquireFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl LockError {
    /// Path of the lock file involved, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            LockError::AlreadyLocked => None,
            LockError::CreateFailed { path, .. } | LockError::AcquireFailed { path, .. } => {
                Some(path)
            }
        }
    }

    /// Convert into the underlying I/O error.
    pub fn into_io(self) -> std::io::Error {
        match self {
            LockError::AlreadyLocked => {
                std::io::Error::new(std::io::ErrorKind::WouldBlock, "store is locked")
            }
            LockError::CreateFailed { source, .. } | LockError::AcquireFailed { source, .. } => {
                source
            }
        }
    }
}

/// An exclusive writer lock on a store root.
///
/// Released when dropped.
#[derive(Debug)]
pub struct StoreLock {
    path: PathBuf,
    file: File,
}

impl StoreLock {
    /// Acquire the writer lock, waiting for any current holder.
    ///
    /// The store root must already exist.
    ///
    /// # Errors
    ///
    /// - [`LockError::CreateFailed`] if the lock file cannot be opened
    /// - [`LockError::AcquireFailed`] if the OS lock call fails
    pub fn acquire(paths: &StorePaths) -> Result<Self, LockError> {
        let (path, file) = Self::open(paths)?;
        file.lock_exclusive()
            .map_err(|source| LockError::AcquireFailed {
                path: path.clone(),
                source,
            })?;
        Ok(Self { path, file })
    }

    /// Try to acquire the writer lock without waiting.
    ///
    /// # Errors
    ///
    /// - [`LockError::AlreadyLocked`] if another writer holds it
    /// - [`LockError::CreateFailed`] if the lock file cannot be opened
    /// - [`LockError::AcquireFailed`] if the OS lock call fails
    pub fn try_acquire(paths: &StorePaths) -> Result<Self, LockError> {
        let (path, file) = Self::open(paths)?;
        match file.try_lock_exclusive() {
            Ok(()) => Ok(Self { path, file }),
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
                Err(LockError::AlreadyLocked)
            }
            Err(source) => Err(LockError::AcquireFailed { path, source }),
        }
    }

    /// Get the path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(paths: &StorePaths) -> Result<(PathBuf, File), LockError> {
        let path = paths.lock_path();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| LockError::CreateFailed {
                path: path.clone(),
                source,
            })?;
        Ok((path, file))
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        // Best-effort; closing the handle releases the lock regardless.
        let _ = self.file.unlock();
    }
}
