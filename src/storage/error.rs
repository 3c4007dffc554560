//! Classified errors for store operations.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::entity::EntityError;
use crate::core::paths::EntityKind;

/// Errors returned by every [`Store`](super::Store) operation.
///
/// Callers branch on the variant (or on [`StoreError::kind`]); they never
/// need to inspect a platform I/O error to detect a missing entity.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The entity failed validation; nothing was written.
    #[error("invalid entity: {0}")]
    InvalidEntity(#[from] EntityError),

    /// No file exists for the requested identifier or name.
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// File content is not a valid entity.
    #[error("cannot decode {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Any other filesystem failure.
    #[error("storage I/O error at {path}: {source}")]
    StorageIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The error class of a [`StoreError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidEntity,
    NotFound,
    Decode,
    StorageIo,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidEntity => "invalid entity",
            ErrorKind::NotFound => "not found",
            ErrorKind::Decode => "decode error",
            ErrorKind::StorageIo => "storage I/O error",
        };
        f.write_str(name)
    }
}

impl StoreError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn decode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StorageIo {
            path: path.into(),
            source,
        }
    }

    /// The class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::InvalidEntity(_) => ErrorKind::InvalidEntity,
            StoreError::NotFound { .. } => ErrorKind::NotFound,
            StoreError::Decode { .. } => ErrorKind::Decode,
            StoreError::StorageIo { .. } => ErrorKind::StorageIo,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}
