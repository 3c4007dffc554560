//! storage
//!
//! Identifier-keyed storage for boot configuration entities.
//!
//! # Architecture
//!
//! Entities are accessed through the [`Store`] trait. The production
//! implementation is [`FileStore`], which keeps one file per entity under
//! a fixed directory layout (see [`crate::core::paths`]).
//!
//! # Errors
//!
//! Every operation returns a classified [`StoreError`]:
//!
//! - `InvalidEntity` - validation failed before any I/O
//! - `NotFound` - no file for the identifier or name
//! - `Decode` - file content is not a valid entity
//! - `StorageIo` - any other filesystem failure
//!
//! Nothing is retried and nothing is silently recovered.

mod error;
mod file_store;
mod traits;

pub use error::{ErrorKind, StoreError};
pub use file_store::FileStore;
pub use traits::Store;
