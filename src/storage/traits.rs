//! Store trait definition.
//!
//! # Design
//!
//! The `Store` trait is identifier-keyed access to the four entity
//! classes. Profiles and Groups support get, list and put. Ignition and
//! Cloud-config payloads are deployed artifacts: the store only reads them.
//!
//! There is no delete and no filtering. The matching engine consumes full
//! group listings.
//!
//! # Example
//!
//! ```ignore
//! use bootstore::storage::{Store, StoreError};
//!
//! fn ignition_for(store: &dyn Store, profile_id: &str) -> Result<Vec<u8>, StoreError> {
//!     let profile = store.profile_get(profile_id)?;
//!     store.ignition_get(&profile.ignition_id)
//! }
//! ```

use crate::core::entity::{Group, Profile};

use super::StoreError;

/// Identifier-keyed storage for boot configuration entities.
///
/// Implementations must be thread-safe (Send + Sync). Reads return owned
/// copies; callers never alias stored state.
pub trait Store: Send + Sync {
    /// Get a profile by id.
    ///
    /// Returns [`StoreError::NotFound`] if no such profile exists.
    fn profile_get(&self, id: &str) -> Result<Profile, StoreError>;

    /// Create or replace a profile.
    ///
    /// Validation happens before any write; an invalid profile returns
    /// [`StoreError::InvalidEntity`] and leaves the store untouched.
    fn profile_put(&self, profile: &Profile) -> Result<(), StoreError>;

    /// List every profile. Order is unspecified.
    fn profile_list(&self) -> Result<Vec<Profile>, StoreError>;

    /// Get a group by id.
    fn group_get(&self, id: &str) -> Result<Group, StoreError>;

    /// Create or replace a group.
    fn group_put(&self, group: &Group) -> Result<(), StoreError>;

    /// List every group. Order is unspecified.
    fn group_list(&self) -> Result<Vec<Group>, StoreError>;

    /// Get an Ignition config payload by file name.
    ///
    /// The bytes are returned exactly as stored; no encoding is assumed.
    fn ignition_get(&self, name: &str) -> Result<Vec<u8>, StoreError>;

    /// Get a Cloud-config payload by file name, byte for byte.
    fn cloud_get(&self, name: &str) -> Result<Vec<u8>, StoreError>;
}
