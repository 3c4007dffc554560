//! bootstore - file-backed metadata store for network boot provisioning
//!
//! Persists and retrieves the entities a network boot service works from:
//! Groups (machine-matching records), Profiles (boot recipes), and opaque
//! Ignition and Cloud-config payloads.
//!
//! # Architecture
//!
//! - [`core`] - Entity model, directory layout, configuration, locking
//! - [`storage`] - The [`storage::Store`] trait and its file-backed implementation
//! - [`cli`] - Command-line front end over a file store
//!
//! # Correctness Invariants
//!
//! 1. Invalid entities are rejected before any write
//! 2. Readers never observe a partially written file
//! 3. A missing entity is always a classified `NotFound`, never a default value
//! 4. Groups round-trip through disk unchanged

pub mod cli;
pub mod core;
pub mod storage;
