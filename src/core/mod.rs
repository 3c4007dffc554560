//! core
//!
//! Core domain types, layout and configuration for the store.
//!
//! # Modules
//!
//! - [`entity`] - Groups, Profiles and their validation and storage forms
//! - [`paths`] - Centralized path routing for the directory layout
//! - [`config`] - Store configuration schema and loading
//! - [`lock`] - Exclusive writer lock
//!
//! # Design Principles
//!
//! - The in-memory and on-disk group shapes are separate types
//! - Validation happens before any filesystem access
//! - Permission policy is per-store configuration, not global state

pub mod config;
pub mod entity;
pub mod lock;
pub mod paths;
