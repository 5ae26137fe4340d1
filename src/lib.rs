//! profile-swapper - Swap game configuration profiles
//!
//! This library keeps named profiles for a game whose configuration lives in
//! a single "live" directory. Activating a profile snapshots the live
//! directory for the outgoing profile and restores the incoming profile's
//! most recent snapshot.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (profiles, categories, backup records)
//! - `storage`: JSON file storage and the profile persistence trait
//! - `backup`: Directory snapshot store
//! - `services`: Profile registry and activation state machine
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `swapper` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use swapper::backup::BackupStore;
//! use swapper::config::{Settings, SwapperPaths};
//! use swapper::services::ProfileRegistry;
//! use swapper::storage::JsonProfileStore;
//!
//! let paths = SwapperPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let store = JsonProfileStore::new(paths.profiles_file());
//! let mut registry = ProfileRegistry::load(store, BackupStore::from_settings(&settings))?;
//! let report = registry.activate(profile_id)?;
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::SwapperError;
