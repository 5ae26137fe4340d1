//! Backup system for profile-swapper
//!
//! Snapshots the live config directory into a backup tree partitioned by
//! category, and restores snapshots back over it.
//!
//! # Architecture
//!
//! - `BackupStore`: owns the live directory and backup root paths; creates,
//!   lists, restores, deletes, and sizes snapshots
//! - `fs_ops`: recursive copy and sizing helpers
//!
//! # Backup Format
//!
//! Each snapshot is a plain directory holding a verbatim copy of the live
//! directory's top-level entries:
//!
//! ```text
//! <backup root>/<category>/<subject>-<YYYY-MM-DD-HH-mm-ss>/
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use swapper::backup::BackupStore;
//! use swapper::models::Category;
//!
//! let store = BackupStore::new("/games/wow/WTF", "/games/wow/Swapper Backups");
//! store.ensure_structure()?;
//!
//! let record = store.create(Category::Mage, "Thrall")?;
//! store.restore(&record.path)?;
//! ```

pub mod fs_ops;
mod restore;
mod store;

pub use store::{BackupStore, UNKNOWN_SIZE};
