//! Core data models for profile-swapper
//!
//! This module contains the data structures of the swapping domain:
//! profiles, their categories, and the backup records derived from disk.

pub mod backup;
pub mod category;
pub mod ids;
pub mod profile;

pub use backup::BackupRecord;
pub use category::Category;
pub use ids::ProfileId;
pub use profile::{Profile, ProfileValidationError};
