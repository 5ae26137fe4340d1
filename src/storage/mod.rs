//! Storage layer for profile-swapper
//!
//! Provides JSON file storage with atomic writes and the persistence
//! collaborator used by the profile registry.

pub mod file_io;
pub mod profiles;

pub use file_io::{read_json, write_json_atomic};
pub use profiles::{JsonProfileStore, MemoryProfileStore, ProfileStore};
