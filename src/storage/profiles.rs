//! Profile persistence
//!
//! The registry reads and writes its whole profile collection through the
//! [`ProfileStore`] trait. `JsonProfileStore` keeps it in `profiles.json`;
//! `MemoryProfileStore` keeps it in process.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SwapperError;
use crate::models::Profile;

use super::file_io::{read_json, write_json_atomic};

/// Durable slot for the ordered profile collection
///
/// Saving a collection and loading it back must reproduce it field-for-field.
pub trait ProfileStore {
    /// Load every profile, in saved order
    fn load(&self) -> Result<Vec<Profile>, SwapperError>;

    /// Replace the stored collection
    fn save(&self, profiles: &[Profile]) -> Result<(), SwapperError>;
}

/// Serializable profile data structure
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct ProfileData {
    #[serde(default = "default_schema_version")]
    schema_version: u32,
    #[serde(default)]
    profiles: Vec<Profile>,
}

fn default_schema_version() -> u32 {
    1
}

impl Default for ProfileData {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            profiles: Vec::new(),
        }
    }
}

/// Profile store backed by a JSON file with atomic writes
#[derive(Debug, Clone)]
pub struct JsonProfileStore {
    path: PathBuf,
}

impl JsonProfileStore {
    /// Create a store that reads and writes `path`
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ProfileStore for JsonProfileStore {
    fn load(&self) -> Result<Vec<Profile>, SwapperError> {
        let data: ProfileData = read_json(&self.path)?;
        Ok(data.profiles)
    }

    fn save(&self, profiles: &[Profile]) -> Result<(), SwapperError> {
        let data = ProfileData {
            schema_version: default_schema_version(),
            profiles: profiles.to_vec(),
        };
        write_json_atomic(&self.path, &data)
    }
}

/// Profile store that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<Vec<Profile>>,
}

impl MemoryProfileStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `profiles`
    pub fn with_profiles(profiles: Vec<Profile>) -> Self {
        Self {
            profiles: RwLock::new(profiles),
        }
    }
}

impl ProfileStore for MemoryProfileStore {
    fn load(&self) -> Result<Vec<Profile>, SwapperError> {
        let profiles = self.profiles.read().map_err(|e| {
            SwapperError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(profiles.clone())
    }

    fn save(&self, profiles: &[Profile]) -> Result<(), SwapperError> {
        let mut stored = self.profiles.write().map_err(|e| {
            SwapperError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *stored = profiles.to_vec();
        Ok(())
    }
}

impl<T: ProfileStore + ?Sized> ProfileStore for &T {
    fn load(&self) -> Result<Vec<Profile>, SwapperError> {
        (**self).load()
    }

    fn save(&self, profiles: &[Profile]) -> Result<(), SwapperError> {
        (**self).save(profiles)
    }
}
