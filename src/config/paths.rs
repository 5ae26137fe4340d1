//! Path management for profile-swapper
//!
//! Resolves where the application keeps its own state: settings, the profile
//! registry, and the audit log. The game directory itself lives in
//! [`Settings`](super::settings::Settings).
//!
//! ## Path Resolution Order
//!
//! 1. `SWAPPER_DATA_DIR` environment variable (if set)
//! 2. The platform config directory reported by `directories`
//!    (`~/.config/profile-swapper` on Linux,
//!    `~/Library/Application Support/profile-swapper` on macOS,
//!    `%APPDATA%\profile-swapper\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::SwapperError;

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "SWAPPER_DATA_DIR";

/// Manages all paths used by profile-swapper
#[derive(Debug, Clone)]
pub struct SwapperPaths {
    /// Base directory for all profile-swapper data
    base_dir: PathBuf,
}

impl SwapperPaths {
    /// Create a new SwapperPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no platform config directory can be determined.
    pub fn new() -> Result<Self, SwapperError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create SwapperPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the persisted profile registry
    pub fn profiles_file(&self) -> PathBuf {
        self.base_dir.join("profiles.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), SwapperError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SwapperError::Io(format!("Failed to create base directory: {}", e)))
    }

    /// Check if profile-swapper has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, SwapperError> {
    ProjectDirs::from("", "", "profile-swapper")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| SwapperError::Config("Could not determine a config directory".into()))
}
