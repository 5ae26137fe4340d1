//! User settings for profile-swapper
//!
//! Stores the game installation directory and the names of the live config
//! and backup directories beneath it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::paths::SwapperPaths;
use crate::error::SwapperError;

/// Game directory used when none has been configured
pub const DEFAULT_GAME_DIR: &str = "/Applications/World of Warcraft/_retail_";

/// User settings for profile-swapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Game installation directory that holds the live config directory
    #[serde(default = "default_game_dir")]
    pub game_dir: PathBuf,

    /// Name of the live config directory inside `game_dir`
    #[serde(default = "default_live_dir_name")]
    pub live_dir_name: String,

    /// Name of the backup root inside `game_dir`
    #[serde(default = "default_backup_dir_name")]
    pub backup_dir_name: String,

    /// Date format preference for display (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_game_dir() -> PathBuf {
    PathBuf::from(DEFAULT_GAME_DIR)
}

fn default_live_dir_name() -> String {
    "WTF".to_string()
}

fn default_backup_dir_name() -> String {
    "Swapper Backups".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            game_dir: default_game_dir(),
            live_dir_name: default_live_dir_name(),
            backup_dir_name: default_backup_dir_name(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// The directory that gets snapshotted and replaced on activation
    pub fn live_dir(&self) -> PathBuf {
        self.game_dir.join(&self.live_dir_name)
    }

    /// The root of the category-partitioned backup tree
    pub fn backup_root(&self) -> PathBuf {
        self.game_dir.join(&self.backup_dir_name)
    }

    /// Point the settings at a different game directory
    pub fn set_game_dir(&mut self, game_dir: impl AsRef<Path>) {
        self.game_dir = game_dir.as_ref().to_path_buf();
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &SwapperPaths) -> Result<Self, SwapperError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                SwapperError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SwapperError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SwapperPaths) -> Result<(), SwapperError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            SwapperError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            SwapperError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
