//! Custom error types for profile-swapper
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for profile-swapper operations
#[derive(Error, Debug)]
pub enum SwapperError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// The live directory (for a snapshot) or the backup directory (for a
    /// restore) does not exist
    #[error("Source directory not found: {}", .0.display())]
    SourceMissing(PathBuf),

    /// Copying the live directory into a snapshot failed
    #[error("Backup copy failed: {0}")]
    CopyFailed(String),

    /// Copying a snapshot back into the live directory failed
    #[error("Restore failed: {0}")]
    RestoreFailed(String),

    /// Removing a snapshot failed
    #[error("Delete failed: {0}")]
    DeleteFailed(String),
}

impl SwapperError {
    /// Create a "not found" error for profiles
    pub fn profile_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Profile",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for backups
    pub fn backup_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Backup",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from a snapshot, restore, or delete of a backup
    pub fn is_filesystem_failure(&self) -> bool {
        matches!(
            self,
            Self::SourceMissing(_)
                | Self::CopyFailed(_)
                | Self::RestoreFailed(_)
                | Self::DeleteFailed(_)
        )
    }
}

impl From<std::io::Error> for SwapperError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SwapperError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for profile-swapper operations
pub type SwapperResult<T> = Result<T, SwapperError>;
