//! Profile model
//!
//! A profile ties a display name to a category and a subject (character)
//! name. The subject and category together address the profile's backups,
//! so deleting a profile leaves its snapshots on disk.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use super::backup::FOLDER_SEPARATOR;
use super::category::Category;
use super::ids::ProfileId;

/// A named configuration profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique identifier
    pub id: ProfileId,

    /// Display name (not required to be unique)
    pub name: String,

    /// Category the profile's backups are filed under
    pub category: Category,

    /// Character the profile represents
    pub subject: String,

    /// Free-text notes
    #[serde(default)]
    pub description: String,

    /// Whether this is the currently active profile
    #[serde(default)]
    pub active: bool,

    /// When the profile was created
    pub created_at: DateTime<Utc>,

    /// When a backup was last taken or restored for this profile
    #[serde(default)]
    pub last_backup_at: Option<DateTime<Utc>>,

    /// Live directory this profile manages
    #[serde(default)]
    pub root_dir: PathBuf,
}

impl Profile {
    /// Create a new, inactive profile
    pub fn new(
        name: impl Into<String>,
        category: Category,
        subject: impl Into<String>,
        root_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            id: ProfileId::new(),
            name: name.into(),
            category,
            subject: subject.into(),
            description: String::new(),
            active: false,
            created_at: Utc::now(),
            last_backup_at: None,
            root_dir: root_dir.into(),
        }
    }

    /// Builder-style description setter
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check if this profile matches a name (case-insensitive)
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }

    /// Validate the profile
    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProfileValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(ProfileValidationError::NameTooLong(self.name.len()));
        }

        let subject = self.subject.trim();
        if subject.is_empty() {
            return Err(ProfileValidationError::EmptySubject);
        }

        // Backup folders are named `<subject>-<timestamp>` and parsed back by
        // splitting on the first separator.
        if let Some(c) = subject
            .chars()
            .find(|c| *c == FOLDER_SEPARATOR || *c == '/' || *c == '\\')
        {
            return Err(ProfileValidationError::InvalidSubjectChar(c));
        }

        Ok(())
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.name, self.subject, self.category)
    }
}

/// Validation errors for profiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    EmptyName,
    NameTooLong(usize),
    EmptySubject,
    InvalidSubjectChar(char),
}

impl fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Profile name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Profile name too long ({} chars, max 100)", len)
            }
            Self::EmptySubject => write!(f, "Character name cannot be empty"),
            Self::InvalidSubjectChar(c) => {
                write!(f, "Character name cannot contain '{}'", c)
            }
        }
    }
}

impl std::error::Error for ProfileValidationError {}
