//! Backup record model
//!
//! A backup record describes one snapshot directory on disk. Records are
//! never stored separately; they are rebuilt by scanning the category
//! directory, so the folder name is the on-disk contract:
//!
//! ```text
//! <backup root>/<category>/<subject>-<YYYY-MM-DD-HH-mm-ss>/
//! ```

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::category::Category;

/// Separator between the subject and the timestamp in a folder name
pub const FOLDER_SEPARATOR: char = '-';

/// strftime format of the timestamp part of a folder name (sorts lexically)
pub const FOLDER_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// Metadata about one snapshot of the live directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupRecord {
    /// Character the snapshot belongs to
    pub subject: String,
    /// Category directory the snapshot lives in
    pub category: Category,
    /// When the snapshot was created, from filesystem metadata
    pub created_at: DateTime<Utc>,
    /// Snapshot directory name
    pub folder_name: String,
    /// Full path to the snapshot directory
    pub path: PathBuf,
}

impl BackupRecord {
    /// Build the folder name for a snapshot taken at `at`
    pub fn folder_name_for(subject: &str, at: DateTime<Local>) -> String {
        format!(
            "{}{}{}",
            subject,
            FOLDER_SEPARATOR,
            at.format(FOLDER_TIMESTAMP_FORMAT)
        )
    }

    /// Recover the subject from a folder name
    ///
    /// The subject is everything before the first separator. A name without a
    /// separator is taken whole.
    pub fn subject_from_folder(folder_name: &str) -> &str {
        folder_name
            .split(FOLDER_SEPARATOR)
            .next()
            .unwrap_or(folder_name)
    }

    /// Check whether this record belongs to the given subject
    pub fn is_for(&self, subject: &str) -> bool {
        self.subject == subject
    }
}
