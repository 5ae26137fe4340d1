//! Backup restoration for profile-swapper
//!
//! Replaces the live directory with the contents of a snapshot.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{SwapperError, SwapperResult};
use crate::models::BackupRecord;

use super::fs_ops;
use super::store::BackupStore;

impl BackupStore {
    /// Replace the live directory with the snapshot at `backup_path`
    ///
    /// Refused when the snapshot and the live directory contain one another.
    /// The current live directory is removed first and is not recoverable
    /// afterwards. A missing live directory is simply created. A failure
    /// part-way through the copy leaves the live directory partially restored.
    pub fn restore(&self, backup_path: &Path) -> SwapperResult<()> {
        if !backup_path.exists() {
            return Err(SwapperError::SourceMissing(backup_path.to_path_buf()));
        }

        let live_dir = self.live_dir();
        if fs_ops::nested(backup_path, live_dir) {
            return Err(SwapperError::RestoreFailed(format!(
                "{} and the live directory {} overlap",
                backup_path.display(),
                live_dir.display()
            )));
        }

        if live_dir.exists() {
            fs::remove_dir_all(live_dir).map_err(|e| {
                SwapperError::RestoreFailed(format!(
                    "Failed to clear {}: {}",
                    live_dir.display(),
                    e
                ))
            })?;
        }

        fs::create_dir_all(live_dir).map_err(|e| {
            SwapperError::RestoreFailed(format!(
                "Failed to create {}: {}",
                live_dir.display(),
                e
            ))
        })?;

        fs_ops::copy_entries(backup_path, live_dir).map_err(|e| {
            warn!(live_dir = %live_dir.display(), error = %e, "live directory partially restored");
            SwapperError::RestoreFailed(format!(
                "Failed to copy {} into {}: {}",
                backup_path.display(),
                live_dir.display(),
                e
            ))
        })?;

        info!(from = %backup_path.display(), "restored backup");
        Ok(())
    }

    /// Restore from a listed snapshot
    pub fn restore_record(&self, record: &BackupRecord) -> SwapperResult<()> {
        self.restore(&record.path)
    }
}
