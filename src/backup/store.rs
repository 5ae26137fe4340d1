//! Backup store for profile-swapper
//!
//! Snapshots the live directory into a category-partitioned backup tree and
//! enumerates, sizes, and deletes those snapshots.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local, Utc};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::error::{SwapperError, SwapperResult};
use crate::models::backup::FOLDER_SEPARATOR;
use crate::models::{BackupRecord, Category};

use super::fs_ops;

/// Sentinel returned by [`BackupStore::size`] when the size cannot be read
pub const UNKNOWN_SIZE: &str = "Unknown";

/// Manages snapshots of one live directory
///
/// # Directory Structure
///
/// ```text
/// <backup root>/
/// ├── Mage/
/// │   ├── Thrall-2025-03-07-09-05-02/
/// │   └── Thrall-2025-02-11-20-41-17/
/// ├── Paladin/
/// │   └── Jaina-2025-03-01-18-00-00/
/// └── ... one directory per category
/// ```
#[derive(Debug, Clone)]
pub struct BackupStore {
    /// Directory that gets snapshotted and replaced
    live_dir: PathBuf,
    /// Root of the category directories
    backup_root: PathBuf,
}

impl BackupStore {
    /// Create a store for the given live directory and backup root
    ///
    /// Does not touch the filesystem; call [`ensure_structure`](Self::ensure_structure)
    /// to create the category directories.
    pub fn new(live_dir: impl Into<PathBuf>, backup_root: impl Into<PathBuf>) -> Self {
        Self {
            live_dir: live_dir.into(),
            backup_root: backup_root.into(),
        }
    }

    /// Create a store from the configured game directory
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.live_dir(), settings.backup_root())
    }

    /// The live directory
    pub fn live_dir(&self) -> &Path {
        &self.live_dir
    }

    /// The backup root
    pub fn backup_root(&self) -> &Path {
        &self.backup_root
    }

    /// Point the store at a different live directory
    pub fn set_live_dir(&mut self, live_dir: impl Into<PathBuf>) -> SwapperResult<()> {
        self.live_dir = live_dir.into();
        self.ensure_structure()
    }

    /// Point the store at a different backup root
    pub fn set_backup_root(&mut self, backup_root: impl Into<PathBuf>) -> SwapperResult<()> {
        self.backup_root = backup_root.into();
        self.ensure_structure()
    }

    /// Directory holding the snapshots of one category
    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.backup_root.join(category.label())
    }

    /// Create the directory of every category if missing
    ///
    /// Fails if the backup root and the live directory contain one another.
    pub fn ensure_structure(&self) -> SwapperResult<()> {
        if let Some(message) = self.overlap() {
            return Err(SwapperError::Config(message));
        }

        for category in Category::ALL {
            let dir = self.category_dir(category);
            fs::create_dir_all(&dir).map_err(|e| {
                SwapperError::Io(format!(
                    "Failed to create backup directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Snapshot the live directory for `subject` under `category`
    ///
    /// A failure part-way through leaves the partially copied snapshot on
    /// disk. Existing snapshots are never touched: a second snapshot of the
    /// same subject within one second gets a `-2`, `-3`, ... suffix.
    pub fn create(&self, category: Category, subject: &str) -> SwapperResult<BackupRecord> {
        if !self.live_dir.exists() {
            return Err(SwapperError::SourceMissing(self.live_dir.clone()));
        }
        if let Some(message) = self.overlap() {
            return Err(SwapperError::CopyFailed(message));
        }

        let now = Local::now();
        let base_name = BackupRecord::folder_name_for(subject, now);
        let category_dir = self.category_dir(category);
        let (folder_name, destination) =
            claim_destination(&category_dir, &base_name).map_err(|e| {
                SwapperError::CopyFailed(format!(
                    "Failed to create snapshot in {}: {}",
                    category_dir.display(),
                    e
                ))
            })?;

        fs_ops::copy_entries(&self.live_dir, &destination).map_err(|e| {
            warn!(
                destination = %destination.display(),
                error = %e,
                "snapshot left partially copied"
            );
            SwapperError::CopyFailed(format!(
                "Failed to copy {} into {}: {}",
                self.live_dir.display(),
                destination.display(),
                e
            ))
        })?;

        info!(%category, subject, folder = %folder_name, "created backup");

        Ok(BackupRecord {
            subject: subject.to_string(),
            category,
            created_at: created_time(&destination).unwrap_or_else(|| now.with_timezone(&Utc)),
            folder_name,
            path: destination,
        })
    }

    /// List the snapshots of one category, newest first
    ///
    /// A missing or unreadable category directory yields an empty list.
    pub fn list(&self, category: Category) -> Vec<BackupRecord> {
        let dir = self.category_dir(category);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "no backups readable");
                return Vec::new();
            }
        };

        let mut records: Vec<BackupRecord> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .map(|entry| record_for(category, entry.path()))
            .collect();

        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.folder_name.cmp(&a.folder_name))
        });

        records
    }

    /// Most recent snapshot of `subject` within `category`
    pub fn latest_for(&self, category: Category, subject: &str) -> Option<BackupRecord> {
        self.list(category).into_iter().find(|r| r.is_for(subject))
    }

    /// Find a snapshot by folder name
    ///
    /// `latest` selects the most recent snapshot of the category.
    pub fn find(&self, category: Category, folder_name: &str) -> Option<BackupRecord> {
        let records = self.list(category);
        if folder_name.eq_ignore_ascii_case("latest") {
            return records.into_iter().next();
        }
        records.into_iter().find(|r| r.folder_name == folder_name)
    }

    /// Remove a snapshot
    pub fn delete(&self, record: &BackupRecord) -> SwapperResult<()> {
        if !record.path.starts_with(&self.backup_root) {
            return Err(SwapperError::DeleteFailed(format!(
                "{} is outside the backup root {}",
                record.path.display(),
                self.backup_root.display()
            )));
        }

        fs::remove_dir_all(&record.path).map_err(|e| {
            SwapperError::DeleteFailed(format!("{}: {}", record.path.display(), e))
        })?;

        info!(category = %record.category, folder = %record.folder_name, "deleted backup");
        Ok(())
    }

    /// Total size of a snapshot in bytes
    pub fn size_bytes(&self, record: &BackupRecord) -> Option<u64> {
        fs_ops::dir_size(&record.path)
    }

    /// Human-readable size of a snapshot, or [`UNKNOWN_SIZE`]
    pub fn size(&self, record: &BackupRecord) -> String {
        self.size_bytes(record)
            .map(fs_ops::format_size)
            .unwrap_or_else(|| UNKNOWN_SIZE.to_string())
    }
}

impl BackupStore {
    fn overlap(&self) -> Option<String> {
        fs_ops::nested(&self.live_dir, &self.backup_root).then(|| {
            format!(
                "backup root {} and live directory {} overlap",
                self.backup_root.display(),
                self.live_dir.display()
            )
        })
    }
}

/// Create a fresh snapshot directory named `base`, or `base-2`, `base-3`, ...
fn claim_destination(dir: &Path, base: &str) -> io::Result<(String, PathBuf)> {
    fs::create_dir_all(dir)?;

    let mut attempt: u32 = 1;
    loop {
        let name = if attempt == 1 {
            base.to_string()
        } else {
            format!("{}{}{}", base, FOLDER_SEPARATOR, attempt)
        };
        let path = dir.join(&name);
        match fs::create_dir(&path) {
            Ok(()) => return Ok((name, path)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => return Err(e),
        }
    }
}

/// Build a record from a snapshot directory found on disk
fn record_for(category: Category, path: PathBuf) -> BackupRecord {
    let folder_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let subject = BackupRecord::subject_from_folder(&folder_name).to_string();
    let created_at = created_time(&path).unwrap_or_else(Utc::now);

    BackupRecord {
        subject,
        category,
        created_at,
        folder_name,
        path,
    }
}

/// Creation time from filesystem metadata, falling back to modification time
fn created_time(path: &Path) -> Option<DateTime<Utc>> {
    let metadata = fs::metadata(path).ok()?;
    let time: SystemTime = metadata.created().or_else(|_| metadata.modified()).ok()?;
    Some(DateTime::<Utc>::from(time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;
    use tempfile::TempDir;

    fn create_test_store() -> (BackupStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let live = temp_dir.path().join("WTF");
        fs::create_dir_all(live.join("SavedVariables")).unwrap();
        fs::write(live.join("Account.lua"), "account = 1").unwrap();
        fs::write(live.join("SavedVariables/Foo.lua"), "foo = true").unwrap();

        let store = BackupStore::new(live, temp_dir.path().join("Swapper Backups"));
        (store, temp_dir)
    }

    #[test]
    fn test_ensure_structure_creates_every_category() {
        let (store, _temp) = create_test_store();
        store.ensure_structure().unwrap();

        for category in Category::ALL {
            assert!(store.category_dir(category).is_dir());
        }
        // Idempotent
        store.ensure_structure().unwrap();
    }

    #[test]
    fn test_create_copies_live_directory() {
        let (store, _temp) = create_test_store();

        let record = store.create(Category::Mage, "Thrall").unwrap();

        assert_eq!(record.subject, "Thrall");
        assert_eq!(record.category, Category::Mage);
        assert!(record.folder_name.starts_with("Thrall-"));
        assert_eq!(record.path.parent().unwrap(), store.category_dir(Category::Mage));
        assert_eq!(
            fs::read_to_string(record.path.join("Account.lua")).unwrap(),
            "account = 1"
        );
        assert_eq!(
            fs::read_to_string(record.path.join("SavedVariables/Foo.lua")).unwrap(),
            "foo = true"
        );
    }

    #[test]
    fn test_create_folder_name_timestamp_format() {
        let (store, _temp) = create_test_store();

        let record = store.create(Category::Mage, "Thrall").unwrap();
        let stamp = record.folder_name.strip_prefix("Thrall-").unwrap();

        assert_eq!(stamp.len(), "YYYY-MM-DD-HH-mm-ss".len());
        assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d-%H-%M-%S").is_ok());
    }

    #[test]
    fn test_create_without_live_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store = BackupStore::new(temp_dir.path().join("missing"), temp_dir.path().join("b"));

        let result = store.create(Category::Mage, "Thrall");
        assert!(matches!(result, Err(SwapperError::SourceMissing(_))));
    }

    #[test]
    fn test_create_then_list_round_trip() {
        let (store, _temp) = create_test_store();

        let created = store.create(Category::Mage, "Thrall").unwrap();
        let listed = store.list(Category::Mage);

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].folder_name, created.folder_name);
        assert_eq!(listed[0].subject, "Thrall");
        assert!(listed[0].path.exists());
        assert!(fs::read_dir(&listed[0].path).unwrap().next().is_some());
    }

    #[test]
    fn test_list_missing_category_is_empty() {
        let (store, _temp) = create_test_store();
        assert!(store.list(Category::Druid).is_empty());
    }

    #[test]
    fn test_list_newest_first_and_skips_files() {
        let (store, _temp) = create_test_store();

        let first = store.create(Category::Paladin, "Jaina").unwrap();
        sleep(Duration::from_millis(1100));
        let second = store.create(Category::Paladin, "Jaina").unwrap();
        fs::write(store.category_dir(Category::Paladin).join(".DS_Store"), "").unwrap();

        let listed = store.list(Category::Paladin);
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].folder_name, second.folder_name);
        assert_eq!(listed[1].folder_name, first.folder_name);
        assert!(listed[0].created_at >= listed[1].created_at);
    }

    #[test]
    fn test_latest_for_matches_subject() {
        let (store, _temp) = create_test_store();

        store.create(Category::Mage, "Thrall").unwrap();
        store.create(Category::Mage, "Jaina").unwrap();

        let latest = store.latest_for(Category::Mage, "Thrall").unwrap();
        assert_eq!(latest.subject, "Thrall");
        assert!(store.latest_for(Category::Mage, "Anduin").is_none());
        assert!(store.latest_for(Category::Priest, "Thrall").is_none());
    }

    #[test]
    fn test_find_by_folder_name() {
        let (store, _temp) = create_test_store();
        let record = store.create(Category::Rogue, "Valeera").unwrap();

        assert_eq!(
            store.find(Category::Rogue, &record.folder_name).unwrap().path,
            record.path
        );
        assert_eq!(store.find(Category::Rogue, "latest").unwrap().path, record.path);
        assert!(store.find(Category::Rogue, "Valeera-1999-01-01-00-00-00").is_none());
    }

    #[test]
    fn test_delete_backup() {
        let (store, _temp) = create_test_store();
        let record = store.create(Category::Mage, "Thrall").unwrap();

        store.delete(&record).unwrap();

        assert!(!record.path.exists());
        assert!(store.list(Category::Mage).is_empty());
    }

    #[test]
    fn test_delete_missing_backup_fails() {
        let (store, _temp) = create_test_store();
        let record = store.create(Category::Mage, "Thrall").unwrap();
        store.delete(&record).unwrap();

        let result = store.delete(&record);
        assert!(matches!(result, Err(SwapperError::DeleteFailed(_))));
    }

    #[test]
    fn test_delete_outside_backup_root_is_refused() {
        let (store, temp) = create_test_store();
        let mut record = store.create(Category::Mage, "Thrall").unwrap();
        record.path = temp.path().join("WTF");

        let result = store.delete(&record);
        assert!(matches!(result, Err(SwapperError::DeleteFailed(_))));
        assert!(temp.path().join("WTF").exists());
    }

    #[test]
    fn test_size() {
        let (store, _temp) = create_test_store();
        let record = store.create(Category::Mage, "Thrall").unwrap();

        // "account = 1" + "foo = true"
        assert_eq!(store.size_bytes(&record), Some(21));
        assert_eq!(store.size(&record), "21 B");

        store.delete(&record).unwrap();
        assert_eq!(store.size(&record), UNKNOWN_SIZE);
    }

    #[test]
    fn test_set_backup_root_ensures_structure() {
        let (mut store, temp) = create_test_store();
        let new_root = temp.path().join("elsewhere");

        store.set_backup_root(&new_root).unwrap();

        assert_eq!(store.backup_root(), new_root.as_path());
        assert!(new_root.join("Demon Hunter").is_dir());
    }

    #[test]
    fn test_set_live_dir_ensures_structure() {
        let (mut store, temp) = create_test_store();
        let new_live = temp.path().join("PTR").join("WTF");

        store.set_live_dir(&new_live).unwrap();

        assert_eq!(store.live_dir(), new_live.as_path());
        for category in Category::ALL {
            assert!(store.category_dir(category).is_dir());
        }
    }

    #[test]
    fn test_back_to_back_snapshots_never_overwrite() {
        let (store, _temp) = create_test_store();
        fs::write(store.live_dir().join("Account.lua"), "first").unwrap();
        let first = store.create(Category::Mage, "Thrall").unwrap();
        fs::write(store.live_dir().join("Account.lua"), "second").unwrap();
        let second = store.create(Category::Mage, "Thrall").unwrap();

        assert_ne!(first.folder_name, second.folder_name);
        assert_eq!(store.list(Category::Mage).len(), 2);
        assert_eq!(
            fs::read_to_string(first.path.join("Account.lua")).unwrap(),
            "first"
        );
        assert_eq!(
            fs::read_to_string(second.path.join("Account.lua")).unwrap(),
            "second"
        );
    }

    #[test]
    fn test_claim_destination_skips_taken_names() {
        let temp = TempDir::new().unwrap();
        let base = "Thrall-2025-03-07-09-05-02";
        fs::create_dir_all(temp.path().join(base)).unwrap();
        fs::write(temp.path().join(base).join("Account.lua"), "kept").unwrap();

        let (name, path) = claim_destination(temp.path(), base).unwrap();
        let (third, _) = claim_destination(temp.path(), base).unwrap();

        assert_eq!(name, "Thrall-2025-03-07-09-05-02-2");
        assert_eq!(third, "Thrall-2025-03-07-09-05-02-3");
        assert!(path.is_dir());
        assert_eq!(BackupRecord::subject_from_folder(&name), "Thrall");
        assert_eq!(
            fs::read_to_string(temp.path().join(base).join("Account.lua")).unwrap(),
            "kept"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_create_copy_failure_leaves_partial_snapshot() {
        let (store, _temp) = create_test_store();
        // Sockets cannot be opened for reading, so copying one fails
        let _listener =
            std::os::unix::net::UnixListener::bind(store.live_dir().join("game.sock")).unwrap();

        let result = store.create(Category::Mage, "Thrall");

        assert!(matches!(result, Err(SwapperError::CopyFailed(_))));
        let listed = store.list(Category::Mage);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].subject, "Thrall");
    }

    #[test]
    fn test_backup_root_inside_live_directory_is_refused() {
        let (store, _temp) = create_test_store();
        let nested = BackupStore::new(store.live_dir(), store.live_dir().join("x"));

        assert!(matches!(
            nested.ensure_structure(),
            Err(SwapperError::Config(_))
        ));
        assert!(matches!(
            nested.create(Category::Mage, "Thrall"),
            Err(SwapperError::CopyFailed(_))
        ));
        assert!(!store.live_dir().join("x").exists());
    }
}
