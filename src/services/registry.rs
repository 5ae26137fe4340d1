//! Profile registry
//!
//! Owns the profile collection and the active designation. Switching the
//! active profile snapshots the outgoing live directory and restores the
//! incoming profile's latest snapshot through the [`BackupStore`].

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, AuditLogger, EntityType, Operation};
use crate::backup::BackupStore;
use crate::error::{SwapperError, SwapperResult};
use crate::models::{BackupRecord, Profile, ProfileId};
use crate::storage::ProfileStore;

/// Outcome of [`ProfileRegistry::activate`]
///
/// Activation always completes once the target is known; the snapshot and
/// restore steps are best-effort and their failures are carried here.
#[derive(Debug, Clone)]
pub struct ActivationReport {
    /// The profile that is now active
    pub profile: Profile,

    /// Snapshot of the previously active profile, if there was one
    pub outgoing: Option<Result<BackupRecord, String>>,

    /// The backup restored into the live directory
    pub restored: Option<BackupRecord>,

    /// Why restoring the latest backup failed
    pub restore_error: Option<String>,
}

impl ActivationReport {
    /// True when neither the snapshot nor the restore failed
    pub fn is_clean(&self) -> bool {
        !matches!(self.outgoing, Some(Err(_))) && self.restore_error.is_none()
    }

    /// The outgoing snapshot failure, if any
    pub fn snapshot_error(&self) -> Option<&str> {
        match &self.outgoing {
            Some(Err(e)) => Some(e.as_str()),
            _ => None,
        }
    }
}

/// Registry of profiles backed by a [`ProfileStore`]
///
/// Mutations take `&mut self`, so one registry has a single writer.
pub struct ProfileRegistry<S: ProfileStore> {
    store: S,
    backups: BackupStore,
    profiles: Vec<Profile>,
    current: Option<ProfileId>,
    audit: Option<AuditLogger>,
}

impl<S: ProfileStore> ProfileRegistry<S> {
    /// Load the registry from `store`
    ///
    /// If more than one stored profile is flagged active, the first keeps
    /// the flag.
    pub fn load(store: S, backups: BackupStore) -> SwapperResult<Self> {
        let mut profiles = store.load()?;
        let mut current = None;

        for profile in profiles.iter_mut().filter(|p| p.active) {
            if current.is_none() {
                current = Some(profile.id);
            } else {
                warn!(profile = %profile.id, "clearing extra active flag");
                profile.active = false;
            }
        }

        debug!(count = profiles.len(), "loaded profiles");

        Ok(Self {
            store,
            backups,
            profiles,
            current,
            audit: None,
        })
    }

    /// Record every mutation in `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// All profiles, in insertion order
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// Get a profile by ID
    pub fn get(&self, id: ProfileId) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// The active profile, if any
    pub fn current(&self) -> Option<&Profile> {
        self.current.and_then(|id| self.get(id))
    }

    /// Find a profile by ID, short display ID, or name (case-insensitive)
    pub fn find(&self, identifier: &str) -> Option<&Profile> {
        let identifier = identifier.trim();

        if let Ok(id) = identifier.parse::<ProfileId>() {
            if let Some(profile) = self.get(id) {
                return Some(profile);
            }
        }

        self.profiles
            .iter()
            .find(|p| p.id.to_string().eq_ignore_ascii_case(identifier))
            .or_else(|| self.profiles.iter().find(|p| p.matches_name(identifier)))
    }

    /// The backup store the registry drives
    pub fn backups(&self) -> &BackupStore {
        &self.backups
    }

    /// Snapshots matching a profile's category and subject, newest first
    pub fn backups_for(&self, id: ProfileId) -> Vec<BackupRecord> {
        match self.get(id) {
            Some(profile) => self
                .backups
                .list(profile.category)
                .into_iter()
                .filter(|r| r.is_for(&profile.subject))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Append a profile and persist
    ///
    /// The profile always joins inactive.
    pub fn add(&mut self, mut profile: Profile) -> SwapperResult<()> {
        profile.active = false;
        self.profiles.push(profile.clone());
        self.store.save(&self.profiles)?;

        info!(profile = %profile.id, name = %profile.name, "added profile");
        self.record(
            AuditEntry::new(
                Operation::Create,
                EntityType::Profile,
                profile.id.to_string(),
                Some(profile.name.clone()),
            )
            .with_snapshot(&profile),
        );
        Ok(())
    }

    /// Remove a profile and persist
    ///
    /// Its backups stay on disk. Returns `None` for an unknown ID, in which
    /// case nothing is written.
    pub fn delete(&mut self, id: ProfileId) -> SwapperResult<Option<Profile>> {
        let Some(index) = self.index_of(id) else {
            return Ok(None);
        };

        let removed = self.profiles.remove(index);
        if self.current == Some(id) {
            self.current = None;
        }
        self.store.save(&self.profiles)?;

        info!(profile = %removed.id, name = %removed.name, "deleted profile");
        self.record(
            AuditEntry::new(
                Operation::Delete,
                EntityType::Profile,
                removed.id.to_string(),
                Some(removed.name.clone()),
            )
            .with_snapshot(&removed),
        );

        Ok(Some(removed))
    }

    /// Make `id` the active profile
    ///
    /// Snapshots the outgoing profile, flips the active flag, restores the
    /// target's latest backup into the live directory, then persists. Only
    /// an unknown ID or a persistence failure is an error.
    pub fn activate(&mut self, id: ProfileId) -> SwapperResult<ActivationReport> {
        let index = self
            .index_of(id)
            .ok_or_else(|| SwapperError::profile_not_found(id.to_string()))?;

        let outgoing = self
            .current()
            .filter(|p| !p.subject.trim().is_empty())
            .map(|p| (p.category, p.subject.clone()))
            .map(|(category, subject)| {
                self.backups
                    .create(category, &subject)
                    .map_err(|e| {
                        warn!(%category, %subject, error = %e, "snapshot before switch failed");
                        e.to_string()
                    })
            });

        for profile in self.profiles.iter_mut() {
            profile.active = false;
        }
        self.profiles[index].active = true;
        self.current = Some(id);

        let (category, subject) = {
            let target = &self.profiles[index];
            (target.category, target.subject.clone())
        };

        let mut restored = None;
        let mut restore_error = None;
        match self.backups.latest_for(category, &subject) {
            Some(record) => match self.backups.restore_record(&record) {
                Ok(()) => {
                    self.profiles[index].last_backup_at = Some(Utc::now());
                    restored = Some(record);
                }
                Err(e) => {
                    warn!(folder = %record.folder_name, error = %e, "restore after switch failed");
                    restore_error = Some(e.to_string());
                }
            },
            None => debug!(%category, %subject, "no backup to restore"),
        }

        self.store.save(&self.profiles)?;

        let profile = self.profiles[index].clone();
        info!(profile = %profile.id, name = %profile.name, "activated profile");

        if let Some(Ok(record)) = &outgoing {
            self.record(backup_entry(Operation::Backup, record));
        }
        if let Some(record) = &restored {
            self.record(backup_entry(Operation::Restore, record));
        }

        let report = ActivationReport {
            profile,
            outgoing,
            restored,
            restore_error,
        };

        let mut entry = AuditEntry::new(
            Operation::Activate,
            EntityType::Profile,
            report.profile.id.to_string(),
            Some(report.profile.name.clone()),
        );
        if let Some(e) = report.restore_error.as_deref().or(report.snapshot_error()) {
            entry = entry.with_detail(e);
        }
        self.record(entry);

        Ok(report)
    }

    /// Snapshot the live directory for a profile and persist its timestamp
    pub fn create_backup_for(&mut self, id: ProfileId) -> SwapperResult<BackupRecord> {
        let index = self
            .index_of(id)
            .ok_or_else(|| SwapperError::profile_not_found(id.to_string()))?;

        let (category, subject) = {
            let profile = &self.profiles[index];
            (profile.category, profile.subject.clone())
        };

        let record = self.backups.create(category, &subject)?;
        self.profiles[index].last_backup_at = Some(Utc::now());
        self.store.save(&self.profiles)?;

        self.record(backup_entry(Operation::Backup, &record));
        Ok(record)
    }

    fn index_of(&self, id: ProfileId) -> Option<usize> {
        self.profiles.iter().position(|p| p.id == id)
    }

    /// Append to the audit log, if attached
    ///
    /// Runs after the change is persisted, so a failed write only warns.
    fn record(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(&entry) {
                warn!(operation = %entry.operation, error = %e, "audit write failed");
            }
        }
    }
}

fn backup_entry(operation: Operation, record: &BackupRecord) -> AuditEntry {
    AuditEntry::new(
        operation,
        EntityType::Backup,
        record.folder_name.clone(),
        Some(record.category.to_string()),
    )
    .with_detail(record.path.display().to_string())
}
