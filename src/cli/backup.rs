//! Backup CLI commands
//!
//! Implements CLI commands for browsing and managing snapshots directly,
//! independent of any profile.

use clap::Subcommand;

use crate::audit::{AuditEntry, AuditLogger, EntityType, Operation};
use crate::backup::BackupStore;
use crate::config::Settings;
use crate::display::format_backup_list;
use crate::error::{SwapperError, SwapperResult};
use crate::models::{BackupRecord, Category};

use super::parse_category;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// List the backups of a category, newest first
    List {
        /// Category name
        category: String,

        /// Show sizes and location
        #[arg(short, long)]
        verbose: bool,
    },

    /// Restore a backup into the live directory
    Restore {
        /// Category name
        category: String,

        /// Backup folder name (use 'latest' for most recent)
        backup: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Delete a backup
    Delete {
        /// Category name
        category: String,

        /// Backup folder name
        backup: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    store: &BackupStore,
    audit: &AuditLogger,
    settings: &Settings,
    cmd: BackupCommands,
) -> SwapperResult<()> {
    match cmd {
        BackupCommands::List { category, verbose } => {
            let category = parse_category(&category)?;
            let records = store.list(category);

            println!("{} Backups", category);
            println!(
                "{}",
                format_backup_list(store, &records, verbose, &settings.date_format)
            );
            if !records.is_empty() {
                println!("Total: {} backup(s)", records.len());
            }
        }

        BackupCommands::Restore {
            category,
            backup,
            force,
        } => {
            let category = parse_category(&category)?;
            let record = resolve_backup(store, category, &backup)?;

            println!("Backup: {}", record.folder_name);
            println!("Target: {}", store.live_dir().display());
            println!();

            if !force {
                println!("WARNING: This will replace the entire live directory!");
                println!("To proceed, run again with --force flag:");
                println!(
                    "  swapper backup restore \"{}\" {} --force",
                    category, backup
                );
                return Ok(());
            }

            println!("Restoring from backup...");
            store.restore_record(&record)?;
            log_backup(audit, Operation::Restore, &record)?;
            println!("Restore complete!");
        }

        BackupCommands::Delete {
            category,
            backup,
            force,
        } => {
            let category = parse_category(&category)?;
            let record = resolve_backup(store, category, &backup)?;

            if !force {
                println!("About to delete backup: {}", record.path.display());
                println!("Size: {}", store.size(&record));
                println!("To proceed, run again with --force flag.");
                return Ok(());
            }

            store.delete(&record)?;
            log_backup(audit, Operation::Delete, &record)?;
            println!("Deleted backup: {}", record.folder_name);
        }
    }

    Ok(())
}

fn resolve_backup(
    store: &BackupStore,
    category: Category,
    folder_name: &str,
) -> SwapperResult<BackupRecord> {
    store
        .find(category, folder_name)
        .ok_or_else(|| SwapperError::backup_not_found(format!("{}/{}", category, folder_name)))
}

fn log_backup(audit: &AuditLogger, operation: Operation, record: &BackupRecord) -> SwapperResult<()> {
    audit.log(
        &AuditEntry::new(
            operation,
            EntityType::Backup,
            record.folder_name.clone(),
            Some(record.category.to_string()),
        )
        .with_snapshot(record),
    )
}
