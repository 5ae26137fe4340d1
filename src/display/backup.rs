//! Backup display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::backup::BackupStore;
use crate::models::BackupRecord;

use super::profile::format_timestamp;

#[derive(Tabled)]
struct BackupRow {
    #[tabled(rename = "Folder")]
    folder: String,
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Size")]
    size: String,
}

/// Format the snapshots of one category, newest first
///
/// Sizes are only computed in verbose mode since they walk the whole tree.
pub fn format_backup_list(
    store: &BackupStore,
    records: &[BackupRecord],
    verbose: bool,
    date_format: &str,
) -> String {
    if records.is_empty() {
        return "No backups found.".to_string();
    }

    let rows = records.iter().map(|r| BackupRow {
        folder: r.folder_name.clone(),
        subject: r.subject.clone(),
        created: format_timestamp(Some(&r.created_at), date_format),
        size: if verbose { store.size(r) } else { "-".to_string() },
    });

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    if verbose {
        output.push_str(&format!("\nLocation: {}", store.backup_root().display()));
    }
    output
}
