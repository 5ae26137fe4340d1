//! Profile display formatting
//!
//! Formats profiles for terminal output in table and detail views.

use chrono::{DateTime, Local, Utc};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{BackupRecord, Profile};
use crate::services::ActivationReport;

#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "")]
    marker: &'static str,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Last Backup")]
    last_backup: String,
}

/// Format a timestamp in local time, or `Never` when absent
pub fn format_timestamp(at: Option<&DateTime<Utc>>, date_format: &str) -> String {
    match at {
        Some(at) => at.with_timezone(&Local).format(date_format).to_string(),
        None => "Never".to_string(),
    }
}

/// Format a list of profiles as a table, marking the active one
pub fn format_profile_list(profiles: &[Profile], date_format: &str) -> String {
    if profiles.is_empty() {
        return "No profiles found.".to_string();
    }

    let rows = profiles.iter().map(|p| ProfileRow {
        marker: if p.active { "*" } else { "" },
        id: p.id.to_string(),
        name: p.name.clone(),
        category: p.category.to_string(),
        subject: p.subject.clone(),
        last_backup: format_timestamp(p.last_backup_at.as_ref(), date_format),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format a single profile's details along with its backups
pub fn format_profile_details(
    profile: &Profile,
    backups: &[BackupRecord],
    date_format: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Profile: {}\n", profile.name));
    output.push_str(&format!("  ID:             {}\n", profile.id.to_full_string()));
    output.push_str(&format!("  Category:       {}\n", profile.category));
    output.push_str(&format!("  Subject:        {}\n", profile.subject));
    output.push_str(&format!(
        "  Active:         {}\n",
        if profile.active { "Yes" } else { "No" }
    ));
    output.push_str(&format!(
        "  Created:        {}\n",
        format_timestamp(Some(&profile.created_at), date_format)
    ));
    output.push_str(&format!(
        "  Last Backup:    {}\n",
        format_timestamp(profile.last_backup_at.as_ref(), date_format)
    ));
    output.push_str(&format!("  Directory:      {}\n", profile.root_dir.display()));

    if !profile.description.is_empty() {
        output.push_str(&format!("  Description:    {}\n", profile.description));
    }

    output.push('\n');
    if backups.is_empty() {
        output.push_str("No backups yet.\n");
    } else {
        output.push_str(&format!("Backups ({}):\n", backups.len()));
        for record in backups {
            output.push_str(&format!(
                "  {}  {}\n",
                record.folder_name,
                format_timestamp(Some(&record.created_at), date_format)
            ));
        }
    }

    output
}

/// Summarize an activation, including any best-effort step that failed
pub fn format_activation_report(report: &ActivationReport) -> String {
    let mut output = format!("Activated profile: {}\n", report.profile);

    match &report.outgoing {
        Some(Ok(record)) => output.push_str(&format!(
            "  Saved outgoing state: {}/{}\n",
            record.category, record.folder_name
        )),
        Some(Err(e)) => output.push_str(&format!(
            "  Warning: could not save outgoing state: {}\n",
            e
        )),
        None => {}
    }

    match (&report.restored, &report.restore_error) {
        (Some(record), _) => output.push_str(&format!(
            "  Restored: {}/{}\n",
            record.category, record.folder_name
        )),
        (None, Some(e)) => output.push_str(&format!(
            "  WARNING: restore failed, the live directory may be incomplete: {}\n",
            e
        )),
        (None, None) => output.push_str("  No backup to restore; live directory left as is.\n"),
    }

    output
}
