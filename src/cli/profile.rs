//! Profile CLI commands
//!
//! Implements CLI commands for profile management and switching.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_activation_report, format_profile_details, format_profile_list};
use crate::error::{SwapperError, SwapperResult};
use crate::models::{Profile, ProfileId};
use crate::services::ProfileRegistry;
use crate::storage::ProfileStore;

use super::parse_category;

/// Profile subcommands
#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Create a new profile
    Add {
        /// Profile name
        name: String,
        /// Category the profile's backups are filed under
        #[arg(short, long)]
        category: String,
        /// Character name
        #[arg(short, long)]
        subject: String,
        /// Optional notes
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List all profiles
    List,
    /// Show profile details and backups
    Show {
        /// Profile name or ID
        profile: String,
    },
    /// Delete a profile (its backups are kept)
    Delete {
        /// Profile name or ID
        profile: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Make a profile active, swapping the live directory
    #[command(alias = "switch")]
    Activate {
        /// Profile name or ID
        profile: String,
    },
    /// Snapshot the live directory for a profile
    Backup {
        /// Profile name or ID
        profile: String,
    },
}

/// Handle a profile command
pub fn handle_profile_command<S: ProfileStore>(
    registry: &mut ProfileRegistry<S>,
    settings: &Settings,
    cmd: ProfileCommands,
) -> SwapperResult<()> {
    match cmd {
        ProfileCommands::Add {
            name,
            category,
            subject,
            description,
        } => {
            let category = parse_category(&category)?;
            let mut profile = Profile::new(
                name.trim(),
                category,
                subject.trim(),
                registry.backups().live_dir(),
            );
            if let Some(description) = description {
                profile = profile.with_description(description);
            }

            profile
                .validate()
                .map_err(|e| SwapperError::Validation(e.to_string()))?;

            let id = profile.id;
            registry.add(profile)?;

            println!("Created profile: {}", id);
            if let Some(profile) = registry.get(id) {
                println!("  {}", profile);
            }
        }

        ProfileCommands::List => {
            println!(
                "{}",
                format_profile_list(registry.profiles(), &settings.date_format)
            );
        }

        ProfileCommands::Show { profile } => {
            let id = resolve_profile(registry, &profile)?;
            let backups = registry.backups_for(id);
            if let Some(profile) = registry.get(id) {
                print!(
                    "{}",
                    format_profile_details(profile, &backups, &settings.date_format)
                );
            }
        }

        ProfileCommands::Delete { profile, force } => {
            let id = resolve_profile(registry, &profile)?;

            if !force {
                if let Some(profile) = registry.get(id) {
                    println!("About to delete profile: {}", profile);
                }
                println!("Its backups stay on disk.");
                println!("To proceed, run again with --force flag.");
                return Ok(());
            }

            if let Some(removed) = registry.delete(id)? {
                println!("Deleted profile: {}", removed.name);
            }
        }

        ProfileCommands::Activate { profile } => {
            let id = resolve_profile(registry, &profile)?;
            let report = registry.activate(id)?;
            print!("{}", format_activation_report(&report));
        }

        ProfileCommands::Backup { profile } => {
            let id = resolve_profile(registry, &profile)?;
            let record = registry.create_backup_for(id)?;
            println!("Backup created: {}", record.folder_name);
            println!("Location: {}", record.path.display());
        }
    }

    Ok(())
}

fn resolve_profile<S: ProfileStore>(
    registry: &ProfileRegistry<S>,
    identifier: &str,
) -> SwapperResult<ProfileId> {
    registry
        .find(identifier)
        .map(|p| p.id)
        .ok_or_else(|| SwapperError::profile_not_found(identifier))
}
