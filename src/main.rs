use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use swapper::audit::AuditLogger;
use swapper::backup::BackupStore;
use swapper::cli::{handle_backup_command, handle_profile_command, BackupCommands, ProfileCommands};
use swapper::config::{SwapperPaths, Settings};
use swapper::models::Category;
use swapper::services::ProfileRegistry;
use swapper::storage::JsonProfileStore;

/// Environment variable holding the tracing filter
const LOG_ENV: &str = "SWAPPER_LOG";

#[derive(Parser)]
#[command(
    name = "swapper",
    version,
    about = "Swap game configuration profiles",
    long_about = "Swapper keeps one snapshot history per character and swaps the \
                  game's live configuration directory when you switch profiles. \
                  The outgoing profile is snapshotted first, then the incoming \
                  profile's most recent snapshot is restored."
)]
struct Cli {
    /// Game installation directory (overrides the configured one)
    #[arg(long, global = true, env = "SWAPPER_GAME_DIR")]
    game_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Profile management commands
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Backup management commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// List the available categories
    Categories,

    /// Show recent audit log entries
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Initialize configuration and backup directories
    Init,

    /// Show current configuration and paths; with --game-dir, save it
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    // Initialize paths and settings
    let paths = SwapperPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    if let Some(game_dir) = &cli.game_dir {
        settings.set_game_dir(game_dir);
    }

    let audit = AuditLogger::new(paths.audit_log());

    match cli.command {
        Some(Commands::Profile(cmd)) => {
            paths.ensure_directories()?;
            let store = JsonProfileStore::new(paths.profiles_file());
            let mut registry = ProfileRegistry::load(store, BackupStore::from_settings(&settings))?
                .with_audit(audit);
            handle_profile_command(&mut registry, &settings, cmd)?;
        }
        Some(Commands::Backup(cmd)) => {
            paths.ensure_directories()?;
            let store = BackupStore::from_settings(&settings);
            handle_backup_command(&store, &audit, &settings, cmd)?;
        }
        Some(Commands::Categories) => {
            for category in Category::ALL {
                println!("{}", category);
            }
        }
        Some(Commands::History { limit }) => {
            let entries = audit.read_recent(limit)?;
            if entries.is_empty() {
                println!("No history yet.");
            }
            for entry in entries.iter().rev() {
                println!("{}", entry.format_human_readable());
            }
            let total = audit.entry_count()?;
            if total > entries.len() {
                println!();
                println!("Showing {} of {} entries.", entries.len(), total);
            }
        }
        Some(Commands::Init) => {
            println!("Initializing swapper at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            let store = BackupStore::from_settings(&settings);
            store.ensure_structure()?;
            println!("Initialization complete!");
            println!();
            println!("Backups are kept in: {}", store.backup_root().display());
            if !store.live_dir().exists() {
                println!(
                    "Note: live directory {} does not exist yet.",
                    store.live_dir().display()
                );
            }
            println!();
            println!("Run 'swapper profile add' to create your first profile.");
        }
        Some(Commands::Config) => {
            if cli.game_dir.is_some() {
                settings.save(&paths)?;
                BackupStore::from_settings(&settings).ensure_structure()?;
                println!("Saved game directory: {}", settings.game_dir.display());
                println!();
            }

            println!("Swapper Configuration");
            println!("=====================");
            println!("Config directory: {}", paths.base_dir().display());
            println!(
                "Initialized:      {}",
                if paths.is_initialized() { "yes" } else { "no (run 'swapper init')" }
            );
            println!("Profiles file:    {}", paths.profiles_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Game directory: {}", settings.game_dir.display());
            println!("  Live directory: {}", settings.live_dir().display());
            println!("  Backup root:    {}", settings.backup_root().display());
            println!("  Date format:    {}", settings.date_format);
        }
        None => {
            println!("Swapper - game configuration profile switcher");
            println!();
            println!("Run 'swapper --help' for usage information.");
        }
    }

    Ok(())
}

/// Install the stderr diagnostics subscriber, filtered by `SWAPPER_LOG`
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
