//! Display formatting for terminal output
//!
//! Provides utilities for formatting profiles, backups, and activation
//! outcomes for terminal display.

pub mod backup;
pub mod profile;

pub use backup::format_backup_list;
pub use profile::{
    format_activation_report, format_profile_details, format_profile_list, format_timestamp,
};
