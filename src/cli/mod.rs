//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod backup;
pub mod profile;

pub use backup::{handle_backup_command, BackupCommands};
pub use profile::{handle_profile_command, ProfileCommands};

use crate::error::{SwapperError, SwapperResult};
use crate::models::Category;

/// Parse a category argument, listing the valid labels on failure
pub fn parse_category(input: &str) -> SwapperResult<Category> {
    Category::parse(input).ok_or_else(|| {
        SwapperError::Validation(format!(
            "Unknown category '{}'. Valid categories: {}",
            input,
            Category::valid_labels()
        ))
    })
}
