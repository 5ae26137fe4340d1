//! Configuration module for profile-swapper
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution for application state
//! - User settings persistence (game directory and directory names)

pub mod paths;
pub mod settings;

pub use paths::SwapperPaths;
pub use settings::Settings;
