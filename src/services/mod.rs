//! Service layer for profile-swapper
//!
//! The service layer holds the profile state machine on top of the storage
//! and backup layers.

pub mod registry;

pub use registry::{ActivationReport, ProfileRegistry};
