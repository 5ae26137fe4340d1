//! Audit logging system for profile-swapper
//!
//! Records profile and backup operations in an append-only audit log.
//!
//! - `AuditEntry`: one logged operation with timestamp, entity information,
//!   an optional JSON snapshot of the entity, and an optional detail message
//! - `AuditLogger`: appends entries to a line-delimited JSON file (JSONL)
//!
//! # Example
//!
//! ```rust,ignore
//! use swapper::audit::{AuditEntry, AuditLogger, EntityType, Operation};
//!
//! let logger = AuditLogger::new(audit_log_path);
//! let entry = AuditEntry::new(
//!     Operation::Create,
//!     EntityType::Profile,
//!     profile.id.to_string(),
//!     Some(profile.name.clone()),
//! )
//! .with_snapshot(&profile);
//! logger.log(&entry)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
