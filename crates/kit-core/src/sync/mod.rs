//! Sync orchestration
//!
//! - **init**: first install of a profile
//! - **update** / **upgrade_all**: move installed profiles to the latest bundle
//! - **replace_all**: wipe generated files and install again
//! - **reset**: remove generated files and the sync record

mod orchestrator;
mod report;

pub use orchestrator::{OperationContext, Orchestrator};
pub use report::{InstallOutcome, ProfileUpdate, ResetOutcome, UpdateOutcome};
