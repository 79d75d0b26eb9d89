//! Version tracking and sync orchestration for Rules Kit
//!
//! This crate decides *when* and *what* to sync; the adapters in `kit-tools`
//! decide *how* a bundle lands on disk.
//!
//! - **Config store**: one JSON [`SyncRecord`] per profile per target
//! - **Versions**: CalVer comparison of installed and published bundles
//! - **Sources**: the [`BundleSource`] seam and a local-mirror implementation
//! - **Orchestrator**: init, update, upgrade, replace-all and reset
//!
//! # Architecture
//!
//! ```text
//!              CLI
//!               |
//!           kit-core
//!               |
//!     +---------+---------+
//!     |         |         |
//!  kit-fs  kit-content  kit-tools
//! ```

pub mod config;
pub mod diff;
pub mod error;
pub mod prompt;
pub mod scratch;
pub mod source;
pub mod sync;
pub mod version;

pub use config::{ConfigStore, RuleSet, Settings, SyncRecord};
pub use diff::{VersionDiff, compute_diff};
pub use error::{Error, Result};
pub use prompt::{FixedPrompter, Prompter};
pub use scratch::ScratchDir;
pub use source::{BundleSource, BundleTrack, DirectoryBundleSource};
pub use sync::{
    InstallOutcome, OperationContext, Orchestrator, ProfileUpdate, ResetOutcome, UpdateOutcome,
};
pub use version::{CalVer, ChangeType, VersionStatus};
