//! Outcomes of orchestrator operations

use crate::diff::VersionDiff;
use kit_tools::{AdaptReport, IntegrationProfile};

/// Result of an install from a fetched bundle (init, replace-all).
#[derive(Debug, Clone, PartialEq)]
pub struct InstallOutcome {
    pub profile: IntegrationProfile,
    pub prompts_version: String,
    pub system_rules_version: Option<String>,
    pub adapt: AdaptReport,
}

/// What an update did to one profile.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// Installed version was behind and has been replaced.
    Updated {
        from: String,
        to: String,
        diff: VersionDiff,
        adapt: AdaptReport,
    },
    /// Already on the latest version. `cli_version_refreshed` tells whether
    /// the record's CLI stamp was rewritten.
    UpToDate {
        version: String,
        cli_version_refreshed: bool,
    },
    /// Installed version is newer than the source's latest; left alone.
    LocalNewer { installed: String, latest: String },
    /// Source unreachable; the layout was re-applied from the local bundle
    /// if there is one, versions unchanged.
    Local { adapt: Option<AdaptReport> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub profile: IntegrationProfile,
    pub outcome: UpdateOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    NothingInitialized,
    Cancelled,
    Reset(Vec<IntegrationProfile>),
}
