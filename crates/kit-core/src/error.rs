//! Error types for kit-core

use std::path::PathBuf;

/// Result type for kit-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in kit-core operations
///
/// The `Display` text of the state variants is stable; callers match on the
/// message prefix.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required operation input is missing
    #[error("{0}")]
    Validation(String),

    /// The profile already has a sync record
    #[error("Rules already initialized with version {version}")]
    AlreadyInitialized { version: String },

    /// The profile has no sync record
    #[error("Rules not initialized. Run init command first.")]
    NotInitialized,

    /// The bundle source could not deliver a bundle
    #[error("Failed to fetch rules: {message}")]
    FetchFailed { message: String },

    /// A sync record exists but cannot be used
    #[error("Sync record at {path} is corrupt")]
    ConfigCorrupt { path: PathBuf },

    /// Version string is not CalVer
    #[error("Invalid version '{0}', expected YYYY.M.D.N")]
    InvalidVersion(String),

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from kit-fs
    #[error(transparent)]
    Fs(#[from] kit_fs::Error),

    /// Content error from kit-content
    #[error(transparent)]
    Content(#[from] kit_content::Error),

    /// Adapter error from kit-tools
    #[error(transparent)]
    Tools(#[from] kit_tools::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn fetch_failed(message: impl Into<String>) -> Self {
        Self::FetchFailed {
            message: message.into(),
        }
    }
}
