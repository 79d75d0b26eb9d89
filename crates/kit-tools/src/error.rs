//! Error types for kit-tools

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] kit_fs::Error),

    #[error("Block error: {0}")]
    Block(#[from] kit_blocks::Error),

    #[error("Content error: {0}")]
    Content(#[from] kit_content::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid JSON in {path}: {message}")]
    InvalidJson { path: PathBuf, message: String },

    #[error("Unknown integration profile '{0}' (expected cursor, trae or claude-code)")]
    UnknownProfile(String),

    #[error("Adapting bundle for {profile} failed: {message}")]
    AdaptFailed { profile: String, message: String },
}
