//! Error types for kit-blocks

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] kit_fs::Error),

    #[error("Region {start} ... {end} not found")]
    RegionNotFound { start: String, end: String },
}
