//! Error types for kit-content

/// Result type for kit-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in kit-content operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse {format} content: {message}")]
    ParseError { format: String, message: String },

    #[error("Frontmatter must be a mapping, found {found}")]
    NotAMapping { found: String },

    #[error(transparent)]
    Fs(#[from] kit_fs::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            format: format.into(),
            message: message.into(),
        }
    }
}
