//! The closed set of supported integrations.

use crate::error::{Error, Result};
use kit_content::PlaceholderValues;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An assistant integration a bundle can be laid out for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntegrationProfile {
    Cursor,
    Trae,
    ClaudeCode,
}

impl IntegrationProfile {
    /// Every profile, in display order.
    pub const ALL: [IntegrationProfile; 3] = [Self::Cursor, Self::Trae, Self::ClaudeCode];

    pub fn slug(self) -> &'static str {
        match self {
            Self::Cursor => "cursor",
            Self::Trae => "trae",
            Self::ClaudeCode => "claude-code",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Cursor => "Cursor",
            Self::Trae => "Trae",
            Self::ClaudeCode => "Claude Code",
        }
    }

    /// Directory, relative to the target, that holds everything this
    /// integration owns.
    pub fn layout_root(self) -> &'static str {
        match self {
            Self::Cursor => ".cursor",
            Self::Trae => ".trae",
            Self::ClaudeCode => ".claude",
        }
    }

    /// Extension given to rule documents, dot included.
    pub fn file_extension(self) -> &'static str {
        match self {
            Self::Cursor => ".mdc",
            Self::Trae | Self::ClaudeCode => ".md",
        }
    }

    /// Whether the integration has an entry-point document and skill packages.
    pub fn is_rich(self) -> bool {
        matches!(self, Self::ClaudeCode)
    }

    pub fn placeholder_values(self) -> PlaceholderValues {
        PlaceholderValues::for_layout(self.layout_root(), self.file_extension())
    }
}

impl fmt::Display for IntegrationProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for IntegrationProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.slug() == wanted)
            .ok_or_else(|| Error::UnknownProfile(s.to_string()))
    }
}
