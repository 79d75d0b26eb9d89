//! Bundle layout constants.
//!
//! A fetched bundle looks like:
//!
//! ```text
//! <bundle>/
//!   rules-kit/
//!     rules/      rule documents (frontmatter + body)
//!     docs/       reference documents, including rules-catalog.md
//!     commands/   slash-command documents
//!   system-rules/
//!     mcp.json    {"mcpServers": {...}}
//! ```

use std::path::{Path, PathBuf};

pub const RULES_KIT_DIR: &str = "rules-kit";
pub const SYSTEM_RULES_DIR: &str = "system-rules";
pub const MCP_FILE: &str = "mcp.json";
pub const RULES_CATALOG_FILE: &str = "rules-catalog.md";

/// A content category mirrored from the bundle into a layout root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Rules,
    Docs,
    Commands,
}

impl Category {
    pub const ALL: [Category; 3] = [Self::Rules, Self::Docs, Self::Commands];

    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Rules => "rules",
            Self::Docs => "docs",
            Self::Commands => "commands",
        }
    }

    /// Source directory of this category inside a bundle.
    pub fn source_dir(self, bundle_root: &Path) -> PathBuf {
        bundle_root.join(RULES_KIT_DIR).join(self.dir_name())
    }
}

/// Path of the MCP server definitions inside a bundle.
pub fn mcp_file(bundle_root: &Path) -> PathBuf {
    bundle_root.join(SYSTEM_RULES_DIR).join(MCP_FILE)
}

/// Whether `root` looks like a bundle (has at least one category directory).
pub fn is_bundle(root: &Path) -> bool {
    Category::ALL.iter().any(|c| c.source_dir(root).is_dir())
}
