//! [`BundleFixture`] builder for adapter and sync tests.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Catalog shipped by [`BundleFixture::standard`].
pub const STANDARD_CATALOG: &str = "\
# Rules Catalog

- {{DOCS_DIR}}/rules-catalog.md (current file)

### Rules Files
- {{RULES_DIR}}/base{{FILE_EXT}}
- {{RULES_DIR}}/testing{{FILE_EXT}}

### Commands Files
- {{COMMANDS_DIR}}/review.md

### Docs Files
- {{DOCS_DIR}}/guide.md
";

/// A rules bundle on disk.
///
/// Either owns a temporary directory ([`BundleFixture::new`]) or writes into
/// a caller-provided one ([`BundleFixture::at`]).
///
/// # Example
///
/// ```rust,no_run
/// use kit_test_utils::BundleFixture;
///
/// let bundle = BundleFixture::standard();
/// bundle.rule("extra.md", "extra", false, None, "Extra body\n");
/// assert!(bundle.root().join("rules-kit/rules/extra.md").exists());
/// ```
pub struct BundleFixture {
    _temp: Option<TempDir>,
    root: PathBuf,
}

impl Default for BundleFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl BundleFixture {
    /// Empty bundle in a fresh temporary directory.
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_path_buf();
        Self {
            _temp: Some(temp),
            root,
        }
    }

    /// Empty bundle rooted at `root`; the directory is created if needed.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        fs::create_dir_all(&root).unwrap();
        Self { _temp: None, root }
    }

    /// Bundle with the standard content set, in a temporary directory.
    pub fn standard() -> Self {
        let bundle = Self::new();
        bundle.populate_standard();
        bundle
    }

    /// Write the standard content set:
    ///
    /// - `base` (always-apply) and `testing` / `Code Review` (skills) rules
    /// - `rules-catalog.md` and `guide.md` docs
    /// - a `review.md` command
    /// - one MCP server
    pub fn populate_standard(&self) -> &Self {
        self.rule(
            "base.md",
            "base",
            true,
            Some("Base conventions"),
            "# Base\n\nRead {{DOCS_DIR}}/guide.md before editing.\n",
        )
        .rule(
            "testing.md",
            "testing",
            false,
            Some("How to write tests"),
            "# Testing\n\nPut tests next to the code in {{IDE_DIR}}.\n",
        )
        .rule(
            "code-review.md",
            "Code Review",
            false,
            None,
            "# Code Review\n\nCheck every file ending in {{FILE_EXT}}.\n",
        )
        .doc("rules-catalog.md", STANDARD_CATALOG)
        .doc("guide.md", "# Guide\n\nRules live in {{RULES_DIR}}.\n")
        .command("review.md", "Review the diff using {{COMMANDS_DIR}}/review.md\n")
        .mcp_servers(serde_json::json!({
            "filesystem": { "command": "npx", "args": ["server-filesystem", "."] }
        }))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a rule document with frontmatter under `rules-kit/rules`.
    pub fn rule(
        &self,
        file: &str,
        id: &str,
        always_apply: bool,
        description: Option<&str>,
        body: &str,
    ) -> &Self {
        let mut front = format!("---\nid: {id}\nalwaysApply: {always_apply}\ntype: guideline\n");
        if let Some(description) = description {
            front.push_str(&format!("description: {description}\n"));
        }
        front.push_str("---\n");
        self.write(&format!("rules-kit/rules/{file}"), &format!("{front}{body}"))
    }

    /// Write a file verbatim under `rules-kit/rules`.
    pub fn raw_rule(&self, file: &str, content: &str) -> &Self {
        self.write(&format!("rules-kit/rules/{file}"), content)
    }

    pub fn doc(&self, file: &str, content: &str) -> &Self {
        self.write(&format!("rules-kit/docs/{file}"), content)
    }

    pub fn command(&self, file: &str, content: &str) -> &Self {
        self.write(&format!("rules-kit/commands/{file}"), content)
    }

    /// Write `system-rules/mcp.json` holding `servers` under `mcpServers`.
    pub fn mcp_servers(&self, servers: serde_json::Value) -> &Self {
        let doc = serde_json::json!({ "mcpServers": servers });
        self.write(
            "system-rules/mcp.json",
            &serde_json::to_string_pretty(&doc).unwrap(),
        )
    }

    /// Write `content` at `relative` (forward slashes) inside the bundle.
    pub fn write(&self, relative: &str, content: &str) -> &Self {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("BundleFixture: failed to write {}: {e}", path.display()));
        self
    }
}
