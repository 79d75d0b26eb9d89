//! IntegrationAdapter trait and the context it runs with

use crate::error::Result;
use crate::profile::IntegrationProfile;
use kit_content::{apply_overrides, mapping_from_json};
use kit_fs::IgnoreList;
use kit_fs::path::join_slash;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Frontmatter overrides applied to one installed file after copying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileOverride {
    /// Path relative to the layout root, e.g. `rules/base.mdc`.
    pub file: String,
    #[serde(default)]
    pub yaml_overrides: serde_json::Map<String, serde_json::Value>,
}

/// How the rich profile treats an existing entry-point document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryPointMode {
    /// Write a complete generated document.
    #[default]
    Fresh,
    /// Replace only the managed region, appending it if absent.
    UpdateInPlace,
}

/// Everything an adapter needs for one run.
#[derive(Debug, Clone)]
pub struct AdaptContext {
    /// Root of the fetched bundle.
    pub bundle_root: PathBuf,
    /// Project directory receiving the layout.
    pub target_root: PathBuf,
    pub ignore: IgnoreList,
    pub file_overrides: Vec<FileOverride>,
    pub entry_mode: EntryPointMode,
}

impl AdaptContext {
    pub fn new(bundle_root: impl Into<PathBuf>, target_root: impl Into<PathBuf>) -> Self {
        Self {
            bundle_root: bundle_root.into(),
            target_root: target_root.into(),
            ignore: IgnoreList::empty(),
            file_overrides: Vec::new(),
            entry_mode: EntryPointMode::Fresh,
        }
    }

    pub fn with_ignore_list<S: AsRef<str>>(mut self, patterns: &[S]) -> Self {
        self.ignore = IgnoreList::new(patterns);
        self
    }

    pub fn with_file_overrides(mut self, overrides: Vec<FileOverride>) -> Self {
        self.file_overrides = overrides;
        self
    }

    pub fn with_entry_mode(mut self, mode: EntryPointMode) -> Self {
        self.entry_mode = mode;
        self
    }
}

/// What an adapter run did, as target-relative forward-slash paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdaptReport {
    pub written: Vec<String>,
    pub preserved: Vec<String>,
    pub ignored: Vec<String>,
    pub overrides_applied: Vec<String>,
    /// Targets that more than one source file mapped to. The last source in
    /// name order wins.
    pub collisions: Vec<String>,
}

impl AdaptReport {
    pub fn merge(&mut self, other: AdaptReport) {
        self.written.extend(other.written);
        self.preserved.extend(other.preserved);
        self.ignored.extend(other.ignored);
        self.overrides_applied.extend(other.overrides_applied);
        self.collisions.extend(other.collisions);
    }

    pub fn sort(&mut self) {
        self.written.sort();
        self.preserved.sort();
        self.ignored.sort();
        self.overrides_applied.sort();
        self.collisions.sort();
    }
}

/// A bundle directory mirrored one-to-one into the target.
///
/// Used for informational diffs between bundle and installed tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirroredCategory {
    /// Forward-slash path inside the bundle, e.g. `rules-kit/rules`.
    pub source: String,
    /// Forward-slash path inside the target, e.g. `.cursor/rules`.
    pub target: String,
}

/// Trait for integration adapters
pub trait IntegrationAdapter: Send + Sync {
    fn profile(&self) -> IntegrationProfile;

    fn layout_root(&self) -> &'static str {
        self.profile().layout_root()
    }

    fn file_extension(&self) -> &'static str {
        self.profile().file_extension()
    }

    /// Target-relative entry-point document, if the integration has one.
    fn entry_point(&self) -> Option<&'static str> {
        None
    }

    /// Bundle directories that map one-to-one onto target directories.
    fn mirrored_categories(&self) -> Vec<MirroredCategory>;

    /// Target-relative paths generated by this integration. A reset or a
    /// replace-all deletes these.
    fn owned_paths(&self) -> Vec<String>;

    /// Target-relative paths removed when the integration is reset.
    fn reset_paths(&self) -> Vec<String> {
        self.owned_paths()
    }

    /// Lay the bundle out inside the target directory.
    fn adapt(&self, context: &AdaptContext) -> Result<AdaptReport>;
}

/// Apply each configured frontmatter override to its installed file.
///
/// Override paths are relative to `layout_root`. Entries whose file was not
/// installed are skipped.
pub(crate) fn apply_file_overrides(
    context: &AdaptContext,
    layout_root: &str,
    report: &mut AdaptReport,
) -> Result<()> {
    let root = context.target_root.join(layout_root);
    for entry in &context.file_overrides {
        let path = root.join(&entry.file);
        if !path.is_file() {
            tracing::debug!(file = %entry.file, "Override target not installed, skipping");
            continue;
        }
        let overrides = mapping_from_json(&entry.yaml_overrides)?;
        apply_overrides(&path, &overrides)?;
        report.overrides_applied.push(join_slash(layout_root, &entry.file));
    }
    Ok(())
}
