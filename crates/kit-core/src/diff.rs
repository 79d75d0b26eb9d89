//! Bundle vs installed tree comparison
//!
//! The diff is informational: it is logged and reported, but adapters always
//! rewrite the whole layout.

use crate::Result;
use kit_fs::path::join_slash;
use kit_fs::{FileHashes, scan_directory};
use kit_tools::MirroredCategory;
use std::path::Path;

/// Paths that differ between a bundle and an installed layout.
///
/// Paths are forward-slash, relative to the layout root and prefixed with
/// the category, e.g. `rules/base.md`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionDiff {
    pub to_add: Vec<String>,
    pub to_delete: Vec<String>,
    pub to_update: Vec<String>,
}

impl VersionDiff {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_delete.is_empty() && self.to_update.is_empty()
    }

    pub fn total(&self) -> usize {
        self.to_add.len() + self.to_delete.len() + self.to_update.len()
    }
}

/// Compare every mirrored category of `bundle_root` against `target_root`.
pub fn compute_diff(
    bundle_root: &Path,
    target_root: &Path,
    categories: &[MirroredCategory],
) -> Result<VersionDiff> {
    let mut diff = VersionDiff::default();
    for category in categories {
        let source = scan_directory(&bundle_root.join(&category.source))?;
        let installed = scan_directory(&target_root.join(&category.target))?;
        let label = category_label(&category.target);
        compare(&source, &installed, &label, &mut diff);
    }
    tracing::debug!(
        add = diff.to_add.len(),
        delete = diff.to_delete.len(),
        update = diff.to_update.len(),
        "Computed version diff"
    );
    Ok(diff)
}

fn category_label(target: &str) -> String {
    target.rsplit('/').next().unwrap_or(target).to_string()
}

fn compare(source: &FileHashes, installed: &FileHashes, label: &str, diff: &mut VersionDiff) {
    for (path, hash) in source {
        match installed.get(path) {
            None => diff.to_add.push(join_slash(label, path)),
            Some(existing) if existing != hash => diff.to_update.push(join_slash(label, path)),
            Some(_) => {}
        }
    }
    for path in installed.keys() {
        if !source.contains_key(path) {
            diff.to_delete.push(join_slash(label, path));
        }
    }
}
