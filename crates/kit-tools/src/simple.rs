//! Adapter for the simple profiles (Cursor, Trae).
//!
//! Mirrors each bundle category under `<layout root>/<category>`. Rule
//! documents get the profile's extension and lose their `description` field.
//! Every file passes through placeholder substitution; generated files are
//! overwritten on each run.

use crate::bundle::{Category, RULES_KIT_DIR};
use crate::error::{Error, Result};
use crate::integration::{
    AdaptContext, AdaptReport, IntegrationAdapter, MirroredCategory, apply_file_overrides,
};
use crate::profile::IntegrationProfile;
use kit_content::{PlaceholderValues, strip_description, substitute};
use kit_fs::path::join_slash;
use kit_fs::{Error as FsError, io};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::thread;

/// Adapter for profiles without an entry-point document.
#[derive(Debug, Clone, Copy)]
pub struct SimpleAdapter {
    profile: IntegrationProfile,
}

impl SimpleAdapter {
    pub fn new(profile: IntegrationProfile) -> Self {
        debug_assert!(!profile.is_rich(), "{profile} needs the rich adapter");
        Self { profile }
    }

    fn copy_category(
        &self,
        context: &AdaptContext,
        category: Category,
        values: &PlaceholderValues,
    ) -> Result<AdaptReport> {
        let source = category.source_dir(&context.bundle_root);
        let mut report = AdaptReport::default();
        if !source.is_dir() {
            tracing::debug!(category = category.dir_name(), "Category absent from bundle");
            return Ok(report);
        }

        let layout_root = context.target_root.join(self.layout_root());
        self.copy_tree(context, category, &source, category.dir_name(), &layout_root, values, &mut report)?;
        Ok(report)
    }

    #[allow(clippy::too_many_arguments)]
    fn copy_tree(
        &self,
        context: &AdaptContext,
        category: Category,
        dir: &Path,
        relative: &str,
        layout_root: &Path,
        values: &PlaceholderValues,
        report: &mut AdaptReport,
    ) -> Result<()> {
        let mut entries = fs::read_dir(dir)
            .map_err(|e| FsError::io(dir, e))?
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(|e| FsError::io(dir, e))?;
        entries.sort_by_key(|e| e.file_name());
        let mut claimed: HashMap<String, String> = HashMap::new();

        for entry in entries {
            let name = entry.file_name().to_string_lossy().into_owned();
            let source_rel = join_slash(relative, &name);
            let file_type = entry.file_type().map_err(|e| FsError::io(entry.path(), e))?;

            if file_type.is_dir() {
                if context.ignore.is_ignored(&source_rel) && !context.ignore.has_negations() {
                    tracing::debug!(path = %source_rel, "Ignored directory");
                    report.ignored.push(self.report_path(&source_rel));
                    continue;
                }
                self.copy_tree(context, category, &entry.path(), &source_rel, layout_root, values, report)?;
                continue;
            }
            if !file_type.is_file() {
                continue;
            }

            let target_name = self.target_file_name(category, &name);
            let target_rel = join_slash(relative, &target_name);
            if context.ignore.is_ignored_as(&[&target_rel, &source_rel]) {
                tracing::debug!(path = %target_rel, "Ignored file");
                report.ignored.push(self.report_path(&target_rel));
                continue;
            }

            if let Some(previous) = claimed.insert(target_name.clone(), name.clone()) {
                tracing::warn!(
                    path = %self.report_path(&target_rel),
                    overwritten = %join_slash(relative, &previous),
                    source = %source_rel,
                    "Two bundle files map to the same target, keeping the later one"
                );
                report.collisions.push(self.report_path(&target_rel));
            }

            let destination = layout_root.join(&target_rel);
            let bytes = fs::read(entry.path()).map_err(|e| FsError::io(entry.path(), e))?;
            match String::from_utf8(bytes) {
                Ok(text) => {
                    let text = if category == Category::Rules && is_rule_file(&name) {
                        strip_description(&text)?
                    } else {
                        text
                    };
                    io::write_text(&destination, &substitute(Some(&text), values))?;
                }
                Err(raw) => io::write_atomic(&destination, raw.as_bytes())?,
            }
            report.written.push(self.report_path(&target_rel));
        }
        Ok(())
    }

    fn target_file_name(&self, category: Category, name: &str) -> String {
        if category != Category::Rules || !is_rule_file(name) {
            return name.to_string();
        }
        let stem = Path::new(name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.to_string());
        format!("{stem}{}", self.file_extension())
    }

    fn report_path(&self, relative: &str) -> String {
        join_slash(self.layout_root(), relative)
    }
}

fn is_rule_file(name: &str) -> bool {
    matches!(
        Path::new(name).extension().and_then(|e| e.to_str()),
        Some("md") | Some("mdc")
    )
}

impl IntegrationAdapter for SimpleAdapter {
    fn profile(&self) -> IntegrationProfile {
        self.profile
    }

    fn mirrored_categories(&self) -> Vec<MirroredCategory> {
        Category::ALL
            .iter()
            .map(|c| MirroredCategory {
                source: format!("{RULES_KIT_DIR}/{}", c.dir_name()),
                target: format!("{}/{}", self.layout_root(), c.dir_name()),
            })
            .collect()
    }

    fn owned_paths(&self) -> Vec<String> {
        Category::ALL
            .iter()
            .map(|c| format!("{}/{}", self.layout_root(), c.dir_name()))
            .collect()
    }

    fn adapt(&self, context: &AdaptContext) -> Result<AdaptReport> {
        let values = self.profile.placeholder_values();
        let values = &values;

        // Categories write to disjoint subtrees, so they can run side by side.
        let results: Vec<Result<AdaptReport>> = thread::scope(|scope| {
            let handles: Vec<_> = Category::ALL
                .iter()
                .map(|&category| scope.spawn(move || self.copy_category(context, category, values)))
                .collect();
            handles
                .into_iter()
                .map(|handle| {
                    handle.join().unwrap_or_else(|_| {
                        Err(Error::AdaptFailed {
                            profile: self.profile.to_string(),
                            message: "category worker panicked".into(),
                        })
                    })
                })
                .collect()
        });

        let mut report = AdaptReport::default();
        for result in results {
            report.merge(result?);
        }
        apply_file_overrides(context, self.layout_root(), &mut report)?;
        report.sort();

        tracing::info!(
            profile = %self.profile,
            written = report.written.len(),
            ignored = report.ignored.len(),
            "Adapted bundle"
        );
        Ok(report)
    }
}
