//! Adapter for the rich profile (Claude Code).
//!
//! Besides mirroring docs and commands, this integration:
//!
//! - inlines every always-apply rule into the managed region of `CLAUDE.md`
//! - turns every other rule into a skill package under `.claude/skills/`
//! - replaces the rules catalog with a docs-only catalog
//! - merges the bundle's MCP servers into `.claude/settings.json`
//!
//! Docs other than the catalog and all commands are never overwritten once
//! installed; the user may have edited them.

pub mod catalog;
pub mod entry;

use crate::bundle::{Category, RULES_CATALOG_FILE, RULES_KIT_DIR, mcp_file};
use crate::error::Result;
use crate::integration::{
    AdaptContext, AdaptReport, EntryPointMode, IntegrationAdapter, MirroredCategory,
    apply_file_overrides,
};
use crate::profile::IntegrationProfile;
use crate::settings::{merge_mcp_servers, read_mcp_servers};
use catalog::{DOCS_CATALOG_FILE, convert_docs_catalog};
use kit_blocks::upsert_file;
use kit_content::{ClassifiedRules, PlaceholderValues, classify_rules, convert_to_package, substitute};
use kit_fs::path::join_slash;
use kit_fs::{Error as FsError, io};
use std::fs;
use std::path::Path;

pub const SKILLS_DIR: &str = "skills";
pub const SKILL_FILE: &str = "SKILL.md";
pub const SETTINGS_FILE: &str = "settings.json";

/// Claude Code adapter.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClaudeAdapter;

impl ClaudeAdapter {
    pub fn new() -> Self {
        Self
    }

    fn root(&self) -> &'static str {
        IntegrationProfile::ClaudeCode.layout_root()
    }

    fn rel(&self, path: &str) -> String {
        join_slash(self.root(), path)
    }

    /// Drop rules whose bundle path the ignore list excludes.
    fn filter_ignored(&self, context: &AdaptContext, classified: &mut ClassifiedRules, report: &mut AdaptReport) {
        let mut keep = |rule: &kit_content::RuleDocument| {
            let name = rule
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let rel = join_slash(Category::Rules.dir_name(), &name);
            if context.ignore.is_ignored(&rel) {
                report.ignored.push(self.rel(&rel));
                false
            } else {
                true
            }
        };
        classified.always_apply.retain(&mut keep);
        classified.skills.retain(&mut keep);
    }

    /// Copy docs, converting the rules catalog. Returns the converted catalog
    /// (before placeholder substitution) or an empty string.
    fn copy_docs(
        &self,
        context: &AdaptContext,
        values: &PlaceholderValues,
        report: &mut AdaptReport,
    ) -> Result<String> {
        let source = Category::Docs.source_dir(&context.bundle_root);
        let target = context.target_root.join(self.root()).join(Category::Docs.dir_name());
        let mut catalog = String::new();

        for (name, path) in list_files(&source)? {
            let rel = join_slash(Category::Docs.dir_name(), &name);
            if context.ignore.is_ignored(&rel) {
                report.ignored.push(self.rel(&rel));
                continue;
            }
            let content = io::read_text(&path)?;

            if name == RULES_CATALOG_FILE {
                catalog = convert_docs_catalog(&content);
                io::write_text(&target.join(DOCS_CATALOG_FILE), &substitute(Some(&catalog), values))?;
                report
                    .written
                    .push(self.rel(&join_slash(Category::Docs.dir_name(), DOCS_CATALOG_FILE)));
                continue;
            }

            let destination = target.join(&name);
            if destination.exists() {
                report.preserved.push(self.rel(&rel));
                continue;
            }
            io::write_text(&destination, &substitute(Some(&content), values))?;
            report.written.push(self.rel(&rel));
        }
        Ok(catalog)
    }

    fn write_entry_point(
        &self,
        context: &AdaptContext,
        classified: &ClassifiedRules,
        catalog: &str,
        values: &PlaceholderValues,
        report: &mut AdaptReport,
    ) -> Result<()> {
        let path = context.target_root.join(entry::ENTRY_FILE);
        match context.entry_mode {
            EntryPointMode::Fresh => {
                let document = entry::render_document(&classified.always_apply, catalog);
                io::write_text(&path, &substitute(Some(&document), values))?;
            }
            EntryPointMode::UpdateInPlace => {
                let block = entry::render_block(&classified.always_apply, catalog);
                let outcome = upsert_file(&path, entry::MARKERS, &substitute(Some(&block), values))?;
                tracing::debug!(?outcome, "Updated entry point in place");
            }
        }
        report.written.push(entry::ENTRY_FILE.to_string());
        Ok(())
    }

    fn write_skills(
        &self,
        context: &AdaptContext,
        classified: &ClassifiedRules,
        values: &PlaceholderValues,
        report: &mut AdaptReport,
    ) -> Result<()> {
        let skills_root = context.target_root.join(self.root()).join(SKILLS_DIR);
        for rule in &classified.skills {
            let Some(package) = convert_to_package(&rule.source) else {
                continue;
            };
            if package.name.is_empty() {
                tracing::warn!(id = %rule.meta.id, "Rule id yields an empty package name, skipping");
                continue;
            }
            let path = skills_root.join(&package.name).join(SKILL_FILE);
            io::write_text(&path, &substitute(Some(&package.content), values))?;
            report
                .written
                .push(self.rel(&format!("{SKILLS_DIR}/{}/{SKILL_FILE}", package.name)));
        }
        Ok(())
    }

    fn copy_commands(
        &self,
        context: &AdaptContext,
        values: &PlaceholderValues,
        report: &mut AdaptReport,
    ) -> Result<()> {
        let source = Category::Commands.source_dir(&context.bundle_root);
        let target = context
            .target_root
            .join(self.root())
            .join(Category::Commands.dir_name());

        for (name, path) in list_files(&source)? {
            let rel = join_slash(Category::Commands.dir_name(), &name);
            if context.ignore.is_ignored(&rel) {
                report.ignored.push(self.rel(&rel));
                continue;
            }
            let destination = target.join(&name);
            if destination.exists() {
                report.preserved.push(self.rel(&rel));
                continue;
            }
            let content = io::read_text(&path)?;
            io::write_text(&destination, &substitute(Some(&content), values))?;
            report.written.push(self.rel(&rel));
        }
        Ok(())
    }

    fn merge_settings(&self, context: &AdaptContext, report: &mut AdaptReport) -> Result<()> {
        let servers = read_mcp_servers(&mcp_file(&context.bundle_root))?;
        let path = context.target_root.join(self.root()).join(SETTINGS_FILE);
        merge_mcp_servers(&path, servers)?;
        report.written.push(self.rel(SETTINGS_FILE));
        Ok(())
    }
}

/// Regular files directly inside `dir`, sorted by name. A missing directory
/// has no files.
fn list_files(dir: &Path) -> Result<Vec<(String, std::path::PathBuf)>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(FsError::io(dir, e).into()),
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| FsError::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| FsError::io(entry.path(), e))?;
        if file_type.is_file() {
            files.push((entry.file_name().to_string_lossy().into_owned(), entry.path()));
        }
    }
    files.sort();
    Ok(files)
}

impl IntegrationAdapter for ClaudeAdapter {
    fn profile(&self) -> IntegrationProfile {
        IntegrationProfile::ClaudeCode
    }

    fn entry_point(&self) -> Option<&'static str> {
        Some(entry::ENTRY_FILE)
    }

    fn mirrored_categories(&self) -> Vec<MirroredCategory> {
        [Category::Docs, Category::Commands]
            .iter()
            .map(|c| MirroredCategory {
                source: format!("{RULES_KIT_DIR}/{}", c.dir_name()),
                target: self.rel(c.dir_name()),
            })
            .collect()
    }

    fn owned_paths(&self) -> Vec<String> {
        vec![
            self.rel(Category::Docs.dir_name()),
            self.rel(Category::Commands.dir_name()),
            self.rel(SKILLS_DIR),
            entry::ENTRY_FILE.to_string(),
        ]
    }

    fn reset_paths(&self) -> Vec<String> {
        let mut paths = self.owned_paths();
        paths.push(self.rel(SETTINGS_FILE));
        paths
    }

    fn adapt(&self, context: &AdaptContext) -> Result<AdaptReport> {
        let mut report = AdaptReport::default();
        let rules_dir = Category::Rules.source_dir(&context.bundle_root);
        if !rules_dir.is_dir() {
            tracing::warn!(dir = %rules_dir.display(), "Bundle has no rules directory, nothing to adapt");
            return Ok(report);
        }

        let values = self.profile().placeholder_values();
        let mut classified = classify_rules(&rules_dir)?;
        self.filter_ignored(context, &mut classified, &mut report);

        let catalog = self.copy_docs(context, &values, &mut report)?;
        self.write_entry_point(context, &classified, &catalog, &values, &mut report)?;
        self.write_skills(context, &classified, &values, &mut report)?;
        self.copy_commands(context, &values, &mut report)?;
        self.merge_settings(context, &mut report)?;
        apply_file_overrides(context, self.root(), &mut report)?;
        report.sort();

        tracing::info!(
            always_apply = classified.always_apply.len(),
            skills = classified.skills.len(),
            written = report.written.len(),
            "Adapted bundle for Claude Code"
        );
        Ok(report)
    }
}
