//! Reading and writing sync records

use super::record::{CONFIG_VERSION, SyncRecord, schema_url};
use crate::Result;
use crate::error::Error;
use crate::version::CalVer;
use kit_fs::io;
use kit_tools::{IntegrationProfile, adapter_for};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// File name of the record inside a profile's layout root.
pub const RECORD_FILE: &str = "rules-config.json";

static LEGACY_SCHEMA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.(cursor|trae|claude)/(cursor-rules|ai-rules-kit)-config-(\d+\.\d+\.\d+)\.schema\.json")
        .expect("legacy schema pattern is valid")
});

/// Sync records of one target directory.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    target: PathBuf,
}

impl ConfigStore {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Where the record of `profile` lives.
    pub fn record_path(&self, profile: IntegrationProfile) -> PathBuf {
        self.target.join(profile.layout_root()).join(RECORD_FILE)
    }

    /// Read the record of `profile`.
    ///
    /// Absent, unreadable and invalid records all read as `None`; the latter
    /// two are logged. A record carrying a legacy `$schema` URL is rewritten
    /// with the current one.
    pub fn read(&self, profile: IntegrationProfile) -> Option<SyncRecord> {
        self.read_with(profile, true)
    }

    /// Like [`ConfigStore::read`], but a legacy record is only migrated in
    /// memory. The file on disk is never touched.
    pub fn peek(&self, profile: IntegrationProfile) -> Option<SyncRecord> {
        self.read_with(profile, false)
    }

    fn read_with(&self, profile: IntegrationProfile, persist_migration: bool) -> Option<SyncRecord> {
        let path = self.record_path(profile);
        match self.load(profile, &path, persist_migration) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unusable sync record");
                None
            }
        }
    }

    fn load(
        &self,
        profile: IntegrationProfile,
        path: &Path,
        persist_migration: bool,
    ) -> Result<Option<SyncRecord>> {
        let Some(content) = io::read_text_if_exists(path)? else {
            return Ok(None);
        };
        let mut record: SyncRecord =
            serde_json::from_str(&content).map_err(|_| Error::ConfigCorrupt { path: path.to_path_buf() })?;
        if let Some(reason) = validate(&record, profile) {
            tracing::debug!(path = %path.display(), reason, "Sync record failed validation");
            return Err(Error::ConfigCorrupt {
                path: path.to_path_buf(),
            });
        }

        let legacy = record
            .schema
            .as_deref()
            .is_some_and(|schema| LEGACY_SCHEMA.is_match(schema));
        if legacy {
            record.schema = Some(schema_url(&record.config_version));
            record.ide_type.get_or_insert(profile);
            if !persist_migration {
                return Ok(Some(record));
            }
            tracing::info!(path = %path.display(), "Migrating legacy sync record schema");
            if let Err(e) = self.persist(profile, &record) {
                tracing::warn!(error = %e, "Failed to rewrite migrated sync record");
            }
        }
        Ok(Some(record))
    }

    /// Write the record of `profile`, creating the layout root if needed.
    ///
    /// The current `$schema` URL and the profile's `ideType` are stamped
    /// before writing.
    pub fn write(&self, profile: IntegrationProfile, record: &SyncRecord) -> Result<()> {
        let mut record = record.clone();
        record.schema = Some(schema_url(CONFIG_VERSION));
        record.config_version = CONFIG_VERSION.to_string();
        record.ide_type = Some(profile);
        self.persist(profile, &record)
    }

    fn persist(&self, profile: IntegrationProfile, record: &SyncRecord) -> Result<()> {
        let path = self.record_path(profile);
        let mut content = serde_json::to_string_pretty(record)?;
        content.push('\n');
        io::write_text(&path, &content)?;
        tracing::debug!(path = %path.display(), "Wrote sync record");
        Ok(())
    }

    /// Remove the record of `profile` and, for the rich profile, its
    /// settings file. Missing files are fine.
    pub fn delete(&self, profile: IntegrationProfile) -> Result<()> {
        io::remove_path(&self.record_path(profile))?;
        if profile.is_rich() {
            let adapter = adapter_for(profile);
            let owned = adapter.owned_paths();
            for extra in adapter.reset_paths().iter().filter(|p| !owned.contains(p)) {
                io::remove_path(&self.target.join(extra))?;
            }
        }
        Ok(())
    }

    /// Profiles with a readable record, in [`IntegrationProfile::ALL`] order.
    /// Records are only inspected, never rewritten.
    pub fn initialized_profiles(&self) -> Vec<IntegrationProfile> {
        IntegrationProfile::ALL
            .into_iter()
            .filter(|&profile| self.peek(profile).is_some())
            .collect()
    }
}

/// Why `record` is unusable for `profile`, if it is.
fn validate(record: &SyncRecord, profile: IntegrationProfile) -> Option<&'static str> {
    if semver::Version::parse(&record.config_version).is_err() {
        return Some("configVersion is not semver");
    }
    if !CalVer::is_valid(&record.prompts_version) {
        return Some("promptsVersion is not CalVer");
    }
    if let Some(system) = &record.system_rules_version
        && !CalVer::is_valid(system)
    {
        return Some("systemRulesVersion is not CalVer");
    }
    if record.ide_type.is_some_and(|ide| ide != profile) {
        return Some("ideType belongs to another profile");
    }
    if record.updated_at < record.installed_at {
        return Some("updatedAt precedes installedAt");
    }
    None
}
