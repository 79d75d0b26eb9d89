//! SyncRecord: the persisted per-profile install state

use chrono::{DateTime, Utc};
use kit_tools::{FileOverride, IntegrationProfile};
use serde::{Deserialize, Serialize};

/// Current record format version.
pub const CONFIG_VERSION: &str = "1.0.0";

/// Value of the `source` field.
pub const SOURCE: &str = "rules-kit";

/// JSON schema URL for a record format version.
pub fn schema_url(config_version: &str) -> String {
    format!(
        "https://raw.githubusercontent.com/user/rules-kit/main/schemas/rules-kit-config-{config_version}.schema.json"
    )
}

/// A named rule set and whether updates may touch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub id: String,
    #[serde(default = "default_true")]
    pub update: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_rule_sets() -> Vec<RuleSet> {
    vec![RuleSet {
        id: "base".to_string(),
        update: true,
    }]
}

fn default_source() -> String {
    SOURCE.to_string()
}

/// Install state of one profile in one target directory.
///
/// Stored as camelCase JSON at `<layout root>/rules-config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRecord {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub config_version: String,
    #[serde(default)]
    pub cli_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ide_type: Option<IntegrationProfile>,
    /// Installed bundle version. Older records call this field `version`.
    #[serde(alias = "version")]
    pub prompts_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_rules_version: Option<String>,
    pub installed_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "default_rule_sets")]
    pub rule_sets: Vec<RuleSet>,
    #[serde(default)]
    pub ignore_list: Vec<String>,
    #[serde(default)]
    pub file_overrides: Vec<FileOverride>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default = "default_source")]
    pub source: String,
}

impl SyncRecord {
    /// A fresh record for a first install, stamped `now`.
    pub fn new(
        profile: IntegrationProfile,
        cli_version: impl Into<String>,
        prompts_version: impl Into<String>,
        system_rules_version: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            schema: Some(schema_url(CONFIG_VERSION)),
            config_version: CONFIG_VERSION.to_string(),
            cli_version: cli_version.into(),
            ide_type: Some(profile),
            prompts_version: prompts_version.into(),
            system_rules_version,
            installed_at: now,
            updated_at: now,
            rule_sets: default_rule_sets(),
            ignore_list: Vec::new(),
            file_overrides: Vec::new(),
            settings: Settings::default(),
            source: default_source(),
        }
    }

    /// Move `updated_at` to `now`, never before `installed_at`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.installed_at);
    }
}
