//! Typed rule metadata and skill-package conversion.

use crate::frontmatter::Frontmatter;
use serde_yaml::{Mapping, Value};

/// The core metadata every rule document carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMeta {
    pub id: String,
    pub always_apply: bool,
    pub rule_type: String,
    pub description: Option<String>,
}

impl RuleMeta {
    /// Extract the core fields from a parsed frontmatter mapping.
    ///
    /// Returns `None` unless `id` is a non-empty string.
    pub fn from_fields(fields: &Mapping) -> Option<Self> {
        let id = fields.get("id")?.as_str()?.trim();
        if id.is_empty() {
            return None;
        }

        Some(Self {
            id: id.to_string(),
            always_apply: fields.get("alwaysApply").map(truthy).unwrap_or(false),
            rule_type: fields
                .get("type")
                .and_then(scalar_to_string)
                .unwrap_or_else(|| "unknown".to_string()),
            description: fields.get("description").and_then(scalar_to_string),
        })
    }

    /// The description, or the generated fallback for rules without one.
    pub fn description_or_default(&self) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| format!("AI skill for {}", self.id))
    }
}

/// Loose truthiness for `alwaysApply`: any non-empty string, non-zero number
/// or collection counts, so `alwaysApply: "false"` is still true.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::Sequence(_) | Value::Mapping(_) => true,
        Value::Tagged(tagged) => truthy(&tagged.value),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse the core metadata of a rule document.
///
/// Returns `None` for documents without a frontmatter block, with malformed
/// YAML, or without a usable `id`. Such documents are not rules.
pub fn parse_rule_meta(content: &str) -> Option<RuleMeta> {
    if !Frontmatter::is_present(content) {
        return None;
    }
    let doc = Frontmatter::parse(content).ok()?;
    RuleMeta::from_fields(&doc.fields)
}

/// A rule rewritten as a skill package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillPackage {
    /// Directory name for the package.
    pub name: String,
    /// Full text of the package's `SKILL.md`.
    pub content: String,
}

/// Derive a package name from a rule id.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into one
/// `-`, and trims leading and trailing hyphens.
///
/// ```
/// assert_eq!(kit_content::package_name("Code_Review  Guide!"), "code-review-guide");
/// ```
pub fn package_name(id: &str) -> String {
    let mut name = String::with_capacity(id.len());
    let mut pending_hyphen = false;
    for ch in id.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !name.is_empty() {
                name.push('-');
            }
            pending_hyphen = false;
            name.push(ch);
        } else {
            pending_hyphen = true;
        }
    }
    name
}

/// Convert a rule document into a skill package.
///
/// The package frontmatter holds only `name` and `description`; the rule's
/// other metadata is dropped and its body is kept as is. Returns `None` if
/// the document is not a rule.
pub fn convert_to_package(content: &str) -> Option<SkillPackage> {
    let meta = parse_rule_meta(content)?;
    let doc = Frontmatter::parse(content).ok()?;

    let name = package_name(&meta.id);
    let mut package = Frontmatter {
        fields: Mapping::new(),
        body: doc.body,
    };
    package.set("name", Value::String(name.clone()));
    package.set("description", Value::String(meta.description_or_default()));

    let content = package.render().ok()?;
    Some(SkillPackage { name, content })
}
