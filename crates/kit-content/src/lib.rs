//! Rule document processing for Rules Kit
//!
//! Reads and rewrites the YAML metadata block at the top of rule documents,
//! sorts rules into always-apply and on-demand (skill) buckets, converts rules
//! into skill packages and substitutes the layout placeholders that bundle
//! files use to refer to their own install location.

pub mod classify;
pub mod error;
pub mod frontmatter;
pub mod placeholders;
pub mod rule;

pub use classify::{ClassifiedRules, RuleDocument, classify_rules};
pub use error::{Error, Result};
pub use frontmatter::{
    Frontmatter, apply_overrides, apply_overrides_to_str, mapping_from_json, strip_description,
};
pub use placeholders::{PlaceholderValues, substitute};
pub use rule::{RuleMeta, SkillPackage, convert_to_package, package_name, parse_rule_meta};
