//! Rule classification into always-apply and skill buckets.

use crate::Result;
use crate::frontmatter::Frontmatter;
use crate::rule::RuleMeta;
use kit_fs::{Error as FsError, io};
use std::fs;
use std::path::{Path, PathBuf};

/// A rule document read from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleDocument {
    pub path: PathBuf,
    pub meta: RuleMeta,
    /// Text after the frontmatter block.
    pub body: String,
    /// The full original text.
    pub source: String,
}

/// Rules split by whether they apply to every conversation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedRules {
    pub always_apply: Vec<RuleDocument>,
    pub skills: Vec<RuleDocument>,
}

impl ClassifiedRules {
    pub fn is_empty(&self) -> bool {
        self.always_apply.is_empty() && self.skills.is_empty()
    }
}

/// Classify the rule documents directly inside `dir`.
///
/// Subdirectories are not descended. Files that are not rules are skipped.
/// Skill rules without a description receive the generated fallback. Both
/// buckets are sorted by id. A missing directory classifies as empty.
pub fn classify_rules(dir: &Path) -> Result<ClassifiedRules> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ClassifiedRules::default());
        }
        Err(e) => return Err(FsError::io(dir, e).into()),
    };

    let mut classified = ClassifiedRules::default();
    for entry in entries {
        let entry = entry.map_err(|e| FsError::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| FsError::io(entry.path(), e))?;
        if !file_type.is_file() {
            continue;
        }

        let path = entry.path();
        let source = io::read_text(&path)?;
        let Some(document) = read_rule(&path, source) else {
            tracing::debug!(path = %path.display(), "Not a rule document, skipping");
            continue;
        };

        if document.meta.always_apply {
            classified.always_apply.push(document);
        } else {
            classified.skills.push(document);
        }
    }

    for skill in &mut classified.skills {
        if skill.meta.description.is_none() {
            skill.meta.description = Some(skill.meta.description_or_default());
        }
    }
    classified.always_apply.sort_by(|a, b| a.meta.id.cmp(&b.meta.id));
    classified.skills.sort_by(|a, b| a.meta.id.cmp(&b.meta.id));

    tracing::debug!(
        dir = %dir.display(),
        always_apply = classified.always_apply.len(),
        skills = classified.skills.len(),
        "Classified rules"
    );
    Ok(classified)
}

fn read_rule(path: &Path, source: String) -> Option<RuleDocument> {
    if !Frontmatter::is_present(&source) {
        return None;
    }
    let doc = Frontmatter::parse(&source).ok()?;
    let meta = RuleMeta::from_fields(&doc.fields)?;
    Some(RuleDocument {
        path: path.to_path_buf(),
        meta,
        body: doc.body,
        source,
    })
}
