//! Ignore-list matching for bundle paths
//!
//! Patterns are shell-style globs evaluated against forward-slash paths
//! relative to the integration's layout root (`rules/custom.mdc`,
//! `commands/review.md`). `*` and `?` stay inside one path segment, `**`
//! spans segments and `{a,b}` alternates.
//!
//! A pattern starting with `!` force-includes whatever it matches. Negation
//! is not positional: a path is ignored only when at least one plain pattern
//! matches it and no negated pattern does.
//!
//! ```
//! use kit_fs::IgnoreList;
//!
//! let list = IgnoreList::new(&["rules/**", "!rules/keep.md"]);
//! assert!(list.is_ignored("rules/drop.md"));
//! assert!(!list.is_ignored("rules/keep.md"));
//! assert!(!list.is_ignored("docs/guide.md"));
//! ```

use crate::path::normalize_separators;
use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};

/// A compiled ignore list.
#[derive(Debug, Clone)]
pub struct IgnoreList {
    ignore: GlobSet,
    keep: GlobSet,
    has_ignore: bool,
    has_keep: bool,
}

impl IgnoreList {
    /// Compile a list of patterns. Patterns that fail to parse are skipped
    /// with a warning; they never match anything.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let mut ignore = GlobSetBuilder::new();
        let mut keep = GlobSetBuilder::new();
        let mut has_ignore = false;
        let mut has_keep = false;

        for raw in patterns {
            let raw = raw.as_ref().trim();
            if raw.is_empty() {
                continue;
            }
            let (negated, body) = match raw.strip_prefix('!') {
                Some(rest) => (true, rest),
                None => (false, raw),
            };
            let Some(glob) = compile(body) else {
                tracing::warn!(pattern = raw, "Skipping invalid ignore pattern");
                continue;
            };
            if negated {
                keep.add(glob);
                has_keep = true;
            } else {
                ignore.add(glob);
                has_ignore = true;
            }
        }

        Self {
            ignore: build_set(ignore),
            keep: build_set(keep),
            has_ignore,
            has_keep,
        }
    }

    /// An ignore list that ignores nothing.
    pub fn empty() -> Self {
        Self::new::<&str>(&[])
    }

    /// Whether `relative_path` should be skipped.
    pub fn is_ignored(&self, relative_path: &str) -> bool {
        if !self.has_ignore {
            return false;
        }
        self.is_ignored_as(&[relative_path])
    }

    /// Whether a file known under several names should be skipped.
    ///
    /// Ignored when a plain pattern matches any alias and no negated pattern
    /// matches any alias, so `!rules/keep.mdc` rescues a file whose source
    /// name is `rules/keep.md`.
    pub fn is_ignored_as<S: AsRef<str>>(&self, aliases: &[S]) -> bool {
        if !self.has_ignore {
            return false;
        }
        let paths: Vec<String> = aliases
            .iter()
            .map(|a| normalize_separators(a.as_ref()).trim_start_matches("./").to_string())
            .collect();
        let ignored = paths.iter().any(|p| self.ignore.is_match(p));
        let kept = self.has_keep && paths.iter().any(|p| self.keep.is_match(p));
        ignored && !kept
    }

    /// Whether any `!` pattern is present.
    ///
    /// When true, an ignored directory may still contain force-included
    /// files, so callers must descend instead of pruning it.
    pub fn has_negations(&self) -> bool {
        self.has_keep
    }

    /// True when no effective pattern is present.
    pub fn is_empty(&self) -> bool {
        !self.has_ignore
    }
}

impl Default for IgnoreList {
    fn default() -> Self {
        Self::empty()
    }
}

/// One-shot form of [`IgnoreList::is_ignored`].
///
/// Prefer building an [`IgnoreList`] once when checking many paths.
pub fn should_ignore<S: AsRef<str>>(relative_path: &str, patterns: &[S]) -> bool {
    if patterns.is_empty() {
        return false;
    }
    IgnoreList::new(patterns).is_ignored(relative_path)
}

fn compile(pattern: &str) -> Option<Glob> {
    let pattern = normalize_separators(pattern);
    let pattern = pattern.trim_start_matches("./");
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .ok()
}

fn build_set(builder: GlobSetBuilder) -> GlobSet {
    builder.build().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to build ignore glob set, ignoring nothing");
        GlobSet::empty()
    })
}
