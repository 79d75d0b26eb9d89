//! Rules catalog → docs catalog conversion.
//!
//! The bundle's `rules-catalog.md` indexes rules, commands and docs. The rich
//! profile turns rules into skills and installs commands separately, so its
//! catalog keeps only the docs section.

use kit_content::placeholders::{DOCS_DIR, RULES_DIR};

pub const DOCS_CATALOG_FILE: &str = "docs-catalog.md";

const RULES_SECTION: &str = "### Rules Files";
const COMMANDS_SECTION: &str = "### Commands Files";
const DOCS_SECTION: &str = "### Docs Files";
const DOCS_SECTION_RENAMED: &str = "### Claude Code Docs Files";
const CATALOG_TITLE: &str = "# Claude Code Docs Catalog";

/// Convert a rules catalog into a docs-only catalog.
///
/// - the rules and commands sections are dropped up to the next heading of
///   the same or higher level
/// - the docs section heading is renamed
/// - the first H1 becomes the docs catalog title
/// - `{{RULES_DIR}}` references point at `{{DOCS_DIR}}`
/// - the "(current file)" line names `docs-catalog.md`
pub fn convert_docs_catalog(catalog: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut skipping = false;
    let mut retitled = false;

    for line in catalog.split('\n') {
        if line.contains(RULES_SECTION) || line.contains(COMMANDS_SECTION) {
            skipping = true;
            continue;
        }
        if line.contains(DOCS_SECTION) {
            skipping = false;
            out.push(DOCS_SECTION_RENAMED.to_string());
            continue;
        }
        if skipping {
            if heading_level(line).is_some_and(|level| level <= 3) {
                skipping = false;
            } else {
                continue;
            }
        }

        if !retitled && heading_level(line) == Some(1) {
            retitled = true;
            out.push(CATALOG_TITLE.to_string());
            continue;
        }

        let mut processed = line
            .replace(&format!("{RULES_DIR}/"), &format!("{DOCS_DIR}/"))
            .replace(RULES_DIR, DOCS_DIR);
        if line.contains("(current file)") {
            processed = processed.replacen("rules-catalog.md", DOCS_CATALOG_FILE, 1);
        }
        out.push(processed);
    }

    out.join("\n")
}

fn heading_level(line: &str) -> Option<usize> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    (hashes > 0 && line[hashes..].starts_with(' ')).then_some(hashes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CATALOG: &str = "\
# Rules and Docs Catalog

- {{DOCS_DIR}}/rules-catalog.md (current file)

### Rules Files
- {{RULES_DIR}}/base{{FILE_EXT}}

### Commands Files
- {{COMMANDS_DIR}}/review.md

### Docs Files
- {{DOCS_DIR}}/guide.md
- {{RULES_DIR}}/legacy.md

## Appendix
See {{RULES_DIR}}.";

    #[test]
    fn converts_full_catalog() {
        assert_eq!(
            convert_docs_catalog(CATALOG),
            "\
# Claude Code Docs Catalog

- {{DOCS_DIR}}/docs-catalog.md (current file)

### Claude Code Docs Files
- {{DOCS_DIR}}/guide.md
- {{DOCS_DIR}}/legacy.md

## Appendix
See {{DOCS_DIR}}."
        );
    }

    #[test]
    fn skipped_section_ends_at_next_heading() {
        let out = convert_docs_catalog("### Rules Files\n- a\n### Other\n- b");
        assert_eq!(out, "### Other\n- b");
    }

    #[test]
    fn deeper_headings_stay_inside_skipped_section() {
        let out = convert_docs_catalog("### Commands Files\n#### Sub\n- a\n### Docs Files\n- d");
        assert_eq!(out, "### Claude Code Docs Files\n- d");
    }

    #[test]
    fn hashtag_without_space_is_not_a_heading() {
        assert_eq!(heading_level("#tag"), None);
        assert_eq!(heading_level("## Two"), Some(2));
    }
}
