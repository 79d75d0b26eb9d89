//! Integration tests for the Cursor and Trae adapters.

use kit_test_utils::{BundleFixture, TestTarget};
use kit_tools::{AdaptContext, FileOverride, IntegrationAdapter, IntegrationProfile, adapter_for};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn adapt(profile: IntegrationProfile, context: &AdaptContext) -> kit_tools::AdaptReport {
    adapter_for(profile).adapt(context).unwrap()
}

#[rstest]
#[case(IntegrationProfile::Cursor, ".cursor", ".mdc")]
#[case(IntegrationProfile::Trae, ".trae", ".md")]
fn test_mirrors_categories_with_profile_extension(
    #[case] profile: IntegrationProfile,
    #[case] root: &str,
    #[case] ext: &str,
) {
    let bundle = BundleFixture::standard();
    let target = TestTarget::new();

    let report = adapt(profile, &AdaptContext::new(bundle.root(), target.root()));

    target.assert_file_exists(&format!("{root}/rules/base{ext}"));
    target.assert_file_exists(&format!("{root}/rules/testing{ext}"));
    target.assert_file_exists(&format!("{root}/docs/guide.md"));
    target.assert_file_exists(&format!("{root}/docs/rules-catalog.md"));
    target.assert_file_exists(&format!("{root}/commands/review.md"));
    assert!(report.written.contains(&format!("{root}/rules/base{ext}")));
    assert!(report.ignored.is_empty());
}

#[test]
fn test_cursor_strips_description_and_keeps_other_fields() {
    let bundle = BundleFixture::standard();
    let target = TestTarget::new();

    adapt(IntegrationProfile::Cursor, &AdaptContext::new(bundle.root(), target.root()));

    let content = target.read(".cursor/rules/testing.mdc");
    assert!(!content.contains("description"), "description survived:\n{content}");
    assert!(content.starts_with("---\nid: testing\nalwaysApply: false\ntype: guideline\n---\n"));
    assert!(content.contains("# Testing"));
}

#[test]
fn test_placeholders_resolve_to_profile_layout() {
    let bundle = BundleFixture::standard();
    let target = TestTarget::new();

    adapt(IntegrationProfile::Trae, &AdaptContext::new(bundle.root(), target.root()));

    target.assert_file_contains(".trae/rules/base.md", "Read .trae/docs/guide.md before editing.");
    target.assert_file_contains(".trae/rules/code-review.md", "Check every file ending in .md.");
    target.assert_file_contains(".trae/docs/guide.md", "Rules live in .trae/rules.");
    let catalog = target.read(".trae/docs/rules-catalog.md");
    assert!(!catalog.contains("{{"), "unresolved placeholder in:\n{catalog}");
}

#[test]
fn test_generated_files_are_overwritten() {
    let bundle = BundleFixture::standard();
    let target = TestTarget::new();
    target.write(".cursor/docs/guide.md", "stale local copy");

    adapt(IntegrationProfile::Cursor, &AdaptContext::new(bundle.root(), target.root()));

    assert_eq!(target.read(".cursor/docs/guide.md"), "# Guide\n\nRules live in .cursor/rules.\n");
}

#[test]
fn test_ignore_list_with_negation_keeps_single_file() {
    let bundle = BundleFixture::standard();
    let target = TestTarget::new();
    let context = AdaptContext::new(bundle.root(), target.root())
        .with_ignore_list(&["rules/**", "!rules/base.mdc"]);

    let report = adapt(IntegrationProfile::Cursor, &context);

    target.assert_file_exists(".cursor/rules/base.mdc");
    target.assert_file_not_exists(".cursor/rules/testing.mdc");
    target.assert_file_not_exists(".cursor/rules/code-review.mdc");
    assert_eq!(
        report.ignored,
        vec![".cursor/rules/code-review.mdc", ".cursor/rules/testing.mdc"]
    );
}

#[test]
fn test_ignored_directory_is_pruned_without_negations() {
    let bundle = BundleFixture::standard();
    bundle.doc("internal/notes.md", "private");
    let target = TestTarget::new();
    let context = AdaptContext::new(bundle.root(), target.root()).with_ignore_list(&["docs/internal"]);

    let report = adapt(IntegrationProfile::Cursor, &context);

    target.assert_file_not_exists(".cursor/docs/internal");
    target.assert_file_exists(".cursor/docs/guide.md");
    assert_eq!(report.ignored, vec![".cursor/docs/internal"]);
}

#[test]
fn test_ignore_matches_source_file_name_too() {
    let bundle = BundleFixture::standard();
    let target = TestTarget::new();
    let context = AdaptContext::new(bundle.root(), target.root()).with_ignore_list(&["rules/testing.md"]);

    adapt(IntegrationProfile::Cursor, &context);

    target.assert_file_not_exists(".cursor/rules/testing.mdc");
    target.assert_file_exists(".cursor/rules/base.mdc");
}

#[test]
fn test_file_overrides_apply_after_copy() {
    let bundle = BundleFixture::standard();
    let target = TestTarget::new();
    let mut yaml_overrides = serde_json::Map::new();
    yaml_overrides.insert("alwaysApply".into(), serde_json::Value::Bool(true));
    yaml_overrides.insert("language".into(), serde_json::Value::String("typescript".into()));
    let overrides = vec![
        FileOverride {
            file: "rules/testing.mdc".into(),
            yaml_overrides,
        },
        FileOverride {
            file: "rules/missing.mdc".into(),
            yaml_overrides: serde_json::Map::new(),
        },
    ];
    let context = AdaptContext::new(bundle.root(), target.root()).with_file_overrides(overrides);

    let report = adapt(IntegrationProfile::Cursor, &context);

    let content = target.read(".cursor/rules/testing.mdc");
    assert!(content.starts_with("---\nid: testing\nalwaysApply: true\ntype: guideline\nlanguage: typescript\n---\n"));
    assert_eq!(report.overrides_applied, vec![".cursor/rules/testing.mdc"]);
}

#[test]
fn test_file_overrides_keep_other_fields_verbatim() {
    let bundle = BundleFixture::new();
    bundle.raw_rule(
        "scoped.md",
        "---\nid: scoped\nglobs: \"src/**/*.ts\"\npriority: 0x0A\nowner: ~\nalwaysApply: false\n---\nBody\n",
    );
    let target = TestTarget::new();
    let mut yaml_overrides = serde_json::Map::new();
    yaml_overrides.insert("alwaysApply".into(), serde_json::Value::Bool(true));
    let context = AdaptContext::new(bundle.root(), target.root()).with_file_overrides(vec![FileOverride {
        file: "rules/scoped.mdc".into(),
        yaml_overrides,
    }]);

    adapt(IntegrationProfile::Cursor, &context);

    assert_eq!(
        target.read(".cursor/rules/scoped.mdc"),
        "---\nid: scoped\nglobs: \"src/**/*.ts\"\npriority: 0x0A\nowner: ~\nalwaysApply: true\n---\nBody\n"
    );
}

#[test]
fn test_md_and_mdc_with_same_stem_are_reported() {
    let bundle = BundleFixture::new();
    bundle
        .rule("a.md", "a-md", false, None, "From md\n")
        .rule("a.mdc", "a-mdc", false, None, "From mdc\n");
    let target = TestTarget::new();

    let report = adapt(IntegrationProfile::Trae, &AdaptContext::new(bundle.root(), target.root()));

    assert_eq!(report.collisions, vec![".trae/rules/a.md"]);
    target.assert_file_contains(".trae/rules/a.md", "From mdc");
}

#[test]
fn test_non_rule_markdown_is_still_copied() {
    let bundle = BundleFixture::standard();
    bundle.raw_rule("notes.md", "Plain notes without metadata\n");
    let target = TestTarget::new();

    adapt(IntegrationProfile::Cursor, &AdaptContext::new(bundle.root(), target.root()));

    assert_eq!(target.read(".cursor/rules/notes.mdc"), "Plain notes without metadata\n");
}

#[test]
fn test_missing_categories_are_skipped() {
    let bundle = BundleFixture::new();
    bundle.rule("only.md", "only", true, None, "Body\n");
    let target = TestTarget::new();

    let report = adapt(IntegrationProfile::Trae, &AdaptContext::new(bundle.root(), target.root()));

    assert_eq!(report.written, vec![".trae/rules/only.md"]);
    target.assert_file_not_exists(".trae/docs");
}

#[test]
fn test_adapt_twice_is_stable() {
    let bundle = BundleFixture::standard();
    let target = TestTarget::new();
    let context = AdaptContext::new(bundle.root(), target.root());

    adapt(IntegrationProfile::Cursor, &context);
    let first = kit_fs::scan_directory(target.root()).unwrap();
    adapt(IntegrationProfile::Cursor, &context);
    let second = kit_fs::scan_directory(target.root()).unwrap();

    assert_eq!(first, second);
}
