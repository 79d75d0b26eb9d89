//! Integration tests for the Claude Code adapter.

use kit_blocks::find_region;
use kit_test_utils::{BundleFixture, TestTarget};
use kit_tools::claude::entry::{ENTRY_FILE, MARKERS};
use kit_tools::{AdaptContext, ClaudeAdapter, EntryPointMode, IntegrationAdapter};
use pretty_assertions::assert_eq;
use serde_json::json;

fn adapt(context: &AdaptContext) -> kit_tools::AdaptReport {
    ClaudeAdapter::new().adapt(context).unwrap()
}

#[test]
fn test_fresh_entry_point_inlines_always_apply_rules() {
    let bundle = BundleFixture::standard();
    let target = TestTarget::new();

    adapt(&AdaptContext::new(bundle.root(), target.root()));

    let content = target.read(ENTRY_FILE);
    assert!(content.starts_with("# Project Instructions\n"));
    let region = find_region(&content, MARKERS).expect("managed region");
    assert!(region.inner.contains("AUTO-GENERATED"));
    assert!(region.inner.contains("## base\n\n# Base\n\nRead .claude/docs/guide.md before editing."));
    assert!(!region.inner.contains("id: base"), "metadata leaked into entry point");
    assert!(!region.inner.contains("# Testing"), "skill rule inlined");
    assert!(region.inner.contains("# Claude Code Docs Catalog"));
}

#[test]
fn test_skill_packages_carry_name_and_description_only() {
    let bundle = BundleFixture::standard();
    let target = TestTarget::new();

    let report = adapt(&AdaptContext::new(bundle.root(), target.root()));

    assert_eq!(
        target.read(".claude/skills/testing/SKILL.md"),
        "---\nname: testing\ndescription: How to write tests\n---\n# Testing\n\nPut tests next to the code in .claude.\n"
    );
    target.assert_file_contains(".claude/skills/code-review/SKILL.md", "description: AI skill for Code Review\n");
    target.assert_file_not_exists(".claude/skills/base");
    assert!(report.written.contains(&".claude/skills/code-review/SKILL.md".to_string()));
}

#[test]
fn test_catalog_is_converted_to_docs_catalog() {
    let bundle = BundleFixture::standard();
    let target = TestTarget::new();

    adapt(&AdaptContext::new(bundle.root(), target.root()));

    target.assert_file_not_exists(".claude/docs/rules-catalog.md");
    let catalog = target.read(".claude/docs/docs-catalog.md");
    assert!(catalog.starts_with("# Claude Code Docs Catalog\n"));
    assert!(catalog.contains("- .claude/docs/docs-catalog.md (current file)"));
    assert!(catalog.contains("### Claude Code Docs Files\n- .claude/docs/guide.md"));
    assert!(!catalog.contains("Rules Files"));
    assert!(!catalog.contains("Commands Files"));
}

#[test]
fn test_user_edited_docs_and_commands_are_preserved() {
    let bundle = BundleFixture::standard();
    let target = TestTarget::new();
    target.write(".claude/docs/guide.md", "my guide");
    target.write(".claude/commands/review.md", "my review");

    let report = adapt(&AdaptContext::new(bundle.root(), target.root()));

    assert_eq!(target.read(".claude/docs/guide.md"), "my guide");
    assert_eq!(target.read(".claude/commands/review.md"), "my review");
    assert_eq!(
        report.preserved,
        vec![".claude/commands/review.md", ".claude/docs/guide.md"]
    );
}

#[test]
fn test_in_place_update_keeps_user_text_and_is_idempotent() {
    let bundle = BundleFixture::standard();
    let target = TestTarget::new();
    target.write(ENTRY_FILE, "# My project\n\nHand-written notes.\n");
    let context = AdaptContext::new(bundle.root(), target.root())
        .with_entry_mode(EntryPointMode::UpdateInPlace);

    adapt(&context);
    let first = target.read(ENTRY_FILE);
    assert!(first.starts_with("# My project\n\nHand-written notes.\n\n<!-- CLAUDE-RULES-START -->"));
    assert!(first.ends_with("<!-- CLAUDE-RULES-END -->\n"));

    adapt(&context);
    assert_eq!(target.read(ENTRY_FILE), first);
}

#[test]
fn test_in_place_update_replaces_only_managed_region() {
    let bundle = BundleFixture::standard();
    let target = TestTarget::new();
    target.write(
        ENTRY_FILE,
        "Intro\n<!-- CLAUDE-RULES-START -->\nold rules\n<!-- CLAUDE-RULES-END -->\nOutro\n",
    );
    let context = AdaptContext::new(bundle.root(), target.root())
        .with_entry_mode(EntryPointMode::UpdateInPlace);

    adapt(&context);

    let content = target.read(ENTRY_FILE);
    assert!(content.starts_with("Intro\n<!-- CLAUDE-RULES-START -->\n"));
    assert!(content.ends_with("<!-- CLAUDE-RULES-END -->\nOutro\n"));
    assert!(!content.contains("old rules"));
    assert!(content.contains("## base"));
}

#[test]
fn test_settings_merge_keeps_existing_keys() {
    let bundle = BundleFixture::standard();
    let target = TestTarget::new();
    target.write(
        ".claude/settings.json",
        r#"{"permissions": {"allow": ["Bash"]}, "mcpServers": {"local": {"command": "x"}}}"#,
    );

    adapt(&AdaptContext::new(bundle.root(), target.root()));

    let settings: serde_json::Value =
        serde_json::from_str(&target.read(".claude/settings.json")).unwrap();
    assert_eq!(settings["permissions"], json!({"allow": ["Bash"]}));
    assert_eq!(settings["mcpServers"]["local"], json!({"command": "x"}));
    assert_eq!(settings["mcpServers"]["filesystem"]["command"], json!("npx"));
}

#[test]
fn test_corrupt_settings_are_replaced() {
    let bundle = BundleFixture::standard();
    let target = TestTarget::new();
    target.write(".claude/settings.json", "{ not json");

    adapt(&AdaptContext::new(bundle.root(), target.root()));

    let settings: serde_json::Value =
        serde_json::from_str(&target.read(".claude/settings.json")).unwrap();
    assert!(settings["mcpServers"]["filesystem"].is_object());
}

#[test]
fn test_ignore_list_applies_to_rules_and_commands() {
    let bundle = BundleFixture::standard();
    let target = TestTarget::new();
    let context = AdaptContext::new(bundle.root(), target.root())
        .with_ignore_list(&["rules/testing.md", "commands/*"]);

    let report = adapt(&context);

    target.assert_file_not_exists(".claude/skills/testing");
    target.assert_file_exists(".claude/skills/code-review/SKILL.md");
    target.assert_file_not_exists(".claude/commands/review.md");
    assert_eq!(
        report.ignored,
        vec![".claude/commands/review.md", ".claude/rules/testing.md"]
    );
}

#[test]
fn test_bundle_without_rules_generates_nothing() {
    let bundle = BundleFixture::new();
    bundle.doc("guide.md", "guide");
    let target = TestTarget::new();

    let report = adapt(&AdaptContext::new(bundle.root(), target.root()));

    assert_eq!(report, kit_tools::AdaptReport::default());
    assert!(target.is_empty());
}

#[test]
fn test_reset_paths_cover_settings() {
    let adapter = ClaudeAdapter::new();
    assert!(adapter.reset_paths().contains(&".claude/settings.json".to_string()));
    assert!(!adapter.owned_paths().contains(&".claude/settings.json".to_string()));
}
