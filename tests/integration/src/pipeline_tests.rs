//! Bundle to layout pipeline across kit-content, kit-tools and kit-fs.
//!
//! Each test builds a bundle with the fixture, runs an adapter and then
//! inspects the produced tree with the scanner.

use kit_content::classify_rules;
use kit_fs::scan_directory;
use kit_test_utils::{BundleFixture, TestTarget};
use kit_tools::{AdaptContext, IntegrationAdapter, IntegrationProfile, adapter_for};
use pretty_assertions::assert_eq;

fn adapt(profile: IntegrationProfile, bundle: &BundleFixture, target: &TestTarget) {
    let context = AdaptContext::new(bundle.root(), target.root());
    adapter_for(profile).adapt(&context).unwrap();
}

#[test]
fn every_profile_resolves_all_placeholders() {
    let bundle = BundleFixture::standard();
    for profile in IntegrationProfile::ALL {
        let target = TestTarget::new();
        adapt(profile, &bundle, &target);

        let produced = scan_directory(target.root()).unwrap();
        assert!(!produced.is_empty(), "{profile} produced nothing");
        for path in produced.keys() {
            let text = std::fs::read_to_string(target.root().join(path)).unwrap();
            assert!(!text.contains("{{"), "{profile}: unresolved placeholder in {path}");
        }
    }
}

#[test]
fn repeated_adapt_produces_identical_tree() {
    let bundle = BundleFixture::standard();
    for profile in IntegrationProfile::ALL {
        let target = TestTarget::new();
        adapt(profile, &bundle, &target);
        let first = scan_directory(target.root()).unwrap();

        adapt(profile, &bundle, &target);
        let second = scan_directory(target.root()).unwrap();

        assert_eq!(first, second, "{profile} is not stable across runs");
    }
}

#[test]
fn simple_profiles_differ_only_in_layout() {
    let bundle = BundleFixture::standard();
    let cursor = TestTarget::new();
    let trae = TestTarget::new();
    adapt(IntegrationProfile::Cursor, &bundle, &cursor);
    adapt(IntegrationProfile::Trae, &bundle, &trae);

    let cursor_rules: Vec<String> = scan_directory(&cursor.root().join(".cursor/rules"))
        .unwrap()
        .into_keys()
        .collect();
    let trae_rules: Vec<String> = scan_directory(&trae.root().join(".trae/rules"))
        .unwrap()
        .into_keys()
        .collect();

    assert_eq!(cursor_rules, vec!["base.mdc", "code-review.mdc", "testing.mdc"]);
    assert_eq!(trae_rules, vec!["base.md", "code-review.md", "testing.md"]);
    cursor.assert_file_contains(".cursor/docs/guide.md", "Rules live in .cursor/rules.");
    trae.assert_file_contains(".trae/docs/guide.md", "Rules live in .trae/rules.");
}

#[test]
fn skill_without_description_gets_generated_one() {
    let bundle = BundleFixture::standard();
    let classified = classify_rules(&bundle.root().join("rules-kit/rules")).unwrap();

    let review = classified
        .skills
        .iter()
        .find(|doc| doc.meta.id == "Code Review")
        .unwrap();
    assert_eq!(review.meta.description.as_deref(), Some("AI skill for Code Review"));

    let target = TestTarget::new();
    adapt(IntegrationProfile::ClaudeCode, &bundle, &target);
    target.assert_file_contains(
        ".claude/skills/code-review/SKILL.md",
        "description: AI skill for Code Review",
    );
}

#[test]
fn always_apply_rules_land_in_entry_point_only() {
    let bundle = BundleFixture::standard();
    let target = TestTarget::new();
    adapt(IntegrationProfile::ClaudeCode, &bundle, &target);

    target.assert_file_contains("CLAUDE.md", "Read .claude/docs/guide.md before editing.");
    target.assert_file_not_exists(".claude/skills/base/SKILL.md");
    target.assert_file_exists(".claude/skills/testing/SKILL.md");
}

#[test]
fn claude_settings_receive_bundle_servers() {
    let bundle = BundleFixture::standard();
    let target = TestTarget::new();
    target.write(
        ".claude/settings.json",
        r#"{"permissions": {"allow": ["Bash(cargo test)"]}}"#,
    );

    adapt(IntegrationProfile::ClaudeCode, &bundle, &target);

    let settings: serde_json::Value =
        serde_json::from_str(&target.read(".claude/settings.json")).unwrap();
    assert_eq!(settings["permissions"]["allow"][0], "Bash(cargo test)");
    assert_eq!(settings["mcpServers"]["filesystem"]["command"], "npx");
}
