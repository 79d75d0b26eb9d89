//! Full install lifecycle of several integrations sharing one project.
//!
//! Drives the orchestrator against a directory mirror, edits the persisted
//! sync records the way a user would, and checks the next update honors them.

use std::sync::Arc;

use kit_core::{
    ConfigStore, DirectoryBundleSource, FixedPrompter, OperationContext, Orchestrator,
    ResetOutcome, UpdateOutcome,
};
use kit_fs::scan_directory;
use kit_test_utils::{MirrorFixture, TestTarget};
use kit_tools::{FileOverride, IntegrationProfile};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

struct Project {
    mirror: MirrorFixture,
    target: TestTarget,
    package: TempDir,
    temp_root: TempDir,
}

impl Project {
    fn new() -> Self {
        Self {
            mirror: MirrorFixture::new(),
            target: TestTarget::new(),
            package: TempDir::new().unwrap(),
            temp_root: TempDir::new().unwrap(),
        }
    }

    fn orchestrator(&self) -> Orchestrator {
        let context = OperationContext {
            package_dir: self.package.path().to_path_buf(),
            target_dir: self.target.root().to_path_buf(),
            cli_version: "1.4.0".to_string(),
            temp_root: self.temp_root.path().to_path_buf(),
        };
        Orchestrator::new(
            context,
            Arc::new(DirectoryBundleSource::new(self.mirror.root())),
            Arc::new(FixedPrompter::accept()),
        )
    }

    fn store(&self) -> ConfigStore {
        ConfigStore::new(self.target.root())
    }

    fn scratch_dirs_left(&self) -> usize {
        std::fs::read_dir(self.temp_root.path()).unwrap().count()
    }
}

#[tokio::test]
async fn three_integrations_install_update_and_reset() {
    let project = Project::new();
    project.mirror.publish("2025.11.9.1");
    let orchestrator = project.orchestrator();

    for profile in IntegrationProfile::ALL {
        let outcome = orchestrator.init(profile).await.unwrap();
        assert_eq!(outcome.prompts_version, "2025.11.9.1");
    }
    assert_eq!(project.store().initialized_profiles(), IntegrationProfile::ALL.to_vec());
    assert_eq!(project.scratch_dirs_left(), 0);

    project.mirror.publish("2025.12.1.1");
    let updates = orchestrator.upgrade_all().await.unwrap();
    assert_eq!(updates.len(), 3);
    for update in &updates {
        assert!(
            matches!(&update.outcome, UpdateOutcome::Updated { to, .. } if to == "2025.12.1.1"),
            "{:?}",
            update
        );
    }
    assert_eq!(project.scratch_dirs_left(), 0);

    for profile in IntegrationProfile::ALL {
        let reset = orchestrator.reset_profile(profile).await.unwrap();
        assert_eq!(reset, ResetOutcome::Reset(vec![profile]));
    }
    assert!(project.store().initialized_profiles().is_empty());
    project.target.assert_file_not_exists(".cursor");
    project.target.assert_file_not_exists(".trae");
    project.target.assert_file_not_exists(".claude/rules-config.json");
}

#[tokio::test]
async fn user_edited_record_steers_the_next_update() {
    let project = Project::new();
    project.mirror.publish("2025.11.9.1");
    let orchestrator = project.orchestrator();
    orchestrator.init(IntegrationProfile::Cursor).await.unwrap();
    project.target.assert_file_exists(".cursor/rules/testing.mdc");

    let store = project.store();
    let mut record = store.read(IntegrationProfile::Cursor).unwrap();
    record.ignore_list = vec!["rules/testing.mdc".to_string(), "docs/**".to_string()];
    let mut overrides = serde_json::Map::new();
    overrides.insert("alwaysApply".to_string(), serde_json::json!(true));
    record.file_overrides = vec![FileOverride {
        file: "rules/code-review.mdc".to_string(),
        yaml_overrides: overrides,
    }];
    store.write(IntegrationProfile::Cursor, &record).unwrap();

    project.mirror.publish("2025.11.10.1");
    std::fs::remove_dir_all(project.target.root().join(".cursor/rules")).unwrap();
    std::fs::remove_dir_all(project.target.root().join(".cursor/docs")).unwrap();
    orchestrator.update(IntegrationProfile::Cursor).await.unwrap();

    project.target.assert_file_exists(".cursor/rules/base.mdc");
    project.target.assert_file_not_exists(".cursor/rules/testing.mdc");
    project.target.assert_file_not_exists(".cursor/docs");
    project
        .target
        .assert_file_contains(".cursor/rules/code-review.mdc", "alwaysApply: true");

    let updated = store.read(IntegrationProfile::Cursor).unwrap();
    assert_eq!(updated.prompts_version, "2025.11.10.1");
    assert_eq!(updated.ignore_list, record.ignore_list);
    assert_eq!(updated.file_overrides, record.file_overrides);
}

#[tokio::test]
async fn replace_all_converges_with_a_fresh_install() {
    let fresh = Project::new();
    fresh.mirror.publish("2025.11.9.1");
    fresh.orchestrator().init(IntegrationProfile::Trae).await.unwrap();

    let replaced = Project::new();
    replaced.mirror.publish("2025.11.9.1");
    let orchestrator = replaced.orchestrator();
    orchestrator.init(IntegrationProfile::Trae).await.unwrap();
    replaced.target.write(".trae/rules/obsolete.md", "left over from an older bundle\n");
    orchestrator.replace_all(IntegrationProfile::Trae).await.unwrap();

    let without_record = |project: &Project| {
        let mut hashes = scan_directory(project.target.root()).unwrap();
        hashes.remove(".trae/rules-config.json");
        hashes
    };
    assert_eq!(without_record(&replaced), without_record(&fresh));
}

#[tokio::test]
async fn corrupt_record_counts_as_uninitialized() {
    let project = Project::new();
    project.mirror.publish("2025.11.9.1");
    project.target.write(".trae/rules-config.json", "{ not json");

    let orchestrator = project.orchestrator();
    let outcome = orchestrator.init(IntegrationProfile::Trae).await.unwrap();

    assert_eq!(outcome.prompts_version, "2025.11.9.1");
    assert!(project.store().read(IntegrationProfile::Trae).is_some());
}
