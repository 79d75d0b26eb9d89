//! Orchestrator implementation
//!
//! Every operation follows the same shape: validate the context, read the
//! sync record, ask the source for versions, fetch into a scratch directory,
//! run the profile's adapter, write the record. The scratch directory is
//! released on every exit path.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use kit_fs::io;
use kit_tools::bundle::is_bundle;
use kit_tools::{AdaptContext, AdaptReport, EntryPointMode, IntegrationAdapter, IntegrationProfile, adapter_for};

use super::report::{InstallOutcome, ProfileUpdate, ResetOutcome, UpdateOutcome};
use crate::config::{ConfigStore, SyncRecord};
use crate::diff::compute_diff;
use crate::error::Error;
use crate::prompt::Prompter;
use crate::scratch::ScratchDir;
use crate::source::{BundleSource, BundleTrack};
use crate::version::{CalVer, VersionStatus, version_status};
use crate::Result;

const CONFIRM_LOCAL: &str = "Could not reach the rules source. Continue with the local bundle?";
const SELECT_RESET: &str = "Which integration should be reset?";
const CHOICE_ALL: &str = "All";
const CHOICE_CANCEL: &str = "Cancel";

/// Explicit inputs of every operation. Nothing is read from the process
/// environment.
#[derive(Debug, Clone)]
pub struct OperationContext {
    /// Directory of the installed tool; may hold a local bundle used when the
    /// source is unreachable.
    pub package_dir: PathBuf,
    /// Project directory receiving the layouts.
    pub target_dir: PathBuf,
    /// Version stamped into sync records.
    pub cli_version: String,
    /// Parent of scratch directories.
    pub temp_root: PathBuf,
}

impl OperationContext {
    fn validate(&self) -> Result<()> {
        if self.package_dir.as_os_str().is_empty() {
            return Err(Error::Validation("packageDir is required".into()));
        }
        if self.target_dir.as_os_str().is_empty() {
            return Err(Error::Validation("targetDir is required".into()));
        }
        Ok(())
    }
}

/// Latest versions reported by the source.
#[derive(Debug, Clone)]
struct Latest {
    prompts: String,
    system_rules: Option<String>,
}

/// Coordinates the bundle source, the adapters and the config store.
pub struct Orchestrator {
    context: OperationContext,
    source: Arc<dyn BundleSource>,
    prompter: Arc<dyn Prompter>,
    store: ConfigStore,
}

impl Orchestrator {
    pub fn new(
        context: OperationContext,
        source: Arc<dyn BundleSource>,
        prompter: Arc<dyn Prompter>,
    ) -> Self {
        let store = ConfigStore::new(&context.target_dir);
        Self {
            context,
            source,
            prompter,
            store,
        }
    }

    pub fn context(&self) -> &OperationContext {
        &self.context
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Initialized profiles with their records.
    pub fn status(&self) -> Result<Vec<(IntegrationProfile, SyncRecord)>> {
        self.context.validate()?;
        Ok(IntegrationProfile::ALL
            .into_iter()
            .filter_map(|profile| self.store.peek(profile).map(|record| (profile, record)))
            .collect())
    }

    /// First install of `profile`.
    ///
    /// # Errors
    ///
    /// `AlreadyInitialized` if a record exists, `FetchFailed` if the source
    /// has no version to offer.
    pub async fn init(&self, profile: IntegrationProfile) -> Result<InstallOutcome> {
        self.context.validate()?;
        if let Some(record) = self.store.read(profile) {
            return Err(Error::AlreadyInitialized {
                version: record.prompts_version,
            });
        }

        let latest = self.require_latest().await?;
        let scratch = self.fetch(&latest).await?;
        let result = self.install(profile, scratch.path(), &latest, None);
        let released = scratch.release();
        let outcome = result?;
        released?;

        tracing::info!(%profile, version = %outcome.prompts_version, "Initialized rules");
        Ok(outcome)
    }

    /// Bring `profile` to the latest version.
    pub async fn update(&self, profile: IntegrationProfile) -> Result<UpdateOutcome> {
        self.context.validate()?;
        let record = self.store.read(profile).ok_or(Error::NotInitialized)?;
        let mut updates = self.sync_profiles(vec![(profile, record)]).await?;
        updates
            .pop()
            .map(|update| update.outcome)
            .ok_or(Error::NotInitialized)
    }

    /// Update every initialized profile from one shared bundle.
    pub async fn upgrade_all(&self) -> Result<Vec<ProfileUpdate>> {
        self.context.validate()?;
        let installed: Vec<_> = IntegrationProfile::ALL
            .into_iter()
            .filter_map(|profile| self.store.read(profile).map(|record| (profile, record)))
            .collect();
        if installed.is_empty() {
            return Err(Error::NotInitialized);
        }
        tracing::info!(
            profiles = ?installed.iter().map(|(p, _)| p.slug()).collect::<Vec<_>>(),
            "Upgrading initialized integrations"
        );
        self.sync_profiles(installed).await
    }

    /// Remove the profile's generated files and install the latest bundle
    /// from scratch, keeping the record's lists and install date.
    pub async fn replace_all(&self, profile: IntegrationProfile) -> Result<InstallOutcome> {
        self.context.validate()?;
        let existing = self.store.read(profile);
        let latest = self.require_latest().await?;
        let scratch = self.fetch(&latest).await?;

        let result = self
            .remove_owned(&*adapter_for(profile))
            .and_then(|_| self.install(profile, scratch.path(), &latest, existing));
        let released = scratch.release();
        let outcome = result?;
        released?;

        tracing::info!(%profile, version = %outcome.prompts_version, "Replaced all rules");
        Ok(outcome)
    }

    /// Interactively reset one or all initialized profiles.
    pub async fn reset(&self) -> Result<ResetOutcome> {
        self.context.validate()?;
        let initialized = self.store.initialized_profiles();
        let selected = match initialized.as_slice() {
            [] => {
                tracing::info!("No initialized integrations found, nothing to reset");
                return Ok(ResetOutcome::NothingInitialized);
            }
            [only] => vec![*only],
            many => {
                let mut choices: Vec<String> = many.iter().map(|p| p.display_name().to_string()).collect();
                choices.push(CHOICE_ALL.to_string());
                choices.push(CHOICE_CANCEL.to_string());
                match self.prompter.select(SELECT_RESET, &choices).await {
                    Some(i) if i < many.len() => vec![many[i]],
                    Some(i) if i == many.len() => many.to_vec(),
                    _ => return Ok(ResetOutcome::Cancelled),
                }
            }
        };

        let question = match selected.as_slice() {
            [one] => format!("Reset rules and configuration for {}?", one.display_name()),
            all => format!("Reset rules and configuration for {} integrations?", all.len()),
        };
        if !self.prompter.confirm(&question).await {
            tracing::info!("Reset cancelled");
            return Ok(ResetOutcome::Cancelled);
        }

        for &profile in &selected {
            self.reset_one(profile)?;
        }
        Ok(ResetOutcome::Reset(selected))
    }

    /// Reset `profile` without asking.
    pub async fn reset_profile(&self, profile: IntegrationProfile) -> Result<ResetOutcome> {
        self.context.validate()?;
        if self.store.peek(profile).is_none() {
            tracing::info!(%profile, "Integration not initialized, nothing to reset");
            return Ok(ResetOutcome::NothingInitialized);
        }
        self.reset_one(profile)?;
        Ok(ResetOutcome::Reset(vec![profile]))
    }

    async fn require_latest(&self) -> Result<Latest> {
        self.latest()
            .await
            .ok_or_else(|| Error::fetch_failed("no published prompts version available"))
    }

    async fn latest(&self) -> Option<Latest> {
        let prompts = self.source.latest_version(BundleTrack::Prompts).await?;
        if !CalVer::is_valid(&prompts) {
            tracing::warn!(version = %prompts, "Source reported a malformed version");
            return None;
        }
        let system_rules = self
            .source
            .latest_version(BundleTrack::SystemRules)
            .await
            .filter(|v| CalVer::is_valid(v));
        Some(Latest {
            prompts,
            system_rules,
        })
    }

    /// Fetch both tracks into a fresh scratch directory.
    async fn fetch(&self, latest: &Latest) -> Result<ScratchDir> {
        let scratch = ScratchDir::create(&self.context.temp_root)?;
        self.source
            .fetch_bundle(BundleTrack::Prompts, &latest.prompts, scratch.path())
            .await?;
        if let Some(system) = &latest.system_rules {
            self.source
                .fetch_bundle(BundleTrack::SystemRules, system, scratch.path())
                .await?;
        }
        Ok(scratch)
    }

    /// Adapt a fetched bundle and write a record reflecting it.
    fn install(
        &self,
        profile: IntegrationProfile,
        bundle_root: &Path,
        latest: &Latest,
        existing: Option<SyncRecord>,
    ) -> Result<InstallOutcome> {
        let now = Utc::now();
        let record = match existing {
            Some(mut record) => {
                record.prompts_version = latest.prompts.clone();
                if latest.system_rules.is_some() {
                    record.system_rules_version = latest.system_rules.clone();
                }
                record.cli_version = self.context.cli_version.clone();
                record.touch(now);
                record
            }
            None => SyncRecord::new(
                profile,
                &self.context.cli_version,
                &latest.prompts,
                latest.system_rules.clone(),
                now,
            ),
        };

        let adapt = self.adapt(&*adapter_for(profile), bundle_root, &record)?;
        self.store.write(profile, &record)?;
        Ok(InstallOutcome {
            profile,
            prompts_version: record.prompts_version,
            system_rules_version: record.system_rules_version,
            adapt,
        })
    }

    fn adapt(
        &self,
        adapter: &dyn IntegrationAdapter,
        bundle_root: &Path,
        record: &SyncRecord,
    ) -> Result<AdaptReport> {
        let target = &self.context.target_dir;
        let entry_mode = match adapter.entry_point() {
            Some(entry) if target.join(entry).exists() => EntryPointMode::UpdateInPlace,
            _ => EntryPointMode::Fresh,
        };
        let context = AdaptContext::new(bundle_root, target)
            .with_ignore_list(&record.ignore_list)
            .with_file_overrides(record.file_overrides.clone())
            .with_entry_mode(entry_mode);
        Ok(adapter.adapt(&context)?)
    }

    /// Update the given profiles, fetching the bundle at most once.
    async fn sync_profiles(
        &self,
        installed: Vec<(IntegrationProfile, SyncRecord)>,
    ) -> Result<Vec<ProfileUpdate>> {
        let Some(latest) = self.latest().await else {
            return self.continue_locally(installed).await;
        };

        let latest_version = CalVer::parse(&latest.prompts)?;
        let mut updates = Vec::with_capacity(installed.len());
        let mut behind = Vec::new();
        for (profile, mut record) in installed {
            let installed_version = CalVer::parse(&record.prompts_version)?;
            match version_status(&installed_version, &latest_version) {
                VersionStatus::UpToDate => {
                    let refreshed = record.cli_version != self.context.cli_version;
                    if refreshed {
                        record.cli_version = self.context.cli_version.clone();
                        record.touch(Utc::now());
                        self.store.write(profile, &record)?;
                    }
                    tracing::info!(%profile, version = %record.prompts_version, "Already up to date");
                    updates.push(ProfileUpdate {
                        profile,
                        outcome: UpdateOutcome::UpToDate {
                            version: record.prompts_version,
                            cli_version_refreshed: refreshed,
                        },
                    });
                }
                VersionStatus::Ahead => {
                    tracing::warn!(
                        %profile,
                        installed = %record.prompts_version,
                        latest = %latest.prompts,
                        "Installed version is newer than the source, leaving it alone"
                    );
                    updates.push(ProfileUpdate {
                        profile,
                        outcome: UpdateOutcome::LocalNewer {
                            installed: record.prompts_version,
                            latest: latest.prompts.clone(),
                        },
                    });
                }
                VersionStatus::Behind(change) => {
                    tracing::debug!(%profile, ?change, "Update available");
                    behind.push((profile, record));
                }
            }
        }

        if !behind.is_empty() {
            let scratch = self.fetch(&latest).await?;
            let result: Result<Vec<ProfileUpdate>> = behind
                .into_iter()
                .map(|(profile, record)| self.apply_update(profile, record, scratch.path(), &latest))
                .collect();
            let released = scratch.release();
            updates.extend(result?);
            released?;
        }

        updates.sort_by_key(|u| u.profile);
        Ok(updates)
    }

    fn apply_update(
        &self,
        profile: IntegrationProfile,
        mut record: SyncRecord,
        bundle_root: &Path,
        latest: &Latest,
    ) -> Result<ProfileUpdate> {
        let adapter = adapter_for(profile);
        let diff = compute_diff(bundle_root, &self.context.target_dir, &adapter.mirrored_categories())?;
        tracing::info!(
            %profile,
            add = diff.to_add.len(),
            update = diff.to_update.len(),
            delete = diff.to_delete.len(),
            "Changes in new bundle"
        );

        let adapt = self.adapt(&*adapter, bundle_root, &record)?;

        let from = std::mem::replace(&mut record.prompts_version, latest.prompts.clone());
        if let Some(system) = &latest.system_rules
            && record.system_rules_version.as_ref() != Some(system)
        {
            record.system_rules_version = Some(system.clone());
        }
        record.cli_version = self.context.cli_version.clone();
        record.touch(Utc::now());
        self.store.write(profile, &record)?;

        tracing::info!(%profile, %from, to = %latest.prompts, "Updated rules");
        Ok(ProfileUpdate {
            profile,
            outcome: UpdateOutcome::Updated {
                from,
                to: latest.prompts.clone(),
                diff,
                adapt,
            },
        })
    }

    /// The source is unreachable: ask whether to carry on with the local
    /// bundle in `package_dir`.
    async fn continue_locally(
        &self,
        installed: Vec<(IntegrationProfile, SyncRecord)>,
    ) -> Result<Vec<ProfileUpdate>> {
        tracing::warn!("Rules source unavailable");
        if !self.prompter.confirm(CONFIRM_LOCAL).await {
            return Err(Error::fetch_failed(
                "rules source unavailable and local update declined",
            ));
        }

        let local = &self.context.package_dir;
        let has_local = is_bundle(local);
        if !has_local {
            tracing::warn!(dir = %local.display(), "No local bundle found, nothing re-applied");
        }

        let mut updates = Vec::with_capacity(installed.len());
        for (profile, record) in installed {
            let adapt = if has_local {
                Some(self.adapt(&*adapter_for(profile), local, &record)?)
            } else {
                None
            };
            updates.push(ProfileUpdate {
                profile,
                outcome: UpdateOutcome::Local { adapt },
            });
        }
        Ok(updates)
    }

    fn remove_owned(&self, adapter: &dyn IntegrationAdapter) -> Result<()> {
        for path in adapter.owned_paths() {
            if io::remove_path(&self.context.target_dir.join(&path))? {
                tracing::debug!(%path, "Removed generated path");
            }
        }
        Ok(())
    }

    fn reset_one(&self, profile: IntegrationProfile) -> Result<()> {
        let adapter = adapter_for(profile);
        self.remove_owned(&*adapter)?;
        self.store.delete(profile)?;
        io::remove_dir_if_empty(&self.context.target_dir.join(adapter.layout_root()))?;
        tracing::info!(%profile, "Reset rules and configuration");
        Ok(())
    }
}
