//! Where bundles come from
//!
//! A bundle is published on two independently versioned tracks: the prompts
//! (rules, docs, commands) and the system rules (MCP servers). A
//! [`BundleSource`] reports the latest version of each track and fetches a
//! version into a scratch directory, laid out as the adapters expect.

use crate::Result;
use crate::error::Error;
use crate::version::latest_of;
use async_trait::async_trait;
use kit_fs::io;
use kit_tools::bundle::{RULES_KIT_DIR, SYSTEM_RULES_DIR};
use std::path::{Path, PathBuf};

/// A versioned part of a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BundleTrack {
    Prompts,
    SystemRules,
}

impl BundleTrack {
    pub const ALL: [BundleTrack; 2] = [Self::Prompts, Self::SystemRules];

    /// Directory name of the track in a mirror.
    pub fn mirror_dir(self) -> &'static str {
        match self {
            Self::Prompts => "prompts",
            Self::SystemRules => "system-rules",
        }
    }

    /// Directory the track occupies inside a fetched bundle.
    pub fn bundle_dir(self) -> &'static str {
        match self {
            Self::Prompts => RULES_KIT_DIR,
            Self::SystemRules => SYSTEM_RULES_DIR,
        }
    }
}

/// Supplies bundles.
#[async_trait]
pub trait BundleSource: Send + Sync {
    /// Latest published version of `track`, or `None` when the source is
    /// unreachable or has nothing published.
    async fn latest_version(&self, track: BundleTrack) -> Option<String>;

    /// Place `version` of `track` under `dest/<track bundle dir>`.
    async fn fetch_bundle(&self, track: BundleTrack, version: &str, dest: &Path) -> Result<()>;
}

/// Bundle source backed by a local mirror directory:
///
/// ```text
/// <mirror>/prompts/<version>/{rules,docs,commands}/
/// <mirror>/system-rules/<version>/mcp.json
/// ```
#[derive(Debug, Clone)]
pub struct DirectoryBundleSource {
    mirror: PathBuf,
}

impl DirectoryBundleSource {
    pub fn new(mirror: impl Into<PathBuf>) -> Self {
        Self {
            mirror: mirror.into(),
        }
    }

    pub fn mirror(&self) -> &Path {
        &self.mirror
    }

    fn track_dir(&self, track: BundleTrack) -> PathBuf {
        self.mirror.join(track.mirror_dir())
    }
}

#[async_trait]
impl BundleSource for DirectoryBundleSource {
    async fn latest_version(&self, track: BundleTrack) -> Option<String> {
        let dir = self.track_dir(track);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(dir = %dir.display(), error = %e, "Track not available in mirror");
                return None;
            }
        };

        let mut names = Vec::new();
        loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => {
                    let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
                    if is_dir {
                        names.push(entry.file_name().to_string_lossy().into_owned());
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "Failed to list mirror track");
                    return None;
                }
            }
        }

        latest_of(names.iter().map(String::as_str)).map(str::to_string)
    }

    async fn fetch_bundle(&self, track: BundleTrack, version: &str, dest: &Path) -> Result<()> {
        let from = self.track_dir(track).join(version);
        if !tokio::fs::metadata(&from).await.is_ok_and(|m| m.is_dir()) {
            return Err(Error::fetch_failed(format!(
                "{} version {version} not found in {}",
                track.mirror_dir(),
                self.mirror.display()
            )));
        }
        let to = dest.join(track.bundle_dir());
        let copied = io::copy_tree(&from, &to)?;
        tracing::info!(track = track.mirror_dir(), version, files = copied, "Fetched bundle track");
        Ok(())
    }
}
