//! Turning command-line locations into an orchestrator
//!
//! This is the only place that reads the process environment (current
//! directory, executable path, temp dir). Everything below receives explicit
//! paths.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use kit_core::{DirectoryBundleSource, FixedPrompter, OperationContext, Orchestrator, Prompter};

use crate::cli::Location;
use crate::error::{CliError, Result};
use crate::interactive::DialoguerPrompter;

/// Mirror directory looked up inside the bundle dir when `--mirror` is absent.
const DEFAULT_MIRROR_DIR: &str = "mirror";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub target: PathBuf,
    pub bundle_dir: PathBuf,
    pub mirror: PathBuf,
}

impl ResolvedLocation {
    pub fn resolve(location: &Location) -> Result<Self> {
        let target = match &location.target {
            Some(target) => absolutize(target)?,
            None => std::env::current_dir()?,
        };
        let bundle_dir = match &location.bundle_dir {
            Some(dir) => absolutize(dir)?,
            None => executable_dir()?,
        };
        let mirror = match &location.mirror {
            Some(mirror) => absolutize(mirror)?,
            None => bundle_dir.join(DEFAULT_MIRROR_DIR),
        };
        Ok(Self {
            target,
            bundle_dir,
            mirror,
        })
    }

    pub fn operation_context(&self) -> OperationContext {
        OperationContext {
            package_dir: self.bundle_dir.clone(),
            target_dir: self.target.clone(),
            cli_version: env!("CARGO_PKG_VERSION").to_string(),
            temp_root: std::env::temp_dir(),
        }
    }
}

/// Build the orchestrator for a command. `--yes` swaps the terminal prompts
/// for blanket confirmation.
pub fn orchestrator(location: &Location) -> Result<Orchestrator> {
    let resolved = ResolvedLocation::resolve(location)?;
    tracing::debug!(
        target_dir = %resolved.target.display(),
        bundle_dir = %resolved.bundle_dir.display(),
        mirror = %resolved.mirror.display(),
        "Resolved locations"
    );

    let prompter: Arc<dyn Prompter> = if location.yes {
        Arc::new(FixedPrompter::accept())
    } else {
        Arc::new(DialoguerPrompter)
    };
    Ok(Orchestrator::new(
        resolved.operation_context(),
        Arc::new(DirectoryBundleSource::new(resolved.mirror)),
        prompter,
    ))
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| CliError::user("Cannot determine the executable directory; pass --bundle-dir"))
}
