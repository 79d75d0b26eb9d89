//! [`MirrorFixture`]: versioned bundles the way a directory source expects them.
//!
//! ```text
//! <mirror>/
//!   prompts/<version>/{rules,docs,commands}/...
//!   system-rules/<version>/mcp.json
//! ```

use crate::bundle::BundleFixture;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct MirrorFixture {
    temp_dir: TempDir,
}

impl Default for MirrorFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl MirrorFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Publish the standard bundle as `version` on both tracks.
    pub fn publish(&self, version: &str) -> &Self {
        self.publish_with(version, |bundle| {
            bundle.populate_standard();
        })
    }

    /// Publish a bundle built by `build` as `version` on both tracks.
    ///
    /// Tracks the builder left empty are not published.
    pub fn publish_with(&self, version: &str, build: impl FnOnce(&BundleFixture)) -> &Self {
        let staging = self.root().join(format!(".staging-{version}"));
        let bundle = BundleFixture::at(&staging);
        build(&bundle);

        self.promote(&staging.join("rules-kit"), &self.prompts_dir(version));
        self.promote(&staging.join("system-rules"), &self.system_rules_dir(version));
        fs::remove_dir_all(&staging).unwrap();
        self
    }

    pub fn prompts_dir(&self, version: &str) -> PathBuf {
        self.root().join("prompts").join(version)
    }

    pub fn system_rules_dir(&self, version: &str) -> PathBuf {
        self.root().join("system-rules").join(version)
    }

    fn promote(&self, from: &Path, to: &Path) {
        if !from.is_dir() {
            return;
        }
        if to.exists() {
            fs::remove_dir_all(to).unwrap();
        }
        fs::create_dir_all(to.parent().unwrap()).unwrap();
        fs::rename(from, to)
            .unwrap_or_else(|e| panic!("MirrorFixture: failed to publish {}: {e}", to.display()));
    }
}
