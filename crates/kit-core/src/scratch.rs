//! Scratch directories for fetched bundles

use crate::Result;
use kit_fs::Error as FsError;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tempfile::TempDir;

/// A uniquely named directory under a temp root, removed on drop.
///
/// Names look like `rules-kit-<millis>-<pid>-<random>`.
#[derive(Debug)]
pub struct ScratchDir {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl ScratchDir {
    pub fn create(temp_root: &Path) -> Result<Self> {
        std::fs::create_dir_all(temp_root).map_err(|e| FsError::io(temp_root, e))?;
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let prefix = format!("rules-kit-{millis}-{}-", std::process::id());
        let dir = tempfile::Builder::new()
            .prefix(&prefix)
            .tempdir_in(temp_root)
            .map_err(|e| FsError::io(temp_root, e))?;
        let path = dir.path().to_path_buf();
        tracing::debug!(path = %path.display(), "Created scratch directory");
        Ok(Self {
            dir: Some(dir),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the directory now, reporting failures instead of swallowing
    /// them as drop does.
    pub fn release(mut self) -> Result<()> {
        match self.dir.take() {
            Some(dir) => dir.close().map_err(|e| FsError::io(&self.path, e).into()),
            None => Ok(()),
        }
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if self.dir.take().is_some() {
            tracing::debug!(path = %self.path.display(), "Removed scratch directory");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_removes_directory() {
        let root = TempDir::new().unwrap();
        let scratch = ScratchDir::create(root.path()).unwrap();
        let path = scratch.path().to_path_buf();
        assert!(path.is_dir());
        assert!(
            path.file_name().unwrap().to_string_lossy().starts_with("rules-kit-"),
            "unexpected name {}",
            path.display()
        );

        scratch.release().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn drop_removes_directory() {
        let root = TempDir::new().unwrap();
        let path = {
            let scratch = ScratchDir::create(root.path()).unwrap();
            std::fs::write(scratch.path().join("file"), "x").unwrap();
            scratch.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn names_are_unique() {
        let root = TempDir::new().unwrap();
        let a = ScratchDir::create(root.path()).unwrap();
        let b = ScratchDir::create(root.path()).unwrap();
        assert_ne!(a.path(), b.path());
    }
}
