//! [`TestTarget`]: a project directory receiving a layout.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// An empty temporary project directory with assertion helpers.
pub struct TestTarget {
    temp_dir: TempDir,
}

impl Default for TestTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTarget {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` at `path` (relative to the root), creating parents.
    pub fn write(&self, path: &str, content: &str) {
        let file = self.root().join(path);
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(&file, content).unwrap();
    }

    /// Contents of `path` (relative to the root). Panics when unreadable.
    pub fn read(&self, path: &str) -> String {
        match fs::read_to_string(self.root().join(path)) {
            Ok(text) => text,
            Err(e) => panic!("{path} is not readable in the target: {e}"),
        }
    }

    /// Passes for files and directories alike.
    pub fn assert_file_exists(&self, path: &str) {
        assert!(self.root().join(path).exists(), "{path} missing from the target");
    }

    pub fn assert_file_not_exists(&self, path: &str) {
        assert!(!self.root().join(path).exists(), "{path} should not be in the target");
    }

    pub fn assert_file_contains(&self, path: &str, needle: &str) {
        let text = self.read(path);
        assert!(text.contains(needle), "{path} lacks {needle:?}; it reads:\n{text}");
    }

    /// Whether the root directory has no entries at all.
    pub fn is_empty(&self) -> bool {
        fs::read_dir(self.root()).unwrap().next().is_none()
    }
}
