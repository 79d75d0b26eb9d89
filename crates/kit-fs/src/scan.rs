//! Content-addressed directory scanning
//!
//! A scan maps every regular file under a root to its checksum, keyed by the
//! forward-slash path relative to that root. Two scans are equal exactly when
//! the trees hold the same files with the same bytes.

use crate::checksum::compute_file_checksum;
use crate::path::relative_slash;
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Relative path → `sha256:<hex>` checksum, ordered by path.
pub type FileHashes = BTreeMap<String, String>;

/// Hash every regular file under `root`.
///
/// A root that does not exist yields an empty map. Any other failure (an
/// unreadable subdirectory, a root that is a plain file) is returned as an
/// error carrying the path that failed.
pub fn scan_directory(root: &Path) -> Result<FileHashes> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(Error::io(
                root,
                std::io::Error::new(std::io::ErrorKind::NotADirectory, "scan root is not a directory"),
            ));
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(root = %root.display(), "Scan root missing, treating as empty");
            return Ok(FileHashes::new());
        }
        Err(e) => return Err(Error::io(root, e)),
    }

    let mut hashes = FileHashes::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|e| walk_error(root, e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(relative) = relative_slash(root, entry.path()) else {
            continue;
        };
        let checksum = compute_file_checksum(entry.path())?;
        hashes.insert(relative, checksum);
    }

    tracing::debug!(root = %root.display(), files = hashes.len(), "Scanned directory");
    Ok(hashes)
}

pub(crate) fn walk_error(root: &Path, err: walkdir::Error) -> Error {
    let path = err.path().unwrap_or(root).to_path_buf();
    let message = err.to_string();
    match err.into_io_error() {
        Some(source) => Error::Io { path, source },
        None => Error::Walk { path, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        let hashes = scan_directory(&temp.path().join("absent")).unwrap();
        assert!(hashes.is_empty());
    }

    #[test]
    fn directories_contribute_no_entries() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("empty/deeper")).unwrap();
        assert!(scan_directory(temp.path()).unwrap().is_empty());
    }

    #[test]
    fn nested_files_use_forward_slash_keys() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("sub/inner")).unwrap();
        fs::write(temp.path().join("top.md"), "top").unwrap();
        fs::write(temp.path().join("sub/inner/leaf.md"), "leaf").unwrap();

        let keys: Vec<_> = scan_directory(temp.path()).unwrap().into_keys().collect();
        assert_eq!(keys, vec!["sub/inner/leaf.md".to_string(), "top.md".to_string()]);
    }

    #[test]
    fn file_root_is_an_error() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.md");
        fs::write(&file, "x").unwrap();
        let err = scan_directory(&file).unwrap_err();
        assert!(err.to_string().contains("file.md"));
    }
}
