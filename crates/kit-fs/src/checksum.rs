//! SHA-256 checksum utilities
//!
//! One canonical checksum format (`sha256:<hex>`) is used for every scanned
//! file so that two trees can be compared by value.

use crate::{Error, Result};
use sha2::{Digest, Sha256};
use std::path::Path;

const PREFIX: &str = "sha256:";

/// Compute the checksum of a byte slice.
pub fn compute_bytes_checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{}{:x}", PREFIX, hasher.finalize())
}

/// Compute the checksum of string content.
pub fn compute_content_checksum(content: &str) -> String {
    compute_bytes_checksum(content.as_bytes())
}

/// Compute the checksum of a file's full contents.
///
/// # Errors
///
/// Returns [`Error::Io`] carrying `path` if the file cannot be read.
pub fn compute_file_checksum(path: &Path) -> Result<String> {
    let content = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    Ok(compute_bytes_checksum(&content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hello_world_digest_is_stable() {
        assert_eq!(
            compute_content_checksum("hello world"),
            "sha256:b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn one_byte_changes_the_digest() {
        assert_ne!(compute_content_checksum("aaa"), compute_content_checksum("bbb"));
    }

    #[test]
    fn file_and_string_digests_agree() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rule.md");
        std::fs::write(&path, "hello world").unwrap();

        assert_eq!(
            compute_file_checksum(&path).unwrap(),
            compute_content_checksum("hello world")
        );
    }

    #[test]
    fn missing_file_error_carries_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.md");
        let err = compute_file_checksum(&path).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("gone.md"));
    }
}
