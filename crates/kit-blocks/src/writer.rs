//! Region writing: replace, append and upsert managed regions.

use crate::error::{Error, Result};
use crate::parser::{MarkerPair, find_region};
use kit_fs::io;
use std::path::Path;

/// Surround `inner` with the marker pair, one marker per line.
pub fn wrap(markers: MarkerPair, inner: &str) -> String {
    format!("{}\n{}\n{}", markers.start, inner, markers.end)
}

/// Replace an existing region with `block`.
///
/// `block` is the full replacement, markers included (see [`wrap`]). Text
/// before and after the region is kept exactly, so repeating the call with the
/// same block yields identical bytes.
///
/// # Errors
/// Returns `Error::RegionNotFound` if the content has no complete region.
///
/// # Example
/// ```
/// use kit_blocks::{MarkerPair, replace_region, wrap};
///
/// const M: MarkerPair = MarkerPair::new("<!-- S -->", "<!-- E -->");
/// let content = "notes\n<!-- S -->\nold\n<!-- E -->\nmore notes\n";
///
/// let once = replace_region(content, M, &wrap(M, "new")).unwrap();
/// assert_eq!(once, "notes\n<!-- S -->\nnew\n<!-- E -->\nmore notes\n");
/// assert_eq!(replace_region(&once, M, &wrap(M, "new")).unwrap(), once);
/// ```
pub fn replace_region(content: &str, markers: MarkerPair, block: &str) -> Result<String> {
    let region = find_region(content, markers).ok_or_else(|| Error::RegionNotFound {
        start: markers.start.to_string(),
        end: markers.end.to_string(),
    })?;

    let mut out = String::with_capacity(content.len() + block.len());
    out.push_str(&content[..region.start]);
    out.push_str(block);
    out.push_str(&content[region.end..]);
    Ok(out)
}

/// Append `block` after the existing content, separated by a blank line.
///
/// Trailing whitespace of the existing content is collapsed first and the
/// result always ends with a single newline.
pub fn append_region(content: &str, block: &str) -> String {
    let head = content.trim_end();
    if head.is_empty() {
        format!("{block}\n")
    } else {
        format!("{head}\n\n{block}\n")
    }
}

/// What [`upsert_file`] did to the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Replaced,
    Appended,
    Unchanged,
}

/// Upsert a region inside a file on disk.
///
/// A missing file is created holding only the block. An unchanged result is
/// not rewritten.
pub fn upsert_file(path: &Path, markers: MarkerPair, block: &str) -> Result<UpsertOutcome> {
    let Some(existing) = io::read_text_if_exists(path)? else {
        io::write_text(path, &append_region("", block))?;
        return Ok(UpsertOutcome::Created);
    };

    let (updated, outcome) = match replace_region(&existing, markers, block) {
        Ok(updated) => (updated, UpsertOutcome::Replaced),
        Err(_) => (append_region(&existing, block), UpsertOutcome::Appended),
    };

    if updated == existing {
        return Ok(UpsertOutcome::Unchanged);
    }
    io::write_text(path, &updated)?;
    tracing::debug!(path = %path.display(), ?outcome, "Upserted managed region");
    Ok(outcome)
}
