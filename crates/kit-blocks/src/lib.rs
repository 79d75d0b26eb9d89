//! Marker-delimited region editing for Rules Kit.
//!
//! Entry-point documents such as `CLAUDE.md` are shared between generated
//! content and the user's own notes. The generated part lives between a pair
//! of HTML-comment markers:
//!
//! ```text
//! <!-- CLAUDE-RULES-START -->
//! generated content
//! <!-- CLAUDE-RULES-END -->
//! ```
//!
//! Everything outside the markers belongs to the user and is preserved
//! byte-for-byte by every edit in this crate.

pub mod error;
pub mod parser;
pub mod writer;

pub use error::{Error, Result};
pub use parser::{MarkerPair, Region, find_region, has_region};
pub use writer::{UpsertOutcome, append_region, replace_region, upsert_file, wrap};
