//! Filesystem primitives for Rules Kit
//!
//! Everything that touches the disk below the adapters lives here: atomic
//! writes, content hashing, recursive tree scanning and the ignore-glob
//! matcher that decides which bundle files are skipped during a sync.

pub mod checksum;
pub mod error;
pub mod ignore;
pub mod io;
pub mod path;
pub mod scan;

pub use error::{Error, Result};
pub use ignore::{IgnoreList, should_ignore};
pub use path::{normalize_separators, relative_slash, to_slash};
pub use scan::{FileHashes, scan_directory};
