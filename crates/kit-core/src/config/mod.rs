//! Persisted install state
//!
//! One [`SyncRecord`] per profile per target directory, stored as JSON in the
//! profile's layout root and accessed through [`ConfigStore`].

mod record;
mod store;

pub use record::{CONFIG_VERSION, RuleSet, SOURCE, Settings, SyncRecord, schema_url};
pub use store::{ConfigStore, RECORD_FILE};
