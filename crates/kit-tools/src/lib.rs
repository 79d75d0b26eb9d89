//! Integration adapters for Rules Kit.
//!
//! Each supported assistant integration is a variant of the closed
//! [`IntegrationProfile`] enum. An adapter turns a fetched bundle into the
//! file layout that integration expects inside a target project.
//!
//! # Architecture
//!
//! 1. **Simple profiles** (Cursor, Trae) mirror the bundle's `rules`, `docs`
//!    and `commands` categories under the profile's layout root, renaming
//!    rule files to the profile's extension.
//!
//! 2. **Rich profile** (Claude Code) additionally generates an entry-point
//!    document, per-rule skill packages and a merged settings file. It lives
//!    in the [`claude`] module.
//!
//! Callers obtain an adapter through [`adapter_for`] and only ever use the
//! shared [`IntegrationAdapter`] trait.

pub mod bundle;
pub mod claude;
pub mod dispatcher;
pub mod error;
pub mod integration;
pub mod profile;
pub mod settings;
pub mod simple;

pub use claude::ClaudeAdapter;
pub use dispatcher::adapter_for;
pub use error::{Error, Result};
pub use integration::{
    AdaptContext, AdaptReport, EntryPointMode, FileOverride, IntegrationAdapter, MirroredCategory,
};
pub use profile::IntegrationProfile;
pub use simple::SimpleAdapter;
