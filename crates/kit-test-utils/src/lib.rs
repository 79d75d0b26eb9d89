//! Shared test fixtures for the rules-kit workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`bundle`]: [`BundleFixture`] writes a realistic rules bundle to disk
//! - [`mirror`]: [`MirrorFixture`] lays bundles out as a versioned mirror
//! - [`target`]: [`TestTarget`] is an empty project directory with assertions

pub mod bundle;
pub mod mirror;
pub mod target;

pub use bundle::BundleFixture;
pub use mirror::MirrorFixture;
pub use target::TestTarget;
