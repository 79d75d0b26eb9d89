//! Command implementations for kit-cli

pub mod reset;
pub mod status;
pub mod sync;

pub use reset::run_reset;
pub use status::run_status;
pub use sync::{run_init, run_replace_all, run_update, run_upgrade};
