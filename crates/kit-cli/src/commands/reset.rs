//! Reset command implementation

use colored::Colorize;
use kit_core::{Orchestrator, ResetOutcome};
use kit_tools::IntegrationProfile;

use crate::error::Result;

/// Run the reset command. With a profile, resets it without asking which.
pub async fn run_reset(
    orchestrator: &Orchestrator,
    profile: Option<IntegrationProfile>,
) -> Result<()> {
    let outcome = match profile {
        Some(profile) => orchestrator.reset_profile(profile).await?,
        None => orchestrator.reset().await?,
    };

    match outcome {
        ResetOutcome::NothingInitialized => {
            println!("{} Nothing to reset.", "=>".blue().bold());
        }
        ResetOutcome::Cancelled => {
            println!("{} Reset cancelled.", "=>".blue().bold());
        }
        ResetOutcome::Reset(profiles) => {
            for profile in profiles {
                println!(
                    "{} Reset {}",
                    "OK".green().bold(),
                    profile.display_name().cyan()
                );
            }
        }
    }
    Ok(())
}
