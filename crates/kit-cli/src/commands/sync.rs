//! Init, update, upgrade and replace-all command implementations

use colored::Colorize;
use kit_core::{InstallOutcome, Orchestrator, ProfileUpdate, UpdateOutcome, VersionDiff};
use kit_tools::{AdaptReport, IntegrationProfile};

use crate::error::Result;

/// Run the init command
pub async fn run_init(orchestrator: &Orchestrator, profile: IntegrationProfile) -> Result<()> {
    println!(
        "{} Installing rules for {}...",
        "=>".blue().bold(),
        profile.display_name().cyan()
    );
    let outcome = orchestrator.init(profile).await?;
    print_install("Initialized", &outcome);
    Ok(())
}

/// Run the replace-all command
pub async fn run_replace_all(
    orchestrator: &Orchestrator,
    profile: IntegrationProfile,
) -> Result<()> {
    println!(
        "{} Replacing all rules for {}...",
        "=>".blue().bold(),
        profile.display_name().cyan()
    );
    let outcome = orchestrator.replace_all(profile).await?;
    print_install("Replaced", &outcome);
    Ok(())
}

/// Run the update command
pub async fn run_update(orchestrator: &Orchestrator, profile: IntegrationProfile) -> Result<()> {
    println!(
        "{} Checking for updates for {}...",
        "=>".blue().bold(),
        profile.display_name().cyan()
    );
    let outcome = orchestrator.update(profile).await?;
    print_update(profile, &outcome);
    Ok(())
}

/// Run the upgrade command
pub async fn run_upgrade(orchestrator: &Orchestrator) -> Result<()> {
    println!("{} Upgrading all initialized integrations...", "=>".blue().bold());
    let updates = orchestrator.upgrade_all().await?;
    for ProfileUpdate { profile, outcome } in &updates {
        print_update(*profile, outcome);
    }
    Ok(())
}

fn print_install(verb: &str, outcome: &InstallOutcome) {
    let system = outcome
        .system_rules_version
        .as_deref()
        .map(|v| format!(", system rules {v}"))
        .unwrap_or_default();
    println!(
        "{} {} {} with version {}{}",
        "OK".green().bold(),
        verb,
        outcome.profile.display_name().cyan(),
        outcome.prompts_version.bold(),
        system
    );
    print_adapt(&outcome.adapt);
}

fn print_update(profile: IntegrationProfile, outcome: &UpdateOutcome) {
    let name = profile.display_name().cyan();
    match outcome {
        UpdateOutcome::Updated {
            from,
            to,
            diff,
            adapt,
        } => {
            println!(
                "{} {} updated from {} to {}",
                "OK".green().bold(),
                name,
                from.dimmed(),
                to.bold()
            );
            print_diff(diff);
            print_adapt(adapt);
        }
        UpdateOutcome::UpToDate {
            version,
            cli_version_refreshed,
        } => {
            let note = if *cli_version_refreshed {
                " (CLI version stamp refreshed)"
            } else {
                ""
            };
            println!(
                "{} {} is up to date ({}){}",
                "OK".green().bold(),
                name,
                version,
                note.dimmed()
            );
        }
        UpdateOutcome::LocalNewer { installed, latest } => {
            println!(
                "{} {} has {} installed, newer than the published {}; left unchanged",
                "WARN".yellow().bold(),
                name,
                installed.bold(),
                latest
            );
        }
        UpdateOutcome::Local { adapt } => match adapt {
            Some(adapt) => {
                println!(
                    "{} {} re-applied from the local bundle",
                    "LOCAL".yellow().bold(),
                    name
                );
                print_adapt(adapt);
            }
            None => println!(
                "{} {} left unchanged, no local bundle found",
                "LOCAL".yellow().bold(),
                name
            ),
        },
    }
}

fn print_diff(diff: &VersionDiff) {
    if diff.is_empty() {
        return;
    }
    for path in &diff.to_add {
        println!("   {} {}", "+".green(), path);
    }
    for path in &diff.to_update {
        println!("   {} {}", "~".yellow(), path);
    }
    for path in &diff.to_delete {
        println!("   {} {}", "-".red(), path);
    }
}

fn print_adapt(report: &AdaptReport) {
    println!(
        "   {} files written, {} preserved",
        report.written.len(),
        report.preserved.len()
    );
    if !report.ignored.is_empty() {
        println!("   {}: {}", "Ignored".dimmed(), report.ignored.join(", "));
    }
    if !report.overrides_applied.is_empty() {
        println!(
            "   {}: {}",
            "Overrides".dimmed(),
            report.overrides_applied.join(", ")
        );
    }
}
