//! Status command implementation

use colored::Colorize;
use kit_core::Orchestrator;

use crate::error::Result;

/// Run the status command
pub fn run_status(orchestrator: &Orchestrator) -> Result<()> {
    let target = &orchestrator.context().target_dir;
    let installed = orchestrator.status()?;

    if installed.is_empty() {
        println!("{}", "No integrations initialized".yellow().bold());
        println!();
        println!("Run {} to install rules.", "rules-kit init --ide <ide>".cyan());
        return Ok(());
    }

    println!("{}", "Rules Status".bold());
    println!();
    println!("{}:   {}", "Path".dimmed(), target.display());
    println!();

    for (profile, record) in &installed {
        println!("{} {}", "+".green(), profile.display_name().cyan());
        println!("    {}: {}", "Prompts".dimmed(), record.prompts_version);
        if let Some(system) = &record.system_rules_version {
            println!("    {}: {}", "System rules".dimmed(), system);
        }
        println!("    {}: {}", "CLI".dimmed(), record.cli_version);
        println!(
            "    {}: {}",
            "Updated".dimmed(),
            record.updated_at.format("%Y-%m-%d %H:%M UTC")
        );
        if !record.ignore_list.is_empty() {
            println!("    {}: {}", "Ignored".dimmed(), record.ignore_list.join(", "));
        }
    }
    Ok(())
}
