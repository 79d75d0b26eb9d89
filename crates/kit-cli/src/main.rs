//! Rules Kit CLI
//!
//! Installs, updates and resets rule bundles for assistant integrations.

mod cli;
mod commands;
mod context;
mod error;
mod interactive;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands, Location};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Some(cmd) => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(execute_command(cmd, &cli.location))
        }
        None => {
            println!("{} Rules Kit CLI", "rules-kit".green().bold());
            println!();
            println!("Run {} for available commands.", "rules-kit --help".cyan());
            Ok(())
        }
    }
}

async fn execute_command(cmd: Commands, location: &Location) -> Result<()> {
    let orchestrator = context::orchestrator(location)?;
    match cmd {
        Commands::Init { ide } => commands::run_init(&orchestrator, ide.into()).await,
        Commands::Update { ide } => commands::run_update(&orchestrator, ide.into()).await,
        Commands::Upgrade => commands::run_upgrade(&orchestrator).await,
        Commands::ReplaceAll { ide } => commands::run_replace_all(&orchestrator, ide.into()).await,
        Commands::Reset { ide } => commands::run_reset(&orchestrator, ide.map(Into::into)).await,
        Commands::Status => commands::run_status(&orchestrator),
    }
}
