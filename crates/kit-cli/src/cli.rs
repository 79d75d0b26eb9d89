//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use kit_tools::IntegrationProfile;

/// Rules Kit - distribute a rules bundle into assistant integrations
#[derive(Parser, Debug)]
#[command(name = "rules-kit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub location: Location,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where bundles come from and where they go.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Project directory receiving the rules (defaults to the current directory)
    #[arg(short, long, global = true)]
    pub target: Option<PathBuf>,

    /// Local bundle used when the mirror is unreachable (defaults to the
    /// directory of the executable)
    #[arg(long, global = true, env = "RULES_KIT_BUNDLE_DIR")]
    pub bundle_dir: Option<PathBuf>,

    /// Mirror holding published versions under prompts/ and system-rules/
    /// (defaults to `mirror/` inside the bundle dir)
    #[arg(long, global = true, env = "RULES_KIT_MIRROR")]
    pub mirror: Option<PathBuf>,

    /// Answer yes to every confirmation instead of prompting
    #[arg(short, long, global = true)]
    pub yes: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Install the latest rules for an integration
    ///
    /// Examples:
    ///   rules-kit init --ide cursor
    ///   rules-kit init --ide claude-code --mirror ./mirror
    Init {
        /// Integration to install
        #[arg(long, value_enum)]
        ide: Ide,
    },

    /// Update an initialized integration to the latest rules
    Update {
        /// Integration to update
        #[arg(long, value_enum)]
        ide: Ide,
    },

    /// Update every initialized integration
    Upgrade,

    /// Remove generated files and install the latest rules again
    ReplaceAll {
        /// Integration to replace
        #[arg(long, value_enum)]
        ide: Ide,
    },

    /// Remove generated files and the sync record
    ///
    /// Without --ide, asks which integration to reset.
    Reset {
        /// Integration to reset without asking
        #[arg(long, value_enum)]
        ide: Option<Ide>,
    },

    /// Show initialized integrations and their versions
    Status,
}

/// Integration names accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ide {
    Cursor,
    Trae,
    #[value(alias = "claude")]
    ClaudeCode,
}

impl From<Ide> for IntegrationProfile {
    fn from(ide: Ide) -> Self {
        match ide {
            Ide::Cursor => IntegrationProfile::Cursor,
            Ide::Trae => IntegrationProfile::Trae,
            Ide::ClaudeCode => IntegrationProfile::ClaudeCode,
        }
    }
}
