//! Application configuration.

use clap::{Parser, Subcommand};

use crate::ec2::Action;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const COMMIT: &str = env!("GIT_COMMIT");
const BUILD_DATE: &str = env!("BUILD_DATE");

/// CLI arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "ec2-pauser")]
#[command(about = "Pause and resume non-ephemeral EC2 fleets by tag to save cost")]
#[command(version = const_format::formatcp!(
    "{} (commit: {}, build date: {})",
    VERSION, COMMIT, BUILD_DATE
))]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// AWS profile to use
    #[arg(short, long, env = "AWS_PROFILE", default_value = "default")]
    pub profile: String,

    /// Specific AWS region (if not set, uses the profile's default)
    #[arg(short, long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Filter by additional tags (format: Key=Value,Key=Value)
    #[arg(short = 't', long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Restrict to specific instance ids (comma-separated)
    #[arg(short = 'i', long, value_delimiter = ',')]
    pub ids: Vec<String>,

    /// Match instances in any lifecycle state instead of the built-in allowlist
    #[arg(long)]
    pub any_state: bool,

    /// Print raw API responses and per-instance detail
    #[arg(short, long)]
    pub verbose: bool,
}

/// Fleet lifecycle subcommands.
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum Command {
    /// Start all paused instances
    Start,
    /// Stop all pausable instances
    Stop,
}

/// Application configuration derived from CLI args.
#[derive(Debug, Clone)]
pub struct Config {
    pub action: Action,
    pub profile: String,
    pub region: Option<String>,
    pub extra_tags: Vec<String>,
    pub id_allowlist: Vec<String>,
    pub include_state_filter: bool,
    pub verbose: bool,
}

impl Config {
    /// Create config from CLI arguments.
    pub fn from_args(args: Args) -> Self {
        let action = match args.command {
            Command::Start => Action::Start,
            Command::Stop => Action::Stop,
        };

        Self {
            action,
            profile: args.profile,
            region: args.region,
            extra_tags: args.tags,
            id_allowlist: args.ids,
            include_state_filter: !args.any_state,
            verbose: args.verbose,
        }
    }
}
