use clap::Parser;
use colored::Colorize;
use tracing::debug;

use ec2_pauser::config::{Args, Config};
use ec2_pauser::ec2::{Ec2Client, FilterSpec};
use ec2_pauser::error::Result;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let config = Config::from_args(args);

    init_tracing(config.verbose);

    if let Err(e) = run(&config).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(config: &Config) -> Result<()> {
    debug!(
        action = config.action.name(),
        profile = %config.profile,
        "Starting ec2-pauser"
    );

    // Parse user-supplied filters early to fail fast
    let filter = FilterSpec::build(
        config.include_state_filter,
        &config.extra_tags,
        &config.id_allowlist,
    )?;

    let client = Ec2Client::new(&config.profile, config.region.as_deref()).await?;
    client.verify_session().await?;

    let instances = client.resolve_instances(&filter).await?;

    client
        .execute(config.action, &instances, config.verbose)
        .await
}

/// Verbose mode raises this crate's log level to debug; RUST_LOG overrides.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "error,ec2_pauser=debug"
    } else {
        "error,ec2_pauser=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();
}
