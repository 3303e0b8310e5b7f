use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use biathlon_cli::Cli;
use biathlon_cli::commands::run;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let summary = run::run(&cli.config, &cli.events, &cli.output)
        .with_context(|| format!("race processing failed for {}", cli.events.display()))?;

    tracing::info!(
        competitors = summary.competitors,
        events = summary.events_applied,
        rejected = summary.lines_rejected,
        output = %cli.output.display(),
        "results written"
    );

    Ok(())
}
