//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Biathlon race results.
///
/// Reads a race configuration and a chronological event log, decodes every
/// event and writes the ranked results report.
#[derive(Debug, Parser)]
#[command(name = "biathlon", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to the race configuration (JSON, or TOML with a .toml extension).
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    /// Path to the race event log.
    #[arg(short, long, default_value = "events")]
    pub events: PathBuf,

    /// Path of the output log to create.
    #[arg(short, long, default_value = "outlog.txt")]
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_conventional_file_names() {
        let cli = Cli::try_parse_from(["biathlon"]).unwrap();
        assert!(!cli.verbose);
        assert_eq!(cli.config, PathBuf::from("config.json"));
        assert_eq!(cli.events, PathBuf::from("events"));
        assert_eq!(cli.output, PathBuf::from("outlog.txt"));
    }

    #[test]
    fn paths_can_be_overridden() {
        let cli = Cli::try_parse_from([
            "biathlon", "-v", "--config", "race.toml", "-e", "log.txt", "-o", "out.txt",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("race.toml"));
        assert_eq!(cli.events, PathBuf::from("log.txt"));
        assert_eq!(cli.output, PathBuf::from("out.txt"));
    }
}
