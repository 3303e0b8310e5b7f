//! Run command: config + event log in, decoded log and results report out.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use biathlon_core::{ProcessError, RunSummary, process_log};
use thiserror::Error;

use crate::config::{ConfigError, load_race_config};

/// Fatal failures of a run. Each one stops the run before or while the
/// output is produced.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to load configuration from {}", path.display())]
    ConfigLoad {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error("failed to open race log {}", path.display())]
    LogOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create report {}", path.display())]
    ReportCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Process(#[from] ProcessError),
}

/// Loads the configuration, then processes `events_path` into `output_path`.
pub fn run(
    config_path: &Path,
    events_path: &Path,
    output_path: &Path,
) -> Result<RunSummary, RunError> {
    let config = load_race_config(config_path).map_err(|source| RunError::ConfigLoad {
        path: config_path.to_path_buf(),
        source,
    })?;
    tracing::debug!(?config, "loaded race configuration");

    let log = File::open(events_path).map_err(|source| RunError::LogOpen {
        path: events_path.to_path_buf(),
        source,
    })?;
    let report = File::create(output_path).map_err(|source| RunError::ReportCreate {
        path: output_path.to_path_buf(),
        source,
    })?;

    let summary = process_log(&config, BufReader::new(log), BufWriter::new(report))?;
    Ok(summary)
}
