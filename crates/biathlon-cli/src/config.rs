//! Race configuration loading.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::Path;

use biathlon_core::RaceConfig;
use figment::Figment;
use figment::providers::{Format, Json, Toml};
use thiserror::Error;

/// Why the race configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read file")]
    Read(#[source] io::Error),

    #[error("invalid configuration")]
    Parse(#[source] Box<figment::Error>),
}

/// Loads the race configuration from a JSON or TOML document.
///
/// Files ending in `.toml` are read as TOML; everything else as JSON.
pub fn load_race_config(path: &Path) -> Result<RaceConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Read)?;

    let figment = match path.extension().and_then(OsStr::to_str) {
        Some("toml") => Figment::from(Toml::string(&content)),
        _ => Figment::from(Json::string(&content)),
    };

    figment
        .extract()
        .map_err(|err| ConfigError::Parse(Box::new(err)))
}
