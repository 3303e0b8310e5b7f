//! Biathlon results CLI library.
//!
//! This crate provides the CLI interface for computing race results.

mod cli;
pub mod commands;
mod config;

pub use cli::Cli;
pub use config::{ConfigError, load_race_config};
