//! Core race logic for biathlon results.
//!
//! This crate contains the fundamental types and logic for:
//! - Clock arithmetic: time-of-day parsing, signed differences, threshold checks
//! - Event parsing: turning race log lines into typed events
//! - Race state: applying events to per-competitor results
//! - Ranking and reporting: ordering results and rendering the final report

pub mod clock;
pub mod competitor;
pub mod config;
pub mod event;
pub mod event_kind;
mod pipeline;
mod race;
pub mod ranking;
pub mod report;
mod types;

pub use clock::{ClockError, TimeOfDay};
pub use competitor::{CompetitorResult, LapSplit, Outcome};
pub use config::RaceConfig;
pub use event::{Event, EventParseError};
pub use event_kind::EventKind;
pub use pipeline::{ProcessError, RunSummary, process_log};
pub use race::Race;
pub use types::{CompetitorId, NotUnsigned};
