//! Race parameters.

use chrono::Duration;
use serde::Deserialize;

use crate::clock::TimeOfDay;

/// Immutable race parameters, loaded once before the log is processed.
///
/// Field names follow the race configuration document (`lapLen`,
/// `penaltyLen`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceConfig {
    /// Number of main laps.
    pub laps: u32,
    /// Length of one main lap, in meters.
    pub lap_len: u32,
    /// Length of one penalty loop, in meters.
    pub penalty_len: u32,
    /// Number of firing lines on the range.
    pub firing_lines: u32,
    /// Scheduled start of the race.
    pub start: TimeOfDay,
    /// How late a competitor may start after their drawn time.
    pub start_delta: TimeOfDay,
}

impl RaceConfig {
    /// The start tolerance as a duration.
    pub fn start_window(&self) -> Duration {
        self.start_delta.since_midnight()
    }
}
