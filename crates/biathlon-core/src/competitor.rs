//! Per-competitor race state.

use std::fmt;

use chrono::Duration;

use crate::clock::{self, TimeOfDay, format_duration};
use crate::event_kind::EventKind;
use crate::types::CompetitorId;

/// Time and average speed over one main lap or penalty loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LapSplit {
    pub duration: Duration,
    /// Meters per second. Infinite or NaN when `duration` is zero.
    pub speed: f64,
}

impl LapSplit {
    /// Builds a split for `distance` meters covered in `duration`.
    pub fn over(distance: u32, duration: Duration) -> Self {
        Self {
            duration,
            speed: f64::from(distance) / clock::seconds(duration),
        }
    }
}

/// A competitor's classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    /// Still racing, or never reached a terminal event.
    #[default]
    Unset,
    /// Started outside the start window.
    NotStarted,
    /// Dropped out.
    NotFinished,
    /// Completed every lap in this time.
    Finished(Duration),
}

impl Outcome {
    /// Finish time for finished competitors.
    pub const fn finish_time(self) -> Option<Duration> {
        match self {
            Self::Finished(elapsed) => Some(elapsed),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => Ok(()),
            Self::NotStarted => f.write_str("NotStarted"),
            Self::NotFinished => f.write_str("NotFinished"),
            Self::Finished(elapsed) => f.write_str(&format_duration(*elapsed)),
        }
    }
}

/// Everything recorded about one competitor during a race.
///
/// Created with defaults on the first event that mentions the competitor and
/// updated in place by [`crate::Race::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompetitorResult {
    pub id: CompetitorId,
    pub registered: bool,
    pub scheduled_start: Option<TimeOfDay>,
    pub start_time: Option<TimeOfDay>,
    pub lap_start_time: Option<TimeOfDay>,
    pub penalty_start_time: Option<TimeOfDay>,
    pub finish_time: Option<TimeOfDay>,
    pub laps: Vec<LapSplit>,
    pub penalty_laps: Vec<LapSplit>,
    pub hits: u32,
    pub shots: u32,
    pub outcome: Outcome,
    /// Kind of the last event applied to this competitor.
    pub status: Option<EventKind>,
}

impl CompetitorResult {
    pub const fn new(id: CompetitorId) -> Self {
        Self {
            id,
            registered: false,
            scheduled_start: None,
            start_time: None,
            lap_start_time: None,
            penalty_start_time: None,
            finish_time: None,
            laps: Vec::new(),
            penalty_laps: Vec::new(),
            hits: 0,
            shots: 0,
            outcome: Outcome::Unset,
            status: None,
        }
    }

    /// Total time in penalty loops and the average speed across them.
    ///
    /// With no penalty loops the duration is zero and the speed is NaN.
    pub fn penalty_summary(&self, penalty_len: u32) -> LapSplit {
        let total = self
            .penalty_laps
            .iter()
            .fold(Duration::zero(), |acc, lap| acc + lap.duration);
        #[allow(clippy::cast_precision_loss)]
        let distance = f64::from(penalty_len) * self.penalty_laps.len() as f64;
        LapSplit {
            duration: total,
            speed: distance / clock::seconds(total),
        }
    }
}
