//! Clock arithmetic for race timestamps.
//!
//! Every timestamp in a race log is a time-of-day reading (`HH:MM:SS.mmm`)
//! with no date. Differences between two readings are signed
//! [`chrono::Duration`] values and may be zero or negative.
//!
//! Threshold checks compare durations by rendering them as clock text and
//! reading that text back as a time-of-day (see [`within_threshold`]). Start
//! window checks and finish-time ranking both go through this one function.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveTime, Timelike};
use serde::Deserialize;
use thiserror::Error;

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;

/// Errors from reading clock text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// The text is not shaped like `HH:MM:SS.mmm`.
    #[error("time `{value}` does not match HH:MM:SS.mmm")]
    Layout { value: String },

    /// The text is well shaped but names an impossible clock reading.
    #[error("time `{value}` is out of range")]
    OutOfRange { value: String },
}

/// A clock reading with millisecond precision and no date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Parses the fixed `HH:MM:SS.mmm` layout.
    ///
    /// Hours run 00-23, minutes and seconds 00-59. Anything else, including
    /// single-digit fields or a missing millisecond part, is rejected.
    pub fn parse(text: &str) -> Result<Self, ClockError> {
        let bytes = text.as_bytes();
        let shaped = bytes.len() == 12
            && bytes[2] == b':'
            && bytes[5] == b':'
            && bytes[8] == b'.'
            && [0, 1, 3, 4, 6, 7, 9, 10, 11]
                .iter()
                .all(|&i| bytes[i].is_ascii_digit());
        if !shaped {
            return Err(ClockError::Layout {
                value: text.to_string(),
            });
        }

        let number = |from: usize, to: usize| {
            bytes[from..to]
                .iter()
                .fold(0_u32, |acc, b| acc * 10 + u32::from(b - b'0'))
        };
        let (hour, minute, second, milli) =
            (number(0, 2), number(3, 5), number(6, 8), number(9, 12));

        // chrono accepts second 59 with milli >= 1000 as a leap second; the
        // three-digit field keeps milli below that.
        NaiveTime::from_hms_milli_opt(hour, minute, second, milli)
            .map(Self)
            .ok_or_else(|| ClockError::OutOfRange {
                value: text.to_string(),
            })
    }

    /// Time elapsed since midnight.
    pub fn since_midnight(self) -> Duration {
        let seconds = i64::from(self.0.num_seconds_from_midnight());
        let millis = i64::from(self.0.nanosecond() / 1_000_000);
        Duration::milliseconds(seconds * MILLIS_PER_SECOND + millis)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S%.3f"))
    }
}

impl FromStr for TimeOfDay {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ClockError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Returns `end - start`. Zero and negative results are legal.
pub fn subtract(start: TimeOfDay, end: TimeOfDay) -> Duration {
    end.since_midnight() - start.since_midnight()
}

/// Renders a duration as `HH:MM:SS.mmm`.
///
/// Hours are the total hour count and are not wrapped at 24. Each component
/// is truncated toward zero, so a negative duration renders with signed
/// components (e.g. `00:00:-5.000`).
pub fn format_duration(duration: Duration) -> String {
    let ms = duration.num_milliseconds();
    let hours = ms / MILLIS_PER_HOUR;
    let minutes = ms / MILLIS_PER_MINUTE % 60;
    let seconds = ms / MILLIS_PER_SECOND % 60;
    let millis = ms % MILLIS_PER_SECOND;
    format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
}

/// Returns true iff `diff`, read as a clock time, is not later than
/// `threshold` read the same way.
///
/// Both durations are rendered with [`format_duration`] and parsed back as
/// [`TimeOfDay`]. Durations that do not survive that (negative, or 24 hours
/// and beyond) produce an error.
pub fn within_threshold(diff: Duration, threshold: Duration) -> Result<bool, ClockError> {
    let diff = TimeOfDay::parse(&format_duration(diff))?;
    let threshold = TimeOfDay::parse(&format_duration(threshold))?;
    Ok(diff <= threshold)
}

/// Duration in fractional seconds, the divisor for speed calculations.
#[allow(clippy::cast_precision_loss)]
pub fn seconds(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / MILLIS_PER_SECOND as f64
}

/// Renders a speed with six decimals.
///
/// Zero-length intervals produce infinities or NaN, which render as `+Inf`,
/// `-Inf` and `NaN`.
pub fn format_speed(speed: f64) -> String {
    if speed.is_nan() {
        "NaN".to_string()
    } else if speed.is_infinite() {
        if speed.is_sign_positive() {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        }
    } else {
        format!("{speed:.6}")
    }
}
