//! Race log events and their one-line decoding.

use std::str::FromStr;

use thiserror::Error;

use crate::clock::{ClockError, TimeOfDay};
use crate::event_kind::EventKind;
use crate::types::{CompetitorId, NotUnsigned, parse_unsigned};

/// Why a log line could not be turned into an [`Event`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventParseError {
    #[error("expected at least 3 fields, found {found}")]
    TooFewFields { found: usize },

    #[error("invalid timestamp: {0}")]
    Timestamp(#[source] ClockError),

    #[error("invalid event kind: {0}")]
    Kind(#[source] NotUnsigned),

    #[error("invalid competitor id: {0}")]
    Competitor(#[source] NotUnsigned),

    #[error("invalid draw time: {0}")]
    DrawTime(#[source] ClockError),
}

/// One line of the race log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// When the event happened.
    pub time: TimeOfDay,
    /// What happened.
    pub kind: EventKind,
    /// Who it happened to.
    pub competitor: CompetitorId,
    /// Draw time, firing line, target or reason, depending on `kind`.
    pub extra: Option<String>,
}

impl Event {
    /// Parses `[HH:MM:SS.mmm] <kind> <competitor> [<extra>]`.
    ///
    /// The extra parameter is the fourth token, except for kind 11 where the
    /// reason runs to the end of the line.
    ///
    /// The first token loses every leading and trailing occurrence of its own
    /// first and last characters, so `[10:00:00.000]` and `((10:00:00.000)`
    /// both yield the bare clock text.
    pub fn parse(line: &str) -> Result<Self, EventParseError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let &[stamp, kind, competitor, ..] = tokens.as_slice() else {
            return Err(EventParseError::TooFewFields {
                found: tokens.len(),
            });
        };

        let time = TimeOfDay::parse(strip_delimiters(stamp)).map_err(EventParseError::Timestamp)?;
        let kind = parse_unsigned(kind)
            .map(EventKind::from_code)
            .map_err(EventParseError::Kind)?;
        let competitor = competitor
            .parse::<CompetitorId>()
            .map_err(EventParseError::Competitor)?;

        let extra = match tokens.get(3) {
            Some(_) if kind == EventKind::CannotContinue => Some(skip_tokens(line, 3).to_string()),
            Some(token) if kind.takes_extra() => Some((*token).to_string()),
            _ => None,
        };

        if let (EventKind::StartTimeDrawn, Some(draw)) = (kind, &extra) {
            TimeOfDay::parse(draw).map_err(EventParseError::DrawTime)?;
        }

        Ok(Self {
            time,
            kind,
            competitor,
            extra,
        })
    }

    /// The extra parameter, or an empty string when absent.
    pub fn extra_or_empty(&self) -> &str {
        self.extra.as_deref().unwrap_or_default()
    }

    /// English description of the event. Unknown kinds describe as "".
    pub fn describe(&self) -> String {
        let id = self.competitor;
        let extra = self.extra_or_empty();
        match self.kind {
            EventKind::Registered => format!("The competitor({id}) registered"),
            EventKind::StartTimeDrawn => {
                format!("The start time for the competitor({id}) was set by a draw to {extra}")
            }
            EventKind::OnStartLine => format!("The competitor({id}) is on the start line"),
            EventKind::Started => format!("The competitor({id}) has started"),
            EventKind::OnFiringRange => {
                format!("The competitor({id}) is on the firing range({extra})")
            }
            EventKind::TargetHit => {
                format!("The target({extra}) has been hit by competitor({id})")
            }
            EventKind::LeftFiringRange => format!("The competitor({id}) left the firing range"),
            EventKind::EnteredPenaltyLaps => {
                format!("The competitor({id}) entered the penalty laps")
            }
            EventKind::LeftPenaltyLaps => format!("The competitor({id}) left the penalty laps"),
            EventKind::EndedMainLap => format!("The competitor({id}) ended the main lap"),
            EventKind::CannotContinue => format!("The competitor({id}) can't continue: {extra}"),
            EventKind::Unknown(_) => String::new(),
        }
    }

    /// `[<time>] <description>`, the line written to the output log.
    pub fn log_line(&self) -> String {
        format!("[{}] {}", self.time, self.describe())
    }
}

impl FromStr for Event {
    type Err = EventParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Trims the set {first char, last char} from both ends of `token`.
fn strip_delimiters(token: &str) -> &str {
    let (Some(first), Some(last)) = (token.chars().next(), token.chars().next_back()) else {
        return token;
    };
    token.trim_matches(|c: char| c == first || c == last)
}

/// Returns the rest of `line` after its first `count` whitespace-separated
/// tokens, trimmed.
fn skip_tokens(line: &str, count: usize) -> &str {
    let mut rest = line.trim_start();
    for _ in 0..count {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        rest = rest[end..].trim_start();
    }
    rest.trim_end()
}
