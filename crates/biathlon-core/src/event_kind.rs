//! Event kind enum as the single source of truth for event codes.

use std::fmt;

/// What happened to a competitor, keyed by the numeric code used in race logs.
///
/// Codes outside 1-11 are still accepted by the parser and are carried as
/// [`EventKind::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// 1: the competitor registered.
    Registered,
    /// 2: the start time was set by a draw.
    StartTimeDrawn,
    /// 3: the competitor is on the start line.
    OnStartLine,
    /// 4: the competitor started.
    Started,
    /// 5: the competitor is on a firing range.
    OnFiringRange,
    /// 6: a target was hit.
    TargetHit,
    /// 7: the competitor left the firing range.
    LeftFiringRange,
    /// 8: the competitor entered the penalty laps.
    EnteredPenaltyLaps,
    /// 9: the competitor left the penalty laps.
    LeftPenaltyLaps,
    /// 10: the competitor ended a main lap.
    EndedMainLap,
    /// 11: the competitor can't continue.
    CannotContinue,
    /// Any other code.
    Unknown(u64),
}

impl EventKind {
    pub const fn from_code(code: u64) -> Self {
        match code {
            1 => Self::Registered,
            2 => Self::StartTimeDrawn,
            3 => Self::OnStartLine,
            4 => Self::Started,
            5 => Self::OnFiringRange,
            6 => Self::TargetHit,
            7 => Self::LeftFiringRange,
            8 => Self::EnteredPenaltyLaps,
            9 => Self::LeftPenaltyLaps,
            10 => Self::EndedMainLap,
            11 => Self::CannotContinue,
            other => Self::Unknown(other),
        }
    }

    pub const fn code(self) -> u64 {
        match self {
            Self::Registered => 1,
            Self::StartTimeDrawn => 2,
            Self::OnStartLine => 3,
            Self::Started => 4,
            Self::OnFiringRange => 5,
            Self::TargetHit => 6,
            Self::LeftFiringRange => 7,
            Self::EnteredPenaltyLaps => 8,
            Self::LeftPenaltyLaps => 9,
            Self::EndedMainLap => 10,
            Self::CannotContinue => 11,
            Self::Unknown(code) => code,
        }
    }

    /// Whether log lines of this kind carry an extra parameter.
    pub const fn takes_extra(self) -> bool {
        matches!(
            self,
            Self::StartTimeDrawn | Self::OnFiringRange | Self::TargetHit | Self::CannotContinue
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all_codes() {
        for code in 0..=12 {
            assert_eq!(EventKind::from_code(code).code(), code);
        }
    }

    #[test]
    fn unknown_codes_are_kept() {
        assert_eq!(EventKind::from_code(0), EventKind::Unknown(0));
        assert_eq!(EventKind::from_code(42), EventKind::Unknown(42));
        assert_eq!(EventKind::Unknown(42).to_string(), "42");
    }

    #[test]
    fn only_four_kinds_take_extra() {
        let with_extra: Vec<u64> = (1..=11)
            .map(EventKind::from_code)
            .filter(|kind| kind.takes_extra())
            .map(EventKind::code)
            .collect();
        assert_eq!(with_extra, vec![2, 5, 6, 11]);
    }
}
