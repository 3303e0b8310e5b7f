//! Core type definitions.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error for tokens that are not unsigned decimal integers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("`{value}` is not an unsigned integer")]
pub struct NotUnsigned {
    pub value: String,
}

/// Parses a token made only of ASCII digits.
///
/// Signs, whitespace and overflow are all rejected.
pub(crate) fn parse_unsigned(token: &str) -> Result<u64, NotUnsigned> {
    let not_unsigned = || NotUnsigned {
        value: token.to_string(),
    };
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_unsigned());
    }
    token.parse().map_err(|_| not_unsigned())
}

/// A competitor's bib number as it appears in the race log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompetitorId(u64);

impl CompetitorId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CompetitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CompetitorId {
    type Err = NotUnsigned;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_unsigned(s).map(Self)
    }
}
