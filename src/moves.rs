//! Move tokens accepted from players.

use core::fmt;
use core::str::FromStr;

use serde::Serialize;

use crate::error::ParseError;

/// A decision token.
///
/// This is the closed set of answers the input collaborator may return. Which
/// tokens are meaningful depends on the current [`GameStep`](crate::GameStep);
/// anything else is ignored and the request is repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Move {
    /// Draw a card.
    Hit,
    /// Keep the current total.
    Stand,
    /// Double the stake and draw exactly one card.
    Double,
    /// Split a pair into two hands.
    Split,
    /// Give up half the stake.
    Surrender,
    /// Decline insurance.
    NoInsurance,
    /// Buy insurance.
    TakeInsurance,
    /// Leave the result screen and start the next round.
    NextGame,
}

impl Move {
    /// Returns the wire token for the move.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Stand => "stand",
            Self::Double => "double",
            Self::Split => "split",
            Self::Surrender => "surrender",
            Self::NoInsurance => "no-insurance",
            Self::TakeInsurance => "ask-insurance",
            Self::NextGame => "next-game",
        }
    }

    /// Returns whether the move answers the insurance question.
    #[must_use]
    pub const fn is_insurance(self) -> bool {
        matches!(self, Self::NoInsurance | Self::TakeInsurance)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Move {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hit" => Ok(Self::Hit),
            "stand" => Ok(Self::Stand),
            "double" => Ok(Self::Double),
            "split" => Ok(Self::Split),
            "surrender" => Ok(Self::Surrender),
            "no-insurance" => Ok(Self::NoInsurance),
            "ask-insurance" | "take-insurance" => Ok(Self::TakeInsurance),
            "next-game" => Ok(Self::NextGame),
            _ => Err(ParseError::UnknownMove),
        }
    }
}
