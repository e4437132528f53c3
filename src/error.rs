//! Error types for game construction and round play.
//!
//! Invalid moves and strategy mismatches are not errors: an invalid move is
//! ignored and asked for again, a mismatch is recorded as a hint.

use thiserror::Error;

/// Errors in the table configuration. A game is never built from options
/// that fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The shoe needs at least one deck.
    #[error("deck count must be positive")]
    ZeroDecks,
    /// The table needs at least one seat.
    #[error("at least one player is required")]
    NoPlayers,
    /// Every player needs at least one hand slot.
    #[error("max hands per player must be positive")]
    ZeroMaxHands,
    /// The human seat does not exist.
    #[error("human seat {0} is out of range")]
    HumanSeatOutOfRange(usize),
    /// A strategy override names a seat that does not exist.
    #[error("strategy override for seat {0} is out of range")]
    StrategySeatOutOfRange(usize),
    /// Minimum bet is zero or above the maximum bet.
    #[error("invalid bet limits")]
    InvalidBetLimits,
    /// A payout ratio has a zero denominator.
    #[error("invalid payout ratio")]
    InvalidPayout,
}

/// Errors that abort a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundError {
    /// A stake cannot be covered by the seat's balance.
    #[error("seat {seat} cannot cover a stake of {needed} with a balance of {balance}")]
    InsufficientFunds {
        /// Seat that tried to stake.
        seat: usize,
        /// Amount required.
        needed: usize,
        /// Balance at the time of the request.
        balance: usize,
    },
    /// A bet is outside the table limits.
    #[error("bet {0} is outside the table limits")]
    BetOutOfRange(usize),
    /// Seat not found.
    #[error("seat {0} not found")]
    SeatNotFound(usize),
    /// Neither the shoe nor the discard tray has a card left.
    #[error("no cards left in the shoe")]
    ShoeExhausted,
}

/// Errors when parsing tokens and configuration strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Unknown move token.
    #[error("unknown move")]
    UnknownMove,
    /// Unknown game mode.
    #[error("unknown game mode")]
    UnknownMode,
    /// Payout ratio not of the form `a:b`.
    #[error("invalid payout ratio")]
    InvalidRatio,
}
