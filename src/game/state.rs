//! Game state types.

use serde::Serialize;

use crate::moves::Move;
use crate::result::RoundResult;

/// Publicly visible step of the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameStep {
    /// A hand must act.
    #[default]
    WaitingForMove,
    /// The dealer shows an ace; hands are asked about insurance in turn.
    AskInsurance,
    /// The round is settled.
    GameResult,
}

/// Identifies a hand at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HandRef {
    /// Seat index.
    pub seat: usize,
    /// Index into the seat's hands (for splits).
    pub hand: usize,
}

/// A decision the game is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Request {
    /// Step the answer is for.
    pub step: GameStep,
    /// Hand that must act; `None` while waiting for `next-game`.
    pub hand: Option<HandRef>,
}

/// What [`Game::advance`](super::Game::advance) stopped on.
#[derive(Debug, Clone)]
pub enum Advance {
    /// The round is suspended until the request is answered.
    NeedInput(Request),
    /// The round finished and the table was reset for the next one.
    RoundComplete(RoundResult),
}

/// Supplies human decisions.
pub trait MoveReader {
    /// Returns the next decision, or `None` if there is none yet.
    fn next_move(&mut self, request: &Request) -> Option<Move>;
}

impl<F> MoveReader for F
where
    F: FnMut(&Request) -> Option<Move>,
{
    fn next_move(&mut self, request: &Request) -> Option<Move> {
        self(request)
    }
}

/// Where the round execution resumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    Deal,
    Insurance { seat: usize, hand: usize },
    Play { seat: usize, hand: usize },
    Dealer,
    Settle,
    Result,
    Cleanup,
}
