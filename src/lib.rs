//! Rules engine for a blackjack trainer with optional `no_std` support.
//!
//! The crate provides a [`Game`] type that runs rounds on a countable,
//! multi-deck [`Shoe`], checks human decisions against basic strategy and
//! Hi-Lo index plays, and reports every state change to observers.
//!
//! # Example
//!
//! ```
//! use bjtrain::{Game, GameOptions, Move, Request};
//!
//! let options = GameOptions::default().with_wait_for_next_game(false);
//! let mut game = Game::new(options, 42).unwrap();
//!
//! // A player that always stands and never buys insurance.
//! let mut reader = |request: &Request| {
//!     Some(match request.step {
//!         bjtrain::GameStep::AskInsurance => Move::NoInsurance,
//!         _ => Move::Stand,
//!     })
//! };
//! let result = game.run(&mut reader).unwrap();
//! assert_eq!(result.players.len(), 1);
//! assert_eq!(game.total_cards(), 104);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod deck;
pub mod error;
pub mod event;
pub mod game;
pub mod hand;
pub mod moves;
pub mod options;
pub mod pile;
pub mod player;
pub mod result;
pub mod shoe;
pub mod strategy;

// Re-export main types
pub use card::{Card, DECK_SIZE, Suit};
pub use deck::Deck;
pub use error::{ConfigError, ParseError, RoundError};
pub use event::{Event, EventLog, HandView, MoveRecord, Observer, SeatView, Snapshot};
pub use game::{Advance, Game, GameStep, HandRef, MoveReader, Request};
pub use hand::{Hand, HandStatus};
pub use moves::Move;
pub use options::{GameMode, GameOptions, PayoutRatio, RoundingMode};
pub use pile::{CardPile, DiscardTray};
pub use player::{Player, Strategy};
pub use result::{HandOutcome, HandResult, PlayerResult, RoundResult, Winner};
pub use shoe::{DealLayout, Shoe};
pub use strategy::{
    BasicStrategyChecker, DeviationAdvisor, HiLoDeviations, Hint, RoundContext, Verdict,
};
