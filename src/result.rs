//! Settlement result types.

extern crate alloc;

use alloc::vec::Vec;

use serde::Serialize;

/// Result of a single hand after settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HandOutcome {
    /// Player wins (dealer busts or player has higher value).
    Win,
    /// Player loses (player busts, dealer has higher value or a natural).
    Lose,
    /// Push (tie).
    Push,
    /// Player has a natural blackjack.
    Blackjack,
    /// Player surrendered.
    Surrendered,
}

/// Which side took a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Winner {
    /// The player.
    Player,
    /// The dealer.
    Dealer,
    /// Nobody.
    Push,
}

impl HandOutcome {
    /// Returns the side that took the hand. Surrender counts as a dealer win.
    #[must_use]
    pub const fn winner(self) -> Winner {
        match self {
            Self::Win | Self::Blackjack => Winner::Player,
            Self::Lose | Self::Surrendered => Winner::Dealer,
            Self::Push => Winner::Push,
        }
    }
}

/// Result for a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HandResult {
    /// The hand index (for split hands).
    pub hand_index: usize,
    /// The outcome of the hand.
    pub outcome: HandOutcome,
    /// The bet amount for this hand.
    pub bet: usize,
    /// Whether the hand was doubled down.
    pub doubled: bool,
    /// The payout amount (returned to the player's balance).
    pub payout: usize,
    /// Insurance bet on this hand (0 if declined).
    pub insurance_bet: usize,
    /// Insurance payout (0 unless insured against a dealer natural).
    pub insurance_payout: usize,
    /// The player's hand value.
    pub player_value: u8,
    /// The dealer's hand value.
    pub dealer_value: u8,
}

/// Result for a single seat after settlement.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerResult {
    /// The seat index.
    pub seat: usize,
    /// Results for each hand (multiple if split).
    pub hands: Vec<HandResult>,
    /// Total returned to the balance, insurance included.
    pub total_payout: usize,
    /// Net result (positive = profit, negative = loss).
    pub net: isize,
    /// Balance after settlement.
    pub balance: usize,
}

/// Result of the entire round.
#[derive(Debug, Clone, Serialize)]
pub struct RoundResult {
    /// Results for each seat.
    pub players: Vec<PlayerResult>,
    /// The dealer's final hand value.
    pub dealer_value: u8,
    /// Whether the dealer busted.
    pub dealer_bust: bool,
    /// Whether the dealer had blackjack.
    pub dealer_blackjack: bool,
    /// Whether the shoe was reshuffled after the round.
    pub reshuffled: bool,
}
