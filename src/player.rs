//! Seats at the table and the dealer.

use alloc::vec::Vec;

use serde::Serialize;

use crate::card::Card;
use crate::error::RoundError;
use crate::hand::Hand;

/// How a seat makes its decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Decisions come from the input collaborator.
    Human,
    /// Plays the basic strategy chart.
    BasicStrategy,
    /// Plays count-based deviations first, basic strategy otherwise.
    DeviationAware,
    /// Fixed dealer rules.
    Dealer,
}

impl Strategy {
    /// Returns whether the seat waits for outside input.
    #[must_use]
    pub const fn is_human(self) -> bool {
        matches!(self, Self::Human)
    }
}

/// A seat with a fixed pool of hand slots and a balance.
///
/// Slots are allocated once; a round uses the first `active_hands` of them.
#[derive(Debug, Clone)]
pub struct Player {
    seat: usize,
    strategy: Strategy,
    hands: Vec<Hand>,
    active_hands: usize,
    balance: usize,
    bet: usize,
}

impl Player {
    /// Creates a seat with `max_hands` hand slots.
    #[must_use]
    pub fn new(seat: usize, strategy: Strategy, max_hands: usize, balance: usize, bet: usize) -> Self {
        Self {
            seat,
            strategy,
            hands: (0..max_hands.max(1)).map(|_| Hand::new(0)).collect(),
            active_hands: 0,
            balance,
            bet,
        }
    }

    /// Creates the dealer: one hand, no balance.
    #[must_use]
    pub fn dealer() -> Self {
        Self::new(usize::MAX, Strategy::Dealer, 1, 0, 0)
    }

    /// Returns the seat index.
    #[must_use]
    pub const fn seat(&self) -> usize {
        self.seat
    }

    /// Returns the seat's strategy.
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Returns whether this is the dealer.
    #[must_use]
    pub const fn is_dealer(&self) -> bool {
        matches!(self.strategy, Strategy::Dealer)
    }

    /// Returns the balance.
    #[must_use]
    pub const fn balance(&self) -> usize {
        self.balance
    }

    /// Returns the stake posted at the start of each round.
    #[must_use]
    pub const fn bet(&self) -> usize {
        self.bet
    }

    pub(crate) const fn set_bet(&mut self, bet: usize) {
        self.bet = bet;
    }

    /// Takes `amount` from the balance.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::InsufficientFunds`] without touching the balance
    /// if it cannot cover the whole amount.
    pub fn stake(&mut self, amount: usize) -> Result<(), RoundError> {
        if self.balance < amount {
            return Err(RoundError::InsufficientFunds {
                seat: self.seat,
                needed: amount,
                balance: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    /// Adds `amount` to the balance.
    pub const fn credit(&mut self, amount: usize) {
        self.balance += amount;
    }

    /// Returns the hands in play this round.
    #[must_use]
    pub fn hands(&self) -> &[Hand] {
        &self.hands[..self.active_hands]
    }

    /// Returns a hand in play.
    #[must_use]
    pub fn hand(&self, index: usize) -> Option<&Hand> {
        self.hands().get(index)
    }

    /// Returns a hand in play, mutably.
    pub fn hand_mut(&mut self, index: usize) -> Option<&mut Hand> {
        self.hands[..self.active_hands].get_mut(index)
    }

    /// Returns the number of hands in play.
    #[must_use]
    pub const fn active_hands(&self) -> usize {
        self.active_hands
    }

    /// Returns the number of hand slots.
    #[must_use]
    pub fn max_hands(&self) -> usize {
        self.hands.len()
    }

    /// Opens the first hand of a round with the given stake.
    pub fn open_hand(&mut self, bet: usize) -> &mut Hand {
        self.active_hands = 1;
        self.hands[0] = Hand::new(bet);
        &mut self.hands[0]
    }

    /// Splits the hand at `index` into the next free slot.
    ///
    /// Both hands are flagged as split hands; each keeps one card. Returns the
    /// index of the new hand, or `None` if the hand cannot be split or no
    /// slot is free.
    pub fn split_hand(&mut self, index: usize) -> Option<usize> {
        if self.active_hands >= self.hands.len() {
            return None;
        }
        let hand = self.hand_mut(index)?;
        let bet = hand.bet();
        let card = hand.take_split_card()?;
        hand.mark_split();

        let new_index = self.active_hands;
        self.hands[new_index] = Hand::from_split(card, bet);
        self.active_hands += 1;
        Some(new_index)
    }

    /// Empties every hand, returning the cards.
    pub fn clear_hands(&mut self) -> Vec<Card> {
        let mut cards = Vec::new();
        for hand in &mut self.hands[..self.active_hands] {
            cards.extend(hand.clear());
        }
        self.active_hands = 0;
        cards
    }

    /// Returns the number of cards held across all hands.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.hands().iter().map(Hand::len).sum()
    }
}
