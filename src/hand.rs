//! Hand representation shared by players and the dealer.

extern crate alloc;

use alloc::vec::Vec;

use serde::Serialize;

use crate::card::Card;
use crate::result::HandOutcome;

/// Hand status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HandStatus {
    /// Hand is active and can take actions.
    #[default]
    Active,
    /// Player has stood (or doubled without busting).
    Stand,
    /// Hand has busted (over 21).
    Bust,
    /// Hand is a natural blackjack.
    Blackjack,
    /// Player has surrendered.
    Surrendered,
}

/// A set of cards with its stake and derived totals.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
    status: HandStatus,
    bet: usize,
    from_split: bool,
    /// Whether a decision has been taken on this hand.
    acted: bool,
    doubled: bool,
    insurance_bet: usize,
    insurance_payout: usize,
    outcome: Option<HandOutcome>,
    payout: usize,
}

impl Hand {
    /// Creates a new empty hand with the given bet.
    #[must_use]
    pub const fn new(bet: usize) -> Self {
        Self {
            cards: Vec::new(),
            status: HandStatus::Active,
            bet,
            from_split: false,
            acted: false,
            doubled: false,
            insurance_bet: 0,
            insurance_payout: 0,
            outcome: None,
            payout: 0,
        }
    }

    /// Creates a new hand from a split with a single card.
    #[must_use]
    pub fn from_split(card: Card, bet: usize) -> Self {
        let mut hand = Self::new(bet);
        hand.cards.push(card);
        hand.from_split = true;
        hand
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);

        if self.is_bust() {
            self.status = HandStatus::Bust;
        } else if self.is_blackjack() {
            self.status = HandStatus::Blackjack;
        }
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub(crate) fn cards_mut(&mut self) -> &mut [Card] {
        &mut self.cards
    }

    /// Returns the first card, which is the dealer's up-card.
    #[must_use]
    pub fn up_card(&self) -> Option<&Card> {
        self.cards.first()
    }

    /// Returns the current status of the hand.
    #[must_use]
    pub const fn status(&self) -> HandStatus {
        self.status
    }

    /// Sets the hand status.
    pub const fn set_status(&mut self, status: HandStatus) {
        self.status = status;
    }

    /// Returns the bet amount for this hand.
    #[must_use]
    pub const fn bet(&self) -> usize {
        self.bet
    }

    /// Doubles the bet amount.
    pub const fn double_bet(&mut self) {
        self.bet *= 2;
        self.doubled = true;
    }

    /// Returns whether the bet was doubled.
    #[must_use]
    pub const fn is_doubled(&self) -> bool {
        self.doubled
    }

    /// Returns whether this hand is from a split.
    #[must_use]
    pub const fn is_from_split(&self) -> bool {
        self.from_split
    }

    /// Marks the hand as produced by a split. A split hand is never a natural.
    pub const fn mark_split(&mut self) {
        self.from_split = true;
        if matches!(self.status, HandStatus::Blackjack) {
            self.status = HandStatus::Active;
        }
    }

    /// Records that a decision was taken on the hand.
    pub const fn mark_acted(&mut self) {
        self.acted = true;
    }

    /// Returns whether the next decision is the hand's first one.
    #[must_use]
    pub fn is_first_decision(&self) -> bool {
        !self.acted && self.cards.len() == 2
    }

    /// Total with every ace counted as 1.
    #[must_use]
    pub fn low_total(&self) -> u8 {
        self.cards
            .iter()
            .map(|c| if c.is_ace() { 1 } else { c.value() })
            .fold(0u8, u8::saturating_add)
    }

    /// Total with one ace counted as 11. Equal to the low total without aces.
    #[must_use]
    pub fn high_total(&self) -> u8 {
        let low = self.low_total();
        if self.cards.iter().any(Card::is_ace) {
            low.saturating_add(10)
        } else {
            low
        }
    }

    /// Returns the playing total: the high total unless it busts.
    #[must_use]
    pub fn total(&self) -> u8 {
        let high = self.high_total();
        if high <= 21 { high } else { self.low_total() }
    }

    /// Returns the total of the face-up cards only.
    #[must_use]
    pub fn visible_total(&self) -> u8 {
        let low = self
            .cards
            .iter()
            .filter(|c| c.visible)
            .map(|c| if c.is_ace() { 1 } else { c.value() })
            .fold(0u8, u8::saturating_add);
        let has_ace = self.cards.iter().any(|c| c.visible && c.is_ace());
        if has_ace && low <= 11 { low + 10 } else { low }
    }

    /// Returns whether the hand is soft (an ace counts as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        self.high_total() != self.low_total() && self.high_total() <= 21
    }

    /// Returns whether the hand is two cards of equal value.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].value() == self.cards[1].value()
    }

    /// Returns whether the hand is two aces.
    #[must_use]
    pub fn is_ace_pair(&self) -> bool {
        self.cards.len() == 2 && self.cards.iter().all(Card::is_ace)
    }

    /// Returns whether the hand is bust.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.total() > 21
    }

    /// Returns whether the hand is a natural: 21 in two cards, not from a split.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.total() == 21 && !self.from_split
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Removes and returns the second card (for splitting).
    pub fn take_split_card(&mut self) -> Option<Card> {
        if self.cards.len() == 2 {
            self.cards.pop()
        } else {
            None
        }
    }

    /// Returns the insurance bet placed on the hand.
    #[must_use]
    pub const fn insurance_bet(&self) -> usize {
        self.insurance_bet
    }

    pub(crate) const fn set_insurance(&mut self, bet: usize) {
        self.insurance_bet = bet;
    }

    /// Returns the insurance payout credited to the hand.
    #[must_use]
    pub const fn insurance_payout(&self) -> usize {
        self.insurance_payout
    }

    pub(crate) const fn set_insurance_payout(&mut self, payout: usize) {
        self.insurance_payout = payout;
    }

    /// Returns the outcome, once the hand is settled.
    #[must_use]
    pub const fn outcome(&self) -> Option<HandOutcome> {
        self.outcome
    }

    /// Returns the amount returned to the balance on settlement.
    #[must_use]
    pub const fn payout(&self) -> usize {
        self.payout
    }

    /// Returns whether the hand has been settled.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.outcome.is_some()
    }

    pub(crate) const fn settle(&mut self, outcome: HandOutcome, payout: usize) {
        self.outcome = Some(outcome);
        self.payout = payout;
    }

    /// Empties the hand for the next round, returning its cards.
    pub fn clear(&mut self) -> Vec<Card> {
        let cards = core::mem::take(&mut self.cards);
        *self = Self::new(0);
        cards
    }
}
