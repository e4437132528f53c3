//! Plain card-holding containers.

use alloc::vec::Vec;

use crate::card::Card;

/// An ordered pile of cards with no counting logic.
///
/// The shoe keeps its live cards in a `CardPile` and layers counting on top;
/// the discard tray is a bare pile.
#[derive(Debug, Clone, Default)]
pub struct CardPile {
    cards: Vec<Card>,
}

/// Where dealt cards go at the end of a round.
pub type DiscardTray = CardPile;

impl CardPile {
    /// Creates an empty pile.
    #[must_use]
    pub const fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Creates an empty pile with room for `capacity` cards.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cards: Vec::with_capacity(capacity),
        }
    }

    /// Adds cards on top of the pile.
    pub fn add_cards<I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = Card>,
    {
        self.cards.extend(cards);
    }

    /// Removes and returns every card in the pile.
    pub fn remove_all(&mut self) -> Vec<Card> {
        core::mem::take(&mut self.cards)
    }

    /// Removes the top card.
    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Returns the cards, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub(crate) fn cards_mut(&mut self) -> &mut [Card] {
        &mut self.cards
    }

    /// Returns the number of cards in the pile.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the pile is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
