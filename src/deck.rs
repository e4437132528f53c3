//! The canonical 52-card deck used to seed a shoe.

use crate::card::{Card, DECK_SIZE, Suit};

/// A fixed, ordered set of 52 cards.
///
/// A deck has no life of its own: it is consumed into a [`Shoe`](crate::Shoe)
/// when the shoe is built.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: [Card; DECK_SIZE],
}

impl Deck {
    /// Creates a deck in suit-major, rank-minor order, all cards face down.
    #[must_use]
    pub fn new() -> Self {
        let mut cards = [Card::new(Suit::Hearts, 1); DECK_SIZE];
        let mut index = 0;
        for suit in Suit::ALL {
            for rank in 1..=13 {
                cards[index] = Card::new(suit, rank);
                index += 1;
            }
        }
        Self { cards }
    }

    /// Returns the cards of the deck.
    #[must_use]
    pub const fn cards(&self) -> &[Card; DECK_SIZE] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = core::array::IntoIter<Card, DECK_SIZE>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}
