//! Card types.

use serde::Serialize;

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Suit {
    /// Hearts.
    Hearts,
    /// Diamonds.
    Diamonds,
    /// Clubs.
    Clubs,
    /// Spades.
    Spades,
}

impl Suit {
    /// All four suits in canonical deck order.
    pub const ALL: [Self; 4] = [Self::Hearts, Self::Diamonds, Self::Clubs, Self::Spades];
}

/// A playing card.
///
/// Everything except `visible` is fixed at creation. A card is dealt either
/// face up or face down; a face-down card is flipped at most once, when the
/// dealer reveals the hole card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Card {
    /// The suit of the card.
    pub suit: Suit,
    /// The rank of the card (1 = Ace, 11 = Jack, 12 = Queen, 13 = King).
    pub rank: u8,
    /// Whether the card is face up.
    pub visible: bool,
}

impl Card {
    /// Creates a new face-down card.
    ///
    /// Note: This function does not validate the rank. Values outside 1..=13
    /// are accepted but count as zero towards a hand total.
    #[must_use]
    pub const fn new(suit: Suit, rank: u8) -> Self {
        Self {
            suit,
            rank,
            visible: false,
        }
    }

    /// Returns the blackjack value of the card (ace = 11, faces = 10).
    #[must_use]
    pub const fn value(&self) -> u8 {
        rank_value(self.rank)
    }

    /// Returns the Hi-Lo counting value of the card.
    ///
    /// Twos through sixes count +1, sevens through nines 0, tens, faces and
    /// aces -1.
    #[must_use]
    pub const fn counting_value(&self) -> i32 {
        match self.rank {
            2..=6 => 1,
            7..=9 => 0,
            1 | 10..=13 => -1,
            _ => 0,
        }
    }

    /// Returns whether the card is an ace.
    #[must_use]
    pub const fn is_ace(&self) -> bool {
        self.rank == 1
    }

    /// Returns whether the card is worth ten (ten, jack, queen or king).
    #[must_use]
    pub const fn is_ten_value(&self) -> bool {
        matches!(self.rank, 10..=13)
    }
}

/// Blackjack value of a rank (ace = 11, faces = 10).
#[must_use]
pub const fn rank_value(rank: u8) -> u8 {
    match rank {
        1 => 11,
        2..=10 => rank,
        11..=13 => 10,
        _ => 0,
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;
