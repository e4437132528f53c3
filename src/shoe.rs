//! The shoe: the live, countable card supply.

use alloc::vec::Vec;

use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, DECK_SIZE};
use crate::deck::Deck;
use crate::error::ConfigError;
use crate::options::{GameMode, GameOptions};
use crate::pile::{CardPile, DiscardTray};
use crate::strategy::{UncommonHand, uncommon_hands};

/// Percentage of the shoe left below which it is reshuffled.
const RESHUFFLE_PERCENT: usize = 20;

/// Where a seat's cards fall in the dealing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealLayout {
    /// Seats dealt before the dealer in each pass.
    pub players: usize,
    /// Seat that biased shuffles set up.
    pub target_seat: usize,
}

impl DealLayout {
    /// Draw offset of the seat's first card.
    #[must_use]
    pub const fn first_card(&self) -> usize {
        self.target_seat
    }

    /// Draw offset of the dealer's up-card.
    #[must_use]
    pub const fn dealer_up_card(&self) -> usize {
        self.players
    }

    /// Draw offset of the seat's second card.
    #[must_use]
    pub const fn second_card(&self) -> usize {
        self.players + 1 + self.target_seat
    }
}

/// A multi-deck shoe dealt from the top of a [`CardPile`].
///
/// The running count is the sum of the counting values of every face-up card
/// dealt since the last full reshuffle that has not come back into the shoe.
#[derive(Debug, Clone)]
pub struct Shoe {
    pile: CardPile,
    decks: u8,
    running_count: i32,
    mode: GameMode,
    layout: DealLayout,
    uncommon: Vec<UncommonHand>,
    rng: ChaCha8Rng,
}

impl Shoe {
    /// Builds and shuffles a shoe for the table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroDecks`] if the options ask for no decks.
    pub fn new(options: &GameOptions, seed: u64) -> Result<Self, ConfigError> {
        if options.decks == 0 {
            return Err(ConfigError::ZeroDecks);
        }

        let mut pile = CardPile::with_capacity(usize::from(options.decks) * DECK_SIZE);
        for _ in 0..options.decks {
            pile.add_cards(Deck::new());
        }

        let uncommon = if options.mode == GameMode::GuaranteeUncommonHand {
            uncommon_hands(options.decks, options.stand_on_soft_17, options.surrender)
        } else {
            Vec::new()
        };

        let mut shoe = Self {
            pile,
            decks: options.decks,
            running_count: 0,
            mode: options.mode,
            layout: DealLayout {
                players: usize::from(options.players),
                target_seat: options.human_seat.unwrap_or(0),
            },
            uncommon,
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        shoe.shuffle();
        Ok(shoe)
    }

    /// Shuffles the cards in the shoe, then sets up the mode's scenario.
    pub fn shuffle(&mut self) {
        self.pile.cards_mut().shuffle(&mut self.rng);

        match self.mode {
            GameMode::GuaranteePairs => {
                let rank = self.rng.random_range(1..=13);
                let targets = [
                    (self.layout.first_card(), rank),
                    (self.layout.second_card(), rank),
                ];
                self.place(&targets);
            }
            GameMode::GuaranteeUncommonHand => {
                if let Some(&cell) = self.uncommon.choose(&mut self.rng) {
                    let [first, second] = cell.player_ranks();
                    let targets = [
                        (self.layout.first_card(), first),
                        (self.layout.dealer_up_card(), cell.dealer_rank()),
                        (self.layout.second_card(), second),
                    ];
                    tracing::debug!(shape = ?cell.shape, total = cell.total, upcard = cell.upcard, "setting up uncommon hand");
                    self.place(&targets);
                }
            }
            GameMode::Default | GameMode::DeviationTraining => {}
        }

        tracing::debug!(
            mode = ?self.mode,
            cards = self.pile.len(),
            running_count = self.running_count,
            "shoe shuffled"
        );
    }

    /// Arranges the shoe so the next draws have the given ranks, in order.
    ///
    /// Cards are swapped, never created, so the shoe keeps the same cards.
    /// Returns `false` if a rank could not be found.
    pub fn stack_next(&mut self, ranks: &[u8]) -> bool {
        let targets: Vec<(usize, u8)> = ranks.iter().copied().enumerate().collect();
        self.place(&targets)
    }

    /// Moves a card of each requested rank to its draw offset.
    fn place(&mut self, targets: &[(usize, u8)]) -> bool {
        let cards = self.pile.cards_mut();
        let len = cards.len();
        let mut fixed: Vec<usize> = Vec::with_capacity(targets.len());

        for &(offset, rank) in targets {
            if offset >= len {
                tracing::warn!(offset, len, "draw offset beyond the end of the shoe");
                return false;
            }
            let target = len - 1 - offset;
            let source = if cards[target].rank == rank {
                Some(target)
            } else {
                (0..len).find(|&i| !fixed.contains(&i) && i != target && cards[i].rank == rank)
            };
            let Some(source) = source else {
                tracing::warn!(rank, "no card of the requested rank left to place");
                return false;
            };
            cards.swap(source, target);
            fixed.push(target);
        }
        true
    }

    /// Deals the top card.
    ///
    /// Only a face-up card moves the running count.
    pub fn draw_card(&mut self, showing_face: bool) -> Option<Card> {
        let mut card = self.pile.pop()?;
        card.visible = showing_face;
        if showing_face {
            self.running_count += card.counting_value();
        }
        tracing::trace!(rank = card.rank, showing_face, running_count = self.running_count, "card drawn");
        Some(card)
    }

    /// Turns a face-down card up, counting it.
    pub fn reveal(&mut self, card: &mut Card) {
        if !card.visible {
            card.visible = true;
            self.running_count += card.counting_value();
        }
    }

    /// Puts cards back into the shoe, face down and out of the count.
    pub fn add_cards<I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = Card>,
    {
        for mut card in cards {
            if card.visible {
                self.running_count -= card.counting_value();
                card.visible = false;
            }
            self.pile.add_cards([card]);
        }
    }

    /// Returns every card of the tray to the shoe and reshuffles.
    ///
    /// The caller moves all dealt cards into the tray first; the running count
    /// then starts again from zero.
    pub fn reset(&mut self, tray: &mut DiscardTray) {
        self.add_cards(tray.remove_all());
        if self.running_count != 0 {
            tracing::warn!(running_count = self.running_count, "count drift at reshuffle");
        }
        self.running_count = 0;
        self.shuffle();
    }

    /// Returns the tray to the shoe mid-round and reshuffles, keeping the
    /// count of cards still on the table.
    pub fn refill(&mut self, tray: &mut DiscardTray) {
        self.add_cards(tray.remove_all());
        self.pile.cards_mut().shuffle(&mut self.rng);
        tracing::debug!(cards = self.pile.len(), "shoe refilled from discard tray");
    }

    /// Returns whether the shoe should be reshuffled before the next round.
    ///
    /// Scenario modes reshuffle every round.
    #[must_use]
    pub fn needs_reset(&self) -> bool {
        self.mode.is_single_scenario() || self.pile.len() * 100 < self.total_cards() * RESHUFFLE_PERCENT
    }

    /// Returns the number of cards left to deal.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pile.len()
    }

    /// Returns the number of cards in a full shoe.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        usize::from(self.decks) * DECK_SIZE
    }

    /// Returns the cards left to deal, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        self.pile.cards()
    }

    /// Returns the number of decks.
    #[must_use]
    pub const fn decks(&self) -> u8 {
        self.decks
    }

    /// Returns the scenario mode.
    #[must_use]
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    /// Returns the running count.
    #[must_use]
    pub const fn running_count(&self) -> i32 {
        self.running_count
    }

    /// Returns the percentage of the shoe already dealt.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for card counts"
    )]
    pub fn penetration(&self) -> f64 {
        let total = self.total_cards() as f64;
        (total - self.remaining() as f64) / total * 100.0
    }

    /// Returns the number of decks left to deal.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for card counts"
    )]
    pub fn decks_remaining(&self) -> f64 {
        self.remaining() as f64 / DECK_SIZE as f64
    }

    /// Returns the running count per remaining deck.
    #[must_use]
    pub fn true_count(&self) -> f64 {
        let decks = self.decks_remaining();
        if decks > 0.0 {
            f64::from(self.running_count) / decks
        } else {
            f64::from(self.running_count)
        }
    }
}
