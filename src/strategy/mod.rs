//! Decision checking against basic strategy and count-based deviations.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde::Serialize;

use crate::card::Card;
use crate::game::GameStep;
use crate::hand::Hand;
use crate::moves::Move;
use crate::options::GameOptions;

mod chart;
pub mod deviation;

pub use chart::{Chart, Code, HandShape, UncommonHand, chart_for};
pub use deviation::{DeviationAdvisor, HiLoDeviations};

/// Double after split is not configurable and is treated as always allowed.
const DOUBLE_AFTER_SPLIT: bool = true;

/// Public table state an advisor may look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundContext {
    /// Current step of the round.
    pub step: GameStep,
    /// Dealer's up-card, once dealt.
    pub dealer_up_card: Option<Card>,
    /// Hands the deciding player has in play.
    pub hands_in_play: usize,
    /// Hand slots per player.
    pub max_hands: usize,
    /// Running count of the shoe.
    pub running_count: i32,
    /// Running count per remaining deck.
    pub true_count: f64,
}

/// Result of checking a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "kebab-case")]
pub enum Verdict {
    /// The move matches the recommendation.
    Correct,
    /// The move differs; the hint names the recommended one.
    Mismatch(Hint),
}

impl Verdict {
    /// Returns whether the move was correct.
    #[must_use]
    pub const fn is_correct(&self) -> bool {
        matches!(self, Self::Correct)
    }

    /// Builds a verdict by comparing `input` with `expected`.
    #[must_use]
    pub fn compare(input: Move, expected: Move, code: &str) -> Self {
        if input == expected {
            Self::Correct
        } else {
            Self::Mismatch(Hint {
                code: code.to_string(),
                expected,
            })
        }
    }
}

/// What should have been played, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hint {
    /// Chart code or deviation name behind the recommendation.
    pub code: String,
    /// The recommended move.
    pub expected: Move,
}

/// Looks up the chart-correct move for a hand.
///
/// The checker holds the rules it needs, copied from [`GameOptions`] when it
/// is built; everything else comes from the [`RoundContext`].
#[derive(Debug, Clone, Copy)]
pub struct BasicStrategyChecker {
    chart: &'static Chart,
    stand_on_soft_17: bool,
    surrender: bool,
    resplit_aces: bool,
}

impl BasicStrategyChecker {
    /// Creates a checker for the table rules.
    #[must_use]
    pub fn new(options: &GameOptions) -> Self {
        Self {
            chart: chart_for(options.decks),
            stand_on_soft_17: options.stand_on_soft_17,
            surrender: options.surrender,
            resplit_aces: options.resplit_aces,
        }
    }

    /// Returns whether the hand is looked up in the pair table.
    #[must_use]
    pub fn splittable(&self, ctx: &RoundContext, hand: &Hand) -> bool {
        if !hand.is_pair() || ctx.hands_in_play >= ctx.max_hands {
            return false;
        }
        !(hand.is_ace_pair() && hand.is_from_split() && !self.resplit_aces)
    }

    /// Returns whether the hand may surrender.
    #[must_use]
    pub fn surrender_allowed(&self, hand: &Hand) -> bool {
        self.surrender && hand.is_first_decision() && !hand.is_from_split()
    }

    /// Returns the raw chart cell for the hand.
    ///
    /// Returns `None` before the dealer has an up-card.
    #[must_use]
    pub fn lookup(&self, ctx: &RoundContext, hand: &Hand) -> Option<Code> {
        let upcard = ctx.dealer_up_card?.value();
        let (shape, total) = if self.splittable(ctx, hand) {
            (HandShape::Pair, hand.cards()[0].value())
        } else if hand.is_soft() {
            (HandShape::Soft, hand.total())
        } else {
            (HandShape::Hard, hand.total())
        };
        Some(
            self.chart
                .lookup(shape, total, upcard, self.stand_on_soft_17),
        )
    }

    /// Resolves a chart code into a move the hand can make now.
    #[must_use]
    pub fn resolve(&self, code: Code, hand: &Hand) -> Move {
        let first = hand.is_first_decision();
        let surrender = self.surrender_allowed(hand);
        match code {
            Code::H => Move::Hit,
            Code::S => Move::Stand,
            Code::P => Move::Split,
            Code::Dh if first => Move::Double,
            Code::Dh => Move::Hit,
            Code::Ds if first => Move::Double,
            Code::Ds => Move::Stand,
            Code::Ph | Code::Pd if DOUBLE_AFTER_SPLIT => Move::Split,
            Code::Ph => Move::Hit,
            Code::Pd if first => Move::Double,
            Code::Pd => Move::Hit,
            Code::Rp if surrender && DOUBLE_AFTER_SPLIT => Move::Surrender,
            Code::Rp => Move::Split,
            Code::Rh if surrender => Move::Surrender,
            Code::Rh => Move::Hit,
            Code::Rs if surrender => Move::Surrender,
            Code::Rs => Move::Stand,
        }
    }

    /// Returns the recommended move for the current step.
    ///
    /// Basic strategy never takes insurance.
    #[must_use]
    pub fn suggest(&self, ctx: &RoundContext, hand: &Hand) -> Move {
        if ctx.step == GameStep::AskInsurance {
            return Move::NoInsurance;
        }
        self.lookup(ctx, hand)
            .map_or(Move::Stand, |code| self.resolve(code, hand))
    }

    /// Checks a player's move against the recommendation.
    #[must_use]
    pub fn check(&self, ctx: &RoundContext, hand: &Hand, input: Move) -> Verdict {
        if ctx.step == GameStep::AskInsurance {
            return Verdict::compare(input, Move::NoInsurance, "no-insurance");
        }
        let code = self.lookup(ctx, hand).unwrap_or(Code::S);
        Verdict::compare(input, self.resolve(code, hand), code.as_str())
    }

    /// Returns the rare cells of the chart in use.
    #[must_use]
    pub fn uncommon_hands(&self) -> Vec<UncommonHand> {
        self.chart.uncommon_hands(self.stand_on_soft_17, self.surrender)
    }
}

/// Returns the rare cells of the chart for `decks` under the given soft-17
/// and surrender rules.
#[must_use]
pub fn uncommon_hands(decks: u8, stand_on_soft_17: bool, surrender: bool) -> Vec<UncommonHand> {
    chart_for(decks).uncommon_hands(stand_on_soft_17, surrender)
}
