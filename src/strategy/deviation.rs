//! Count-based deviations from basic strategy.

use crate::game::GameStep;
use crate::hand::Hand;
use crate::moves::Move;

use super::{RoundContext, Verdict};

/// An advisor that overrides basic strategy in specific count situations.
///
/// A `None` from [`suggest`](Self::suggest) means "no opinion": the caller
/// falls back to basic strategy.
pub trait DeviationAdvisor {
    /// Returns the deviating move for the hand, if any applies.
    fn suggest(&self, ctx: &RoundContext, hand: &Hand) -> Option<Move>;

    /// Checks a move, returning `None` when no deviation applies.
    fn check(&self, ctx: &RoundContext, hand: &Hand, input: Move) -> Option<Verdict> {
        self.suggest(ctx, hand)
            .map(|expected| Verdict::compare(input, expected, "deviation"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Insurance,
    Hard(u8),
    Pair(u8),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Trigger {
    AtOrAbove(f64),
    AtOrBelow(f64),
}

impl Trigger {
    fn fires(self, true_count: f64) -> bool {
        match self {
            Self::AtOrAbove(index) => true_count >= index,
            Self::AtOrBelow(index) => true_count <= index,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct IndexPlay {
    name: &'static str,
    row: Row,
    /// Dealer up-card value, 11 = ace. Ignored for insurance.
    upcard: u8,
    trigger: Trigger,
    play: Move,
}

const fn play(name: &'static str, row: Row, upcard: u8, trigger: Trigger, play: Move) -> IndexPlay {
    IndexPlay {
        name,
        row,
        upcard,
        trigger,
        play,
    }
}

/// Hi-Lo index plays, most valuable first.
static INDEX_PLAYS: [IndexPlay; 18] = [
    play("insurance", Row::Insurance, 11, Trigger::AtOrAbove(3.0), Move::TakeInsurance),
    play("16v10", Row::Hard(16), 10, Trigger::AtOrAbove(0.0), Move::Stand),
    play("15v10", Row::Hard(15), 10, Trigger::AtOrAbove(4.0), Move::Stand),
    play("TTv5", Row::Pair(10), 5, Trigger::AtOrAbove(5.0), Move::Split),
    play("TTv6", Row::Pair(10), 6, Trigger::AtOrAbove(4.0), Move::Split),
    play("10v10", Row::Hard(10), 10, Trigger::AtOrAbove(4.0), Move::Double),
    play("12v3", Row::Hard(12), 3, Trigger::AtOrAbove(2.0), Move::Stand),
    play("12v2", Row::Hard(12), 2, Trigger::AtOrAbove(3.0), Move::Stand),
    play("11vA", Row::Hard(11), 11, Trigger::AtOrAbove(1.0), Move::Double),
    play("9v2", Row::Hard(9), 2, Trigger::AtOrAbove(1.0), Move::Double),
    play("10vA", Row::Hard(10), 11, Trigger::AtOrAbove(4.0), Move::Double),
    play("9v7", Row::Hard(9), 7, Trigger::AtOrAbove(3.0), Move::Double),
    play("16v9", Row::Hard(16), 9, Trigger::AtOrAbove(5.0), Move::Stand),
    play("13v2", Row::Hard(13), 2, Trigger::AtOrBelow(-1.0), Move::Hit),
    play("12v4", Row::Hard(12), 4, Trigger::AtOrBelow(0.0), Move::Hit),
    play("12v5", Row::Hard(12), 5, Trigger::AtOrBelow(-2.0), Move::Hit),
    play("12v6", Row::Hard(12), 6, Trigger::AtOrBelow(-1.0), Move::Hit),
    play("13v3", Row::Hard(13), 3, Trigger::AtOrBelow(-2.0), Move::Hit),
];

/// The classic Hi-Lo index plays.
///
/// Hard-total plays are skipped for splittable pairs, and doubles only apply
/// on a hand's first decision.
#[derive(Debug, Clone, Copy, Default)]
pub struct HiLoDeviations;

impl HiLoDeviations {
    /// Creates the advisor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn find(&self, ctx: &RoundContext, hand: &Hand) -> Option<&'static IndexPlay> {
        let upcard = ctx.dealer_up_card?.value();

        if ctx.step == GameStep::AskInsurance {
            return INDEX_PLAYS
                .iter()
                .find(|p| p.row == Row::Insurance && p.trigger.fires(ctx.true_count));
        }

        let splittable = hand.is_pair() && ctx.hands_in_play < ctx.max_hands;
        let first = hand.is_first_decision();

        INDEX_PLAYS.iter().find(|p| {
            let row_matches = match p.row {
                Row::Insurance => false,
                Row::Pair(value) => splittable && hand.cards()[0].value() == value,
                Row::Hard(total) => !hand.is_soft() && !splittable && hand.total() == total,
            };
            row_matches
                && p.upcard == upcard
                && (p.play != Move::Double || first)
                && p.trigger.fires(ctx.true_count)
        })
    }
}

impl DeviationAdvisor for HiLoDeviations {
    fn suggest(&self, ctx: &RoundContext, hand: &Hand) -> Option<Move> {
        self.find(ctx, hand).map(|p| p.play)
    }

    fn check(&self, ctx: &RoundContext, hand: &Hand, input: Move) -> Option<Verdict> {
        self.find(ctx, hand)
            .map(|p| Verdict::compare(input, p.play, p.name))
    }
}
