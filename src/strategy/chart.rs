//! Basic strategy charts.
//!
//! Rows are indexed by the player's total (or pair value), columns by the
//! dealer's up-card value from 2 to 11 (ace). Dealer-hits-soft-17 tables are
//! stored as overrides on the stand-on-soft-17 table of the same deck count.

use alloc::vec::Vec;
use core::fmt;

use serde::Serialize;

/// A chart cell: the primary move and what to do when it is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Code {
    /// Hit.
    H,
    /// Stand.
    S,
    /// Split.
    P,
    /// Double, otherwise hit.
    Dh,
    /// Double, otherwise stand.
    Ds,
    /// Split if double after split is allowed, otherwise hit.
    Ph,
    /// Split if double after split is allowed, otherwise double.
    Pd,
    /// Surrender, otherwise hit.
    Rh,
    /// Surrender, otherwise stand.
    Rs,
    /// Surrender, otherwise split.
    Rp,
}

impl Code {
    /// Returns the chart notation of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::H => "H",
            Self::S => "S",
            Self::P => "P",
            Self::Dh => "Dh",
            Self::Ds => "Ds",
            Self::Ph => "Ph",
            Self::Pd => "Pd",
            Self::Rh => "Rh",
            Self::Rs => "Rs",
            Self::Rp => "Rp",
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which table of a chart a hand is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HandShape {
    /// No ace counted as 11.
    Hard,
    /// An ace counted as 11.
    Soft,
    /// Two cards of equal value that may be split.
    Pair,
}

impl HandShape {
    /// Returns the smallest and largest charted row for the shape.
    #[must_use]
    pub const fn range(self) -> (u8, u8) {
        match self {
            Self::Hard => (HARD_MIN, HARD_MIN + HARD_ROWS as u8 - 1),
            Self::Soft => (SOFT_MIN, SOFT_MIN + SOFT_ROWS as u8 - 1),
            Self::Pair => (PAIR_MIN, PAIR_MIN + PAIR_ROWS as u8 - 1),
        }
    }
}

/// A chart cell that comes up rarely in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UncommonHand {
    /// Table of the cell.
    pub shape: HandShape,
    /// Row: player total, or the value of one card of the pair.
    pub total: u8,
    /// Column: dealer up-card value (11 = ace).
    pub upcard: u8,
    /// Chart code in the cell.
    pub code: Code,
}

impl UncommonHand {
    /// Returns two ranks that make the player's hand for this cell.
    #[must_use]
    pub const fn player_ranks(&self) -> [u8; 2] {
        match self.shape {
            HandShape::Pair => {
                let rank = value_to_rank(self.total);
                [rank, rank]
            }
            HandShape::Soft => [1, self.total.saturating_sub(11)],
            HandShape::Hard => {
                let first = if self.total >= 12 {
                    10
                } else {
                    self.total.saturating_sub(2)
                };
                let second = self.total.saturating_sub(first);
                [first, if second > 10 { 10 } else { second }]
            }
        }
    }

    /// Returns the rank of the dealer's up-card for this cell.
    #[must_use]
    pub const fn dealer_rank(&self) -> u8 {
        value_to_rank(self.upcard)
    }
}

const fn value_to_rank(value: u8) -> u8 {
    if value == 11 { 1 } else { value }
}

const HARD_MIN: u8 = 5;
const HARD_ROWS: usize = 17;
const SOFT_MIN: u8 = 13;
const SOFT_ROWS: usize = 9;
const PAIR_MIN: u8 = 2;
const PAIR_ROWS: usize = 10;
const COLUMNS: usize = 10;

type Row = [Code; COLUMNS];

/// One deck-count specific chart.
#[derive(Debug)]
pub struct Chart {
    name: &'static str,
    hard: [Row; HARD_ROWS],
    soft: [Row; SOFT_ROWS],
    pairs: [Row; PAIR_ROWS],
    hits_soft_17: &'static [(HandShape, u8, u8, Code)],
}

impl Chart {
    /// Returns the name of the chart.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Looks up a cell, clamping the row into the charted range.
    ///
    /// `upcard` is the dealer's up-card value (2..=11).
    #[must_use]
    pub fn lookup(&self, shape: HandShape, total: u8, upcard: u8, stand_on_soft_17: bool) -> Code {
        let (min, max) = shape.range();
        let row = total.clamp(min, max);
        let column = upcard.clamp(2, 11);

        if !stand_on_soft_17 {
            if let Some(&(_, _, _, code)) = self
                .hits_soft_17
                .iter()
                .find(|(s, t, u, _)| *s == shape && *t == row && *u == column)
            {
                return code;
            }
        }

        let index = usize::from(row - min);
        let column = usize::from(column - 2);
        match shape {
            HandShape::Hard => self.hard[index][column],
            HandShape::Soft => self.soft[index][column],
            HandShape::Pair => self.pairs[index][column],
        }
    }

    /// Returns every rare cell of the chart, row by row.
    ///
    /// Surrender cells only count when the table allows surrender; otherwise
    /// they play as their fallback.
    #[must_use]
    pub fn uncommon_hands(&self, stand_on_soft_17: bool, surrender: bool) -> Vec<UncommonHand> {
        let mut hands = Vec::new();
        for shape in [HandShape::Hard, HandShape::Soft, HandShape::Pair] {
            let (min, max) = shape.range();
            for total in min..=max {
                for upcard in 2..=11 {
                    let code = self.lookup(shape, total, upcard, stand_on_soft_17);
                    if is_uncommon(shape, total, code, surrender) {
                        hands.push(UncommonHand {
                            shape,
                            total,
                            upcard,
                            code,
                        });
                    }
                }
            }
        }
        hands
    }
}

/// Surrenders anywhere, conditional doubles and splits on soft and pair rows,
/// and splits other than aces and eights.
const fn is_uncommon(shape: HandShape, total: u8, code: Code, surrender: bool) -> bool {
    match (shape, code) {
        (_, Code::Rh | Code::Rs | Code::Rp) => surrender,
        (HandShape::Hard, _) => false,
        (HandShape::Pair, Code::P) => !matches!(total, 8 | 11),
        (_, Code::Dh | Code::Ds | Code::Ph | Code::Pd) => true,
        _ => false,
    }
}

/// Returns the chart for a deck count.
///
/// Deck counts without a dedicated chart use the multi-deck chart.
#[must_use]
pub fn chart_for(decks: u8) -> &'static Chart {
    match decks {
        1 => &SINGLE_DECK,
        2 => &DOUBLE_DECK,
        4..=8 => &MULTI_DECK,
        _ => {
            tracing::warn!(decks, "no chart for deck count, using the multi-deck chart");
            &MULTI_DECK
        }
    }
}

use Code::{Dh, Ds, H, P, Pd, Ph, Rh, Rp, Rs, S};

const ALL_H: Row = [H; COLUMNS];
const ALL_S: Row = [S; COLUMNS];
const ALL_P: Row = [P; COLUMNS];

static SINGLE_DECK: Chart = Chart {
    name: "single-deck",
    hard: [
        ALL_H,                              // 5
        ALL_H,                              // 6
        ALL_H,                              // 7
        [H, H, H, Dh, Dh, H, H, H, H, H],   // 8
        [Dh, Dh, Dh, Dh, Dh, H, H, H, H, H], // 9
        [Dh, Dh, Dh, Dh, Dh, Dh, Dh, Dh, H, H], // 10
        [Dh; COLUMNS],                      // 11
        [H, H, S, S, S, H, H, H, H, H],     // 12
        [S, S, S, S, S, H, H, H, H, H],     // 13
        [S, S, S, S, S, H, H, H, H, H],     // 14
        [S, S, S, S, S, H, H, H, H, H],     // 15
        [S, S, S, S, S, H, H, H, Rh, Rh],   // 16
        ALL_S,                              // 17
        ALL_S,
        ALL_S,
        ALL_S,
        ALL_S,
    ],
    soft: [
        [H, H, H, Dh, Dh, H, H, H, H, H],    // A2
        [H, H, H, Dh, Dh, H, H, H, H, H],    // A3
        [H, H, Dh, Dh, Dh, H, H, H, H, H],   // A4
        [H, H, Dh, Dh, Dh, H, H, H, H, H],   // A5
        [Dh, Dh, Dh, Dh, Dh, H, H, H, H, H], // A6
        [S, Ds, Ds, Ds, Ds, S, S, H, H, S],  // A7
        [S, S, S, S, Ds, S, S, S, S, S],     // A8
        ALL_S,
        ALL_S,
    ],
    pairs: [
        [Ph, P, P, P, P, P, H, H, H, H],         // 2-2
        [Ph, Ph, P, P, P, P, Ph, H, H, H],       // 3-3
        [H, H, Ph, Pd, Pd, H, H, H, H, H],       // 4-4
        [Dh, Dh, Dh, Dh, Dh, Dh, Dh, Dh, H, H],  // 5-5
        [P, P, P, P, P, Ph, H, H, H, H],         // 6-6
        [P, P, P, P, P, P, Ph, H, Rs, H],        // 7-7
        ALL_P,                                   // 8-8
        [P, P, P, P, P, S, P, P, S, S],          // 9-9
        ALL_S,                                   // T-T
        ALL_P,                                   // A-A
    ],
    hits_soft_17: &[
        (HandShape::Soft, 18, 11, H),
        (HandShape::Hard, 17, 11, Rs),
        (HandShape::Pair, 8, 11, Rp),
    ],
};

static DOUBLE_DECK: Chart = Chart {
    name: "double-deck",
    hard: [
        ALL_H,
        ALL_H,
        ALL_H,
        ALL_H,
        [Dh, Dh, Dh, Dh, Dh, H, H, H, H, H],
        [Dh, Dh, Dh, Dh, Dh, Dh, Dh, Dh, H, H],
        [Dh; COLUMNS],
        [H, H, S, S, S, H, H, H, H, H],
        [S, S, S, S, S, H, H, H, H, H],
        [S, S, S, S, S, H, H, H, H, H],
        [S, S, S, S, S, H, H, H, Rh, H],
        [S, S, S, S, S, H, H, H, Rh, Rh],
        ALL_S,
        ALL_S,
        ALL_S,
        ALL_S,
        ALL_S,
    ],
    soft: [
        [H, H, H, Dh, Dh, H, H, H, H, H],
        [H, H, H, Dh, Dh, H, H, H, H, H],
        [H, H, Dh, Dh, Dh, H, H, H, H, H],
        [H, H, Dh, Dh, Dh, H, H, H, H, H],
        [H, Dh, Dh, Dh, Dh, H, H, H, H, H],
        [S, Ds, Ds, Ds, Ds, S, S, H, H, H],
        ALL_S,
        ALL_S,
        ALL_S,
    ],
    pairs: [
        [Ph, Ph, P, P, P, P, H, H, H, H],
        [Ph, Ph, P, P, P, P, H, H, H, H],
        [H, H, H, Ph, Ph, H, H, H, H, H],
        [Dh, Dh, Dh, Dh, Dh, Dh, Dh, Dh, H, H],
        [P, P, P, P, P, Ph, H, H, H, H],
        [P, P, P, P, P, P, Ph, H, H, H],
        ALL_P,
        [P, P, P, P, P, S, P, P, S, S],
        ALL_S,
        ALL_P,
    ],
    hits_soft_17: &[
        (HandShape::Soft, 18, 2, Ds),
        (HandShape::Soft, 19, 6, Ds),
        (HandShape::Hard, 15, 11, Rh),
        (HandShape::Hard, 17, 11, Rs),
        (HandShape::Pair, 8, 11, Rp),
    ],
};

static MULTI_DECK: Chart = Chart {
    name: "multi-deck",
    hard: [
        ALL_H,
        ALL_H,
        ALL_H,
        ALL_H,
        [H, Dh, Dh, Dh, Dh, H, H, H, H, H],
        [Dh, Dh, Dh, Dh, Dh, Dh, Dh, Dh, H, H],
        [Dh, Dh, Dh, Dh, Dh, Dh, Dh, Dh, Dh, H],
        [H, H, S, S, S, H, H, H, H, H],
        [S, S, S, S, S, H, H, H, H, H],
        [S, S, S, S, S, H, H, H, H, H],
        [S, S, S, S, S, H, H, H, Rh, H],
        [S, S, S, S, S, H, H, Rh, Rh, Rh],
        ALL_S,
        ALL_S,
        ALL_S,
        ALL_S,
        ALL_S,
    ],
    soft: [
        [H, H, H, Dh, Dh, H, H, H, H, H],
        [H, H, H, Dh, Dh, H, H, H, H, H],
        [H, H, Dh, Dh, Dh, H, H, H, H, H],
        [H, H, Dh, Dh, Dh, H, H, H, H, H],
        [H, Dh, Dh, Dh, Dh, H, H, H, H, H],
        [S, Ds, Ds, Ds, Ds, S, S, H, H, H],
        ALL_S,
        ALL_S,
        ALL_S,
    ],
    pairs: [
        [Ph, Ph, P, P, P, P, H, H, H, H],
        [Ph, Ph, P, P, P, P, H, H, H, H],
        [H, H, H, Ph, Ph, H, H, H, H, H],
        [Dh, Dh, Dh, Dh, Dh, Dh, Dh, Dh, H, H],
        [Ph, P, P, P, P, H, H, H, H, H],
        [P, P, P, P, P, P, H, H, H, H],
        ALL_P,
        [P, P, P, P, P, S, P, P, S, S],
        ALL_S,
        ALL_P,
    ],
    hits_soft_17: &[
        (HandShape::Hard, 11, 11, Dh),
        (HandShape::Soft, 18, 2, Ds),
        (HandShape::Soft, 19, 6, Ds),
        (HandShape::Hard, 15, 11, Rh),
        (HandShape::Hard, 17, 11, Rs),
        (HandShape::Pair, 8, 11, Rp),
    ],
};
