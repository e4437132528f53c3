//! Change events published by the game.
//!
//! The game is the only state holder; it publishes an [`Event`] after each
//! state change. Delivery beyond the [`Observer`] call is up to the observer.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use serde::Serialize;

use crate::card::Card;
use crate::game::{GameStep, HandRef};
use crate::hand::{Hand, HandStatus};
use crate::moves::Move;
use crate::player::{Player, Strategy};
use crate::result::{HandOutcome, Winner};
use crate::strategy::{RoundContext, Verdict};

/// Something observers are told about.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum Event {
    /// Table state changed.
    Change(Snapshot),
    /// The shoe was reshuffled.
    Shuffle {
        /// Running count after the shuffle.
        running_count: i32,
        /// Cards in the shoe.
        cards: usize,
    },
    /// A human decision was checked.
    CreateRecord(MoveRecord),
    /// A hand was settled.
    HandWinner {
        /// The settled hand.
        hand: HandRef,
        /// How it ended.
        outcome: HandOutcome,
        /// Who took it.
        winner: Winner,
    },
}

/// Receives events from a game.
pub trait Observer {
    /// Called after every state change, in order.
    fn notify(&mut self, event: &Event);
}

impl<F> Observer for F
where
    F: FnMut(&Event),
{
    fn notify(&mut self, event: &Event) {
        self(event);
    }
}

/// An observer that keeps every event, shareable between the game and the
/// code inspecting it.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<Event>>>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the events received so far.
    #[must_use]
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Returns the move records received so far.
    #[must_use]
    pub fn records(&self) -> Vec<MoveRecord> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::CreateRecord(record) => Some(record.clone()),
                _ => None,
            })
            .collect()
    }

    /// Returns the number of events received.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Returns whether no event was received.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Drops every event received so far.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl Observer for EventLog {
    fn notify(&mut self, event: &Event) {
        self.events.borrow_mut().push(event.clone());
    }
}

/// A checked human decision, for downstream record keeping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveRecord {
    /// The hand that moved.
    pub hand: HandRef,
    /// Step the decision was taken in.
    pub step: GameStep,
    /// The hand's cards at decision time.
    pub cards: Vec<Card>,
    /// The hand's total at decision time.
    pub total: u8,
    /// Whether the total was soft.
    pub soft: bool,
    /// Dealer's up-card.
    pub dealer_up_card: Option<Card>,
    /// The move played.
    pub input: Move,
    /// How it compared to the recommendation.
    pub verdict: Verdict,
    /// Running count at decision time.
    pub running_count: i32,
    /// True count at decision time.
    pub true_count: f64,
}

impl MoveRecord {
    pub(crate) fn new(
        at: HandRef,
        ctx: &RoundContext,
        hand: &Hand,
        input: Move,
        verdict: Verdict,
    ) -> Self {
        Self {
            hand: at,
            step: ctx.step,
            cards: hand.cards().to_vec(),
            total: hand.total(),
            soft: hand.is_soft(),
            dealer_up_card: ctx.dealer_up_card,
            input,
            verdict,
            running_count: ctx.running_count,
            true_count: ctx.true_count,
        }
    }
}

/// Public view of a hand. Face-down cards are hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandView {
    /// Cards, `None` for a face-down card.
    pub cards: Vec<Option<Card>>,
    /// Total of the face-up cards.
    pub total: u8,
    /// Stake.
    pub bet: usize,
    /// Whether the stake was doubled.
    pub doubled: bool,
    /// Status.
    pub status: HandStatus,
    /// Outcome once settled.
    pub outcome: Option<HandOutcome>,
}

impl From<&Hand> for HandView {
    fn from(hand: &Hand) -> Self {
        Self {
            cards: hand
                .cards()
                .iter()
                .map(|c| c.visible.then_some(*c))
                .collect(),
            total: hand.visible_total(),
            bet: hand.bet(),
            doubled: hand.is_doubled(),
            status: hand.status(),
            outcome: hand.outcome(),
        }
    }
}

/// Public view of a seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatView {
    /// Seat index.
    pub seat: usize,
    /// Decision strategy.
    pub strategy: Strategy,
    /// Balance.
    pub balance: usize,
    /// Hands in play.
    pub hands: Vec<HandView>,
}

impl From<&Player> for SeatView {
    fn from(player: &Player) -> Self {
        Self {
            seat: player.seat(),
            strategy: player.strategy(),
            balance: player.balance(),
            hands: player.hands().iter().map(HandView::from).collect(),
        }
    }
}

/// Serializable table state carried by [`Event::Change`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Current step.
    pub step: GameStep,
    /// Hand awaiting input, if any.
    pub focused: Option<HandRef>,
    /// Dealer's hand.
    pub dealer: HandView,
    /// Seats in table order.
    pub players: Vec<SeatView>,
    /// Running count.
    pub running_count: i32,
    /// True count.
    pub true_count: f64,
    /// Percentage of the shoe dealt.
    pub penetration: f64,
    /// Cards left in the shoe.
    pub cards_remaining: usize,
    /// Human decisions seen this session.
    pub moves_seen: usize,
    /// Human decisions that matched the advisor.
    pub moves_correct: usize,
}
