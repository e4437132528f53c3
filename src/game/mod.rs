//! Round engine and table state.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::card::Card;
use crate::error::{ConfigError, RoundError};
use crate::event::{Event, HandView, MoveRecord, Observer, SeatView, Snapshot};
use crate::hand::Hand;
use crate::moves::Move;
use crate::options::{GameMode, GameOptions};
use crate::pile::DiscardTray;
use crate::player::{Player, Strategy};
use crate::result::RoundResult;
use crate::shoe::Shoe;
use crate::strategy::{
    BasicStrategyChecker, DeviationAdvisor, HiLoDeviations, RoundContext, Verdict,
};

mod actions;
mod deal;
mod dealer;
mod insurance;
pub mod state;

pub use state::{Advance, GameStep, HandRef, MoveReader, Request};
use state::Stage;

/// A trainer table: the shoe, the seats, the dealer and the round in play.
///
/// A round is driven by [`advance`](Self::advance), which runs until a human
/// decision is needed or the round is over. Observers registered with
/// [`subscribe`](Self::subscribe) are told about every state change.
pub struct Game {
    options: GameOptions,
    shoe: Shoe,
    tray: DiscardTray,
    players: Vec<Player>,
    dealer: Player,
    checker: BasicStrategyChecker,
    deviations: Box<dyn DeviationAdvisor>,
    observers: Vec<Box<dyn Observer>>,
    step: GameStep,
    stage: Stage,
    focused: Option<HandRef>,
    /// Balances when the current round's bets were taken.
    opening_balances: Vec<usize>,
    moves_seen: usize,
    moves_correct: usize,
}

impl Game {
    /// Creates a table from validated options, shuffling with `seed`.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] found by [`GameOptions::validate`].
    ///
    /// # Example
    ///
    /// ```
    /// use bjtrain::{Game, GameOptions, GameStep};
    ///
    /// let game = Game::new(GameOptions::default(), 42).unwrap();
    /// assert_eq!(game.step(), GameStep::WaitingForMove);
    /// assert_eq!(game.shoe().remaining(), 104);
    /// ```
    pub fn new(options: GameOptions, seed: u64) -> Result<Self, ConfigError> {
        options.validate()?;

        let shoe = Shoe::new(&options, seed)?;
        let max_hands = usize::from(options.max_hands);
        let players = (0..usize::from(options.players))
            .map(|seat| {
                Player::new(
                    seat,
                    options.strategy_for(seat),
                    max_hands,
                    options.starting_balance,
                    options.min_bet,
                )
            })
            .collect();

        tracing::debug!(
            decks = options.decks,
            players = options.players,
            mode = ?options.mode,
            "table created"
        );

        Ok(Self {
            checker: BasicStrategyChecker::new(&options),
            shoe,
            tray: DiscardTray::new(),
            players,
            dealer: Player::dealer(),
            deviations: Box::new(HiLoDeviations::new()),
            observers: Vec::new(),
            step: GameStep::WaitingForMove,
            stage: Stage::Deal,
            focused: None,
            opening_balances: Vec::new(),
            moves_seen: 0,
            moves_correct: 0,
            options,
        })
    }

    /// Replaces the count-based advisor.
    #[must_use]
    pub fn with_deviation_advisor(mut self, advisor: Box<dyn DeviationAdvisor>) -> Self {
        self.deviations = advisor;
        self
    }

    /// Registers an observer for every later event.
    pub fn subscribe(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    /// Runs the round until it needs input or completes.
    ///
    /// `input` answers the last [`Request`]. A move that is not legal for the
    /// requested hand is ignored and the same request is returned. After
    /// [`Advance::RoundComplete`] the next call deals a new round.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::InsufficientFunds`] if a seat cannot cover a
    /// stake, or [`RoundError::ShoeExhausted`] if no card is left anywhere.
    pub fn advance(&mut self, input: Option<Move>) -> Result<Advance, RoundError> {
        let mut input = input;
        loop {
            match self.stage {
                Stage::Deal => self.deal_round()?,
                Stage::Insurance { seat, hand } => {
                    if let Some(request) = self.insurance_turn(seat, hand, &mut input)? {
                        return Ok(Advance::NeedInput(request));
                    }
                }
                Stage::Play { seat, hand } => {
                    if let Some(request) = self.play_turn(seat, hand, &mut input)? {
                        return Ok(Advance::NeedInput(request));
                    }
                }
                Stage::Dealer => self.dealer_turn()?,
                Stage::Settle => self.settle_round(),
                Stage::Result => {
                    if let Some(request) = self.result_turn(&mut input) {
                        return Ok(Advance::NeedInput(request));
                    }
                }
                Stage::Cleanup => return Ok(Advance::RoundComplete(self.finish_round())),
            }
        }
    }

    /// Plays one full round, asking `reader` for every human decision.
    ///
    /// Waits as long as the reader returns `None`.
    ///
    /// # Errors
    ///
    /// Same as [`advance`](Self::advance).
    pub fn run<R>(&mut self, reader: &mut R) -> Result<RoundResult, RoundError>
    where
        R: MoveReader + ?Sized,
    {
        let mut input = None;
        loop {
            match self.advance(input.take())? {
                Advance::NeedInput(request) => input = reader.next_move(&request),
                Advance::RoundComplete(result) => return Ok(result),
            }
        }
    }

    /// Sets the stake a seat posts at the start of each round.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::SeatNotFound`] for an unknown seat, or
    /// [`RoundError::BetOutOfRange`] if the amount is outside the table limits.
    pub fn set_bet(&mut self, seat: usize, amount: usize) -> Result<(), RoundError> {
        if amount < self.options.min_bet || amount > self.options.max_bet {
            return Err(RoundError::BetOutOfRange(amount));
        }
        let player = self
            .players
            .get_mut(seat)
            .ok_or(RoundError::SeatNotFound(seat))?;
        player.set_bet(amount);
        Ok(())
    }

    /// Returns the options the table was built with.
    #[must_use]
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Returns the shoe.
    #[must_use]
    pub const fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    /// Returns the shoe mutably, for arranging scenarios between rounds.
    pub const fn shoe_mut(&mut self) -> &mut Shoe {
        &mut self.shoe
    }

    /// Returns the discard tray.
    #[must_use]
    pub const fn discard_tray(&self) -> &DiscardTray {
        &self.tray
    }

    /// Returns the seats in table order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Returns a seat.
    #[must_use]
    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    /// Returns the dealer.
    #[must_use]
    pub const fn dealer(&self) -> &Player {
        &self.dealer
    }

    /// Returns the dealer's hand, if dealt.
    #[must_use]
    pub fn dealer_hand(&self) -> Option<&Hand> {
        self.dealer.hand(0)
    }

    /// Returns the basic strategy checker.
    #[must_use]
    pub const fn checker(&self) -> &BasicStrategyChecker {
        &self.checker
    }

    /// Returns the current step.
    #[must_use]
    pub const fn step(&self) -> GameStep {
        self.step
    }

    /// Returns the hand awaiting input, if any.
    #[must_use]
    pub const fn focused(&self) -> Option<HandRef> {
        self.focused
    }

    /// Returns the hand awaiting input, if any.
    #[must_use]
    pub fn focused_hand(&self) -> Option<&Hand> {
        let focus = self.focused?;
        self.players.get(focus.seat)?.hand(focus.hand)
    }

    /// Returns the number of checked human decisions.
    #[must_use]
    pub const fn moves_seen(&self) -> usize {
        self.moves_seen
    }

    /// Returns the number of human decisions that matched the advice.
    #[must_use]
    pub const fn moves_correct(&self) -> usize {
        self.moves_correct
    }

    /// Returns the share of correct human decisions, `0.0` before any.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for move counts"
    )]
    pub fn accuracy(&self) -> f64 {
        if self.moves_seen == 0 {
            0.0
        } else {
            self.moves_correct as f64 / self.moves_seen as f64
        }
    }

    /// Returns the number of cards held by the seats and the dealer.
    #[must_use]
    pub fn cards_in_play(&self) -> usize {
        self.players.iter().map(Player::card_count).sum::<usize>() + self.dealer.card_count()
    }

    /// Returns every card the table owns: shoe, tray and hands.
    ///
    /// This stays equal to the shoe's full size.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.shoe.remaining() + self.tray.len() + self.cards_in_play()
    }

    /// Builds the public view of the table.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            step: self.step,
            focused: self.focused,
            dealer: self
                .dealer_hand()
                .map_or_else(|| HandView::from(&Hand::new(0)), HandView::from),
            players: self.players.iter().map(SeatView::from).collect(),
            running_count: self.shoe.running_count(),
            true_count: self.shoe.true_count(),
            penetration: self.shoe.penetration(),
            cards_remaining: self.shoe.remaining(),
            moves_seen: self.moves_seen,
            moves_correct: self.moves_correct,
        }
    }

    fn emit(&mut self, event: &Event) {
        for observer in &mut self.observers {
            observer.notify(event);
        }
    }

    fn publish_change(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let event = Event::Change(self.snapshot());
        self.emit(&event);
    }

    /// Points the table at the hand that must answer `step` and builds the
    /// request. Observers only hear about it when the focus moves.
    fn request(&mut self, step: GameStep, hand: Option<HandRef>) -> Request {
        if self.step != step || self.focused != hand {
            self.step = step;
            self.focused = hand;
            self.publish_change();
        }
        Request { step, hand }
    }

    /// Draws a card, refilling the shoe from the tray if it runs dry.
    ///
    /// Callers publish a change as soon as the card lands in a hand.
    fn draw(&mut self, showing_face: bool) -> Result<Card, RoundError> {
        if let Some(card) = self.shoe.draw_card(showing_face) {
            return Ok(card);
        }
        if !self.tray.is_empty() {
            self.shoe.refill(&mut self.tray);
        }
        self.shoe
            .draw_card(showing_face)
            .ok_or(RoundError::ShoeExhausted)
    }

    fn context(&self, seat: usize) -> RoundContext {
        RoundContext {
            step: self.step,
            dealer_up_card: self.dealer_hand().and_then(Hand::up_card).copied(),
            hands_in_play: self.players.get(seat).map_or(0, Player::active_hands),
            max_hands: usize::from(self.options.max_hands),
            running_count: self.shoe.running_count(),
            true_count: self.shoe.true_count(),
        }
    }

    /// Asks the seat's strategy for a move. Humans answer through `input`.
    fn decide(
        &self,
        strategy: Strategy,
        ctx: &RoundContext,
        hand: &Hand,
        input: &mut Option<Move>,
    ) -> Option<Move> {
        match strategy {
            Strategy::Human => input.take(),
            Strategy::BasicStrategy => Some(self.checker.suggest(ctx, hand)),
            Strategy::DeviationAware => Some(
                self.deviations
                    .suggest(ctx, hand)
                    .unwrap_or_else(|| self.checker.suggest(ctx, hand)),
            ),
            Strategy::Dealer => Some(dealer::dealer_move(hand, self.options.stand_on_soft_17)),
        }
    }

    /// Checks a human move; deviation training asks the count advisor first.
    fn check_move(&self, ctx: &RoundContext, hand: &Hand, input: Move) -> Verdict {
        if self.options.mode == GameMode::DeviationTraining {
            if let Some(verdict) = self.deviations.check(ctx, hand, input) {
                return verdict;
            }
        }
        self.checker.check(ctx, hand, input)
    }

    /// Counts a checked human move and publishes its record.
    fn record(&mut self, record: MoveRecord) {
        self.moves_seen += 1;
        if record.verdict.is_correct() {
            self.moves_correct += 1;
        } else {
            tracing::debug!(
                seat = record.hand.seat,
                hand = record.hand.hand,
                input = %record.input,
                verdict = ?record.verdict,
                "move differs from advice"
            );
        }
        self.emit(&Event::CreateRecord(record));
    }

    /// Returns whether a seat is driven by outside input.
    fn has_human(&self) -> bool {
        self.players.iter().any(|p| p.strategy().is_human())
    }

    fn reset_state(&mut self) {
        self.step = GameStep::WaitingForMove;
        self.stage = Stage::Deal;
        self.focused = None;
    }
}
