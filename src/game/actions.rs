use crate::error::RoundError;
use crate::event::MoveRecord;
use crate::hand::{Hand, HandStatus};
use crate::moves::Move;
use crate::options::scale;
use crate::result::HandOutcome;

use super::state::Stage;
use super::{Game, GameStep, HandRef, Request};

impl Game {
    /// Plays one hand until it needs input or is done.
    ///
    /// Hands are visited in table order; split hands follow the hands that
    /// were already in play.
    pub(super) fn play_turn(
        &mut self,
        seat: usize,
        hand: usize,
        input: &mut Option<Move>,
    ) -> Result<Option<Request>, RoundError> {
        let Some(player) = self.players.get(seat) else {
            self.focused = None;
            self.stage = Stage::Dealer;
            return Ok(None);
        };
        let Some(current) = player.hand(hand) else {
            self.stage = Stage::Play { seat: seat + 1, hand: 0 };
            return Ok(None);
        };

        if current.is_settled() || current.status() != HandStatus::Active {
            if !current.is_settled() && current.status() == HandStatus::Blackjack {
                self.settle_natural(seat, hand);
            }
            self.stage = Stage::Play { seat, hand: hand + 1 };
            return Ok(None);
        }

        let dealer_blackjack = self.dealer_hand().is_some_and(Hand::is_blackjack);
        if dealer_blackjack && current.is_first_decision() && !current.is_from_split() {
            self.settle_natural(seat, hand);
            self.stage = Stage::Play { seat, hand: hand + 1 };
            return Ok(None);
        }

        let at = HandRef { seat, hand };
        let strategy = player.strategy();
        self.step = GameStep::WaitingForMove;
        let ctx = self.context(seat);

        let Some(choice) = self.decide(strategy, &ctx, current, input) else {
            return Ok(Some(self.request(GameStep::WaitingForMove, Some(at))));
        };

        let record = strategy.is_human().then(|| {
            let verdict = self.check_move(&ctx, current, choice);
            MoveRecord::new(at, &ctx, current, choice, verdict)
        });

        if self.apply_move(seat, hand, choice)? {
            if let Some(record) = record {
                self.record(record);
            }
        } else if strategy.is_human() {
            tracing::debug!(seat, hand, %choice, "ignoring move not legal for the hand");
            return Ok(Some(self.request(GameStep::WaitingForMove, Some(at))));
        } else {
            tracing::warn!(seat, hand, %choice, "bot move rejected, standing");
            self.apply_move(seat, hand, Move::Stand)?;
        }

        self.publish_change();
        Ok(None)
    }

    /// Applies a play move. Returns `false`, changing nothing, if the move is
    /// not legal for the hand right now.
    fn apply_move(&mut self, seat: usize, hand: usize, choice: Move) -> Result<bool, RoundError> {
        match choice {
            Move::Hit => self.hit(seat, hand),
            Move::Stand => Ok(self.stand(seat, hand)),
            Move::Double => self.double_down(seat, hand),
            Move::Split => self.split(seat, hand),
            Move::Surrender => Ok(self.surrender(seat, hand)),
            Move::NoInsurance | Move::TakeInsurance | Move::NextGame => Ok(false),
        }
    }

    fn hand_at(&mut self, seat: usize, hand: usize) -> Option<&mut Hand> {
        self.players.get_mut(seat)?.hand_mut(hand)
    }

    /// Draws one card into the hand, settling it if it busts.
    fn hit(&mut self, seat: usize, hand: usize) -> Result<bool, RoundError> {
        let card = self.draw(true)?;
        let Some(target) = self.hand_at(seat, hand) else {
            return Ok(false);
        };
        target.add_card(card);
        target.mark_acted();
        if target.is_bust() {
            self.settle_hand(seat, hand, HandOutcome::Lose);
        }
        Ok(true)
    }

    fn stand(&mut self, seat: usize, hand: usize) -> bool {
        let Some(target) = self.hand_at(seat, hand) else {
            return false;
        };
        target.mark_acted();
        target.set_status(HandStatus::Stand);
        true
    }

    /// Doubles the stake, draws exactly one card and stands.
    fn double_down(&mut self, seat: usize, hand: usize) -> Result<bool, RoundError> {
        let Some(bet) = self
            .players
            .get(seat)
            .and_then(|p| p.hand(hand))
            .filter(|h| h.is_first_decision())
            .map(Hand::bet)
        else {
            return Ok(false);
        };
        self.players[seat].stake(bet)?;
        let card = self.draw(true)?;

        let Some(target) = self.hand_at(seat, hand) else {
            return Ok(false);
        };
        target.double_bet();
        target.add_card(card);
        target.mark_acted();
        if target.is_bust() {
            self.settle_hand(seat, hand, HandOutcome::Lose);
        } else {
            target.set_status(HandStatus::Stand);
        }
        Ok(true)
    }

    /// Splits a pair into the next free slot and deals one card to each half.
    fn split(&mut self, seat: usize, hand: usize) -> Result<bool, RoundError> {
        let ctx = self.context(seat);
        let Some(player) = self.players.get(seat) else {
            return Ok(false);
        };
        let Some(current) = player.hand(hand) else {
            return Ok(false);
        };
        if !current.is_first_decision() || !self.checker.splittable(&ctx, current) {
            return Ok(false);
        }
        let bet = current.bet();

        let player = &mut self.players[seat];
        player.stake(bet)?;
        let Some(new_hand) = player.split_hand(hand) else {
            player.credit(bet);
            return Ok(false);
        };
        tracing::debug!(seat, hand, new_hand, "hand split");

        for index in [hand, new_hand] {
            let card = self.draw(true)?;
            if let Some(target) = self.hand_at(seat, index) {
                target.add_card(card);
            }
            self.publish_change();
        }
        Ok(true)
    }

    /// Gives up the hand for half the stake back.
    fn surrender(&mut self, seat: usize, hand: usize) -> bool {
        let allowed = self
            .players
            .get(seat)
            .and_then(|p| p.hand(hand))
            .is_some_and(|h| self.checker.surrender_allowed(h));
        if !allowed {
            return false;
        }
        if let Some(target) = self.hand_at(seat, hand) {
            target.mark_acted();
            target.set_status(HandStatus::Surrendered);
        }
        self.settle_hand(seat, hand, HandOutcome::Surrendered);
        true
    }

    /// Settles a hand that was dealt a natural, or faces one.
    ///
    /// A player natural pushes against a dealer natural.
    fn settle_natural(&mut self, seat: usize, hand: usize) {
        let dealer_blackjack = self.dealer_hand().is_some_and(Hand::is_blackjack);
        let player_blackjack = self
            .players
            .get(seat)
            .and_then(|p| p.hand(hand))
            .is_some_and(Hand::is_blackjack);
        let outcome = match (player_blackjack, dealer_blackjack) {
            (true, true) => HandOutcome::Push,
            (true, false) => HandOutcome::Blackjack,
            _ => HandOutcome::Lose,
        };
        self.settle_hand(seat, hand, outcome);
    }

    /// Returns what the hand's outcome pays back, stake included.
    pub(super) fn payout_for(&self, bet: usize, outcome: HandOutcome) -> usize {
        match outcome {
            HandOutcome::Win => bet * 2,
            HandOutcome::Blackjack => {
                bet + self
                    .options
                    .blackjack_pays
                    .winnings(bet, self.options.rounding_blackjack)
            }
            HandOutcome::Push => bet,
            HandOutcome::Lose => 0,
            HandOutcome::Surrendered => scale(bet, 1, 2, self.options.rounding_surrender),
        }
    }
}
