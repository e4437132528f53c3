use crate::error::RoundError;
use crate::event::MoveRecord;
use crate::hand::Hand;
use crate::moves::Move;
use crate::options::RoundingMode;

use super::state::Stage;
use super::{Game, GameStep, HandRef, Request};

impl Game {
    /// Asks one hand about insurance.
    ///
    /// Returns a request while a human has not answered. Once every hand has
    /// answered, insurance is resolved and play begins.
    pub(super) fn insurance_turn(
        &mut self,
        seat: usize,
        hand: usize,
        input: &mut Option<Move>,
    ) -> Result<Option<Request>, RoundError> {
        let Some(player) = self.players.get(seat) else {
            self.resolve_insurance();
            self.step = GameStep::WaitingForMove;
            self.stage = Stage::Play { seat: 0, hand: 0 };
            return Ok(None);
        };
        if hand >= player.active_hands() {
            self.stage = Stage::Insurance { seat: seat + 1, hand: 0 };
            return Ok(None);
        }

        let at = HandRef { seat, hand };
        let strategy = player.strategy();
        self.step = GameStep::AskInsurance;
        let ctx = self.context(seat);
        let current = &self.players[seat].hands()[hand];

        let Some(mut choice) = self.decide(strategy, &ctx, current, input) else {
            return Ok(Some(self.request(GameStep::AskInsurance, Some(at))));
        };
        if !choice.is_insurance() {
            if strategy.is_human() {
                tracing::debug!(seat, %choice, "ignoring move while insurance is offered");
                return Ok(Some(self.request(GameStep::AskInsurance, Some(at))));
            }
            tracing::warn!(seat, %choice, "bot answered the insurance offer with a play, declining");
            choice = Move::NoInsurance;
        }

        let cost = current.bet() / 2;
        if strategy.is_human() {
            let verdict = self.check_move(&ctx, current, choice);
            let record = MoveRecord::new(at, &ctx, current, choice, verdict);
            self.record(record);
        }

        if choice == Move::TakeInsurance {
            let player = &mut self.players[seat];
            player.stake(cost)?;
            if let Some(insured) = player.hand_mut(hand) {
                insured.set_insurance(cost);
            }
            tracing::debug!(seat, hand, cost, "insurance taken");
        }

        self.stage = Stage::Insurance { seat, hand: hand + 1 };
        self.publish_change();
        Ok(None)
    }

    /// Pays insurance if the dealer has a natural. Lost insurance stays lost.
    fn resolve_insurance(&mut self) {
        let dealer_blackjack = self.dealer_hand().is_some_and(Hand::is_blackjack);
        let ratio = self.options.insurance_pays;

        for player in &mut self.players {
            for index in 0..player.active_hands() {
                let Some(hand) = player.hand_mut(index) else {
                    continue;
                };
                let bet = hand.insurance_bet();
                if bet == 0 || !dealer_blackjack {
                    continue;
                }
                let payout = bet + ratio.winnings(bet, RoundingMode::Down);
                hand.set_insurance_payout(payout);
                player.credit(payout);
            }
        }

        tracing::debug!(dealer_blackjack, "insurance resolved");
    }
}
