use alloc::vec::Vec;

use crate::error::RoundError;
use crate::event::Event;
use crate::hand::Hand;
use crate::moves::Move;
use crate::player::Player;
use crate::result::{HandOutcome, HandResult, PlayerResult, RoundResult};

use super::state::Stage;
use super::{Game, GameStep, HandRef, Request};

/// Fixed dealer rule: draw below 17, and on soft 17 when the table hits it.
/// A natural always stands.
pub(super) fn dealer_move(hand: &Hand, stand_on_soft_17: bool) -> Move {
    let total = hand.total();
    if hand.is_blackjack() || total > 17 || (total == 17 && (!hand.is_soft() || stand_on_soft_17)) {
        Move::Stand
    } else {
        Move::Hit
    }
}

impl Game {
    /// Reveals the hole card and draws the dealer's hand out.
    ///
    /// The dealer does not draw when every player hand is already settled.
    pub(super) fn dealer_turn(&mut self) -> Result<(), RoundError> {
        self.focused = None;
        if let Some(hand) = self.dealer.hand_mut(0) {
            for card in hand.cards_mut() {
                self.shoe.reveal(card);
            }
        }
        self.publish_change();

        let unresolved = self
            .players
            .iter()
            .flat_map(Player::hands)
            .any(|h| !h.is_settled());

        if unresolved {
            let mut no_input = None;
            loop {
                let ctx = self.context(0);
                let Some(hand) = self.dealer_hand() else {
                    break;
                };
                if self.decide(self.dealer.strategy(), &ctx, hand, &mut no_input) != Some(Move::Hit) {
                    break;
                }
                let card = self.draw(true)?;
                if let Some(hand) = self.dealer.hand_mut(0) {
                    hand.add_card(card);
                }
                self.publish_change();
            }
        }

        if let Some(hand) = self.dealer_hand() {
            tracing::debug!(
                total = hand.total(),
                cards = hand.len(),
                bust = hand.is_bust(),
                "dealer finished"
            );
        }
        self.stage = Stage::Settle;
        Ok(())
    }

    /// Settles every hand still open against the dealer's final total.
    pub(super) fn settle_round(&mut self) {
        let (dealer_total, dealer_bust) = self
            .dealer_hand()
            .map_or((0, false), |h| (h.total(), h.is_bust()));

        let pending: Vec<(usize, usize, u8)> = self
            .players
            .iter()
            .enumerate()
            .flat_map(|(seat, player)| {
                player
                    .hands()
                    .iter()
                    .enumerate()
                    .filter(|(_, h)| !h.is_settled())
                    .map(move |(index, h)| (seat, index, h.total()))
            })
            .collect();

        for (seat, hand, total) in pending {
            let outcome = if dealer_bust || total > dealer_total {
                HandOutcome::Win
            } else if total < dealer_total {
                HandOutcome::Lose
            } else {
                HandOutcome::Push
            };
            self.settle_hand(seat, hand, outcome);
        }

        self.step = GameStep::GameResult;
        self.focused = None;
        self.stage = Stage::Result;
        self.publish_change();
    }

    /// Credits the hand's payout and tells observers who took it.
    pub(super) fn settle_hand(&mut self, seat: usize, hand: usize, outcome: HandOutcome) {
        let Some(bet) = self.players.get(seat).and_then(|p| p.hand(hand)).map(Hand::bet) else {
            return;
        };
        let payout = self.payout_for(bet, outcome);

        let player = &mut self.players[seat];
        player.credit(payout);
        if let Some(target) = player.hand_mut(hand) {
            target.settle(outcome, payout);
        }

        tracing::debug!(seat, hand, ?outcome, bet, payout, "hand settled");
        self.emit(&Event::HandWinner {
            hand: HandRef { seat, hand },
            outcome,
            winner: outcome.winner(),
        });
    }

    /// Waits for `next-game` when a human is seated and the table asks for it.
    pub(super) fn result_turn(&mut self, input: &mut Option<Move>) -> Option<Request> {
        if !self.options.wait_for_next_game || !self.has_human() {
            self.stage = Stage::Cleanup;
            return None;
        }
        match input.take() {
            Some(Move::NextGame) => {
                self.stage = Stage::Cleanup;
                None
            }
            Some(other) => {
                tracing::debug!(%other, "ignoring move while the result is shown");
                Some(self.request(GameStep::GameResult, None))
            }
            None => Some(self.request(GameStep::GameResult, None)),
        }
    }

    /// Collects the round's results, then clears the table into the tray and
    /// reshuffles if the shoe is due.
    pub(super) fn finish_round(&mut self) -> RoundResult {
        let mut result = self.round_result();

        let mut cards = Vec::with_capacity(self.cards_in_play());
        for player in &mut self.players {
            cards.extend(player.clear_hands());
        }
        cards.extend(self.dealer.clear_hands());
        self.tray.add_cards(cards);

        if self.shoe.needs_reset() {
            self.shoe.reset(&mut self.tray);
            result.reshuffled = true;
            let event = Event::Shuffle {
                running_count: self.shoe.running_count(),
                cards: self.shoe.remaining(),
            };
            self.emit(&event);
        }

        self.reset_state();
        self.publish_change();
        result
    }

    #[expect(clippy::cast_possible_wrap, reason = "balances fit in isize")]
    fn round_result(&self) -> RoundResult {
        let (dealer_value, dealer_bust, dealer_blackjack) = self
            .dealer_hand()
            .map_or((0, false, false), |h| (h.total(), h.is_bust(), h.is_blackjack()));

        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(seat, player)| {
                let hands: Vec<HandResult> = player
                    .hands()
                    .iter()
                    .enumerate()
                    .map(|(hand_index, hand)| HandResult {
                        hand_index,
                        outcome: hand.outcome().unwrap_or(HandOutcome::Lose),
                        bet: hand.bet(),
                        doubled: hand.is_doubled(),
                        payout: hand.payout(),
                        insurance_bet: hand.insurance_bet(),
                        insurance_payout: hand.insurance_payout(),
                        player_value: hand.total(),
                        dealer_value,
                    })
                    .collect();
                let total_payout = hands.iter().map(|h| h.payout + h.insurance_payout).sum();
                let opening = self
                    .opening_balances
                    .get(seat)
                    .copied()
                    .unwrap_or_else(|| player.balance());
                PlayerResult {
                    seat,
                    hands,
                    total_payout,
                    net: player.balance() as isize - opening as isize,
                    balance: player.balance(),
                }
            })
            .collect();

        RoundResult {
            players,
            dealer_value,
            dealer_bust,
            dealer_blackjack,
            reshuffled: false,
        }
    }
}
