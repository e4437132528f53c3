use crate::error::RoundError;
use crate::hand::Hand;
use crate::player::Player;

use super::state::Stage;
use super::{Game, GameStep};

impl Game {
    /// Deals one card to the first hand of every seat.
    fn deal_one_card_to_players(&mut self) -> Result<(), RoundError> {
        for seat in 0..self.players.len() {
            let card = self.draw(true)?;
            if let Some(hand) = self.players[seat].hand_mut(0) {
                hand.add_card(card);
            }
            self.publish_change();
        }
        Ok(())
    }

    fn deal_to_dealer(&mut self, showing_face: bool) -> Result<(), RoundError> {
        let card = self.draw(showing_face)?;
        if let Some(hand) = self.dealer.hand_mut(0) {
            hand.add_card(card);
        }
        self.publish_change();
        Ok(())
    }

    /// Takes every seat's bet and deals the opening cards.
    ///
    /// Seats get their first card, the dealer the up-card, seats their second
    /// card, then the dealer the hole card face down. No stake is taken
    /// unless every seat can cover its bet.
    pub(super) fn deal_round(&mut self) -> Result<(), RoundError> {
        if let Some(player) = self.players.iter().find(|p| p.balance() < p.bet()) {
            return Err(RoundError::InsufficientFunds {
                seat: player.seat(),
                needed: player.bet(),
                balance: player.balance(),
            });
        }

        self.opening_balances = self.players.iter().map(Player::balance).collect();
        for player in &mut self.players {
            let bet = player.bet();
            player.stake(bet)?;
            player.open_hand(bet);
        }
        self.dealer.open_hand(0);

        tracing::debug!(
            players = self.players.len(),
            cards_remaining = self.shoe.remaining(),
            running_count = self.shoe.running_count(),
            "round started"
        );

        self.deal_one_card_to_players()?;
        self.deal_to_dealer(true)?;
        self.deal_one_card_to_players()?;
        self.deal_to_dealer(false)?;

        let up_card = self.dealer_hand().and_then(Hand::up_card).copied();
        if up_card.is_some_and(|c| c.is_ace()) {
            self.step = GameStep::AskInsurance;
            self.stage = Stage::Insurance { seat: 0, hand: 0 };
        } else {
            if up_card.is_some_and(|c| c.is_ten_value())
                && self.dealer_hand().is_some_and(Hand::is_blackjack)
            {
                tracing::debug!("dealer peeked a natural");
            }
            self.step = GameStep::WaitingForMove;
            self.stage = Stage::Play { seat: 0, hand: 0 };
        }
        self.publish_change();
        Ok(())
    }
}
