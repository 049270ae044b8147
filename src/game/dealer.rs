use core::cmp::Ordering;

use tracing::debug;

use crate::error::GameError;
use crate::math::milli;
use crate::options::HoleCard;
use crate::player::Info;

use super::{DealerAction, Game, Phase, PlayerActionRequired};

impl Game {
    /// Moves to the next split hand, or hands over to the dealer.
    pub(super) fn move_on_to_next_hand(&mut self) -> Result<Phase, GameError> {
        self.current += 1;

        if let Some(hand) = self.hands.get(self.current) {
            let needs_card = hand.hand().len() < 2;
            self.events.push(Info::PlayerNextHand(hand.id()));
            if needs_card {
                self.deal_player()?;
            }

            let hand = &self.hands[self.current];
            return Ok(if hand.is_split_ace() || hand.hand().total() == 21 {
                Phase::Dealer(DealerAction::MoveOnToNextHand)
            } else {
                Phase::Awaiting(PlayerActionRequired::Play)
            });
        }

        if self.hands.iter().all(|hand| hand.hand().is_busted()) {
            self.reveal_hole();
            return Ok(Phase::Dealer(DealerAction::StartNewHand));
        }

        Ok(Phase::Dealer(DealerAction::HitDealerHand))
    }

    /// Plays out the dealer's hand and settles every live player hand.
    pub(super) fn hit_dealer_hand(&mut self) -> Result<Phase, GameError> {
        self.reveal_hole();

        loop {
            let value = self.dealer.hand().value();
            let soft_17 = self.options.hit_soft_17 && value == -17;
            if value.abs() >= 17 && !soft_17 {
                break;
            }
            self.deal_dealer()?;
        }

        let dealer = self.dealer.hand();
        let dealer_total = dealer.total();
        debug!(hand = self.hand_number, dealer_total, "dealer stands");

        if self.options.hole_card == HoleCard::European && dealer.is_blackjack() {
            self.events.push(Info::DealerBlackjack);
            self.stats.blackjacks_dealer += 1;
            for index in 0..self.hands.len() {
                if !self.hands[index].hand().is_busted() {
                    self.lose(index);
                }
            }
            return Ok(Phase::Dealer(DealerAction::StartNewHand));
        }

        if dealer.is_busted() {
            self.stats.busts_dealer += 1;
            self.events.push(Info::DealerBusts(dealer_total));
        }

        for index in 0..self.hands.len() {
            let hand = self.hands[index].hand();
            if hand.is_busted() {
                continue;
            }
            if dealer_total > 21 {
                self.win(index);
                continue;
            }
            match hand.total().cmp(&dealer_total) {
                Ordering::Greater => self.win(index),
                Ordering::Equal => self.push(index),
                Ordering::Less => self.lose(index),
            }
        }

        Ok(Phase::Dealer(DealerAction::StartNewHand))
    }

    /// Turns over the hole card, if there is one still face down.
    fn reveal_hole(&mut self) {
        if self.options.hole_card != HoleCard::American || self.dealer.is_hole_revealed() {
            return;
        }
        self.dealer.reveal_hole();
        if let Some(hole) = self.dealer.hole_card() {
            self.events.push(Info::CardDealerRevealsHole(hole));
        }
    }

    fn win(&mut self, index: usize) {
        let hand = &self.hands[index];
        let bet = f64::from(hand.bet());
        self.stats.credit(2.0 * bet);
        self.stats.wins += 1;
        if hand.is_doubled() {
            self.stats.wins_doubled += 1;
        }
        self.events.push(Info::PlayerWins {
            amount: milli(bet),
            value: hand.hand().total(),
        });
    }

    fn push(&mut self, index: usize) {
        let hand = &self.hands[index];
        let bet = f64::from(hand.bet());
        self.stats.credit(bet);
        self.stats.pushes += 1;
        self.events.push(Info::PlayerPushes {
            amount: milli(bet),
            value: hand.hand().total(),
        });
    }

    fn lose(&mut self, index: usize) {
        let hand = &self.hands[index];
        self.stats.losses += 1;
        self.events.push(Info::PlayerLosses {
            amount: milli(f64::from(hand.bet())),
            value: hand.hand().total(),
        });
    }
}
