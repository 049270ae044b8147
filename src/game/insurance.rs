use tracing::debug;

use crate::error::GameError;
use crate::math::milli;
use crate::options::HoleCard;
use crate::player::Info;

use super::{DealerAction, Game, Phase};

impl Game {
    /// Records the player's insurance decision.
    pub(super) fn decide_insurance(&mut self, take: bool) -> Phase {
        if take {
            self.insure();
        }
        Phase::Dealer(DealerAction::CheckForBlackjacks)
    }

    /// Takes the insurance stake, half the original bet.
    pub(super) fn insure(&mut self) {
        let hand = &mut self.hands[0];
        hand.insure();
        let stake = f64::from(hand.bet()) / 2.0;
        self.stats.wager(stake);
        self.stats.hands_insured += 1;
    }

    /// Resolves naturals on the initial deal.
    ///
    /// Without a hole card the dealer draws the second card right away only
    /// when the player holds a natural against a ten or an ace.
    pub(super) fn check_for_blackjacks(&mut self) -> Result<Phase, GameError> {
        let dealer_may_have_blackjack = self
            .dealer
            .up_card()
            .is_some_and(|card| card.is_ace() || card.is_ten());
        let player_blackjack = self.hands[0].hand().is_blackjack();
        let american = self.options.hole_card == HoleCard::American;

        if !american && player_blackjack && dealer_may_have_blackjack && self.dealer.hand().len() < 2
        {
            self.deal_dealer()?;
        }

        let bet = f64::from(self.hands[0].bet());

        if self.dealer.hand().is_blackjack() {
            if american {
                self.dealer.reveal_hole();
                if let Some(hole) = self.dealer.hole_card() {
                    self.events.push(Info::CardDealerRevealsHole(hole));
                }
            }
            self.events.push(Info::DealerBlackjack);
            self.stats.blackjacks_dealer += 1;

            if self.hands[0].is_insured() {
                self.stats.credit(1.5 * bet);
                self.stats.wins_insured += 1;
                self.events.push(Info::PlayerWinsInsurance(milli(bet)));
            }

            if player_blackjack {
                self.events.push(Info::PlayerBlackjackAlso);
                self.stats.credit(bet);
                self.stats.blackjacks_player += 1;
                self.stats.pushes += 1;
                self.events.push(Info::PlayerPushes {
                    amount: milli(bet),
                    value: 21,
                });
            } else {
                self.stats.losses += 1;
                self.events.push(Info::PlayerLosses {
                    amount: milli(bet),
                    value: self.hands[0].hand().total(),
                });
            }

            debug!(hand = self.hand_number, player_blackjack, "dealer blackjack");
            return Ok(Phase::Dealer(DealerAction::StartNewHand));
        }

        if player_blackjack {
            let pays = self.options.blackjack_pays;
            self.events.push(Info::PlayerBlackjack);
            self.stats.credit((1.0 + pays) * bet);
            self.stats.blackjacks_player += 1;
            self.stats.wins += 1;
            self.stats.wins_blackjack += 1;
            self.events.push(Info::PlayerWins {
                amount: milli(pays * bet),
                value: 21,
            });
            return Ok(Phase::Dealer(DealerAction::StartNewHand));
        }

        if dealer_may_have_blackjack {
            self.events.push(Info::NoBlackjacks);
        }
        Ok(Phase::Dealer(DealerAction::AskForPlay))
    }
}
