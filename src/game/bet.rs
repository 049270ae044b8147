use tracing::debug;

use crate::error::{ActionError, GameError};
use crate::hand::PlayerHand;
use crate::options::{ArrangedExhaustion, HoleCard, InsuranceOption};
use crate::player::Info;

use super::{DealerAction, Game, Phase, PlayerActionRequired};

impl Game {
    /// Closes the previous hand and sets up a new one.
    ///
    /// Ends the run once the hand limit is reached, or when the arranged
    /// cards are used up and the run is configured to stop there.
    pub(super) fn start_new_hand(&mut self) -> Phase {
        self.record_outcome();

        let limit = self.options.hands;
        if limit > 0 && self.hand_number >= limit {
            debug!(hands = self.hand_number, "hand limit reached");
            return Phase::Finished;
        }
        if self.options.arranged_exhaustion == ArrangedExhaustion::Quit
            && self.shoe.has_arranged()
            && self.shoe.arranged_exhausted()
        {
            debug!(hands = self.hand_number, "arranged cards exhausted");
            return Phase::Finished;
        }

        self.hand_number += 1;
        self.splits = 0;
        self.current = 0;
        self.hands.clear();
        self.hands.push(PlayerHand::new(1, 0));
        self.dealer.clear();

        if self.options.shuffle_every_hand || self.shoe.needs_shuffle() {
            self.shuffle();
        }

        self.bankroll_at_start = self.stats.bankroll;
        self.outcome_pending = true;
        self.events.push(Info::NewHand {
            number: self.hand_number,
            bankroll: self.bankroll_milli(),
        });

        match self.options.flat_bet {
            0 => Phase::Awaiting(PlayerActionRequired::Bet),
            bet => {
                self.wager_bet(bet);
                Phase::Dealer(DealerAction::DealPlayerFirstCard)
            }
        }
    }

    /// Validates and places the player's bet.
    pub(super) fn place_bet(&mut self, amount: i64) -> Result<Phase, ActionError> {
        let max = self.options.max_wager();
        let checked = match u32::try_from(amount) {
            _ if amount <= 0 => Err(ActionError::NonPositiveBet(amount)),
            Ok(bet) if bet <= max => Ok(bet),
            _ => Err(ActionError::BetAboveMaximum { bet: amount, max }),
        };

        let bet = match checked {
            Ok(bet) => bet,
            Err(error) => {
                self.events.push(Info::BetInvalid(amount));
                return Err(error);
            }
        };

        self.wager_bet(bet);
        Ok(Phase::Dealer(DealerAction::DealPlayerFirstCard))
    }

    fn wager_bet(&mut self, bet: u32) {
        self.hands[0].set_bet(bet);
        self.stats.wager(f64::from(bet));
    }

    /// Deals player, dealer up card, player, and (American rules) the hole card.
    pub(super) fn deal_first_cards(&mut self) -> Result<Phase, GameError> {
        self.deal_player()?;
        let up_card = self.deal_dealer()?;
        self.deal_player()?;

        let american = self.options.hole_card == HoleCard::American;
        if american {
            let hole = self.draw()?;
            self.dealer.add_card(hole);
            self.events.push(Info::CardDealerHole);
        }

        if american && up_card.is_ace() {
            match self.options.insurance {
                InsuranceOption::Ask => {
                    return Ok(Phase::Awaiting(PlayerActionRequired::Insurance));
                }
                InsuranceOption::Always => {
                    self.insure();
                    return Ok(Phase::Dealer(DealerAction::CheckForBlackjacks));
                }
                InsuranceOption::Never => {}
            }
        }

        if up_card.is_ace() || up_card.is_ten() || self.hands[0].hand().total() == 21 {
            Ok(Phase::Dealer(DealerAction::CheckForBlackjacks))
        } else {
            Ok(Phase::Dealer(DealerAction::AskForPlay))
        }
    }
}
