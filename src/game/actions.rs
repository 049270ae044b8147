use tracing::{debug, warn};

use crate::error::{ActionError, GameError};
use crate::hand::PlayerHand;
use crate::math::milli;
use crate::options::DoubleOption;
use crate::player::{Info, PlayerAction};

use super::{ActionResponse, DealerAction, Game, Phase, PlayerActionRequired};

impl Game {
    /// Applies a player action to the pending decision.
    ///
    /// [`PlayerAction::Help`] and [`PlayerAction::Bankroll`] are answered at
    /// any time and leave the decision pending. [`PlayerAction::Quit`] ends
    /// the run. Anything else must match the pending decision.
    ///
    /// # Errors
    ///
    /// Returns an error only when drawing a card fails. Invalid actions are
    /// reported through [`ActionResponse::Rejected`].
    pub fn apply(&mut self, action: PlayerAction) -> Result<ActionResponse, GameError> {
        match action {
            PlayerAction::Quit => {
                self.quit();
                return Ok(ActionResponse::Accepted);
            }
            PlayerAction::Help => {
                self.events.push(Info::Help);
                return Ok(ActionResponse::Answered);
            }
            PlayerAction::Bankroll => {
                self.events.push(Info::Bankroll(self.bankroll_milli()));
                return Ok(ActionResponse::Answered);
            }
            _ => {}
        }

        let required = self.phase.required();
        let outcome = match (required, action) {
            (PlayerActionRequired::None, _) => Err(ActionError::NotPending),
            (PlayerActionRequired::Bet, PlayerAction::Bet(amount)) => self.place_bet(amount),
            (PlayerActionRequired::Insurance, PlayerAction::Insure) => {
                Ok(self.decide_insurance(true))
            }
            (PlayerActionRequired::Insurance, PlayerAction::DontInsure) => {
                Ok(self.decide_insurance(false))
            }
            (PlayerActionRequired::Play, PlayerAction::Stand) => {
                Ok(Phase::Dealer(DealerAction::MoveOnToNextHand))
            }
            (PlayerActionRequired::Play, PlayerAction::Hit) => Ok(self.hit()?),
            (PlayerActionRequired::Play, PlayerAction::Double) if self.can_double() => {
                Ok(self.double_down()?)
            }
            (PlayerActionRequired::Play, PlayerAction::Double) => {
                self.reject(Info::PlayerDoubleInvalid, ActionError::CannotDouble)
            }
            (PlayerActionRequired::Play, PlayerAction::Split) if self.can_split() => {
                Ok(self.split()?)
            }
            (PlayerActionRequired::Play, PlayerAction::Split) => {
                self.reject(Info::PlayerSplitInvalid, ActionError::CannotSplit)
            }
            _ => self.reject(Info::CommandInvalid, ActionError::Unexpected),
        };

        Ok(match outcome {
            Ok(next) => {
                debug!(hand = self.hand_number, ?action, ?next, "player action");
                self.phase = next;
                ActionResponse::Accepted
            }
            Err(error) => {
                warn!(hand = self.hand_number, ?action, ?required, %error, "action rejected");
                ActionResponse::Rejected(error)
            }
        })
    }

    /// Whether the current hand may be doubled down right now.
    #[must_use]
    pub fn can_double(&self) -> bool {
        let Some(hand) = self.playable_hand() else {
            return false;
        };
        let total = hand.hand().total();
        hand.hand().len() == 2
            && (self.splits == 0 || self.options.double_after_split)
            && match self.options.double {
                DoubleOption::Any => true,
                DoubleOption::NineThrough11 => (9..=11).contains(&total),
            }
    }

    /// Whether the current hand may be split right now.
    #[must_use]
    pub fn can_split(&self) -> bool {
        self.playable_hand()
            .is_some_and(|hand| hand.is_pair() && self.splits < self.options.resplits)
    }

    fn playable_hand(&self) -> Option<&PlayerHand> {
        (self.phase.required() == PlayerActionRequired::Play)
            .then(|| self.current_hand())
            .flatten()
    }

    fn reject(&mut self, info: Info, error: ActionError) -> Result<Phase, ActionError> {
        self.events.push(info);
        Err(error)
    }

    fn hit(&mut self) -> Result<Phase, GameError> {
        self.deal_player()?;
        let hand = self.hands[self.current].hand();
        if hand.is_busted() {
            self.settle_bust();
            Ok(Phase::Dealer(DealerAction::MoveOnToNextHand))
        } else if hand.total() == 21 {
            Ok(Phase::Dealer(DealerAction::MoveOnToNextHand))
        } else {
            Ok(Phase::Awaiting(PlayerActionRequired::Play))
        }
    }

    fn double_down(&mut self) -> Result<Phase, GameError> {
        let hand = &mut self.hands[self.current];
        self.stats.wager(f64::from(hand.bet()));
        hand.double_bet();
        self.stats.hands_doubled += 1;

        self.deal_player()?;
        if self.hands[self.current].hand().is_busted() {
            self.settle_bust();
        }
        Ok(Phase::Dealer(DealerAction::MoveOnToNextHand))
    }

    fn split(&mut self) -> Result<Phase, GameError> {
        let new_id = self.hands.len() + 1;
        let hand = &mut self.hands[self.current];
        let Some(card) = hand.hand_mut().take_split_card() else {
            return Ok(self.phase);
        };
        hand.mark_split();
        let bet = hand.bet();
        let original = hand.id();

        self.hands.push(PlayerHand::from_split(new_id, card, bet));
        self.stats.wager(f64::from(bet));
        self.splits += 1;
        self.events.push(Info::PlayerSplitOk(original));
        self.events.push(Info::PlayerSplitIds {
            original,
            new: new_id,
        });

        self.deal_player()?;
        let hand = &self.hands[self.current];
        if hand.is_split_ace() || hand.hand().total() == 21 {
            Ok(Phase::Dealer(DealerAction::MoveOnToNextHand))
        } else {
            Ok(Phase::Awaiting(PlayerActionRequired::Play))
        }
    }

    /// Books a busted player hand as lost.
    fn settle_bust(&mut self) {
        let hand = &self.hands[self.current];
        self.stats.busts_player += 1;
        self.stats.losses += 1;
        self.events.push(Info::PlayerLosses {
            amount: milli(f64::from(hand.bet())),
            value: hand.hand().total(),
        });
    }
}
