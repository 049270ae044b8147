use tracing::{info, warn};

use crate::error::GameError;
use crate::player::Player;
use crate::report::Report;

use super::{ActionResponse, Game, Phase};

impl Game {
    /// Drives the dealer against `player` until the run ends.
    ///
    /// Events are forwarded to [`Player::info`] as they happen. Each time a
    /// decision is pending the player is asked once through
    /// [`Player::play`]; a rejected action is asked again.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::TooManyInvalidActions`] when the player keeps
    /// sending rejected actions, or a card source error.
    pub fn run<P: Player + ?Sized>(&mut self, player: &mut P) -> Result<Report, GameError> {
        info!(
            decks = self.options.decks,
            rules = ?self.options.rules(),
            hands = self.options.hands,
            "starting run"
        );

        let limit = self.options.max_invalid_actions;
        let mut invalid = 0;

        while !self.is_finished() {
            let phase = self.advance()?;
            self.deliver(player);
            if !matches!(phase, Phase::Awaiting(_)) {
                continue;
            }

            let action = player.play(&self.view());
            let response = self.apply(action)?;
            self.deliver(player);

            match response {
                ActionResponse::Accepted => invalid = 0,
                ActionResponse::Answered => {}
                ActionResponse::Rejected(_) => {
                    invalid += 1;
                    if invalid > limit {
                        warn!(invalid, "giving up on player");
                        return Err(GameError::TooManyInvalidActions(invalid));
                    }
                }
            }
        }

        let report = self.report();
        info!(
            hands = self.hand_number,
            bankroll = self.stats.bankroll,
            mean = self.stats.outcomes.mean(),
            "run finished"
        );
        Ok(report)
    }

    fn deliver<P: Player + ?Sized>(&mut self, player: &mut P) {
        for event in self.events.drain(..) {
            player.info(&event);
        }
    }
}
