//! Dealer engine and state management.

use alloc::vec::Vec;

use tracing::debug;

use crate::card::Card;
use crate::error::{ConfigError, GameError};
use crate::hand::{DealerHand, PlayerHand};
use crate::math::milli;
use crate::options::GameOptions;
use crate::player::{Info, TableView};
use crate::report::Report;
use crate::shoe::Shoe;
use crate::stats::PlayerStats;

mod actions;
mod bet;
mod dealer;
mod insurance;
mod run;
pub mod state;

pub use state::{ActionResponse, DealerAction, Phase, PlayerActionRequired};

/// A blackjack dealer running hands against a single player.
///
/// The engine is a state machine. [`Game::advance`] performs one dealer step
/// and reports whether the player must decide something; [`Game::apply`]
/// feeds the decision back. [`Game::run`] drives both against a
/// [`Player`](crate::Player) until the run ends.
///
/// Events for the player accumulate in an internal queue, see
/// [`Game::drain_events`].
#[derive(Debug, Clone)]
pub struct Game {
    /// Game options.
    options: GameOptions,
    /// Card source.
    shoe: Shoe,
    /// Player statistics for the whole run.
    stats: PlayerStats,
    /// Where the state machine stands.
    phase: Phase,
    /// Number of the hand in play, starting at 1.
    hand_number: u64,
    /// The player's hands; more than one after splitting.
    hands: Vec<PlayerHand>,
    /// Index of the hand being played.
    current: usize,
    /// Dealer's hand.
    dealer: DealerHand,
    /// Splits performed this round.
    splits: u8,
    /// Bankroll when the current hand started.
    bankroll_at_start: f64,
    /// Whether the current hand's net result is still to be recorded.
    outcome_pending: bool,
    /// Notifications not yet delivered.
    events: Vec<Info>,
}

impl Game {
    /// Creates a game with the given options and RNG seed.
    ///
    /// The same seed, options and sequence of player actions reproduce the
    /// same cards and statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are inconsistent.
    ///
    /// # Example
    ///
    /// ```
    /// use bjsim::{Game, GameOptions};
    ///
    /// let game = Game::new(GameOptions::default().with_decks(6), 42).unwrap();
    /// assert_eq!(game.shoe().shuffles(), 1);
    /// ```
    pub fn new(options: GameOptions, seed: u64) -> Result<Self, ConfigError> {
        options.validate()?;

        let shoe = Shoe::new(&options, seed);
        let mut game = Self {
            options,
            shoe,
            stats: PlayerStats::default(),
            phase: Phase::Dealer(DealerAction::StartNewHand),
            hand_number: 0,
            hands: Vec::new(),
            current: 0,
            dealer: DealerHand::new(),
            splits: 0,
            bankroll_at_start: 0.0,
            outcome_pending: false,
            events: Vec::new(),
        };
        game.shuffle();

        Ok(game)
    }

    /// Performs the next dealer step.
    ///
    /// Does nothing while player input is pending. Returns the phase the
    /// engine is in afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Finished`] once the run is over, or a card source
    /// error.
    pub fn advance(&mut self) -> Result<Phase, GameError> {
        let action = match self.phase {
            Phase::Finished => return Err(GameError::Finished),
            Phase::Awaiting(_) => return Ok(self.phase),
            Phase::Dealer(action) => action,
        };

        let next = match action {
            DealerAction::StartNewHand => self.start_new_hand(),
            DealerAction::DealPlayerFirstCard => self.deal_first_cards()?,
            DealerAction::CheckForBlackjacks => self.check_for_blackjacks()?,
            DealerAction::AskForPlay => Phase::Awaiting(PlayerActionRequired::Play),
            DealerAction::MoveOnToNextHand => self.move_on_to_next_hand()?,
            DealerAction::HitDealerHand => self.hit_dealer_hand()?,
            // nothing is scheduled
            DealerAction::None => Phase::Finished,
        };

        debug!(hand = self.hand_number, ?action, ?next, "dealer step");
        self.phase = next;
        Ok(next)
    }

    /// Current phase of the state machine.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// The decision the player owes, if any.
    #[must_use]
    pub const fn action_required(&self) -> PlayerActionRequired {
        self.phase.required()
    }

    /// Returns whether the run is over.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished)
    }

    /// Game options.
    #[must_use]
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// The card source.
    #[must_use]
    pub const fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    /// Player statistics so far.
    #[must_use]
    pub const fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    /// Number of the hand in play (0 before the first hand).
    #[must_use]
    pub const fn hand_number(&self) -> u64 {
        self.hand_number
    }

    /// The player's hands in the current round.
    #[must_use]
    pub fn hands(&self) -> &[PlayerHand] {
        &self.hands
    }

    /// The hand being played.
    #[must_use]
    pub fn current_hand(&self) -> Option<&PlayerHand> {
        self.hands.get(self.current)
    }

    /// The dealer's hand.
    #[must_use]
    pub const fn dealer_hand(&self) -> &DealerHand {
        &self.dealer
    }

    /// Splits performed this round.
    #[must_use]
    pub const fn splits(&self) -> u8 {
        self.splits
    }

    /// Snapshot of what the player may see and do right now.
    #[must_use]
    pub fn view(&self) -> TableView {
        TableView {
            required: self.action_required(),
            hand_id: self.current_hand().map_or(0, PlayerHand::id),
            player_value: self.current_hand().map_or(0, |hand| hand.hand().value()),
            dealer_value: self.dealer.visible_value(),
            up_card: self.dealer.up_card(),
            can_double: self.can_double(),
            can_split: self.can_split(),
        }
    }

    /// Removes and returns the notifications produced so far.
    pub fn drain_events(&mut self) -> alloc::vec::Drain<'_, Info> {
        self.events.drain(..)
    }

    /// Ends the run. No partial hand is rolled back.
    pub fn quit(&mut self) {
        self.phase = Phase::Finished;
        self.events.push(Info::Bye);
    }

    /// Builds the end-of-run report, first recording the last hand's result.
    pub fn report(&mut self) -> Report {
        self.record_outcome();
        Report::new(&self.stats, self.options.error_standard_deviations)
    }

    /// Feeds the net result of the hand just played into the running statistics.
    fn record_outcome(&mut self) {
        if self.outcome_pending {
            self.stats
                .outcomes
                .record(self.stats.bankroll - self.bankroll_at_start);
            self.outcome_pending = false;
        }
    }

    /// Shuffles a finite shoe and burns the configured cards.
    fn shuffle(&mut self) {
        if self.shoe.is_infinite() {
            return;
        }
        self.shoe.shuffle();
        self.shoe.burn(self.options.burn_cards);
        self.events.push(Info::Shuffle);
    }

    fn draw(&mut self) -> Result<Card, GameError> {
        let shuffles = self.shoe.shuffles();
        let card = self.shoe.draw()?;
        if self.shoe.shuffles() != shuffles {
            self.events.push(Info::Shuffle);
        }
        Ok(card)
    }

    /// Deals a card to the current player hand.
    fn deal_player(&mut self) -> Result<Card, GameError> {
        let card = self.draw()?;
        let hand = &mut self.hands[self.current];
        hand.add_card(card);
        self.events.push(Info::CardPlayer {
            card,
            hand: hand.id(),
        });
        Ok(card)
    }

    /// Deals a face-up card to the dealer.
    fn deal_dealer(&mut self) -> Result<Card, GameError> {
        let card = self.draw()?;
        self.dealer.add_card(card);
        self.events.push(Info::CardDealer(card));
        Ok(card)
    }

    fn bankroll_milli(&self) -> i64 {
        milli(self.stats.bankroll)
    }
}
