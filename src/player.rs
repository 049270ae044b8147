//! The interface between the dealer and whoever makes the player's decisions.

use crate::card::Card;
use crate::game::PlayerActionRequired;

/// An action submitted by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    /// Stop playing. The run ends before the next hand.
    Quit,
    /// Ask for help. Answered with [`Info::Help`].
    Help,
    /// Ask for the bankroll. Answered with [`Info::Bankroll`].
    Bankroll,
    /// Place a bet of the given number of units.
    Bet(i64),
    /// Take insurance.
    Insure,
    /// Decline insurance.
    DontInsure,
    /// Keep the current hand.
    Stand,
    /// Double the wager and take exactly one card.
    Double,
    /// Split a pair into two hands.
    Split,
    /// Take a card.
    Hit,
}

/// Read-only snapshot handed to the player whenever input is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableView {
    /// What kind of decision is requested.
    pub required: PlayerActionRequired,
    /// Id of the hand being played.
    pub hand_id: usize,
    /// Signed value of the current hand (negative when soft).
    pub player_value: i32,
    /// Signed value of the dealer's visible cards.
    pub dealer_value: i32,
    /// The dealer's up card, once dealt.
    pub up_card: Option<Card>,
    /// Whether doubling down is currently allowed.
    pub can_double: bool,
    /// Whether splitting is currently allowed.
    pub can_split: bool,
}

/// Notifications sent to the player as the hand progresses.
///
/// Money is given in thousandths of a betting unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Info {
    /// The bet was rejected; carries the offending amount.
    BetInvalid(i64),
    /// A new hand starts.
    NewHand {
        /// Hand number, starting at 1.
        number: u64,
        /// Bankroll before the hand.
        bankroll: i64,
    },
    /// The shoe was shuffled.
    Shuffle,
    /// The player received a card.
    CardPlayer {
        /// The card.
        card: Card,
        /// Id of the receiving hand.
        hand: usize,
    },
    /// The dealer received a face-up card.
    CardDealer(Card),
    /// The dealer received the hole card face down.
    CardDealerHole,
    /// The dealer turned over the hole card.
    CardDealerRevealsHole(Card),
    /// The dealer has a natural.
    DealerBlackjack,
    /// The insurance bet won.
    PlayerWinsInsurance(i64),
    /// The player also has a natural.
    PlayerBlackjackAlso,
    /// The split was rejected.
    PlayerSplitInvalid,
    /// The split was accepted.
    PlayerSplitOk(usize),
    /// Ids of the two hands after a split.
    PlayerSplitIds {
        /// Hand that was split.
        original: usize,
        /// Newly created hand.
        new: usize,
    },
    /// The double down was rejected.
    PlayerDoubleInvalid,
    /// Play moves on to another split hand.
    PlayerNextHand(usize),
    /// A hand pushed.
    PlayerPushes {
        /// Amount returned.
        amount: i64,
        /// Absolute value of the player's hand.
        value: i32,
    },
    /// A hand lost.
    PlayerLosses {
        /// Amount lost.
        amount: i64,
        /// Absolute value of the player's hand.
        value: i32,
    },
    /// The player has a natural.
    PlayerBlackjack,
    /// A hand won.
    PlayerWins {
        /// Amount won.
        amount: i64,
        /// Absolute value of the player's hand.
        value: i32,
    },
    /// Neither side has a natural.
    NoBlackjacks,
    /// The dealer busted with the given total.
    DealerBusts(i32),
    /// Current bankroll.
    Bankroll(i64),
    /// Help was requested.
    Help,
    /// The action was not understood or not valid now.
    CommandInvalid,
    /// The run is over.
    Bye,
}

/// A decision maker at the table.
///
/// The dealer calls [`Player::play`] once per requested decision and feeds
/// every event through [`Player::info`].
pub trait Player {
    /// Chooses an action for the requested decision.
    fn play(&mut self, view: &TableView) -> PlayerAction;

    /// Receives a notification. Ignored by default.
    fn info(&mut self, info: &Info) {
        let _ = info;
    }
}

impl<P: Player + ?Sized> Player for &mut P {
    fn play(&mut self, view: &TableView) -> PlayerAction {
        (**self).play(view)
    }

    fn info(&mut self, info: &Info) {
        (**self).info(info);
    }
}
