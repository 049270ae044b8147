//! Error types for configuration, the shoe, and the dealer engine.

use alloc::string::String;

use thiserror::Error;

use crate::card::Card;

/// Errors detected while building the configuration, before any hand is dealt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A rule token is not recognised.
    #[error("unknown rule token `{0}`")]
    InvalidRuleToken(String),
    /// A card could not be parsed from its notation.
    #[error("invalid card `{0}`")]
    InvalidCard(String),
    /// A numeric card tag is outside `1..=52`.
    #[error("card tag {0} is outside 1..=52")]
    CardTagOutOfRange(i64),
    /// Penetration must be in `(0, 1]`.
    #[error("penetration {0} must be greater than 0 and at most 1")]
    InvalidPenetration(f64),
    /// Penetration jitter must not be negative.
    #[error("penetration standard deviation {0} must not be negative")]
    InvalidPenetrationSigma(f64),
    /// Blackjack payout ratio must not be negative.
    #[error("blackjack payout {0} must not be negative")]
    InvalidBlackjackPayout(f64),
    /// The flat bet is larger than the maximum bet.
    #[error("flat bet {flat_bet} exceeds the maximum bet {max_bet}")]
    FlatBetExceedsMax {
        /// Configured flat bet.
        flat_bet: u32,
        /// Configured maximum bet.
        max_bet: u32,
    },
    /// At least one invalid action must be tolerated.
    #[error("the maximum number of invalid actions must be at least 1")]
    ZeroInvalidActions,
}

/// Errors raised by the card source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShoeError {
    /// An arranged card is not among the undealt cards of the shoe.
    #[error("arranged card {0} is not in the remaining shoe")]
    ArrangedCardNotFound(Card),
}

/// Reasons a player action is rejected.
///
/// Rejections never change the engine state; the same input is requested again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Bet is zero or negative.
    #[error("bet {0} must be positive")]
    NonPositiveBet(i64),
    /// Bet exceeds the table maximum.
    #[error("bet {bet} exceeds the maximum of {max}")]
    BetAboveMaximum {
        /// Requested bet.
        bet: i64,
        /// Table maximum.
        max: u32,
    },
    /// Doubling down is not allowed on this hand.
    #[error("cannot double down on this hand")]
    CannotDouble,
    /// Splitting is not allowed on this hand.
    #[error("cannot split this hand")]
    CannotSplit,
    /// The action does not answer the pending request.
    #[error("action is not valid at this point")]
    Unexpected,
    /// The engine is not waiting for player input.
    #[error("no player input is pending")]
    NotPending,
}

/// Fatal errors that terminate a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// The card source failed.
    #[error(transparent)]
    Shoe(#[from] ShoeError),
    /// The player exceeded the allowed number of consecutive invalid actions.
    #[error("too many consecutive invalid actions ({0})")]
    TooManyInvalidActions(u32),
    /// The run has already finished.
    #[error("the game has finished")]
    Finished,
}
