//! A blackjack dealer engine for running large numbers of hands against a
//! programmable player, with optional `no_std` support.
//!
//! The crate provides a [`Game`] state machine that deals from a [`Shoe`],
//! applies the configured house rules, settles every hand, and keeps
//! running statistics of the player's results. A run is driven either step
//! by step with [`Game::advance`] and [`Game::apply`], or all at once with
//! [`Game::run`] against any [`Player`].
//!
//! # Example
//!
//! ```
//! use bjsim::{Game, GameOptions, Player, PlayerAction, PlayerActionRequired, TableView};
//!
//! struct Stander;
//!
//! impl Player for Stander {
//!     fn play(&mut self, view: &TableView) -> PlayerAction {
//!         match view.required {
//!             PlayerActionRequired::Insurance => PlayerAction::DontInsure,
//!             _ => PlayerAction::Stand,
//!         }
//!     }
//! }
//!
//! let options = GameOptions::default()
//!     .with_decks(6)
//!     .with_flat_bet(1)
//!     .with_hands(1_000);
//! let mut game = Game::new(options, 42).unwrap();
//! let report = game.run(&mut Stander).unwrap();
//! assert_eq!(report.get("hands"), Some(1_000.0));
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod error;
pub mod game;
pub mod hand;
mod math;
pub mod options;
pub mod player;
pub mod report;
pub mod shoe;
pub mod stats;

// Re-export main types
pub use card::{Card, DECK_SIZE, Suit};
pub use error::{ActionError, ConfigError, GameError, ShoeError};
pub use game::{ActionResponse, DealerAction, Game, Phase, PlayerActionRequired};
pub use hand::{DealerHand, Hand, PlayerHand};
pub use options::{
    ArrangedCard, ArrangedExhaustion, DoubleOption, GameOptions, HoleCard, InsuranceOption,
    MAX_WAGER, parse_arranged_cards,
};
pub use player::{Info, Player, PlayerAction, TableView};
pub use report::{Report, ReportItem};
pub use shoe::Shoe;
pub use stats::{PlayerStats, RunningStats};
