//! Runs a simple strategy for many hands and prints the report.
//!
//! ```text
//! cargo run --example simulate -- --decks 6 --rules "ahc s17 das doa" --hands 1000000
//! ```

#![allow(clippy::missing_docs_in_private_items)]

use core::error::Error;

use bjsim::{
    Game, GameOptions, InsuranceOption, Player, PlayerAction, PlayerActionRequired, TableView,
    parse_arranged_cards,
};
use clap::Parser;
use tracing::Level;

/// Blackjack dealer simulation.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Number of decks, 0 for an infinite deck.
    #[arg(short, long, default_value_t = 0)]
    decks: u8,

    /// Rule tokens, e.g. "enhc s17 ndas do9".
    #[arg(short, long, default_value = "ahc h17 das doa")]
    rules: String,

    /// Number of hands to play.
    #[arg(short = 'n', long, default_value_t = 1_000_000)]
    hands: u64,

    /// RNG seed.
    #[arg(short, long, default_value_t = 1)]
    seed: u64,

    /// Fraction of the shoe dealt before reshuffling.
    #[arg(long, default_value_t = 0.75)]
    penetration: f64,

    /// Standard deviation of the penetration.
    #[arg(long, default_value_t = 0.0)]
    penetration_sigma: f64,

    /// Blackjack payout ratio.
    #[arg(long, default_value_t = 1.5)]
    blackjack_pays: f64,

    /// Cards to deal first, e.g. "AS KH ? 9C".
    #[arg(long)]
    arranged: Option<String>,

    /// Highest report level to print.
    #[arg(short, long, default_value_t = 3)]
    level: u8,

    /// Log dealer steps.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Doubles 10 and 11, splits aces and eights, hits stiff hands against high cards.
struct Simple;

impl Player for Simple {
    fn play(&mut self, view: &TableView) -> PlayerAction {
        match view.required {
            PlayerActionRequired::Bet => return PlayerAction::Bet(1),
            PlayerActionRequired::Insurance => return PlayerAction::DontInsure,
            PlayerActionRequired::Play | PlayerActionRequired::None => {}
        }

        let total = view.player_value.abs();
        let dealer = view.dealer_value.abs();
        let soft = view.player_value < 0;

        if view.can_split && (total == 16 || (soft && total == 12)) {
            PlayerAction::Split
        } else if view.can_double && (total == 10 || total == 11) && dealer < 10 {
            PlayerAction::Double
        } else if total < 12 || (soft && total < 18) || (total < 17 && dealer >= 7) {
            PlayerAction::Hit
        } else {
            PlayerAction::Stand
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let mut options = GameOptions::default()
        .with_decks(args.decks)
        .with_rules(&args.rules)?
        .with_hands(args.hands)
        .with_flat_bet(1)
        .with_insurance(InsuranceOption::Never)
        .with_penetration(args.penetration)
        .with_penetration_sigma(args.penetration_sigma)
        .with_blackjack_pays(args.blackjack_pays);
    if let Some(list) = &args.arranged {
        options = options.with_arranged_cards(parse_arranged_cards(list)?);
    }

    let mut game = Game::new(options, args.seed)?;
    let report = game.run(&mut Simple)?;

    for item in report.items_up_to(args.level) {
        println!("{} = {}", item.key, item.value);
    }

    Ok(())
}
