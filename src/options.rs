//! Game configuration options.

use alloc::string::ToString;
use alloc::vec::Vec;

use crate::card::Card;
use crate::error::ConfigError;

/// Conditions under which doubling down is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DoubleOption {
    /// Double down allowed on any two-card total (DOA).
    #[default]
    Any,
    /// Double down allowed only on totals of 9 through 11 (DO9).
    NineThrough11,
}

/// When the dealer receives the hole card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HoleCard {
    /// American hole card: dealt up front, dealer peeks for blackjack.
    #[default]
    American,
    /// European no hole card: the dealer's second card comes after the players act.
    European,
}

/// How insurance is handled when the dealer shows an ace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InsuranceOption {
    /// Ask the player every time.
    #[default]
    Ask,
    /// Never insure, without asking.
    Never,
    /// Always insure, without asking.
    Always,
}

/// Largest single wager the table accepts, so that a doubled bet still fits in `u32`.
pub const MAX_WAGER: u32 = u32::MAX / 2;

/// One entry of the arranged card list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArrangedCard {
    /// Deal exactly this card.
    Card(Card),
    /// Draw normally from the underlying source.
    Any,
}

/// What happens once the arranged card list runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArrangedExhaustion {
    /// Keep dealing from the shoe.
    #[default]
    Continue,
    /// End the run at the next hand boundary.
    Quit,
}

/// Parses a whitespace-separated arranged card list.
///
/// Tokens are card notation (`AS`, `kh`, `10D`), numeric tags in `1..=52`,
/// or `?`/`*` for "draw normally".
///
/// # Errors
///
/// Returns an error for unparsable notation or a numeric tag outside `1..=52`.
///
/// ```
/// use bjsim::options::{parse_arranged_cards, ArrangedCard};
///
/// let cards = parse_arranged_cards("AS KH ? 1").unwrap();
/// assert_eq!(cards.len(), 4);
/// assert_eq!(cards[2], ArrangedCard::Any);
/// ```
pub fn parse_arranged_cards(list: &str) -> Result<Vec<ArrangedCard>, ConfigError> {
    list.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            if token == "?" || token == "*" {
                return Ok(ArrangedCard::Any);
            }
            if let Ok(tag) = token.parse::<i64>() {
                return u8::try_from(tag)
                    .ok()
                    .and_then(Card::from_tag)
                    .map(ArrangedCard::Card)
                    .ok_or(ConfigError::CardTagOutOfRange(tag));
            }
            token.parse::<Card>().map(ArrangedCard::Card)
        })
        .collect()
}

/// Configuration options for a blackjack run.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjsim::GameOptions;
///
/// let options = GameOptions::default()
///     .with_decks(6)
///     .with_blackjack_pays(1.5)
///     .with_hit_soft_17(false);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameOptions {
    /// Number of decks, 0 for an infinite shoe.
    pub decks: u8,
    /// Hole card rule.
    pub hole_card: HoleCard,
    /// Whether the dealer hits soft 17.
    pub hit_soft_17: bool,
    /// Whether double down is allowed after split.
    pub double_after_split: bool,
    /// Double down conditions.
    pub double: DoubleOption,
    /// Maximum number of splits per round.
    pub resplits: u8,
    /// Blackjack payout ratio (typically 1.5).
    pub blackjack_pays: f64,
    /// Maximum bet, 0 for no limit below [`MAX_WAGER`].
    pub max_bet: u32,
    /// Cards burnt after every shuffle.
    pub burn_cards: u32,
    /// Fraction of the shoe dealt before the cut card.
    pub penetration: f64,
    /// Standard deviation of the cut card position, as a fraction of the shoe.
    pub penetration_sigma: f64,
    /// Whether to reshuffle before every hand.
    pub shuffle_every_hand: bool,
    /// Cards dealt before the shoe takes over.
    pub arranged_cards: Vec<ArrangedCard>,
    /// What to do once the arranged cards run out.
    pub arranged_exhaustion: ArrangedExhaustion,
    /// Number of hands to play, 0 to play until the player quits.
    pub hands: u64,
    /// Bet placed automatically every hand, 0 to ask the player.
    pub flat_bet: u32,
    /// Insurance policy.
    pub insurance: InsuranceOption,
    /// Consecutive invalid actions tolerated before the run is aborted.
    pub max_invalid_actions: u32,
    /// Standard deviations covered by the reported error.
    pub error_standard_deviations: f64,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            decks: 0,
            hole_card: HoleCard::American,
            hit_soft_17: true,
            double_after_split: true,
            double: DoubleOption::Any,
            resplits: 3,
            blackjack_pays: 1.5,
            max_bet: 0,
            burn_cards: 0,
            penetration: 0.75,
            penetration_sigma: 0.0,
            shuffle_every_hand: false,
            arranged_cards: Vec::new(),
            arranged_exhaustion: ArrangedExhaustion::Continue,
            hands: 1_000_000,
            flat_bet: 0,
            insurance: InsuranceOption::Ask,
            max_invalid_actions: 10,
            error_standard_deviations: 3.0,
        }
    }
}

impl GameOptions {
    /// Sets the number of decks (0 for an infinite shoe).
    ///
    /// # Example
    ///
    /// ```
    /// use bjsim::GameOptions;
    ///
    /// let options = GameOptions::default().with_decks(6);
    /// assert_eq!(options.decks, 6);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the hole card rule.
    #[must_use]
    pub const fn with_hole_card(mut self, hole_card: HoleCard) -> Self {
        self.hole_card = hole_card;
        self
    }

    /// Sets whether the dealer hits soft 17.
    ///
    /// # Example
    ///
    /// ```
    /// use bjsim::GameOptions;
    ///
    /// let options = GameOptions::default().with_hit_soft_17(false);
    /// assert!(!options.hit_soft_17);
    /// ```
    #[must_use]
    pub const fn with_hit_soft_17(mut self, hit: bool) -> Self {
        self.hit_soft_17 = hit;
        self
    }

    /// Sets whether double down is allowed after split.
    #[must_use]
    pub const fn with_double_after_split(mut self, allowed: bool) -> Self {
        self.double_after_split = allowed;
        self
    }

    /// Sets the double down conditions.
    ///
    /// # Example
    ///
    /// ```
    /// use bjsim::{GameOptions, DoubleOption};
    ///
    /// let options = GameOptions::default().with_double(DoubleOption::NineThrough11);
    /// assert_eq!(options.double, DoubleOption::NineThrough11);
    /// ```
    #[must_use]
    pub const fn with_double(mut self, double: DoubleOption) -> Self {
        self.double = double;
        self
    }

    /// Sets the maximum number of splits per round.
    #[must_use]
    pub const fn with_resplits(mut self, resplits: u8) -> Self {
        self.resplits = resplits;
        self
    }

    /// Sets the blackjack payout ratio.
    ///
    /// # Example
    ///
    /// ```
    /// use bjsim::GameOptions;
    ///
    /// let options = GameOptions::default().with_blackjack_pays(1.2);
    /// assert_eq!(options.blackjack_pays, 1.2);
    /// ```
    #[must_use]
    pub const fn with_blackjack_pays(mut self, ratio: f64) -> Self {
        self.blackjack_pays = ratio;
        self
    }

    /// Sets the maximum bet (0 for no limit).
    #[must_use]
    pub const fn with_max_bet(mut self, max_bet: u32) -> Self {
        self.max_bet = max_bet;
        self
    }

    /// Sets the number of cards burnt after every shuffle.
    #[must_use]
    pub const fn with_burn_cards(mut self, burn_cards: u32) -> Self {
        self.burn_cards = burn_cards;
        self
    }

    /// Sets the deck penetration.
    ///
    /// # Example
    ///
    /// ```
    /// use bjsim::GameOptions;
    ///
    /// let options = GameOptions::default().with_penetration(0.80);
    /// assert_eq!(options.penetration, 0.80);
    /// ```
    #[must_use]
    pub const fn with_penetration(mut self, penetration: f64) -> Self {
        self.penetration = penetration;
        self
    }

    /// Sets the standard deviation of the cut card position.
    #[must_use]
    pub const fn with_penetration_sigma(mut self, sigma: f64) -> Self {
        self.penetration_sigma = sigma;
        self
    }

    /// Sets whether to reshuffle before every hand.
    #[must_use]
    pub const fn with_shuffle_every_hand(mut self, shuffle: bool) -> Self {
        self.shuffle_every_hand = shuffle;
        self
    }

    /// Sets the arranged cards.
    #[must_use]
    pub fn with_arranged_cards(mut self, cards: Vec<ArrangedCard>) -> Self {
        self.arranged_cards = cards;
        self
    }

    /// Sets what happens once the arranged cards run out.
    #[must_use]
    pub const fn with_arranged_exhaustion(mut self, policy: ArrangedExhaustion) -> Self {
        self.arranged_exhaustion = policy;
        self
    }

    /// Sets the number of hands to play (0 to play until the player quits).
    #[must_use]
    pub const fn with_hands(mut self, hands: u64) -> Self {
        self.hands = hands;
        self
    }

    /// Sets the flat bet (0 to ask the player every hand).
    #[must_use]
    pub const fn with_flat_bet(mut self, bet: u32) -> Self {
        self.flat_bet = bet;
        self
    }

    /// Sets the insurance policy.
    #[must_use]
    pub const fn with_insurance(mut self, insurance: InsuranceOption) -> Self {
        self.insurance = insurance;
        self
    }

    /// Sets the number of consecutive invalid actions tolerated.
    #[must_use]
    pub const fn with_max_invalid_actions(mut self, max: u32) -> Self {
        self.max_invalid_actions = max;
        self
    }

    /// Sets how many standard deviations the reported error covers.
    #[must_use]
    pub const fn with_error_standard_deviations(mut self, k: f64) -> Self {
        self.error_standard_deviations = k;
        self
    }

    /// Applies a whitespace-separated list of rule tokens.
    ///
    /// Recognised tokens (case-insensitive): `ahc`, `enhc`, `h17`, `s17`,
    /// `das`, `ndas`, `doa`, `do9`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRuleToken`] for anything else.
    ///
    /// # Example
    ///
    /// ```
    /// use bjsim::{GameOptions, HoleCard};
    ///
    /// let options = GameOptions::default().with_rules("enhc s17 ndas").unwrap();
    /// assert_eq!(options.hole_card, HoleCard::European);
    /// assert!(!options.hit_soft_17);
    /// assert!(!options.double_after_split);
    /// assert!(GameOptions::default().with_rules("h17 surrender").is_err());
    /// ```
    pub fn with_rules(mut self, rules: &str) -> Result<Self, ConfigError> {
        for token in rules.split_whitespace() {
            match token.to_ascii_lowercase().as_str() {
                "ahc" => self.hole_card = HoleCard::American,
                "enhc" => self.hole_card = HoleCard::European,
                "h17" => self.hit_soft_17 = true,
                "s17" => self.hit_soft_17 = false,
                "das" => self.double_after_split = true,
                "ndas" => self.double_after_split = false,
                "doa" => self.double = DoubleOption::Any,
                "do9" => self.double = DoubleOption::NineThrough11,
                _ => return Err(ConfigError::InvalidRuleToken(token.to_string())),
            }
        }
        Ok(self)
    }

    /// Checks that the options describe a playable table.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.penetration > 0.0 && self.penetration <= 1.0) {
            return Err(ConfigError::InvalidPenetration(self.penetration));
        }
        if self.penetration_sigma.is_nan() || self.penetration_sigma < 0.0 {
            return Err(ConfigError::InvalidPenetrationSigma(self.penetration_sigma));
        }
        if self.blackjack_pays.is_nan() || self.blackjack_pays < 0.0 {
            return Err(ConfigError::InvalidBlackjackPayout(self.blackjack_pays));
        }
        let max_bet = self.max_wager();
        if self.flat_bet > max_bet {
            return Err(ConfigError::FlatBetExceedsMax {
                flat_bet: self.flat_bet,
                max_bet,
            });
        }
        if self.max_invalid_actions == 0 {
            return Err(ConfigError::ZeroInvalidActions);
        }
        Ok(())
    }

    /// The largest bet accepted: `max_bet`, capped at [`MAX_WAGER`] (0 means the cap).
    #[must_use]
    pub const fn max_wager(&self) -> u32 {
        if self.max_bet == 0 || self.max_bet > MAX_WAGER {
            MAX_WAGER
        } else {
            self.max_bet
        }
    }

    /// The rule tokens describing this table, e.g. `["ahc", "h17", "das", "doa"]`.
    #[must_use]
    pub const fn rules(&self) -> [&'static str; 4] {
        [
            match self.hole_card {
                HoleCard::American => "ahc",
                HoleCard::European => "enhc",
            },
            if self.hit_soft_17 { "h17" } else { "s17" },
            if self.double_after_split { "das" } else { "ndas" },
            match self.double {
                DoubleOption::Any => "doa",
                DoubleOption::NineThrough11 => "do9",
            },
        ]
    }
}
