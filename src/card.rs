//! Card types and the constant card table.

use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use crate::error::ConfigError;

/// Card suit, in alphabetical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Suit {
    /// Clubs.
    Clubs,
    /// Diamonds.
    Diamonds,
    /// Hearts.
    Hearts,
    /// Spades.
    Spades,
}

impl Suit {
    /// All four suits in tag order.
    pub const ALL: [Self; 4] = [Self::Clubs, Self::Diamonds, Self::Hearts, Self::Spades];

    const fn from_index(index: u8) -> Self {
        match index {
            0 => Self::Clubs,
            1 => Self::Diamonds,
            2 => Self::Hearts,
            _ => Self::Spades,
        }
    }

    const fn index(self) -> u8 {
        match self {
            Self::Clubs => 0,
            Self::Diamonds => 1,
            Self::Hearts => 2,
            Self::Spades => 3,
        }
    }

    /// Single-letter notation (`C`, `D`, `H`, `S`).
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Clubs => 'C',
            Self::Diamonds => 'D',
            Self::Hearts => 'H',
            Self::Spades => 'S',
        }
    }

    /// Lower-case English name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Clubs => "clubs",
            Self::Diamonds => "diamonds",
            Self::Hearts => "hearts",
            Self::Spades => "spades",
        }
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;

#[derive(Clone, Copy)]
struct CardRecord {
    rank: u8,
    suit: Suit,
    value: u8,
}

const fn build_table() -> [CardRecord; DECK_SIZE] {
    let mut table = [CardRecord {
        rank: 0,
        suit: Suit::Clubs,
        value: 0,
    }; DECK_SIZE];

    let mut i = 0;
    while i < DECK_SIZE {
        let rank = 1 + (i % 13) as u8;
        table[i] = CardRecord {
            rank,
            suit: Suit::from_index((i / 13) as u8),
            value: if rank == 1 {
                11
            } else if rank > 10 {
                10
            } else {
                rank
            },
        };
        i += 1;
    }

    table
}

static CARD_TABLE: [CardRecord; DECK_SIZE] = build_table();

/// A playing card identified by its tag in `1..=52`.
///
/// Tags run ace to king within each suit, suits ordered clubs, diamonds,
/// hearts, spades. So tag 1 is the ace of clubs and tag 52 the king of spades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Card {
    tag: u8,
}

impl Card {
    /// Returns the card with the given tag, or `None` outside `1..=52`.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        if tag >= 1 && tag as usize <= DECK_SIZE {
            Some(Self { tag })
        } else {
            None
        }
    }

    /// Builds a card from suit and rank (1 = ace, 11 = jack, 12 = queen, 13 = king).
    ///
    /// Returns `None` if the rank is outside `1..=13`.
    #[must_use]
    pub const fn new(suit: Suit, rank: u8) -> Option<Self> {
        if rank == 0 || rank > 13 {
            return None;
        }
        Some(Self {
            tag: suit.index() * 13 + rank,
        })
    }

    /// Card at a zero-based position in a fresh deck. Wraps modulo 52.
    pub(crate) const fn from_index(index: usize) -> Self {
        Self {
            tag: (index % DECK_SIZE) as u8 + 1,
        }
    }

    fn record(self) -> CardRecord {
        CARD_TABLE[self.tag as usize - 1]
    }

    /// The tag in `1..=52`.
    #[must_use]
    pub const fn tag(self) -> u8 {
        self.tag
    }

    /// The rank (1 = ace ... 13 = king).
    #[must_use]
    pub fn rank(self) -> u8 {
        self.record().rank
    }

    /// The suit.
    #[must_use]
    pub fn suit(self) -> Suit {
        self.record().suit
    }

    /// The blackjack value: ace 11, face cards 10, otherwise the rank.
    #[must_use]
    pub fn value(self) -> u8 {
        self.record().value
    }

    /// Whether this card is an ace.
    #[must_use]
    pub fn is_ace(self) -> bool {
        self.rank() == 1
    }

    /// Whether this card counts ten (ten or face card).
    #[must_use]
    pub fn is_ten(self) -> bool {
        self.value() == 10
    }

    /// Lower-case English name of the rank (`"ace"`, `"deuce"`, ... `"king"`).
    #[must_use]
    pub fn rank_name(self) -> &'static str {
        const NAMES: [&str; 13] = [
            "ace", "deuce", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
            "jack", "queen", "king",
        ];
        NAMES[self.rank() as usize - 1]
    }

    fn rank_symbol(self) -> char {
        match self.rank() {
            1 => 'A',
            10 => 'T',
            11 => 'J',
            12 => 'Q',
            13 => 'K',
            r => (b'0' + r) as char,
        }
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> Self {
        card.tag
    }
}

impl TryFrom<u8> for Card {
    type Error = ConfigError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Self::from_tag(tag).ok_or(ConfigError::CardTagOutOfRange(i64::from(tag)))
    }
}

impl fmt::Display for Card {
    /// ASCII notation such as `AS` or `TH`; with `{:#}`, `"ace of spades"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{} of {}", self.rank_name(), self.suit().name())
        } else {
            write!(f, "{}{}", self.rank_symbol(), self.suit().letter())
        }
    }
}

impl FromStr for Card {
    type Err = ConfigError;

    /// Parses notation like `AS`, `kh`, `TD` or `10D`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidCard(s.to_string());
        let s_upper = s.trim().to_ascii_uppercase();
        let mut chars = s_upper.chars();
        let suit = match chars.next_back() {
            Some('C') => Suit::Clubs,
            Some('D') => Suit::Diamonds,
            Some('H') => Suit::Hearts,
            Some('S') => Suit::Spades,
            _ => return Err(invalid()),
        };
        let rank = match chars.as_str() {
            "A" => 1,
            "T" | "10" => 10,
            "J" => 11,
            "Q" => 12,
            "K" => 13,
            digit => match digit.parse::<u8>() {
                Ok(n @ 2..=9) => n,
                _ => return Err(invalid()),
            },
        };
        Self::new(suit, rank).ok_or_else(invalid)
    }
}
