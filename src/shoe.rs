//! The card source: an infinite random deck or a finite shoe, optionally
//! overlaid by a list of arranged cards.

use alloc::vec::Vec;
use core::f64::consts::TAU;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace, warn};

use crate::card::{Card, DECK_SIZE};
use crate::error::ShoeError;
use crate::math;
use crate::options::{ArrangedCard, GameOptions};

/// Supplies cards to the dealer.
///
/// With zero decks every draw is an independent uniform pick among the 52
/// cards. Otherwise the shoe holds `52 × decks` cards dealt without
/// replacement from a cursor, with a cut card marking the reshuffle point.
/// Arranged cards, while any remain, take precedence over both.
#[derive(Debug, Clone)]
pub struct Shoe {
    /// Shoe contents. Empty for an infinite deck.
    cards: Vec<Card>,
    /// Position of the next card to deal.
    cursor: usize,
    /// Reshuffle once the cursor passes this position.
    cut_card: usize,
    /// Number of shuffles so far.
    shuffles: u64,
    penetration: f64,
    penetration_sigma: f64,
    arranged: Vec<ArrangedCard>,
    arranged_cursor: usize,
    rng: ChaCha8Rng,
}

impl Shoe {
    /// Creates a card source from the shoe-related options.
    ///
    /// A finite shoe starts in deck order and must be shuffled before use.
    #[must_use]
    pub fn new(options: &GameOptions, seed: u64) -> Self {
        let total = usize::from(options.decks) * DECK_SIZE;
        let cards = (0..total).map(Card::from_index).collect();

        Self {
            cards,
            cursor: 0,
            cut_card: total,
            shuffles: 0,
            penetration: options.penetration,
            penetration_sigma: options.penetration_sigma,
            arranged: options.arranged_cards.clone(),
            arranged_cursor: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Returns whether this is an infinite deck.
    #[must_use]
    pub fn is_infinite(&self) -> bool {
        self.cards.is_empty()
    }

    /// Total number of cards in a finite shoe, 0 when infinite.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the shoe holds no cards (i.e. it is infinite).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Position of the next card to deal.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Position of the cut card.
    #[must_use]
    pub const fn cut_card(&self) -> usize {
        self.cut_card
    }

    /// Number of shuffles performed so far.
    #[must_use]
    pub const fn shuffles(&self) -> u64 {
        self.shuffles
    }

    /// The cards not dealt since the last shuffle.
    #[must_use]
    pub fn undealt(&self) -> &[Card] {
        &self.cards[self.cursor..]
    }

    /// Returns whether the cut card has come out.
    ///
    /// Always `false` for an infinite deck.
    #[must_use]
    pub const fn needs_shuffle(&self) -> bool {
        !self.cards.is_empty() && self.cursor >= self.cut_card
    }

    /// Returns whether every arranged card has been dealt.
    #[must_use]
    pub fn arranged_exhausted(&self) -> bool {
        self.arranged_cursor >= self.arranged.len()
    }

    /// Returns whether arranged cards were configured at all.
    #[must_use]
    pub fn has_arranged(&self) -> bool {
        !self.arranged.is_empty()
    }

    /// Shuffles the whole shoe, resets the cursor and places the cut card.
    ///
    /// No-op for an infinite deck.
    pub fn shuffle(&mut self) {
        if self.is_infinite() {
            return;
        }

        self.cards.shuffle(&mut self.rng);
        self.cursor = 0;
        self.shuffles += 1;

        let mut penetration = self.penetration;
        if self.penetration_sigma > 0.0 {
            penetration += self.penetration_sigma * self.standard_normal();
        }
        let penetration = penetration.clamp(0.0, 1.0);

        #[expect(
            clippy::cast_precision_loss,
            reason = "shoe sizes are far below f64 precision"
        )]
        let cut = math::round(penetration * self.cards.len() as f64) as usize;
        self.cut_card = cut.min(self.cards.len());

        debug!(
            shuffles = self.shuffles,
            cut_card = self.cut_card,
            "shoe shuffled"
        );
    }

    /// Box-Muller sample from N(0, 1).
    fn standard_normal(&mut self) -> f64 {
        let u1: f64 = 1.0 - self.rng.random::<f64>();
        let u2: f64 = self.rng.random();
        math::sqrt(-2.0 * math::ln(u1)) * math::cos(TAU * u2)
    }

    /// Deals the next card.
    ///
    /// Pending arranged cards come first. A wildcard entry, or an exhausted
    /// list, falls through to the shoe. A finite shoe that runs out is
    /// reshuffled on the spot.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::ArrangedCardNotFound`] when an arranged card is not
    /// among the undealt cards of a finite shoe.
    pub fn draw(&mut self) -> Result<Card, ShoeError> {
        let arranged = self.arranged.get(self.arranged_cursor).copied();
        if arranged.is_some() {
            self.arranged_cursor += 1;
        }

        let card = match arranged {
            Some(ArrangedCard::Card(card)) => self.draw_arranged(card)?,
            Some(ArrangedCard::Any) | None => self.draw_next(),
        };

        trace!(card = card.tag(), "card drawn");
        Ok(card)
    }

    /// Discards `count` cards from the shoe, bypassing arranged cards.
    pub fn burn(&mut self, count: u32) {
        for _ in 0..count {
            let card = self.draw_next();
            trace!(card = card.tag(), "card burnt");
        }
    }

    fn draw_next(&mut self) -> Card {
        if self.is_infinite() {
            return Card::from_index(self.rng.random_range(0..DECK_SIZE));
        }

        self.reshuffle_if_empty();
        let card = self.cards[self.cursor];
        self.cursor += 1;
        card
    }

    fn draw_arranged(&mut self, card: Card) -> Result<Card, ShoeError> {
        if self.is_infinite() {
            return Ok(card);
        }

        self.reshuffle_if_empty();
        let offset = self.cards[self.cursor..]
            .iter()
            .position(|&c| c == card)
            .ok_or(ShoeError::ArrangedCardNotFound(card))?;
        self.cards.swap(self.cursor, self.cursor + offset);
        self.cursor += 1;
        Ok(card)
    }

    fn reshuffle_if_empty(&mut self) {
        if self.cursor >= self.cards.len() {
            warn!(
                shuffles = self.shuffles,
                "shoe ran out of cards, reshuffling"
            );
            self.shuffle();
        }
    }
}
