//! Player and dealer hand representations.

use alloc::vec::Vec;

use crate::card::Card;

/// Signed hand value: aces count 11 until the total would bust, then 1.
///
/// The result is negative when at least one ace still counts 11 (a soft
/// hand) and positive otherwise.
fn evaluate_cards(cards: &[Card]) -> i32 {
    let mut value: i32 = 0;
    let mut soft_aces: i32 = 0;

    for card in cards {
        if card.is_ace() {
            soft_aces += 1;
        }
        value += i32::from(card.value());
    }

    while value > 21 && soft_aces > 0 {
        value -= 10;
        soft_aces -= 1;
    }

    if soft_aces > 0 { -value } else { value }
}

/// An ordered sequence of cards, in deal order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Creates an empty hand.
    #[must_use]
    pub const fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Creates a hand holding the given cards.
    #[must_use]
    pub fn from_cards(cards: &[Card]) -> Self {
        Self {
            cards: cards.to_vec(),
        }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Signed value: negative for soft hands, positive for hard ones.
    ///
    /// Use `value().abs()` to compare against thresholds.
    ///
    /// ```
    /// use bjsim::{Card, Hand};
    ///
    /// let hand = Hand::from_cards(&["AS".parse::<Card>().unwrap(), "6H".parse().unwrap()]);
    /// assert_eq!(hand.value(), -17);
    /// ```
    #[must_use]
    pub fn value(&self) -> i32 {
        evaluate_cards(&self.cards)
    }

    /// Absolute value of the hand.
    #[must_use]
    pub fn total(&self) -> i32 {
        self.value().abs()
    }

    /// Returns whether an ace is still counted as 11.
    #[must_use]
    pub fn is_soft(&self) -> bool {
        self.value() < 0
    }

    /// Exactly two cards totalling 21.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.total() == 21
    }

    /// Total above 21.
    #[must_use]
    pub fn is_busted(&self) -> bool {
        self.total() > 21
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Removes and returns the second card (for splitting).
    pub fn take_split_card(&mut self) -> Option<Card> {
        if self.cards.len() == 2 {
            self.cards.pop()
        } else {
            None
        }
    }

    /// Clears the hand.
    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

/// A player's hand with its wager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerHand {
    hand: Hand,
    id: usize,
    bet: u32,
    insured: bool,
    doubled: bool,
    from_split: bool,
}

impl PlayerHand {
    /// Creates an empty hand with the given id and bet.
    #[must_use]
    pub const fn new(id: usize, bet: u32) -> Self {
        Self {
            hand: Hand::new(),
            id,
            bet,
            insured: false,
            doubled: false,
            from_split: false,
        }
    }

    /// Creates a new hand from a split, holding a single card.
    #[must_use]
    pub fn from_split(id: usize, card: Card, bet: u32) -> Self {
        Self {
            hand: Hand::from_cards(&[card]),
            id,
            bet,
            insured: false,
            doubled: false,
            from_split: true,
        }
    }

    /// The hand's id: 1 for the first hand, then split hands in creation order.
    #[must_use]
    pub const fn id(&self) -> usize {
        self.id
    }

    /// The cards.
    #[must_use]
    pub const fn hand(&self) -> &Hand {
        &self.hand
    }

    pub(crate) const fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.hand.add_card(card);
    }

    /// The amount wagered on this hand.
    #[must_use]
    pub const fn bet(&self) -> u32 {
        self.bet
    }

    pub(crate) const fn set_bet(&mut self, bet: u32) {
        self.bet = bet;
    }

    /// Doubles the bet amount and marks the hand doubled.
    ///
    /// Bets are capped at [`MAX_WAGER`](crate::options::MAX_WAGER), so the
    /// doubled amount fits.
    pub const fn double_bet(&mut self) {
        self.bet *= 2;
        self.doubled = true;
    }

    /// Whether insurance was taken on this hand.
    #[must_use]
    pub const fn is_insured(&self) -> bool {
        self.insured
    }

    pub(crate) const fn insure(&mut self) {
        self.insured = true;
    }

    /// Whether the hand was doubled down.
    #[must_use]
    pub const fn is_doubled(&self) -> bool {
        self.doubled
    }

    /// Returns whether this hand came out of a split.
    #[must_use]
    pub const fn is_from_split(&self) -> bool {
        self.from_split
    }

    pub(crate) const fn mark_split(&mut self) {
        self.from_split = true;
    }

    /// Split aces take exactly one more card.
    pub(crate) fn is_split_ace(&self) -> bool {
        self.from_split && self.hand.cards().first().is_some_and(|c| c.is_ace())
    }

    /// Returns whether the hand holds a pair of equal blackjack value.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        let cards = self.hand.cards();
        cards.len() == 2 && cards[0].value() == cards[1].value()
    }
}

/// The dealer's hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DealerHand {
    hand: Hand,
    hole_revealed: bool,
}

impl DealerHand {
    /// Creates a new empty dealer hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            hand: Hand::new(),
            hole_revealed: false,
        }
    }

    /// The cards.
    #[must_use]
    pub const fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Adds a card to the dealer's hand.
    pub fn add_card(&mut self, card: Card) {
        self.hand.add_card(card);
    }

    /// Returns the visible card (first card).
    #[must_use]
    pub fn up_card(&self) -> Option<Card> {
        self.hand.cards().first().copied()
    }

    /// Returns the hole card, if it has been dealt.
    #[must_use]
    pub fn hole_card(&self) -> Option<Card> {
        self.hand.cards().get(1).copied()
    }

    /// Returns whether the hole card is revealed.
    #[must_use]
    pub const fn is_hole_revealed(&self) -> bool {
        self.hole_revealed
    }

    /// Reveals the hole card.
    pub const fn reveal_hole(&mut self) {
        self.hole_revealed = true;
    }

    /// Signed value the players can see: the up card alone until the hole card is revealed.
    #[must_use]
    pub fn visible_value(&self) -> i32 {
        if self.hole_revealed {
            self.hand.value()
        } else {
            self.up_card().map_or(0, |card| {
                let value = i32::from(card.value());
                if card.is_ace() { -value } else { value }
            })
        }
    }

    /// Clears the hand for a new round.
    pub fn clear(&mut self) {
        self.hand.clear();
        self.hole_revealed = false;
    }
}
