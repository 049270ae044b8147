//! Running statistics of the player's results.

use crate::math;

/// Welford's online mean and variance.
///
/// ```
/// use bjsim::RunningStats;
///
/// let mut stats = RunningStats::new();
/// for x in [1.0, -1.0, 1.5, 0.0] {
///     stats.record(x);
/// }
/// assert_eq!(stats.count(), 4);
/// assert!((stats.mean() - 0.375).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    /// Creates an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
        }
    }

    /// Adds one observation.
    #[expect(
        clippy::cast_precision_loss,
        reason = "hand counts stay far below 2^52"
    )]
    pub fn record(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Number of observations.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Running mean, 0 when empty.
    #[must_use]
    pub const fn mean(&self) -> f64 {
        self.mean
    }

    /// Population variance, 0 when empty.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "hand counts stay far below 2^52"
    )]
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.m2 / self.count as f64
        }
    }

    /// Standard deviation.
    #[must_use]
    pub fn deviation(&self) -> f64 {
        math::sqrt(self.variance())
    }

    /// Error bound of the mean spanning `k` standard errors.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "hand counts stay far below 2^52"
    )]
    pub fn error(&self, k: f64) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            k * math::sqrt(self.variance() / self.count as f64)
        }
    }
}

/// Everything the dealer tracks about the player across a run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerStats {
    /// Money won (positive) or lost (negative) so far.
    pub bankroll: f64,
    /// Lowest bankroll seen.
    pub worst_bankroll: f64,
    /// Total of every wager placed, including doubles and insurance.
    pub total_money_waged: f64,
    /// Hands on which insurance was taken.
    pub hands_insured: u64,
    /// Hands doubled down.
    pub hands_doubled: u64,
    /// Player naturals.
    pub blackjacks_player: u64,
    /// Dealer naturals.
    pub blackjacks_dealer: u64,
    /// Player hands busted.
    pub busts_player: u64,
    /// Dealer busts.
    pub busts_dealer: u64,
    /// Player hands won.
    pub wins: u64,
    /// Insurance bets won.
    pub wins_insured: u64,
    /// Doubled hands won.
    pub wins_doubled: u64,
    /// Naturals paid.
    pub wins_blackjack: u64,
    /// Player hands pushed.
    pub pushes: u64,
    /// Player hands lost.
    pub losses: u64,
    /// Net result per round.
    pub outcomes: RunningStats,
}

impl PlayerStats {
    /// Takes a wager from the bankroll.
    pub fn wager(&mut self, amount: f64) {
        self.bankroll -= amount;
        self.total_money_waged += amount;
        if self.bankroll < self.worst_bankroll {
            self.worst_bankroll = self.bankroll;
        }
    }

    /// Pays money back to the bankroll.
    pub fn credit(&mut self, amount: f64) {
        self.bankroll += amount;
    }
}
