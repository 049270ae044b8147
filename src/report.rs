//! End-of-run report as a flat key/value list.

use alloc::vec::Vec;

use crate::stats::PlayerStats;

/// A single report entry.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReportItem {
    /// Verbosity level: 1 is the most important.
    pub level: u8,
    /// Key name.
    pub key: &'static str,
    /// Value.
    pub value: f64,
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Report {
    items: Vec<ReportItem>,
}

impl Report {
    /// Builds the report from the player's statistics.
    ///
    /// `k` is the number of standard deviations spanned by `error`. Counters
    /// such as `wins` are reported as fractions of the hands played.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "hand counts stay far below 2^52"
    )]
    pub fn new(stats: &PlayerStats, k: f64) -> Self {
        let outcomes = &stats.outcomes;
        let hands = outcomes.count() as f64;
        let per_hand = |n: u64| if hands > 0.0 { n as f64 / hands } else { 0.0 };

        let items = [
            (1, "mean", outcomes.mean()),
            (1, "error", outcomes.error(k)),
            (2, "hands", hands),
            (2, "bankroll", stats.bankroll),
            (3, "worst_bankroll", stats.worst_bankroll),
            (3, "busts_player", per_hand(stats.busts_player)),
            (3, "busts_dealer", per_hand(stats.busts_dealer)),
            (3, "wins", per_hand(stats.wins)),
            (3, "pushes", per_hand(stats.pushes)),
            (3, "losses", per_hand(stats.losses)),
            (4, "total_money_waged", stats.total_money_waged),
            (5, "variance", outcomes.variance()),
            (5, "deviation", outcomes.deviation()),
        ]
        .into_iter()
        .map(|(level, key, value)| ReportItem { level, key, value })
        .collect();

        Self { items }
    }

    /// All entries in report order.
    #[must_use]
    pub fn items(&self) -> &[ReportItem] {
        &self.items
    }

    /// Entries at or below the given verbosity level.
    pub fn items_up_to(&self, level: u8) -> impl Iterator<Item = &ReportItem> {
        self.items.iter().filter(move |item| item.level <= level)
    }

    /// Looks up an entry by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        self.items
            .iter()
            .find(|item| item.key == key)
            .map(|item| item.value)
    }
}
