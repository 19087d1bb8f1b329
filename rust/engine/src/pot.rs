use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Chips committed during the current hand, keyed by each seat's `order`.
///
/// The pot only records; checking that a seat can afford a contribution
/// and debiting its stack is the table's job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    contributions: BTreeMap<usize, u32>,
}

/// One layer of the pot. A seat holds a share only if its total
/// contribution reached `threshold`, so a short all-in never contests
/// chips it could not have matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidePot {
    threshold: u32,
    shares: BTreeMap<usize, u32>,
}

impl SidePot {
    /// Contribution level that closes this layer.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn total(&self) -> u64 {
        self.shares.values().map(|&c| u64::from(c)).sum()
    }

    pub fn contains(&self, order: usize) -> bool {
        self.shares.contains_key(&order)
    }

    pub fn share(&self, order: usize) -> u32 {
        self.shares.get(&order).copied().unwrap_or_default()
    }

    /// Seats holding a share, ascending by `order`.
    pub fn eligible(&self) -> impl Iterator<Item = usize> + '_ {
        self.shares.keys().copied()
    }

    pub fn shares(&self) -> &BTreeMap<usize, u32> {
        &self.shares
    }
}

impl Pot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A pot already holding the given `(order, amount)` contributions, as
    /// when replaying a recorded hand. Repeated orders accumulate.
    pub fn from_contributions<I>(contributions: I) -> Self
    where
        I: IntoIterator<Item = (usize, u32)>,
    {
        let mut pot = Self::new();
        for (order, amount) in contributions {
            pot.add(order, amount);
        }
        pot
    }

    pub(crate) fn add(&mut self, order: usize, amount: u32) {
        *self.contributions.entry(order).or_default() += amount;
    }

    pub(crate) fn reset(&mut self) {
        self.contributions.clear();
    }

    /// Sum of all contributions. Wider than a single stack.
    pub fn total(&self) -> u64 {
        self.contributions.values().map(|&c| u64::from(c)).sum()
    }

    pub fn contribution(&self, order: usize) -> u32 {
        self.contributions.get(&order).copied().unwrap_or_default()
    }

    pub fn contributions(&self) -> &BTreeMap<usize, u32> {
        &self.contributions
    }

    /// Splits the contributions into layers, smallest threshold first.
    ///
    /// ```
    /// use holdem_engine::pot::Pot;
    ///
    /// let pot = Pot::from_contributions([(0, 50), (1, 100), (2, 100)]);
    ///
    /// let layers = pot.side_pots();
    /// assert_eq!(layers.len(), 2);
    /// assert_eq!(layers[0].total(), 150);
    /// assert_eq!(layers[1].total(), 100);
    /// assert!(!layers[1].contains(0));
    /// ```
    pub fn side_pots(&self) -> Vec<SidePot> {
        let mut levels: Vec<u32> = self
            .contributions
            .values()
            .copied()
            .filter(|&amount| amount > 0)
            .collect();
        levels.sort_unstable();
        levels.dedup();

        let mut pots = Vec::with_capacity(levels.len());
        let mut prev_level = 0;
        for level in levels {
            let increment = level - prev_level;
            let shares: BTreeMap<usize, u32> = self
                .contributions
                .iter()
                .filter(|&(_, &amount)| amount >= level)
                .map(|(&order, _)| (order, increment))
                .collect();
            pots.push(SidePot {
                threshold: level,
                shares,
            });
            prev_level = level;
        }
        pots
    }
}

/// Divides `amount` evenly between `seats` (given by `order`). The integer
/// remainder goes out one chip at a time in ascending `order`.
///
/// ```
/// use holdem_engine::pot::split_evenly;
///
/// let split = split_evenly(100, &[2, 0, 1]);
/// assert_eq!(split, vec![(0, 34), (1, 33), (2, 33)]);
/// ```
pub fn split_evenly(amount: u64, seats: &[usize]) -> Vec<(usize, u64)> {
    if seats.is_empty() {
        return Vec::new();
    }
    let mut sorted = seats.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    let n = sorted.len() as u64;
    let per_seat = amount / n;
    let remainder = amount % n;
    sorted
        .into_iter()
        .zip(0u64..)
        .map(|(order, i)| (order, per_seat + u64::from(i < remainder)))
        .collect()
}
