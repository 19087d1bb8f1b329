use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use crate::cards::Card;
use crate::pot::{split_evenly, SidePot};
use crate::table::Table;

/// Hand-strength oracle: lower values are stronger, equal values tie.
/// Only the ordering of the returned values matters.
///
/// Any `Fn(&[Card], &[Card]) -> u32` closure is an oracle.
pub trait HandRankOracle {
    fn evaluate(&self, board: &[Card], hole: &[Card]) -> u32;
}

impl<F> HandRankOracle for F
where
    F: Fn(&[Card], &[Card]) -> u32,
{
    fn evaluate(&self, board: &[Card], hole: &[Card]) -> u32 {
        self(board, hole)
    }
}

/// Result of dividing the pot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payout {
    /// Chips owed to each seat, keyed by `order`
    pub amounts: BTreeMap<usize, u64>,
    /// Seats that won at least one layer
    pub winners: BTreeSet<usize>,
}

impl Payout {
    pub fn total(&self) -> u64 {
        self.amounts.values().sum()
    }
}

/// Ranks every active player and groups equal ranks. Groups hold `order`
/// values, ascending, and come strongest first.
pub fn rank_players<O: HandRankOracle + ?Sized>(table: &Table, oracle: &O) -> Vec<Vec<usize>> {
    let mut grouped: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for p in table.players().iter().filter(|p| p.is_active()) {
        let rank = oracle.evaluate(table.board(), p.hole_cards());
        debug!(player = p.name(), rank, "hand ranked");
        grouped.entry(rank).or_default().push(p.order());
    }
    grouped
        .into_values()
        .map(|mut group| {
            group.sort_unstable();
            group
        })
        .collect()
}

/// Pays every layer to the strongest group holding a share in it. A layer
/// no ranked player reached goes back to the seats that built it.
pub fn compute_payouts(side_pots: &[SidePot], ranked_groups: &[Vec<usize>]) -> Payout {
    let mut payout = Payout::default();
    for pot in side_pots {
        let contenders = ranked_groups.iter().find_map(|group| {
            let in_pot: Vec<usize> = group.iter().copied().filter(|&o| pot.contains(o)).collect();
            (!in_pot.is_empty()).then_some(in_pot)
        });
        match contenders {
            Some(seats) => {
                for (order, chips) in split_evenly(pot.total(), &seats) {
                    *payout.amounts.entry(order).or_default() += chips;
                    payout.winners.insert(order);
                }
            }
            None => {
                warn!(
                    threshold = pot.threshold(),
                    total = pot.total(),
                    "no contender for side pot, refunding"
                );
                for (&order, &chips) in pot.shares() {
                    *payout.amounts.entry(order).or_default() += u64::from(chips);
                }
            }
        }
    }
    payout
}
