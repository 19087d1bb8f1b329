use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::EngineError;
use crate::player::Player;
use crate::pot::Pot;

/// Betting stage of the hand in progress.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Street {
    /// Hole cards dealt, blinds posted
    Preflop,
    /// Three community cards
    Flop,
    /// Fourth community card
    Turn,
    /// Fifth community card
    River,
    /// Betting closed, hands are compared
    Showdown,
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Street::Preflop => "pre-flop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
            Street::Showdown => "showdown",
        };
        f.write_str(s)
    }
}

/// The seats, the pot and the board of one table.
///
/// Seat order is acting order after the flop. Index 0 posts the small blind
/// and index 1 the big blind. Between hands everyone moves one seat to the
/// left.
#[derive(Debug, Clone)]
pub struct Table {
    players: Vec<Player>,
    pot: Pot,
    board: Vec<Card>,
    street: Street,
    total_n_chips_on_table: u64,
}

impl Table {
    pub fn new(players: Vec<Player>) -> Result<Self, EngineError> {
        if players.len() < 2 {
            return Err(EngineError::NotEnoughPlayers(players.len()));
        }
        let mut seen = HashSet::new();
        for p in &players {
            if !seen.insert(p.name()) {
                return Err(EngineError::DuplicatePlayer(p.name().to_string()));
            }
        }
        // every stack must be able to hold the whole table
        let total: u64 = players.iter().map(|p| u64::from(p.stack())).sum();
        if total > u64::from(u32::MAX) {
            return Err(EngineError::TooManyChips { total });
        }
        let mut table = Self {
            players,
            pot: Pot::new(),
            board: Vec::with_capacity(5),
            street: Street::Preflop,
            total_n_chips_on_table: 0,
        };
        table.assign_order_and_positions();
        table.recount_chips();
        Ok(table)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub(crate) fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }
    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }
    pub fn pot(&self) -> &Pot {
        &self.pot
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub(crate) fn board_mut(&mut self) -> &mut Vec<Card> {
        &mut self.board
    }
    pub fn street(&self) -> Street {
        self.street
    }
    pub(crate) fn set_street(&mut self, street: Street) {
        self.street = street;
    }

    /// Ground truth for the conservation check: every chip at the table,
    /// counted while the pot is empty.
    pub fn total_n_chips_on_table(&self) -> u64 {
        self.total_n_chips_on_table
    }

    /// Recomputes the cached total. Only meaningful while the pot is empty.
    pub(crate) fn recount_chips(&mut self) {
        self.total_n_chips_on_table = self.stacks_total() + self.pot.total();
    }

    pub fn stacks_total(&self) -> u64 {
        self.players.iter().map(|p| u64::from(p.stack())).sum()
    }

    pub fn contributions_total(&self) -> u64 {
        self.players.iter().map(|p| u64::from(p.contributed())).sum()
    }

    /// Seat index currently holding `order`.
    pub fn seat_by_order(&self, order: usize) -> Option<usize> {
        self.players.iter().position(|p| p.order() == order)
    }

    /// Hand-start bookkeeping: `order` follows the seat index, seat 0 is
    /// small blind, seat 1 big blind and the last seat deals. Heads-up the
    /// small blind deals.
    pub(crate) fn assign_order_and_positions(&mut self) {
        let n = self.players.len();
        let dealer = if n == 2 { 0 } else { n - 1 };
        for (i, p) in self.players.iter_mut().enumerate() {
            p.set_order(i);
            p.set_positions(i == 0, i == 1, i == dealer);
        }
    }

    /// Moves `amount` chips from seat's stack into the pot.
    pub(crate) fn contribute(&mut self, seat: usize, amount: u32) -> Result<(), EngineError> {
        let player = self
            .players
            .get_mut(seat)
            .ok_or(EngineError::InvalidSeat(seat))?;
        player.commit(amount)?;
        self.pot.add(player.order(), amount);
        Ok(())
    }

    pub(crate) fn fold(&mut self, seat: usize) {
        if let Some(p) = self.players.get_mut(seat) {
            p.fold();
        }
    }

    /// Credits chips won at showdown.
    pub(crate) fn award(&mut self, seat: usize, amount: u64) -> Result<(), EngineError> {
        self.players
            .get_mut(seat)
            .ok_or(EngineError::InvalidSeat(seat))?
            .add_chips(amount)
    }

    /// Empties the pot and every seat's contribution together, so the two
    /// never disagree.
    pub(crate) fn clear_pot(&mut self) {
        self.pot.reset();
        for p in &mut self.players {
            p.clear_contribution();
        }
    }

    /// End-of-hand reset of players and board. Stacks are untouched.
    pub(crate) fn reset_hand(&mut self) {
        for p in &mut self.players {
            p.reset();
        }
        self.board.clear();
    }

    /// Rotates seats left by one: seat 1 becomes seat 0 (next small blind).
    pub(crate) fn rotate(&mut self) {
        self.players.rotate_left(1);
    }

    pub fn n_active_players(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    pub fn n_all_in_players(&self) -> usize {
        self.players
            .iter()
            .filter(|p| p.is_active() && p.is_all_in())
            .count()
    }

    /// Players that can still freely make a move.
    pub fn n_players_with_moves(&self) -> usize {
        self.players.iter().filter(|p| p.can_act()).count()
    }

    pub fn highest_contribution(&self) -> u32 {
        self.players
            .iter()
            .map(|p| p.contributed())
            .max()
            .unwrap_or_default()
    }

    /// True while two active, non-all-in seats have put in different
    /// amounts. Vacuously false with zero or one such seat.
    pub fn more_betting_needed(&self) -> bool {
        let mut bets = self
            .players
            .iter()
            .filter(|p| p.can_act())
            .map(|p| p.contributed());
        match bets.next() {
            Some(first) => bets.any(|b| b != first),
            None => false,
        }
    }

    /// Seat indices in the order they act on a street. Pre-flop the blinds
    /// act last.
    pub fn betting_order(&self, is_pre_flop: bool) -> Vec<usize> {
        let n = self.players.len();
        if is_pre_flop {
            (2..n).chain(0..2.min(n)).collect()
        } else {
            (0..n).collect()
        }
    }
}
