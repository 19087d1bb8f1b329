use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::EngineError;

/// A betting decision returned by an action requester.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Match the highest contribution (a check when already level)
    Call,
    /// Raise the seat's total contribution to this absolute amount
    RaiseTo(u32),
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerAction::Fold => write!(f, "folds"),
            PlayerAction::Call => write!(f, "calls"),
            PlayerAction::RaiseTo(n) => write!(f, "raises to {}", n),
        }
    }
}

/// A seated player: chip stack plus all hand-scoped state.
///
/// `order` is assigned at the start of every hand and keys the player's
/// contribution in the pot; it is also the tie-break when an odd chip has
/// to be handed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    stack: u32,
    contributed: u32,
    hole: Vec<Card>,
    is_active: bool,
    is_all_in: bool,
    is_small_blind: bool,
    is_big_blind: bool,
    is_dealer: bool,
    order: usize,
}

impl Player {
    pub fn new(name: impl Into<String>, stack: u32) -> Self {
        Self {
            name: name.into(),
            stack,
            contributed: 0,
            hole: Vec::with_capacity(2),
            is_active: true,
            is_all_in: false,
            is_small_blind: false,
            is_big_blind: false,
            is_dealer: false,
            order: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    /// Chips this player has put into the pot during the current hand.
    pub fn contributed(&self) -> u32 {
        self.contributed
    }
    pub fn hole_cards(&self) -> &[Card] {
        &self.hole
    }
    pub fn is_active(&self) -> bool {
        self.is_active
    }
    pub fn is_all_in(&self) -> bool {
        self.is_all_in
    }
    pub fn is_small_blind(&self) -> bool {
        self.is_small_blind
    }
    pub fn is_big_blind(&self) -> bool {
        self.is_big_blind
    }
    pub fn is_dealer(&self) -> bool {
        self.is_dealer
    }
    pub fn order(&self) -> usize {
        self.order
    }

    /// Still contesting the pot and able to put more chips in.
    pub fn can_act(&self) -> bool {
        self.is_active && !self.is_all_in
    }

    pub(crate) fn set_order(&mut self, order: usize) {
        self.order = order;
    }

    pub(crate) fn set_positions(&mut self, small_blind: bool, big_blind: bool, dealer: bool) {
        self.is_small_blind = small_blind;
        self.is_big_blind = big_blind;
        self.is_dealer = dealer;
    }

    pub fn give_card(&mut self, c: Card) -> Result<(), EngineError> {
        if self.hole.len() >= 2 {
            return Err(EngineError::HoleCardsFull(self.name.clone()));
        }
        self.hole.push(c);
        Ok(())
    }

    pub(crate) fn fold(&mut self) {
        self.is_active = false;
    }

    /// Moves `amount` from the stack into this hand's contribution. Emptying
    /// the stack puts the player all-in.
    pub(crate) fn commit(&mut self, amount: u32) -> Result<(), EngineError> {
        if amount > self.stack {
            return Err(EngineError::InsufficientChips {
                name: self.name.clone(),
                amount,
                stack: self.stack,
            });
        }
        self.stack -= amount;
        self.contributed += amount;
        if self.stack == 0 && self.is_active {
            self.is_all_in = true;
        }
        Ok(())
    }

    pub(crate) fn clear_contribution(&mut self) {
        self.contributed = 0;
    }

    pub(crate) fn add_chips(&mut self, amount: u64) -> Result<(), EngineError> {
        let total = u64::from(self.stack) + amount;
        self.stack = u32::try_from(total).map_err(|_| EngineError::TooManyChips { total })?;
        Ok(())
    }

    /// Clears everything scoped to a single hand. The stack is kept.
    pub fn reset(&mut self) {
        self.contributed = 0;
        self.hole.clear();
        self.is_active = true;
        self.is_all_in = false;
        self.set_positions(false, false, false);
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (chips={}, bet={}{}{})",
            self.name,
            self.stack,
            self.contributed,
            if self.is_active { "" } else { ", folded" },
            if self.is_all_in { ", all-in" } else { "" },
        )
    }
}
