//! Betting history of the hand in progress.
//!
//! Every applied action appends one immutable [`GameState`] that points back
//! at the state it was taken from. Nodes live in an append-only arena
//! ([`HandHistory`]) and are addressed by [`StateId`]; nothing outside the
//! crate can append, and nothing at all can rewrite a stored node.

use serde::{Deserialize, Serialize};

use crate::player::PlayerAction;
use crate::table::Street;

/// Handle of a node inside a [`HandHistory`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct StateId(usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Who acted: seat index at the time of acting plus the player's name.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub seat: usize,
    pub name: String,
}

/// One step of the hand: the previous state plus the action just taken.
/// The root of a hand has no actor and no action.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    previous: Option<StateId>,
    street: Street,
    actor: Option<Actor>,
    action: Option<PlayerAction>,
    /// Chips the action moved into the pot
    committed: u32,
}

impl GameState {
    pub fn previous(&self) -> Option<StateId> {
        self.previous
    }
    pub fn street(&self) -> Street {
        self.street
    }
    pub fn actor(&self) -> Option<&Actor> {
        self.actor.as_ref()
    }
    pub fn action(&self) -> Option<PlayerAction> {
        self.action
    }
    pub fn committed(&self) -> u32 {
        self.committed
    }
    pub fn is_root(&self) -> bool {
        self.previous.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandHistory {
    nodes: Vec<GameState>,
}

impl Default for HandHistory {
    fn default() -> Self {
        Self::new_hand()
    }
}

impl HandHistory {
    /// A fresh history holding only the pre-flop root.
    pub fn new_hand() -> Self {
        Self {
            nodes: vec![GameState {
                previous: None,
                street: Street::Preflop,
                actor: None,
                action: None,
                committed: 0,
            }],
        }
    }

    pub fn root(&self) -> StateId {
        StateId(0)
    }

    /// Most recently appended state.
    pub fn current(&self) -> StateId {
        StateId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: StateId) -> Option<&GameState> {
        self.nodes.get(id.0)
    }

    /// Number of states, root included, so never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn advance(
        &mut self,
        street: Street,
        actor: Actor,
        action: PlayerAction,
        committed: u32,
    ) -> StateId {
        let previous = self.current();
        self.nodes.push(GameState {
            previous: Some(previous),
            street,
            actor: Some(actor),
            action: Some(action),
            committed,
        });
        self.current()
    }

    /// Follows the chain from `from` back to the root, newest first.
    pub fn walk_back(&self, from: StateId) -> WalkBack<'_> {
        WalkBack {
            history: self,
            next: Some(from),
        }
    }

    /// Actions of the hand so far, oldest first.
    pub fn actions(&self) -> Vec<&GameState> {
        let mut v: Vec<&GameState> = self
            .walk_back(self.current())
            .filter(|s| !s.is_root())
            .collect();
        v.reverse();
        v
    }
}

pub struct WalkBack<'a> {
    history: &'a HandHistory,
    next: Option<StateId>,
}

impl<'a> Iterator for WalkBack<'a> {
    type Item = &'a GameState;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let state = self.history.get(id)?;
        self.next = state.previous;
        Some(state)
    }
}
