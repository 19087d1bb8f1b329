use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{format_cards, Card};
use crate::errors::ActionError;
use crate::player::{Player, PlayerAction};
use crate::state::{HandHistory, StateId};
use crate::table::{Street, Table};

/// Decision maker for one seated player (a person, a script, a bot).
///
/// The engine calls [`request_action`](ActionRequester::request_action)
/// once per turn and blocks until it returns. Returning `None`, or an action
/// the engine rejects, costs one attempt; after
/// [`max_action_attempts`](crate::config::EngineConfig::max_action_attempts)
/// failed attempts the hand is aborted.
///
/// # Example Implementation
///
/// ```rust
/// use holdem_engine::player::PlayerAction;
/// use holdem_engine::requester::{ActionRequest, ActionRequester};
///
/// struct CallingStation;
///
/// impl ActionRequester for CallingStation {
///     fn request_action(&mut self, _request: &ActionRequest<'_>) -> Option<PlayerAction> {
///         Some(PlayerAction::Call)
///     }
/// }
/// ```
pub trait ActionRequester {
    fn request_action(&mut self, request: &ActionRequest<'_>) -> Option<PlayerAction>;

    /// Informational table events (board reveals, other players' actions,
    /// end of hand). Ignored by default.
    fn notify(&mut self, _event: &TableEvent) {}
}

/// Everything a requester may look at when deciding. The table includes
/// every player's hole cards; hiding opponents' cards is the requester's
/// responsibility.
pub struct ActionRequest<'a> {
    /// Seat index of the player being asked
    pub seat: usize,
    pub table: &'a Table,
    pub history: &'a HandHistory,
    /// Tail of the history chain when the request was made
    pub state: StateId,
    /// 1-based solicitation count for this turn
    pub attempt: u32,
    /// Why the previous attempt was refused, if it was
    pub rejected: Option<&'a ActionError>,
}

impl ActionRequest<'_> {
    pub fn player(&self) -> Option<&Player> {
        self.table.player(self.seat)
    }

    /// Chips needed to match the highest contribution.
    pub fn to_call(&self) -> u32 {
        let contributed = self.player().map(|p| p.contributed()).unwrap_or_default();
        self.table.highest_contribution().saturating_sub(contributed)
    }
}

/// Something that happened at the table, broadcast to every requester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableEvent {
    BoardDealt { street: Street, cards: Vec<Card> },
    PlayerActed { name: String, action: PlayerAction, committed: u32 },
    HandFinished { stacks: BTreeMap<String, u32> },
}

impl fmt::Display for TableEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableEvent::BoardDealt {
                street: Street::Flop,
                cards,
            } => write!(f, "The dealer has dealt the flop: {}", format_cards(cards)),
            TableEvent::BoardDealt { street, cards } => {
                write!(f, "The dealer has dealt the {} card: {}", street, format_cards(cards))
            }
            TableEvent::PlayerActed { name, action, .. } => write!(f, "{} {}", name, action),
            TableEvent::HandFinished { stacks } => {
                let parts: Vec<String> = stacks
                    .iter()
                    .map(|(name, chips)| format!("{}={}", name, chips))
                    .collect();
                write!(f, "Hand finished: {}", parts.join(", "))
            }
        }
    }
}
