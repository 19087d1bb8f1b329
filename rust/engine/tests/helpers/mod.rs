#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use holdem_engine::cards::{Card, Rank, Suit};
use holdem_engine::deck::Deck;
use holdem_engine::player::{Player, PlayerAction};
use holdem_engine::requester::{ActionRequest, ActionRequester, TableEvent};

/// One solicitation as seen by a scripted requester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asked {
    pub name: String,
    pub attempt: u32,
    pub rejected: bool,
}

/// Shared journal of solicitations and broadcast events.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    pub asked: Rc<RefCell<Vec<Asked>>>,
    pub events: Rc<RefCell<HashMap<String, Vec<TableEvent>>>>,
}

impl Journal {
    pub fn asked_names(&self) -> Vec<String> {
        self.asked.borrow().iter().map(|a| a.name.clone()).collect()
    }

    pub fn events_of(&self, name: &str) -> Vec<TableEvent> {
        self.events.borrow().get(name).cloned().unwrap_or_default()
    }
}

/// Plays back a fixed script, then falls back to a default reply.
/// Every request also checks that no chip went missing.
pub struct Scripted {
    name: String,
    script: VecDeque<Option<PlayerAction>>,
    fallback: Option<PlayerAction>,
    journal: Journal,
}

impl ActionRequester for Scripted {
    fn request_action(&mut self, request: &ActionRequest<'_>) -> Option<PlayerAction> {
        let table = request.table;
        assert_eq!(
            table.stacks_total() + table.pot().total(),
            table.total_n_chips_on_table(),
            "chips leaked before {} acted",
            self.name
        );
        assert_eq!(request.player().map(|p| p.name()), Some(self.name.as_str()));
        self.journal.asked.borrow_mut().push(Asked {
            name: self.name.clone(),
            attempt: request.attempt,
            rejected: request.rejected.is_some(),
        });
        self.script.pop_front().unwrap_or(self.fallback)
    }

    fn notify(&mut self, event: &TableEvent) {
        self.journal
            .events
            .borrow_mut()
            .entry(self.name.clone())
            .or_default()
            .push(event.clone());
    }
}

pub fn scripted(
    name: &str,
    script: Vec<Option<PlayerAction>>,
    fallback: Option<PlayerAction>,
    journal: &Journal,
) -> Box<dyn ActionRequester> {
    Box::new(Scripted {
        name: name.to_string(),
        script: script.into(),
        fallback,
        journal: journal.clone(),
    })
}

/// Seats `(name, stack, script)` with `Call` as the fallback reply.
pub fn seats(
    layout: &[(&str, u32, Vec<PlayerAction>)],
    journal: &Journal,
) -> Vec<(Player, Box<dyn ActionRequester>)> {
    layout.iter()
        .map(|(name, stack, script)| {
            let script = script.iter().copied().map(Some).collect();
            (
                Player::new(*name, *stack),
                scripted(name, script, Some(PlayerAction::Call), journal),
            )
        })
        .collect()
}

pub fn card(rank: Rank, suit: Suit) -> Card {
    Card::new(rank, suit)
}

const HOLE_RANKS: [Rank; 6] = [
    Rank::Ace,
    Rank::King,
    Rank::Queen,
    Rank::Jack,
    Rank::Ten,
    Rank::Nine,
];

/// Hole cards for seat `i` in the first hand: a pair of clubs/diamonds.
pub fn hole_of(i: usize) -> [Card; 2] {
    [
        card(HOLE_RANKS[i], Suit::Clubs),
        card(HOLE_RANKS[i], Suit::Diamonds),
    ]
}

pub fn default_board() -> [Card; 5] {
    [
        card(Rank::Two, Suit::Spades),
        card(Rank::Four, Suit::Spades),
        card(Rank::Six, Suit::Hearts),
        card(Rank::Eight, Suit::Hearts),
        card(Rank::Three, Suit::Spades),
    ]
}

/// Deck that deals `hole_of(i)` to seat `i` and then `default_board()`.
pub fn stacked_deck(n_players: usize) -> Deck {
    let mut cards = Vec::new();
    for pass in 0..2 {
        for i in 0..n_players {
            cards.push(hole_of(i)[pass]);
        }
    }
    cards.extend(default_board());
    Deck::stacked(cards)
}

/// Oracle ranking seat `i`'s holding (as dealt by `stacked_deck`) at
/// `ranks[i]`. Unknown holdings rank last.
pub fn ranks_by_seat(ranks: &[u32]) -> impl Fn(&[Card], &[Card]) -> u32 {
    let by_card: HashMap<Card, u32> = ranks
        .iter()
        .enumerate()
        .map(|(i, &r)| (hole_of(i)[0], r))
        .collect();
    move |_board: &[Card], hole: &[Card]| {
        hole.first()
            .and_then(|c| by_card.get(c))
            .copied()
            .unwrap_or(u32::MAX)
    }
}
