mod helpers;

use std::collections::HashSet;

use helpers::{ranks_by_seat, seats, stacked_deck, Journal};
use holdem_engine::cards::{format_cards, Card, Rank, Suit};
use holdem_engine::config::EngineConfig;
use holdem_engine::deck::{Dealer, Deck};
use holdem_engine::engine::Engine;
use holdem_engine::errors::EngineError;
use holdem_engine::player::{Player, PlayerAction};
use holdem_engine::requester::TableEvent;
use holdem_engine::state::HandHistory;
use holdem_engine::table::Street;

#[test]
fn new_player_is_active_with_no_cards() {
    let p = Player::new("alice", 1_000);
    assert_eq!(p.name(), "alice");
    assert_eq!(p.stack(), 1_000);
    assert_eq!(p.contributed(), 0);
    assert!(p.is_active());
    assert!(!p.is_all_in());
    assert!(p.can_act());
    assert!(p.hole_cards().is_empty());
}

#[test]
fn player_holds_at_most_two_cards() {
    let mut p = Player::new("alice", 1_000);
    let a = Card::new(Rank::Ace, Suit::Spades);
    let k = Card::new(Rank::King, Suit::Spades);
    p.give_card(a).unwrap();
    p.give_card(k).unwrap();
    assert_eq!(p.hole_cards(), &[a, k]);
    let err = p
        .give_card(Card::new(Rank::Two, Suit::Clubs))
        .unwrap_err();
    assert!(matches!(err, EngineError::HoleCardsFull(ref n) if n == "alice"));

    p.reset();
    assert!(p.hole_cards().is_empty());
    assert_eq!(p.stack(), 1_000);
}

#[test]
fn actions_and_cards_read_naturally() {
    assert_eq!(PlayerAction::Fold.to_string(), "folds");
    assert_eq!(PlayerAction::Call.to_string(), "calls");
    assert_eq!(PlayerAction::RaiseTo(250).to_string(), "raises to 250");
    let cards = [
        Card::new(Rank::Ace, Suit::Spades),
        Card::new(Rank::Ten, Suit::Diamonds),
    ];
    assert_eq!(format_cards(&cards), "[As, Td]");
    let event = TableEvent::PlayerActed {
        name: "bob".to_string(),
        action: PlayerAction::RaiseTo(40),
        committed: 30,
    };
    assert_eq!(event.to_string(), "bob raises to 40");
    let turn = TableEvent::BoardDealt {
        street: Street::Turn,
        cards: vec![Card::new(Rank::Seven, Suit::Clubs)],
    };
    assert_eq!(turn.to_string(), "The dealer has dealt the turn card: [7c]");
}

#[test]
fn factory_deck_has_52_unique_cards() {
    let mut deck = Deck::new();
    assert_eq!(deck.remaining(), 52);
    let mut seen = HashSet::new();
    while let Some(c) = deck.draw() {
        assert!(seen.insert(c), "duplicate {}", c);
    }
    assert_eq!(seen.len(), 52);
    deck.reset();
    assert_eq!(deck.remaining(), 52);
}

#[test]
fn stacked_deck_deals_round_robin_and_runs_out() {
    let cards: Vec<Card> = [Rank::Two, Rank::Three, Rank::Four, Rank::Five]
        .into_iter()
        .map(|r| Card::new(r, Suit::Hearts))
        .collect();
    let mut deck = Deck::stacked(cards.clone());
    let mut players = vec![Player::new("a", 10), Player::new("b", 10)];
    deck.deal_private_cards(&mut players).unwrap();
    assert_eq!(players[0].hole_cards(), &[cards[0], cards[2]]);
    assert_eq!(players[1].hole_cards(), &[cards[1], cards[3]]);

    let mut board = Vec::new();
    assert!(matches!(
        deck.deal_flop(&mut board),
        Err(EngineError::DeckExhausted)
    ));
}

#[test]
fn stacked_deck_drops_duplicates() {
    let c = Card::new(Rank::Ace, Suit::Clubs);
    let deck = Deck::stacked(vec![c, c, Card::new(Rank::King, Suit::Clubs)]);
    assert_eq!(deck.remaining(), 2);
}

#[test]
fn fresh_history_is_just_the_root() {
    let h = HandHistory::new_hand();
    assert_eq!(h.len(), 1);
    assert_eq!(h.current(), h.root());
    let root = h.get(h.root()).expect("root");
    assert!(root.is_root());
    assert!(root.actor().is_none());
    assert!(h.actions().is_empty());
}

#[test]
fn history_chain_walks_back_to_the_root() {
    let journal = Journal::default();
    let seats = seats(
        &[
            ("alice", 1_000, vec![]),
            ("bob", 1_000, vec![]),
            ("carol", 1_000, vec![]),
        ],
        &journal,
    );
    let mut eng = Engine::new(
        EngineConfig::new(5, 10),
        seats,
        stacked_deck(3),
        ranks_by_seat(&[1, 2, 3]),
    )
    .expect("engine");

    eng.round_setup().expect("setup");
    assert_eq!(eng.state(), eng.history().root());
    eng.play_one_round().expect("hand ok");

    let history = eng.history();
    let chain: Vec<_> = history.walk_back(eng.state()).collect();
    assert_eq!(chain.len(), 13);
    assert!(chain.last().expect("root").is_root());
    assert!(chain[..12].iter().all(|s| !s.is_root()));
    // newest first: carol closes the river
    let newest = chain[0];
    assert_eq!(newest.actor().map(|a| a.name.as_str()), Some("carol"));
    assert_eq!(newest.street(), Street::River);
    // every link points at an earlier node
    let mut id = eng.state();
    while let Some(prev) = history.get(id).and_then(|s| s.previous()) {
        assert!(prev.index() < id.index());
        id = prev;
    }
    assert_eq!(id, history.root());
}

#[test]
fn requesters_hear_every_action() {
    let journal = Journal::default();
    let seats = seats(
        &[
            ("alice", 1_000, vec![]),
            ("bob", 1_000, vec![PlayerAction::Fold]),
            ("carol", 1_000, vec![]),
        ],
        &journal,
    );
    let mut eng = Engine::new(
        EngineConfig::new(5, 10),
        seats,
        stacked_deck(3),
        ranks_by_seat(&[1, 2, 3]),
    )
    .expect("engine");
    eng.play_one_round().expect("hand ok");

    let heard: Vec<String> = journal
        .events_of("alice")
        .iter()
        .filter(|e| matches!(e, TableEvent::PlayerActed { .. }))
        .map(|e| e.to_string())
        .collect();
    assert_eq!(&heard[..3], &["carol calls", "alice calls", "bob folds"]);
    assert_eq!(journal.events_of("bob").len(), journal.events_of("carol").len());
}
