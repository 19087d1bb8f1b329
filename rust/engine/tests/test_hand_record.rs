mod helpers;

use std::collections::HashMap;
use std::fs;

use helpers::{ranks_by_seat, seats, stacked_deck, Journal};
use holdem_engine::cards::{Card, Rank, Suit};
use holdem_engine::config::EngineConfig;
use holdem_engine::engine::Engine;
use holdem_engine::logger::{format_hand_id, ActionRecord, HandLogger, HandRecord, ShowdownInfo};
use holdem_engine::player::PlayerAction;
use holdem_engine::table::Street;

fn sample_record() -> HandRecord {
    HandRecord {
        hand_id: "20250102-000123".to_string(),
        actions: vec![
            ActionRecord {
                player: "alice".to_string(),
                street: Street::Preflop,
                action: PlayerAction::RaiseTo(50),
                committed: 45,
            },
            ActionRecord {
                player: "bob".to_string(),
                street: Street::Preflop,
                action: PlayerAction::Call,
                committed: 40,
            },
        ],
        board: vec![
            Card::new(Rank::Ace, Suit::Hearts),
            Card::new(Rank::Ace, Suit::Diamonds),
            Card::new(Rank::Ace, Suit::Clubs),
        ],
        stacks: [("alice".to_string(), 1_100), ("bob".to_string(), 900)]
            .into_iter()
            .collect(),
        ts: None,
        showdown: Some(ShowdownInfo {
            winners: vec!["alice".to_string()],
            payouts: [("alice".to_string(), 100)].into_iter().collect(),
        }),
    }
}

#[test]
fn hand_record_serializes_and_deserializes() {
    let rec = sample_record();
    let s = serde_json::to_string(&rec).expect("serialize");
    let back: HandRecord = serde_json::from_str(&s).expect("deserialize");
    assert_eq!(rec, back);
}

#[test]
fn missing_optional_fields_default_to_none() {
    let s = r#"{"hand_id":"20250102-000001","actions":[],"board":[],"stacks":{}}"#;
    let rec: HandRecord = serde_json::from_str(s).expect("deserialize");
    assert!(rec.ts.is_none());
    assert!(rec.showdown.is_none());
}

#[test]
fn id_format_is_date_and_padded_sequence() {
    assert_eq!(format_hand_id("20251231", 42), "20251231-000042");
}

#[test]
fn logger_writes_one_lf_line_with_timestamp() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("logs").join("hands.jsonl");
    let mut logger = HandLogger::create(&path).expect("create logger");
    logger.write(&sample_record()).expect("write");

    let bytes = fs::read(&path).expect("read file");
    assert!(bytes.ends_with(b"\n"));
    assert!(!bytes.contains(&b'\r'));
    let text = String::from_utf8(bytes).expect("utf8");
    let back: HandRecord = serde_json::from_str(text.trim_end()).expect("parse line");
    let ts = back.ts.expect("timestamp injected");
    assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
}

#[test]
fn logger_keeps_an_existing_timestamp() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("hands.jsonl");
    let mut logger = HandLogger::create(&path).expect("create logger");
    let mut rec = sample_record();
    rec.ts = Some("2025-01-02T03:04:05Z".to_string());
    logger.write(&rec).expect("write");

    let text = fs::read_to_string(&path).expect("read file");
    let back: HandRecord = serde_json::from_str(text.trim_end()).expect("parse line");
    assert_eq!(back.ts.as_deref(), Some("2025-01-02T03:04:05Z"));
}

#[test]
fn engine_logs_every_hand() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("hands.jsonl");
    let journal = Journal::default();
    let seats = seats(
        &[("alice", 1_000, vec![]), ("bob", 1_000, vec![PlayerAction::Fold])],
        &journal,
    );
    let mut eng = Engine::new(
        EngineConfig::new(5, 10),
        seats,
        stacked_deck(2),
        ranks_by_seat(&[1, 2]),
    )
    .expect("engine")
    .with_hand_logger(HandLogger::create(&path).expect("create logger"));

    let first = eng.play_one_round().expect("hand 1");
    let second = eng.play_one_round().expect("hand 2");

    let text = fs::read_to_string(&path).expect("read file");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    let logged: Vec<HandRecord> = lines
        .iter()
        .map(|l| serde_json::from_str(l).expect("parse line"))
        .collect();
    assert_eq!(logged[0].hand_id, first.hand_id);
    assert_eq!(logged[1].hand_id, second.hand_id);
    assert!(logged[0].hand_id.ends_with("-000001"));
    assert!(logged[1].hand_id.ends_with("-000002"));
    assert_eq!(logged[1].stacks, second.stacks);
}

#[test]
fn record_lists_actions_in_order() {
    let journal = Journal::default();
    let seats = seats(
        &[
            ("alice", 1_000, vec![]),
            ("bob", 1_000, vec![]),
            ("carol", 1_000, vec![PlayerAction::RaiseTo(30)]),
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

    let rec = eng.play_one_round().expect("hand ok");

    let first: Vec<(&str, PlayerAction, u32)> = rec
        .actions
        .iter()
        .take(3)
        .map(|a| (a.player.as_str(), a.action, a.committed))
        .collect();
    assert_eq!(
        first,
        vec![
            ("carol", PlayerAction::RaiseTo(30), 30),
            ("alice", PlayerAction::Call, 25),
            ("bob", PlayerAction::Call, 20),
        ]
    );
    let streets: HashMap<Street, usize> = rec.actions.iter().fold(HashMap::new(), |mut m, a| {
        *m.entry(a.street).or_default() += 1;
        m
    });
    assert_eq!(streets.get(&Street::Flop), Some(&3));
    assert_eq!(streets.get(&Street::River), Some(&3));
    assert_eq!(rec.stacks["alice"], 1_060);
}

#[test]
fn disabled_logger_accepts_and_drops() {
    let mut logger = HandLogger::disabled();
    assert!(!logger.is_enabled());
    logger.write(&sample_record()).expect("write is a no-op");
}
