//! # holdem-engine: Texas Hold'em Hand Engine
//!
//! Runs multi-player Texas Hold'em hands from blind posting through
//! showdown with exact chip accounting: side pots for all-ins, odd-chip
//! splits, rotating blinds and a conservation check after every betting
//! round.
//!
//! Decisions, dealing and hand ranking are supplied from outside through
//! [`requester::ActionRequester`], [`deck::Dealer`] and
//! [`showdown::HandRankOracle`].
//!
//! ## Core Modules
//!
//! - [`engine`] - Hand lifecycle: setup, betting rounds, showdown, cleanup
//! - [`pot`] - Per-seat contributions and side-pot layers
//! - [`table`] - Seats, board, betting stage and seat rotation
//! - [`state`] - Append-only history of the hand in progress
//! - [`rules`] - Validation of requested actions
//! - [`showdown`] - Ranking oracle and payout computation
//! - [`requester`] - Decision-maker interface and table events
//! - [`player`] - Player state and actions
//! - [`cards`] / [`deck`] - Card types and dealing
//! - [`config`] - Blinds and solicitation limits
//! - [`logger`] - HandRecord serialization
//! - [`errors`] - Error types
//!
//! ## Side Pots
//!
//! ```rust
//! use holdem_engine::pot::Pot;
//!
//! // order 0 went all-in short
//! let pot = Pot::from_contributions([(0, 300), (1, 1000), (2, 1000)]);
//!
//! let layers = pot.side_pots();
//! assert_eq!(layers[0].total(), 900);
//! assert_eq!(layers[1].total(), 1400);
//! assert_eq!(layers.iter().map(|p| p.total()).sum::<u64>(), pot.total());
//! ```
//!
//! ## Action Validation
//!
//! ```rust
//! use holdem_engine::rules::validate_action;
//! use holdem_engine::player::PlayerAction;
//!
//! // Raising to the current bet is not a raise
//! let result = validate_action(1000, 100, 100, PlayerAction::RaiseTo(100));
//! assert!(result.is_err());
//! ```

pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod logger;
pub mod player;
pub mod pot;
pub mod requester;
pub mod rules;
pub mod showdown;
pub mod state;
pub mod table;
