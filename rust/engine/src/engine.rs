use std::collections::BTreeMap;

use tracing::{debug, error, info, warn};

use crate::cards::format_cards;
use crate::config::EngineConfig;
use crate::deck::Dealer;
use crate::errors::{ActionError, EngineError};
use crate::logger::{format_hand_id, ActionRecord, HandLogger, HandRecord, ShowdownInfo};
use crate::player::{Player, PlayerAction};
use crate::requester::{ActionRequest, ActionRequester, TableEvent};
use crate::rules::{validate_action, ValidatedAction};
use crate::showdown::{compute_payouts, rank_players, HandRankOracle, Payout};
use crate::state::{Actor, HandHistory, StateId};
use crate::table::{Street, Table};

/// Runs hands of Texas Hold'em at one table, from blinds to payout.
///
/// The engine owns the table, the pot and the hand history. Requesters and
/// the ranking oracle only ever see shared references to them.
/// Chip conservation is checked after every betting round and a mismatch
/// aborts the hand.
///
/// # Examples
///
/// ```
/// use holdem_engine::cards::Card;
/// use holdem_engine::config::EngineConfig;
/// use holdem_engine::deck::Deck;
/// use holdem_engine::engine::Engine;
/// use holdem_engine::player::{Player, PlayerAction};
/// use holdem_engine::requester::{ActionRequest, ActionRequester};
///
/// struct AlwaysCall;
///
/// impl ActionRequester for AlwaysCall {
///     fn request_action(&mut self, _request: &ActionRequest<'_>) -> Option<PlayerAction> {
///         Some(PlayerAction::Call)
///     }
/// }
///
/// // Every holding ties, so the pot is split three ways.
/// let oracle = |_board: &[Card], _hole: &[Card]| 1u32;
/// let seats: Vec<(Player, Box<dyn ActionRequester>)> = vec![
///     (Player::new("alice", 1_000), Box::new(AlwaysCall)),
///     (Player::new("bob", 1_000), Box::new(AlwaysCall)),
///     (Player::new("carol", 1_000), Box::new(AlwaysCall)),
/// ];
/// let mut engine = Engine::new(EngineConfig::new(5, 10), seats, Deck::new(), oracle).unwrap();
///
/// let record = engine.play_one_round().unwrap();
/// assert_eq!(record.stacks["alice"], 1_000);
/// assert_eq!(record.board.len(), 5);
/// // Blinds moved on: bob posts the small blind next.
/// assert_eq!(engine.table().players()[0].name(), "bob");
/// ```
pub struct Engine<D, O> {
    config: EngineConfig,
    table: Table,
    dealer: D,
    oracle: O,
    requesters: BTreeMap<String, Box<dyn ActionRequester>>,
    history: HandHistory,
    state: StateId,
    hand_seq: u32,
    logger: HandLogger,
}

impl<D: Dealer, O: HandRankOracle> Engine<D, O> {
    /// Seats every player in the given order (seat 0 posts the first small
    /// blind) together with the requester that decides for it.
    pub fn new(
        config: EngineConfig,
        seats: Vec<(Player, Box<dyn ActionRequester>)>,
        dealer: D,
        oracle: O,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let mut players = Vec::with_capacity(seats.len());
        let mut requesters = BTreeMap::new();
        for (player, requester) in seats {
            requesters.insert(player.name().to_string(), requester);
            players.push(player);
        }
        let table = Table::new(players)?;
        let history = HandHistory::new_hand();
        let state = history.root();
        Ok(Self {
            config,
            table,
            dealer,
            oracle,
            requesters,
            history,
            state,
            hand_seq: 0,
            logger: HandLogger::disabled(),
        })
    }

    /// Writes every finished hand's record through `logger`.
    pub fn with_hand_logger(mut self, logger: HandLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
    pub fn table(&self) -> &Table {
        &self.table
    }
    pub fn history(&self) -> &HandHistory {
        &self.history
    }
    /// Tail of the current hand's history.
    pub fn state(&self) -> StateId {
        self.state
    }
    pub fn hands_played(&self) -> u32 {
        self.hand_seq
    }

    /// Plays one complete hand and returns its record.
    ///
    /// # Errors
    ///
    /// Configuration problems (a stack that cannot cover its blind),
    /// accounting mismatches and seats that never produce a usable action
    /// end the hand with an [`EngineError`]. Chips committed by an aborted
    /// hand are handed back at the next [`round_setup`](Self::round_setup).
    pub fn play_one_round(&mut self) -> Result<HandRecord, EngineError> {
        self.round_setup()?;
        self.all_dealing_and_betting_rounds()?;
        let record = self.compute_winners()?;
        self.round_cleanup();
        self.dealer.reset();
        self.logger.write(&record)?;
        Ok(record)
    }

    /// Starts a hand: empty pot, fresh history, `order` assigned by seat
    /// and both blinds posted.
    pub fn round_setup(&mut self) -> Result<(), EngineError> {
        if self.table.pot().total() > 0 {
            self.refund_abandoned_pot()?;
        }
        self.table.reset_hand();
        self.table.clear_pot();
        self.table.recount_chips();
        self.dealer.reset();
        self.history = HandHistory::new_hand();
        self.state = self.history.root();
        self.table.set_street(Street::Preflop);
        self.table.assign_order_and_positions();
        self.assign_blinds()?;
        self.hand_seq += 1;
        Ok(())
    }

    fn refund_abandoned_pot(&mut self) -> Result<(), EngineError> {
        warn!(
            pot = self.table.pot().total(),
            "previous hand was aborted, returning its contributions"
        );
        let refunds: Vec<(usize, u32)> = self
            .table
            .players()
            .iter()
            .enumerate()
            .map(|(seat, p)| (seat, p.contributed()))
            .filter(|&(_, chips)| chips > 0)
            .collect();
        self.table.clear_pot();
        for (seat, chips) in refunds {
            self.table.award(seat, u64::from(chips))?;
        }
        Ok(())
    }

    fn assign_blinds(&mut self) -> Result<(), EngineError> {
        if let Some(broke) = self.table.players().iter().find(|p| p.stack() == 0) {
            return Err(EngineError::OutOfChips {
                name: broke.name().to_string(),
            });
        }
        let blinds = [self.config.small_blind, self.config.big_blind];
        for (seat, &blind) in blinds.iter().enumerate() {
            let p = self
                .table
                .player(seat)
                .ok_or(EngineError::InvalidSeat(seat))?;
            if p.stack() < blind {
                return Err(EngineError::InsufficientBlind {
                    name: p.name().to_string(),
                    stack: p.stack(),
                    blind,
                });
            }
        }
        for (seat, &blind) in blinds.iter().enumerate() {
            self.table.contribute(seat, blind)?;
        }
        debug!(
            small_blind = self.config.small_blind,
            big_blind = self.config.big_blind,
            "blinds posted"
        );
        Ok(())
    }

    fn all_dealing_and_betting_rounds(&mut self) -> Result<(), EngineError> {
        self.dealer.deal_private_cards(self.table.players_mut())?;
        self.betting_round(true)?;

        for street in [Street::Flop, Street::Turn, Street::River] {
            self.table.set_street(street);
            self.deal_street(street)?;
            self.betting_round(false)?;
        }

        self.table.set_street(Street::Showdown);
        Ok(())
    }

    fn deal_street(&mut self, street: Street) -> Result<(), EngineError> {
        let before = self.table.board().len();
        match street {
            Street::Flop => self.dealer.deal_flop(self.table.board_mut())?,
            Street::Turn => self.dealer.deal_turn(self.table.board_mut())?,
            Street::River => self.dealer.deal_river(self.table.board_mut())?,
            Street::Preflop | Street::Showdown => return Ok(()),
        }
        let cards = self.table.board()[before..].to_vec();
        info!(%street, cards = %format_cards(&cards), "board dealt");
        self.announce(&TableEvent::BoardDealt { street, cards });
        Ok(())
    }

    /// One street of betting. Skipped when fewer than two players can still
    /// put chips in; the chip check runs either way.
    fn betting_round(&mut self, is_pre_flop: bool) -> Result<(), EngineError> {
        if self.table.n_players_with_moves() > 1 {
            self.bet_until_everyone_has_bet_evenly(is_pre_flop)?;
            debug!(
                active = self.table.n_active_players(),
                all_in = self.table.n_all_in_players(),
                "finished round of betting"
            );
        } else {
            debug!("skipping betting as no players are free to bet");
        }
        self.post_betting_analysis()
    }

    fn bet_until_everyone_has_bet_evenly(&mut self, is_pre_flop: bool) -> Result<(), EngineError> {
        let mut passes = 0u32;
        loop {
            self.all_active_players_take_action(is_pre_flop)?;
            passes += 1;
            debug!(passes, pot = self.table.pot().total(), "betting pass complete");
            if self.table.n_active_players() <= 1 || !self.table.more_betting_needed() {
                return Ok(());
            }
        }
    }

    /// One acting pass. Stops as soon as a single player is left in the
    /// hand.
    fn all_active_players_take_action(&mut self, is_pre_flop: bool) -> Result<(), EngineError> {
        for seat in self.table.betting_order(is_pre_flop) {
            if !self.table.player(seat).is_some_and(|p| p.can_act()) {
                continue;
            }
            if self.table.n_active_players() <= 1 {
                break;
            }
            self.take_turn(seat)?;
            if self.table.n_active_players() <= 1 {
                debug!("betting round ends, only one player remains");
                break;
            }
        }
        Ok(())
    }

    fn take_turn(&mut self, seat: usize) -> Result<(), EngineError> {
        let name = self
            .table
            .player(seat)
            .ok_or(EngineError::InvalidSeat(seat))?
            .name()
            .to_string();
        let attempts = self.config.max_action_attempts;
        let mut rejected: Option<ActionError> = None;

        for attempt in 1..=attempts {
            let requester = self
                .requesters
                .get_mut(&name)
                .ok_or_else(|| EngineError::MissingRequester(name.clone()))?;
            let request = ActionRequest {
                seat,
                table: &self.table,
                history: &self.history,
                state: self.state,
                attempt,
                rejected: rejected.as_ref(),
            };
            let Some(action) = requester.request_action(&request) else {
                warn!(player = %name, attempt, "requester returned no action");
                continue;
            };

            let player = self
                .table
                .player(seat)
                .ok_or(EngineError::InvalidSeat(seat))?;
            let checked = validate_action(
                player.stack(),
                player.contributed(),
                self.table.highest_contribution(),
                action,
            );
            match checked {
                Ok(validated) => return self.apply_action(seat, name, action, validated),
                Err(e) => {
                    debug!(player = %name, attempt, %action, reason = %e, "action rejected");
                    rejected = Some(e);
                }
            }
        }

        warn!(player = %name, attempts, "no valid action, aborting hand");
        Err(EngineError::NoDecision { name, attempts })
    }

    fn apply_action(
        &mut self,
        seat: usize,
        name: String,
        action: PlayerAction,
        validated: ValidatedAction,
    ) -> Result<(), EngineError> {
        let committed = validated.chips();
        match validated {
            ValidatedAction::Fold => self.table.fold(seat),
            _ => self.table.contribute(seat, committed)?,
        }
        let street = self.table.street();
        debug!(player = %name, %action, committed, %street, "action applied");
        self.state = self.history.advance(
            street,
            Actor {
                seat,
                name: name.clone(),
            },
            action,
            committed,
        );
        self.announce(&TableEvent::PlayerActed {
            name,
            action,
            committed,
        });
        Ok(())
    }

    /// Chips at the table must equal the total counted at the last empty
    /// pot, and the pot must equal what the players say they put in.
    fn post_betting_analysis(&self) -> Result<(), EngineError> {
        let pot = self.table.pot().total();
        let stacks = self.table.stacks_total();
        let expected = self.table.total_n_chips_on_table();
        let contributed = self.table.contributions_total();
        debug!(pot, stacks, contributed, "pot at the end of betting");

        if pot + stacks != expected {
            error!(pot, stacks, expected, "chip total changed during betting");
            return Err(EngineError::ChipsNotConserved {
                expected,
                actual: pot + stacks,
            });
        }
        if pot != contributed {
            error!(pot, contributed, "pot disagrees with player contributions");
            return Err(EngineError::PotMismatch { pot, contributed });
        }
        Ok(())
    }

    /// Ranks the remaining hands, pays every side pot and returns the hand
    /// record. Leaves the pot empty.
    pub fn compute_winners(&mut self) -> Result<HandRecord, EngineError> {
        let contested = self.table.n_active_players() > 1;
        let groups = rank_players(&self.table, &self.oracle);
        let side_pots = self.table.pot().side_pots();
        let payout = compute_payouts(&side_pots, &groups);
        self.payout_players(&payout)?;

        let name_of = |order: usize| {
            self.table
                .seat_by_order(order)
                .and_then(|seat| self.table.player(seat))
                .map(|p| p.name().to_string())
                .unwrap_or_default()
        };
        let showdown = contested.then(|| ShowdownInfo {
            winners: payout.winners.iter().map(|&o| name_of(o)).collect(),
            payouts: payout
                .amounts
                .iter()
                .map(|(&o, &chips)| (name_of(o), chips))
                .collect(),
        });

        let stacks: BTreeMap<String, u32> = self
            .table
            .players()
            .iter()
            .map(|p| (p.name().to_string(), p.stack()))
            .collect();
        for p in self.table.players() {
            info!(player = p.name(), chips = p.stack(), "winnings computation complete");
        }

        let actions = self
            .history
            .actions()
            .into_iter()
            .filter_map(|s| {
                Some(ActionRecord {
                    player: s.actor()?.name.clone(),
                    street: s.street(),
                    action: s.action()?,
                    committed: s.committed(),
                })
            })
            .collect();
        let date = chrono::Utc::now().format("%Y%m%d").to_string();

        Ok(HandRecord {
            hand_id: format_hand_id(&date, self.hand_seq),
            actions,
            board: self.table.board().to_vec(),
            stacks,
            ts: None,
            showdown,
        })
    }

    /// Empties the pot into the winners' stacks.
    fn payout_players(&mut self, payout: &Payout) -> Result<(), EngineError> {
        let mut credits = Vec::with_capacity(payout.amounts.len());
        for (&order, &chips) in &payout.amounts {
            let seat = self
                .table
                .seat_by_order(order)
                .ok_or(EngineError::InvalidSeat(order))?;
            credits.push((seat, chips));
        }
        self.table.clear_pot();
        for (seat, chips) in credits {
            self.table.award(seat, chips)?;
        }
        self.table.recount_chips();
        info!(
            total = self.table.total_n_chips_on_table(),
            paid = payout.total(),
            "pot paid out"
        );
        Ok(())
    }

    /// End of hand: players and board reset, blinds move one seat.
    pub fn round_cleanup(&mut self) {
        self.table.reset_hand();
        self.table.rotate();
        self.table.recount_chips();
        let stacks = self
            .table
            .players()
            .iter()
            .map(|p| (p.name().to_string(), p.stack()))
            .collect();
        self.announce(&TableEvent::HandFinished { stacks });
    }

    fn announce(&mut self, event: &TableEvent) {
        for requester in self.requesters.values_mut() {
            requester.notify(event);
        }
    }
}
