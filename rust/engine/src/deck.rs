use crate::cards::{full_deck, Card};
use crate::errors::EngineError;
use crate::player::Player;

/// Source of cards for a hand.
///
/// Implementors only supply [`draw`](Dealer::draw) and
/// [`reset`](Dealer::reset); the dealing steps are built on top. A dealer
/// must never hand out the same card twice between resets. How the cards
/// are ordered (shuffled or not) is entirely the implementor's business.
pub trait Dealer {
    /// Next undealt card, or `None` once the deck is spent.
    fn draw(&mut self) -> Option<Card>;

    /// Restores a full deck for the next hand.
    fn reset(&mut self);

    /// Two hole cards per player, one card at a time around the table.
    fn deal_private_cards(&mut self, players: &mut [Player]) -> Result<(), EngineError> {
        for _ in 0..2 {
            for p in players.iter_mut() {
                let c = self.draw().ok_or(EngineError::DeckExhausted)?;
                p.give_card(c)?;
            }
        }
        Ok(())
    }

    fn deal_flop(&mut self, board: &mut Vec<Card>) -> Result<(), EngineError> {
        self.deal_community(board, 3)
    }

    fn deal_turn(&mut self, board: &mut Vec<Card>) -> Result<(), EngineError> {
        self.deal_community(board, 1)
    }

    fn deal_river(&mut self, board: &mut Vec<Card>) -> Result<(), EngineError> {
        self.deal_community(board, 1)
    }

    fn deal_community(&mut self, board: &mut Vec<Card>, n: usize) -> Result<(), EngineError> {
        for _ in 0..n {
            board.push(self.draw().ok_or(EngineError::DeckExhausted)?);
        }
        Ok(())
    }
}

/// A dealer that deals a fixed sequence of cards.
///
/// [`Deck::new`] deals the 52 cards in factory order; [`Deck::stacked`]
/// deals a caller-chosen sequence, which is how tests and replays pin down
/// who holds what.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    pub fn new() -> Self {
        Self::stacked(full_deck())
    }

    /// Deals `cards` front to back. Duplicates are dropped, keeping the
    /// first occurrence.
    pub fn stacked(cards: Vec<Card>) -> Self {
        let mut unique = Vec::with_capacity(cards.len());
        for c in cards {
            if !unique.contains(&c) {
                unique.push(c);
            }
        }
        Self {
            cards: unique,
            position: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}

impl Dealer for Deck {
    fn draw(&mut self) -> Option<Card> {
        let c = self.cards.get(self.position).copied()?;
        self.position += 1;
        Some(c)
    }

    fn reset(&mut self) {
        self.position = 0;
    }
}
