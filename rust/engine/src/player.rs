use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Action submitted by the human seat through the gateway.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Pass without moving chips
    Check,
    /// Pay the current bet level (capped by the stack)
    Call,
    /// Bet the given amount, or the table's flat bet amount when `None` or zero
    Bet(Option<u32>),
    /// Fold and leave the hand
    Fold,
}

/// Default starting stack size for each seat in chips
pub const STARTING_STACK: u32 = 1_000;

/// A seat at the table.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    id: String,
    name: String,
    is_human: bool,
    stack: u32,
    hand: Vec<Card>,
    folded: bool,
    acted: bool,
    pot_won: u32,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>, is_human: bool, stack: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_human,
            stack,
            hand: Vec::with_capacity(2),
            folded: false,
            acted: false,
            pot_won: 0,
        }
    }

    pub fn human(id: impl Into<String>, name: impl Into<String>, stack: u32) -> Self {
        Self::new(id, name, true, stack)
    }

    pub fn bot(id: impl Into<String>, name: impl Into<String>, stack: u32) -> Self {
        Self::new(id, name, false, stack)
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn is_human(&self) -> bool {
        self.is_human
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }
    pub fn has_folded(&self) -> bool {
        self.folded
    }
    pub fn has_acted(&self) -> bool {
        self.acted
    }
    pub fn pot_won(&self) -> u32 {
        self.pot_won
    }

    /// Clears per-hand state; the stack carries over.
    pub fn reset_for_hand(&mut self) {
        self.hand.clear();
        self.folded = false;
        self.acted = false;
        self.pot_won = 0;
    }

    pub fn give_card(&mut self, c: Card) {
        self.hand.push(c);
    }

    pub fn fold(&mut self) {
        self.folded = true;
    }

    pub fn mark_acted(&mut self) {
        self.acted = true;
    }

    pub fn clear_acted(&mut self) {
        self.acted = false;
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }

    pub fn record_win(&mut self, amount: u32) {
        self.add_chips(amount);
        self.pot_won = amount;
    }

    /// Removes up to `amount` chips and returns how many were actually taken.
    pub fn commit(&mut self, amount: u32) -> u32 {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        paid
    }
}
