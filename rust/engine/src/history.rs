use serde::{Deserialize, Serialize};

use crate::ai::Decision;
use crate::cards::Card;
use crate::game::Stage;
use crate::hand::Score;

/// Records a single seat action during a hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Seat index at the table
    pub seat: usize,
    pub player_id: String,
    /// The stage when this action occurred
    pub stage: Stage,
    pub decision: Decision,
    /// Chips moved from the stack into the pot by this action
    pub amount: u32,
}

/// Outcome of the showdown.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    /// Seat indices sharing the pot
    pub winners: Vec<usize>,
    /// Chips credited to each winner (floor of pot / winners)
    pub share: u32,
    /// Winning score; `None` when nobody was left to contest the pot
    pub best: Option<Score>,
    /// Pot left uncontested and added to the next hand
    #[serde(default)]
    pub carried_over: u32,
}

/// In-memory log of the hand in progress. Replaced on every new hand.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Hand number, starting at 1
    pub hand_no: u64,
    pub dealer: usize,
    pub small_blind_seat: usize,
    pub big_blind_seat: usize,
    /// Uncontested pot brought in from the previous hand
    #[serde(default)]
    pub carried_pot: u32,
    /// Chronological list of seat actions (blinds excluded)
    pub actions: Vec<ActionRecord>,
    /// Community cards dealt so far
    pub board: Vec<Card>,
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
}

impl HandRecord {
    pub fn new(hand_no: u64, dealer: usize, small_blind_seat: usize, big_blind_seat: usize) -> Self {
        Self {
            hand_no,
            dealer,
            small_blind_seat,
            big_blind_seat,
            ..Self::default()
        }
    }

    pub fn push(&mut self, record: ActionRecord) {
        self.actions.push(record);
    }

    pub fn actions_on(&self, stage: Stage) -> impl Iterator<Item = &ActionRecord> {
        self.actions.iter().filter(move |a| a.stage == stage)
    }
}
