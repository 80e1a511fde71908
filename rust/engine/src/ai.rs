//! Automated seat decisions.
//!
//! The gateway builds a [`DecisionContext`] for the seat whose turn it is,
//! asks the table's [`AIOpponent`] for a [`Decision`] and applies it through the
//! same path as human actions.

use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::game::Stage;
use crate::hand::Score;
use crate::rules::{bot_bet_size, BET_THRESHOLD, CALL_THRESHOLD, FOLD_PROBABILITY};

/// A resolved move, applied to the table for either kind of seat.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Decision {
    /// No bet open, no chips moved
    Check,
    /// Pay the current bet level (capped by the stack)
    Call,
    /// Open or overwrite the current bet level with this amount
    Bet(u32),
    Fold,
    /// Facing a bet but neither calling nor folding: no chips move
    Pass,
}

/// What an automated seat sees when it is asked to act.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionContext {
    pub stage: Stage,
    /// Best score over hole + community cards; `None` before the flop.
    pub score: Option<Score>,
    pub stack: u32,
    pub current_bet: u32,
    pub bet_amount: u32,
    /// Uniform roll in `[0, 1)` drawn by the gateway for this decision.
    pub fold_roll: f64,
}

impl DecisionContext {
    pub fn score_value(&self) -> u32 {
        self.score.map_or(0, Score::value)
    }
}

/// Interface for automated seat policies.
pub trait AIOpponent: Send + Sync {
    fn decide(&self, ctx: &DecisionContext) -> Decision;

    fn name(&self) -> &str;
}

/// Threshold policy: open with two pair or better, call with a pair or better,
/// otherwise fold most of the time.
#[derive(Debug, Clone, Default)]
pub struct BaselineAI;

impl BaselineAI {
    pub fn new() -> Self {
        Self
    }
}

impl AIOpponent for BaselineAI {
    fn decide(&self, ctx: &DecisionContext) -> Decision {
        let score = ctx.score_value();
        if ctx.current_bet == 0 {
            if score >= BET_THRESHOLD {
                Decision::Bet(bot_bet_size(ctx.bet_amount, ctx.stage, ctx.stack))
            } else {
                Decision::Check
            }
        } else if score >= CALL_THRESHOLD {
            Decision::Call
        } else if ctx.fold_roll < FOLD_PROBABILITY {
            Decision::Fold
        } else {
            Decision::Pass
        }
    }

    fn name(&self) -> &str {
        "BaselineAI"
    }
}

/// Creates an automated seat policy by name.
///
/// ```
/// use holdem_engine::ai::create_ai;
///
/// let ai = create_ai("baseline").unwrap();
/// assert_eq!(ai.name(), "BaselineAI");
/// assert!(create_ai("genius").is_err());
/// ```
pub fn create_ai(ai_type: &str) -> Result<Box<dyn AIOpponent>, GameError> {
    match ai_type {
        "baseline" => Ok(Box::new(BaselineAI::new())),
        other => Err(GameError::UnknownAi(other.to_string())),
    }
}
