use crate::game::Stage;

/// Flattened score at or above which an automated seat opens the betting (two pair).
pub const BET_THRESHOLD: u32 = 300;
/// Flattened score at or above which an automated seat calls an open bet (one pair).
pub const CALL_THRESHOLD: u32 = 200;
/// Chance that an automated seat below [`CALL_THRESHOLD`] folds to an open bet.
pub const FOLD_PROBABILITY: f64 = 0.7;

/// Bet sizing multiplier per stage, in tenths (preflop x1.0 .. river x2.0).
pub fn stage_multiplier_tenths(stage: Stage) -> u64 {
    match stage {
        Stage::Preflop => 10,
        Stage::Flop => 12,
        Stage::Turn => 15,
        Stage::River => 20,
        Stage::Showdown => 10,
    }
}

/// Bet an automated seat would open with: the flat bet scaled by stage, floored,
/// and capped by the seat's stack.
///
/// # Examples
///
/// ```
/// use holdem_engine::game::Stage;
/// use holdem_engine::rules::bot_bet_size;
///
/// assert_eq!(bot_bet_size(20, Stage::Flop, 1000), 24);
/// assert_eq!(bot_bet_size(25, Stage::Flop, 1000), 30);
/// assert_eq!(bot_bet_size(20, Stage::River, 15), 15);
/// ```
pub fn bot_bet_size(bet_amount: u32, stage: Stage, stack: u32) -> u32 {
    let scaled = u64::from(bet_amount) * stage_multiplier_tenths(stage) / 10;
    let scaled = u32::try_from(scaled).unwrap_or(u32::MAX);
    scaled.min(stack)
}

/// Chips a call costs. There is no per-round contribution tracking: a call pays
/// the whole current bet level again, capped by the stack.
pub fn call_amount(stack: u32, current_bet: u32) -> u32 {
    stack.min(current_bet)
}
