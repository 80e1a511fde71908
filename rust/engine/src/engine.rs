use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::ai::{AIOpponent, BaselineAI, Decision};
use crate::errors::GameError;
use crate::game::{Outcome, Stage, Table, TableConfig};
use crate::player::{Player, PlayerAction};

/// An automated turn waiting to be played.
///
/// `generation` is the hand number it was scheduled in; turns from an earlier
/// hand are discarded when they come up.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ScheduledTurn {
    pub seat: usize,
    pub generation: u64,
    /// How long a front-end should wait before playing it
    pub delay: Duration,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepOutcome {
    Played { seat: usize, decision: Decision },
    Discarded(ScheduledTurn),
}

/// Public entry point for front-ends: starts hands, takes the human's
/// actions and plays automated seats.
///
/// Automated turns are not run inline. Each one is queued as a
/// [`ScheduledTurn`] and played by [`Engine::step`], so a front-end can pause
/// for [`Engine::next_delay`] between them or drain the queue at once with
/// [`Engine::run_pending`].
///
/// # Examples
///
/// ```
/// use holdem_engine::engine::Engine;
/// use holdem_engine::game::{Stage, TableConfig};
///
/// let config = TableConfig { seed: Some(7), ..TableConfig::default() };
/// let mut engine = Engine::new(config).unwrap();
/// engine.start_hand();
/// assert_eq!(engine.table().pot(), 15);
/// assert_eq!(engine.table().stage(), Stage::Preflop);
///
/// // Let the bots act up to the human's turn (or the end of the hand).
/// engine.run_pending();
/// ```
pub struct Engine {
    table: Table,
    rng: ChaCha20Rng,
    seed: u64,
    ai: Box<dyn AIOpponent>,
    queue: VecDeque<ScheduledTurn>,
    bot_delay: Duration,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("table", &self.table)
            .field("seed", &self.seed)
            .field("ai", &self.ai.name())
            .field("queue", &self.queue)
            .field("bot_delay", &self.bot_delay)
            .finish()
    }
}

impl Engine {
    pub fn new(config: TableConfig) -> Result<Self, GameError> {
        let table = Table::new(&config)?;
        Ok(Self::from_table(table, &config))
    }

    pub fn with_players(players: Vec<Player>, config: TableConfig) -> Result<Self, GameError> {
        let table = Table::with_players(players, &config)?;
        Ok(Self::from_table(table, &config))
    }

    fn from_table(table: Table, config: &TableConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self {
            table,
            rng: ChaCha20Rng::seed_from_u64(seed),
            seed,
            ai: Box::new(BaselineAI::new()),
            queue: VecDeque::new(),
            bot_delay: Duration::from_millis(config.bot_delay_ms),
        }
    }

    /// Replaces the policy used for automated seats.
    pub fn with_ai(mut self, ai: Box<dyn AIOpponent>) -> Self {
        self.ai = ai;
        self
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn ai_name(&self) -> &str {
        self.ai.name()
    }

    /// Current hand generation. Scheduled turns carry the value they were queued with.
    pub fn generation(&self) -> u64 {
        self.table.hand_no()
    }

    /// Starts a new hand, abandoning any hand in progress.
    ///
    /// Turns still queued from the previous hand stay in the queue and are
    /// discarded when reached.
    pub fn start_hand(&mut self) {
        self.table.start_hand(&mut self.rng);
        let first = self.table.current_player_index();
        if self.is_automated(first) {
            self.schedule(first, Duration::ZERO);
        }
    }

    /// Submits an action for the human seat. Ignored unless it is the human's
    /// turn in a live hand.
    pub fn player_action(&mut self, action: PlayerAction) -> Outcome {
        let outcome = self.table.apply_player_action(action);
        if let Outcome::Ignored(reason) = outcome {
            debug!(?action, ?reason, "player action ignored");
            return outcome;
        }
        self.finish_turn();
        outcome
    }

    /// Sets the flat bet amount, clamped to a non-negative whole number.
    pub fn set_bet_amount(&mut self, value: f64) {
        self.table.set_bet_amount(clamp_chips(value));
    }

    /// Sets the informational starting pot, clamped to a non-negative whole number.
    pub fn set_starting_pot(&mut self, value: f64) {
        self.table.set_starting_pot(clamp_chips(value));
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Delay of the next queued automated turn, if any.
    pub fn next_delay(&self) -> Option<Duration> {
        self.queue.front().map(|t| t.delay)
    }

    /// Plays (or discards) the next queued automated turn.
    pub fn step(&mut self) -> Option<StepOutcome> {
        let turn = self.queue.pop_front()?;
        if !self.is_live(&turn) {
            debug!(
                seat = turn.seat,
                generation = turn.generation,
                current = self.generation(),
                "discarding stale automated turn"
            );
            return Some(StepOutcome::Discarded(turn));
        }

        let fold_roll: f64 = self.rng.random();
        let Some(ctx) = self.table.decision_context(turn.seat, fold_roll) else {
            return Some(StepOutcome::Discarded(turn));
        };
        let decision = self.ai.decide(&ctx);
        self.table.apply_decision(turn.seat, decision);
        self.finish_turn();
        Some(StepOutcome::Played {
            seat: turn.seat,
            decision,
        })
    }

    /// Plays queued automated turns until the queue is empty, i.e. until the
    /// human is to act or the hand is over. Returns the number of turns played.
    pub fn run_pending(&mut self) -> usize {
        let mut played = 0;
        while let Some(outcome) = self.step() {
            if matches!(outcome, StepOutcome::Played { .. }) {
                played += 1;
            }
        }
        played
    }

    /// Shared tail of human and automated turns: pass the turn, queue the next
    /// automated seat, then close the round if everyone has acted.
    fn finish_turn(&mut self) {
        if let Some(next) = self.table.advance_turn() {
            if self.is_automated(next) {
                self.schedule(next, self.bot_delay);
            }
        }
        if self.table.contenders() == 0 {
            self.table.run_out();
        } else if self.table.round_complete() {
            self.table.advance_stage();
        }
    }

    fn schedule(&mut self, seat: usize, delay: Duration) {
        let turn = ScheduledTurn {
            seat,
            generation: self.generation(),
            delay,
        };
        debug!(seat, generation = turn.generation, "automated turn scheduled");
        self.queue.push_back(turn);
    }

    fn is_automated(&self, seat: usize) -> bool {
        self.table
            .player(seat)
            .is_some_and(|p| !p.is_human() && !p.has_folded())
    }

    fn is_live(&self, turn: &ScheduledTurn) -> bool {
        turn.generation == self.generation()
            && self.table.stage() != Stage::Showdown
            && turn.seat == self.table.current_player_index()
            && self.is_automated(turn.seat)
    }
}

fn clamp_chips(value: f64) -> u32 {
    // `as` saturates at u32::MAX; NaN.max(0.0) is 0.0.
    value.max(0.0).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(seed: u64) -> Engine {
        Engine::new(TableConfig {
            seed: Some(seed),
            ..TableConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn setters_clamp_to_whole_chips() {
        let mut e = engine(1);
        e.set_bet_amount(42.9);
        assert_eq!(e.table().bet_amount(), 42);
        e.set_bet_amount(-5.0);
        assert_eq!(e.table().bet_amount(), 0);
        e.set_starting_pot(f64::NAN);
        assert_eq!(e.table().starting_pot(), 0);
        e.set_starting_pot(250.5);
        assert_eq!(e.table().starting_pot(), 250);
    }

    #[test]
    fn first_bot_turn_is_queued_without_delay() {
        let mut e = engine(2);
        e.start_hand();
        assert!(!e.table().current_player().unwrap().is_human());
        assert_eq!(e.pending(), 1);
        assert_eq!(e.next_delay(), Some(Duration::ZERO));
    }

    #[test]
    fn later_bot_turns_use_configured_delay() {
        let mut e = Engine::new(TableConfig {
            seed: Some(4),
            bots: 5,
            bot_delay_ms: 75,
            ..TableConfig::default()
        })
        .unwrap();
        let mut delays = Vec::new();
        for _ in 0..3 {
            e.start_hand();
            while let Some(delay) = e.next_delay() {
                delays.push(delay);
                e.step();
            }
        }
        assert_eq!(delays[0], Duration::ZERO);
        assert!(delays
            .iter()
            .all(|&d| d == Duration::ZERO || d == Duration::from_millis(75)));
        assert!(delays.contains(&Duration::from_millis(75)));
    }

    #[test]
    fn restart_discards_turns_from_previous_hand() {
        let mut e = engine(3);
        e.start_hand();
        let stale = e.queue[0];
        e.start_hand();
        assert_eq!(e.pending(), 2);
        assert_eq!(e.step(), Some(StepOutcome::Discarded(stale)));
        assert!(matches!(e.step(), Some(StepOutcome::Played { .. })));
    }

    #[test]
    fn same_seed_replays_identically() {
        let mut a = engine(99);
        let mut b = engine(99);
        for _ in 0..3 {
            a.start_hand();
            b.start_hand();
            a.run_pending();
            b.run_pending();
        }
        assert_eq!(a.table().record(), b.table().record());
        assert_eq!(a.table().players(), b.table().players());
    }
}
