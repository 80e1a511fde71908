use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::ai::{Decision, DecisionContext};
use crate::cards::{format_cards, Card};
use crate::deck;
use crate::errors::GameError;
use crate::hand::{best_score, Score};
use crate::history::{ActionRecord, HandRecord, ShowdownInfo};
use crate::player::{Player, PlayerAction, STARTING_STACK};
use crate::rules;

pub const MIN_SEATS: usize = 2;
/// Keeps 2 hole cards per seat plus 5 community cards within one deck.
pub const MAX_SEATS: usize = 10;

/// Betting stage of a hand. Transitions are strictly linear.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Hole cards dealt, blinds posted
    Preflop,
    /// 3 community cards
    Flop,
    /// 4th community card
    Turn,
    /// 5th community card
    River,
    /// Pot awarded, bots revealed
    Showdown,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Preflop => "preflop",
            Stage::Flop => "flop",
            Stage::Turn => "turn",
            Stage::River => "river",
            Stage::Showdown => "showdown",
        }
    }
}

/// Why an action submitted through the gateway was dropped.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum IgnoreReason {
    NoHandInProgress,
    /// The active seat is automated
    NotHumanTurn,
    SeatFolded,
    /// The hand already reached showdown
    HandOver,
}

/// Result of [`Table::apply_player_action`]. Ignored actions change nothing.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Outcome {
    Applied(Decision),
    Ignored(IgnoreReason),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }
}

/// Table setup. Defaults give three bots and one human with 1000 chips each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Number of automated seats; the human seat is added after them
    pub bots: usize,
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    /// Flat bet used by bots and by human bets without an amount
    pub bet_amount: u32,
    /// Informational only; not used in pot arithmetic
    pub starting_pot: u32,
    /// RNG seed for shuffles and fold rolls; random when `None`
    pub seed: Option<u64>,
    /// Delay before a chained automated turn becomes due
    pub bot_delay_ms: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            bots: 3,
            starting_stack: STARTING_STACK,
            small_blind: 5,
            big_blind: 10,
            bet_amount: 20,
            starting_pot: 0,
            seed: None,
            bot_delay_ms: 300,
        }
    }
}

impl TableConfig {
    pub fn default_players(&self) -> Vec<Player> {
        let mut players: Vec<Player> = (1..=self.bots)
            .map(|i| Player::bot(format!("bot-{i}"), format!("Bot {i}"), self.starting_stack))
            .collect();
        players.push(Player::human("me", "You", self.starting_stack));
        players
    }
}

/// Authoritative game state for one table.
///
/// Front-ends drive it through [`crate::engine::Engine`]. Outside the crate
/// only the setters, `start_hand` and `apply_player_action` mutate it; turn
/// and stage mechanics are crate-private, so a `Table` cannot be pushed past
/// the gateway:
///
/// ```compile_fail
/// use holdem_engine::game::{Table, TableConfig};
/// let mut table = Table::new(&TableConfig::default()).unwrap();
/// table.advance_stage();
/// ```
///
/// Presentation code reads it (it serializes as the read model, minus the
/// live deck).
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    players: Vec<Player>,
    dealer_index: usize,
    current_player_index: usize,
    stage: Stage,
    community: Vec<Card>,
    #[serde(skip)]
    deck: Vec<Card>,
    pot: u32,
    current_bet: u32,
    bet_amount: u32,
    starting_pot: u32,
    small_blind: u32,
    big_blind: u32,
    reveal_bots: bool,
    winner_id: Option<String>,
    winner_hand: Vec<Card>,
    last_win_amount: u32,
    hand_no: u64,
    record: HandRecord,
}

impl Table {
    pub fn new(config: &TableConfig) -> Result<Self, GameError> {
        Self::with_players(config.default_players(), config)
    }

    /// Builds a table from explicit seats. Requires `MIN_SEATS..=MAX_SEATS`
    /// seats and exactly one human.
    pub fn with_players(players: Vec<Player>, config: &TableConfig) -> Result<Self, GameError> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&players.len()) {
            return Err(GameError::InvalidSeatCount {
                count: players.len(),
                min: MIN_SEATS,
                max: MAX_SEATS,
            });
        }
        let humans = players.iter().filter(|p| p.is_human()).count();
        if humans != 1 {
            return Err(GameError::InvalidHumanSeats(humans));
        }
        Ok(Self {
            players,
            dealer_index: 0,
            current_player_index: 1,
            stage: Stage::Preflop,
            community: Vec::with_capacity(5),
            deck: Vec::new(),
            pot: 0,
            current_bet: 0,
            bet_amount: config.bet_amount,
            starting_pot: config.starting_pot,
            small_blind: config.small_blind,
            big_blind: config.big_blind,
            reveal_bots: false,
            winner_id: None,
            winner_hand: Vec::new(),
            last_win_amount: 0,
            hand_no: 0,
            record: HandRecord::default(),
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }
    pub fn seat_count(&self) -> usize {
        self.players.len()
    }
    pub fn human_index(&self) -> Option<usize> {
        self.players.iter().position(Player::is_human)
    }
    pub fn dealer_index(&self) -> usize {
        self.dealer_index
    }
    pub fn small_blind_index(&self) -> usize {
        (self.dealer_index + 1) % self.players.len()
    }
    pub fn big_blind_index(&self) -> usize {
        (self.dealer_index + 2) % self.players.len()
    }
    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }
    pub fn stage(&self) -> Stage {
        self.stage
    }
    pub fn community(&self) -> &[Card] {
        &self.community
    }
    pub fn deck_remaining(&self) -> usize {
        self.deck.len()
    }
    pub fn pot(&self) -> u32 {
        self.pot
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn bet_amount(&self) -> u32 {
        self.bet_amount
    }
    pub fn starting_pot(&self) -> u32 {
        self.starting_pot
    }
    pub fn small_blind(&self) -> u32 {
        self.small_blind
    }
    pub fn big_blind(&self) -> u32 {
        self.big_blind
    }
    pub fn reveal_bots(&self) -> bool {
        self.reveal_bots
    }
    pub fn winner_id(&self) -> Option<&str> {
        self.winner_id.as_deref()
    }
    pub fn winner_hand(&self) -> &[Card] {
        &self.winner_hand
    }
    pub fn last_win_amount(&self) -> u32 {
        self.last_win_amount
    }
    /// Number of hands started on this table; 0 before the first hand.
    pub fn hand_no(&self) -> u64 {
        self.hand_no
    }
    pub fn record(&self) -> &HandRecord {
        &self.record
    }

    pub fn set_bet_amount(&mut self, amount: u32) {
        self.bet_amount = amount;
    }

    pub fn set_starting_pot(&mut self, amount: u32) {
        self.starting_pot = amount;
    }

    /// Seats still contesting the pot.
    pub fn contenders(&self) -> usize {
        self.players.iter().filter(|p| !p.has_folded()).count()
    }

    /// Every seat has either folded or acted in the current round.
    pub fn round_complete(&self) -> bool {
        self.players.iter().all(|p| p.has_folded() || p.has_acted())
    }

    /// Starts a new hand: rotates the dealer, deals two round-robin passes of
    /// hole cards and posts the blinds.
    ///
    /// Blinds are capped by the posting seat's stack. A pot left uncontested
    /// by the previous showdown carries over on top of the new blinds; a hand
    /// abandoned before showdown forfeits its pot.
    pub fn start_hand<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let n = self.players.len();
        let carried = if self.stage == Stage::Showdown {
            self.pot
        } else {
            0
        };
        for p in &mut self.players {
            p.reset_for_hand();
        }
        self.deck = deck::shuffle(&deck::build(), rng);
        self.dealer_index = (self.dealer_index + 1) % n;
        let sb = self.small_blind_index();
        let bb = self.big_blind_index();

        for _ in 0..2 {
            for p in &mut self.players {
                let d = deck::draw(&self.deck, 1);
                for c in d.drawn {
                    p.give_card(c);
                }
                self.deck = d.rest;
            }
        }

        let posted_sb = self.players[sb].commit(self.small_blind);
        let posted_bb = self.players[bb].commit(self.big_blind);
        self.pot = carried.saturating_add(posted_sb).saturating_add(posted_bb);
        self.current_bet = self.big_blind;
        self.current_player_index = (bb + 1) % n;
        self.stage = Stage::Preflop;
        self.community.clear();
        self.reveal_bots = false;
        self.winner_id = None;
        self.winner_hand.clear();
        self.last_win_amount = 0;
        self.hand_no += 1;
        self.record = HandRecord::new(self.hand_no, self.dealer_index, sb, bb);
        self.record.carried_pot = carried;

        info!(
            hand_no = self.hand_no,
            dealer = self.dealer_index,
            small_blind_seat = sb,
            big_blind_seat = bb,
            pot = self.pot,
            carried,
            first_to_act = self.current_player_index,
            "hand started"
        );
    }

    /// Applies a human action for the active seat.
    ///
    /// Out-of-turn actions, actions from a folded seat and actions after the
    /// showdown are ignored without touching any state.
    pub fn apply_player_action(&mut self, action: PlayerAction) -> Outcome {
        if self.hand_no == 0 {
            return Outcome::Ignored(IgnoreReason::NoHandInProgress);
        }
        if self.stage == Stage::Showdown {
            return Outcome::Ignored(IgnoreReason::HandOver);
        }
        let seat = self.current_player_index;
        let Some(player) = self.players.get(seat) else {
            return Outcome::Ignored(IgnoreReason::NotHumanTurn);
        };
        if !player.is_human() {
            return Outcome::Ignored(IgnoreReason::NotHumanTurn);
        }
        if player.has_folded() {
            return Outcome::Ignored(IgnoreReason::SeatFolded);
        }

        let decision = match action {
            PlayerAction::Check => Decision::Check,
            PlayerAction::Call => Decision::Call,
            PlayerAction::Fold => Decision::Fold,
            PlayerAction::Bet(amount) => {
                Decision::Bet(amount.filter(|&a| a > 0).unwrap_or(self.bet_amount))
            }
        };
        self.apply_decision(seat, decision);
        Outcome::Applied(decision)
    }

    /// Moves chips for `decision`, marks the seat as acted and returns the
    /// chips put into the pot.
    ///
    /// A bet overwrites the current bet level with the amount actually paid.
    pub(crate) fn apply_decision(&mut self, seat: usize, decision: Decision) -> u32 {
        let current_bet = self.current_bet;
        let Some(player) = self.players.get_mut(seat) else {
            return 0;
        };
        let amount = match decision {
            Decision::Fold => {
                player.fold();
                0
            }
            Decision::Bet(requested) => {
                let paid = player.commit(requested);
                self.current_bet = paid;
                paid
            }
            Decision::Call => player.commit(rules::call_amount(player.stack(), current_bet)),
            Decision::Check | Decision::Pass => 0,
        };
        player.mark_acted();
        let player_id = player.id().to_string();
        self.pot = self.pot.saturating_add(amount);

        debug!(
            seat,
            player = %player_id,
            stage = self.stage.as_str(),
            decision = ?decision,
            amount,
            pot = self.pot,
            "seat acted"
        );
        self.record.push(ActionRecord {
            seat,
            player_id,
            stage: self.stage,
            decision,
            amount,
        });
        amount
    }

    /// Next non-folded seat after `from`, wrapping around. `None` once every
    /// seat has folded.
    pub fn next_active_from(&self, from: usize) -> Option<usize> {
        let n = self.players.len();
        (1..=n)
            .map(|k| (from + k) % n)
            .find(|&i| !self.players[i].has_folded())
    }

    /// Moves the turn pointer to the next non-folded seat and returns it.
    pub(crate) fn advance_turn(&mut self) -> Option<usize> {
        let next = self.next_active_from(self.current_player_index)?;
        self.current_player_index = next;
        Some(next)
    }

    /// Inputs for an automated decision by `seat`.
    pub fn decision_context(&self, seat: usize, fold_roll: f64) -> Option<DecisionContext> {
        let player = self.players.get(seat)?;
        Some(DecisionContext {
            stage: self.stage,
            score: best_score(player.hand(), &self.community),
            stack: player.stack(),
            current_bet: self.current_bet,
            bet_amount: self.bet_amount,
            fold_roll,
        })
    }

    /// Moves to the next stage, dealing community cards or resolving the
    /// showdown, then clears every seat's acted flag. No-op at showdown.
    pub(crate) fn advance_stage(&mut self) {
        match self.stage {
            Stage::Preflop => self.deal_street(Stage::Flop, 3),
            Stage::Flop => self.deal_street(Stage::Turn, 1),
            Stage::Turn => self.deal_street(Stage::River, 1),
            Stage::River => self.showdown(),
            Stage::Showdown => return,
        }
        for p in &mut self.players {
            p.clear_acted();
        }
    }

    /// Advances straight to showdown. Used when nobody is left to act.
    pub(crate) fn run_out(&mut self) {
        while self.stage != Stage::Showdown {
            self.advance_stage();
        }
    }

    fn deal_street(&mut self, next: Stage, count: usize) {
        let d = deck::draw(&self.deck, count);
        self.community.extend(d.drawn);
        self.deck = d.rest;
        self.stage = next;
        self.current_bet = 0;
        self.record.board = self.community.clone();
        info!(
            hand_no = self.hand_no,
            stage = next.as_str(),
            board = %format_cards(&self.community),
            pot = self.pot,
            "stage advanced"
        );
    }

    fn showdown(&mut self) {
        self.stage = Stage::Showdown;
        self.reveal_bots = true;

        let scored: Vec<(usize, Score)> = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.has_folded())
            .filter_map(|(i, p)| best_score(p.hand(), &self.community).map(|s| (i, s)))
            .collect();
        let best = scored.iter().map(|&(_, s)| s).max();
        let winners: Vec<usize> = scored
            .iter()
            .filter(|&&(_, s)| Some(s) == best)
            .map(|&(i, _)| i)
            .collect();

        if winners.is_empty() {
            warn!(
                hand_no = self.hand_no,
                pot = self.pot,
                "showdown without contenders, pot carried to next hand"
            );
            self.record.showdown = Some(ShowdownInfo {
                winners,
                share: 0,
                best: None,
                carried_over: self.pot,
            });
            return;
        }

        // Floor division: the remainder of an uneven split is not paid out.
        let share = self.pot / winners.len() as u32;
        for &w in &winners {
            self.players[w].record_win(share);
        }
        if let [only] = winners.as_slice() {
            self.winner_id = Some(self.players[*only].id().to_string());
            self.winner_hand = self.players[*only].hand().to_vec();
        } else {
            self.winner_id = None;
            self.winner_hand.clear();
        }
        self.last_win_amount = share;

        info!(
            hand_no = self.hand_no,
            winners = ?winners,
            share,
            pot = self.pot,
            best = ?best.map(Score::value),
            "showdown"
        );
        self.pot = 0;
        self.record.showdown = Some(ShowdownInfo {
            winners,
            share,
            best,
            carried_over: 0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn table() -> Table {
        Table::new(&TableConfig::default()).unwrap()
    }

    /// Puts the table on the river with the given board and hole cards.
    fn river(table: &mut Table, board: &str, holes: &[&str]) {
        table.hand_no = 1;
        table.stage = Stage::River;
        table.community = parse_cards(board).unwrap();
        for (p, hole) in table.players.iter_mut().zip(holes) {
            p.reset_for_hand();
            for c in parse_cards(hole).unwrap() {
                p.give_card(c);
            }
        }
    }

    #[test]
    fn rejects_tables_without_exactly_one_human() {
        let cfg = TableConfig::default();
        let bots = vec![Player::bot("a", "A", 100), Player::bot("b", "B", 100)];
        assert_eq!(
            Table::with_players(bots, &cfg).unwrap_err(),
            GameError::InvalidHumanSeats(0)
        );
        let solo = vec![Player::human("me", "You", 100)];
        assert!(matches!(
            Table::with_players(solo, &cfg),
            Err(GameError::InvalidSeatCount { count: 1, .. })
        ));
    }

    #[test]
    fn tie_split_drops_the_remainder() {
        let mut t = table();
        river(&mut t, "AS KS QS JS TS", &["2C 3C", "2D 3D", "4C 5C", "4D 5D"]);
        t.players[0].fold();
        t.players[1].fold();
        t.pot = 101;
        let before: Vec<u32> = t.players.iter().map(Player::stack).collect();

        t.advance_stage();

        assert_eq!(t.stage(), Stage::Showdown);
        assert_eq!(t.pot(), 0);
        assert_eq!(t.players[2].stack(), before[2] + 50);
        assert_eq!(t.players[3].stack(), before[3] + 50);
        assert_eq!(t.players[2].pot_won(), 50);
        assert_eq!(t.players[0].stack(), before[0]);
        assert_eq!(t.winner_id(), None);
        assert!(t.winner_hand().is_empty());
        assert!(t.reveal_bots());
        assert_eq!(t.last_win_amount(), 50);
        let info = t.record().showdown.clone().unwrap();
        assert_eq!(info.winners, vec![2, 3]);
    }

    #[test]
    fn single_winner_is_recorded() {
        let mut t = table();
        river(&mut t, "2S 7H 9D JC 4S", &["AS AH", "3C 5D", "6C 8D", "KC 3D"]);
        t.pot = 60;

        t.advance_stage();

        assert_eq!(t.winner_id(), Some("bot-1"));
        assert_eq!(t.winner_hand(), parse_cards("AS AH").unwrap().as_slice());
        assert_eq!(t.players[0].pot_won(), 60);
        assert_eq!(t.players[1].pot_won(), 0);
        assert!(t.players.iter().all(|p| !p.has_acted()));
    }

    #[test]
    fn folded_seat_cannot_win() {
        let mut t = table();
        river(&mut t, "2S 7H 9D JC 4S", &["AS AH", "3C 5D", "6C 8D", "KC 3D"]);
        t.players[0].fold();
        t.pot = 40;

        t.advance_stage();

        assert_eq!(t.winner_id(), Some("me"));
        assert_eq!(t.players[0].pot_won(), 0);
    }

    #[test]
    fn showdown_without_contenders_keeps_pot() {
        let mut t = table();
        river(&mut t, "2S 7H 9D JC 4S", &["AS AH", "3C 5D", "6C 8D", "KC 3D"]);
        for p in &mut t.players {
            p.fold();
        }
        t.pot = 30;
        t.advance_stage();
        assert_eq!(t.stage(), Stage::Showdown);
        assert_eq!(t.pot(), 30);
        assert_eq!(t.winner_id(), None);
        assert_eq!(t.record().showdown.as_ref().unwrap().carried_over, 30);

        let mut rng = ChaCha20Rng::seed_from_u64(9);
        t.start_hand(&mut rng);
        assert_eq!(t.pot(), 45);
        assert_eq!(t.record().carried_pot, 30);
    }

    #[test]
    fn abandoned_hand_does_not_carry_its_pot() {
        let mut t = table();
        let mut rng = ChaCha20Rng::seed_from_u64(10);
        t.start_hand(&mut rng);
        t.start_hand(&mut rng);
        assert_eq!(t.pot(), 15);
        assert_eq!(t.record().carried_pot, 0);
    }

    #[test]
    fn advance_stage_is_a_noop_after_showdown() {
        let mut t = table();
        river(&mut t, "2S 7H 9D JC 4S", &["AS AH", "3C 5D", "6C 8D", "KC 3D"]);
        t.advance_stage();
        let snapshot = t.clone();
        t.advance_stage();
        assert_eq!(t.stage(), snapshot.stage());
        assert_eq!(t.community(), snapshot.community());
    }

    #[test]
    fn next_active_skips_folded_and_wraps() {
        let mut t = table();
        t.players[0].fold();
        t.players[1].fold();
        assert_eq!(t.next_active_from(3), Some(2));
        assert_eq!(t.next_active_from(2), Some(3));
        for p in &mut t.players {
            p.fold();
        }
        assert_eq!(t.next_active_from(0), None);
    }

    #[test]
    fn human_bet_overwrites_current_bet() {
        let mut t = table();
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        t.start_hand(&mut rng);
        let human = t.human_index().unwrap();
        t.current_player_index = human;
        let stack = t.players[human].stack();
        let pot = t.pot();

        assert_eq!(
            t.apply_player_action(PlayerAction::Bet(Some(7))),
            Outcome::Applied(Decision::Bet(7))
        );
        assert_eq!(t.current_bet(), 7);
        assert_eq!(t.pot(), pot + 7);
        assert_eq!(t.players[human].stack(), stack - 7);
        assert!(t.players[human].has_acted());
    }

    #[test]
    fn human_bet_without_amount_uses_flat_bet() {
        let mut t = table();
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        t.start_hand(&mut rng);
        t.current_player_index = t.human_index().unwrap();
        t.set_bet_amount(35);
        assert_eq!(
            t.apply_player_action(PlayerAction::Bet(Some(0))),
            Outcome::Applied(Decision::Bet(35))
        );
        assert_eq!(t.current_bet(), 35);
    }

    #[test]
    fn actions_on_bot_turn_are_ignored() {
        let mut t = table();
        assert_eq!(
            t.apply_player_action(PlayerAction::Call),
            Outcome::Ignored(IgnoreReason::NoHandInProgress)
        );
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        t.start_hand(&mut rng);
        assert!(!t.current_player().unwrap().is_human());
        let pot = t.pot();
        assert_eq!(
            t.apply_player_action(PlayerAction::Bet(Some(100))),
            Outcome::Ignored(IgnoreReason::NotHumanTurn)
        );
        assert_eq!(t.pot(), pot);
    }

    #[test]
    fn streets_deal_three_one_one() {
        let mut t = table();
        let mut rng = ChaCha20Rng::seed_from_u64(6);
        t.start_hand(&mut rng);
        assert_eq!(t.deck_remaining(), 44);
        let mut sizes = vec![t.community().len()];
        for _ in 0..3 {
            t.advance_stage();
            assert_eq!(t.current_bet(), 0);
            sizes.push(t.community().len());
        }
        assert_eq!(sizes, vec![0, 3, 4, 5]);
        assert_eq!(t.stage(), Stage::River);
        assert_eq!(t.deck_remaining(), 39);
        assert_eq!(t.record().board.len(), 5);
    }
}
