//! # Play Command
//!
//! Interactive hands for the human seat against the automated seats.
//!
//! Automated turns come off the engine's queue one at a time; the command
//! sleeps for each turn's delay before playing it (`--fast` zeroes the delay),
//! prints what every seat did and announces each new street and the showdown.
//! The human acts on stdin with `check`, `call`, `bet [n]`, `fold` or `q`.

use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_board, format_decision, format_score, format_seat};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ParseResult, parse_player_action};
use holdem_engine::ai::Decision;
use holdem_engine::engine::{Engine, StepOutcome};
use holdem_engine::game::{Outcome, Stage, Table};
use holdem_engine::player::PlayerAction;
use std::io::{BufRead, Write};

/// Options taken from the command line; `None` falls back to the config.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayOptions {
    pub hands: Option<u32>,
    pub seed: Option<u64>,
    pub bet: Option<u32>,
    pub fast: bool,
}

/// Handle the play command: interactive poker gameplay
///
/// # Returns
///
/// * `Ok(())` when all hands were played or the user quit
/// * `Err(CliError)` if hands is 0, the table cannot be built, or I/O fails
pub fn handle_play_command(
    opts: PlayOptions,
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let hands = opts.hands.unwrap_or(1);
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }

    let mut table_config = config.table_config();
    table_config.seed = Some(opts.seed.or(config.seed).unwrap_or_else(rand::random));
    if let Some(bet) = opts.bet {
        table_config.bet_amount = bet;
    }
    if opts.fast {
        table_config.bot_delay_ms = 0;
    }

    let mut engine = Engine::new(table_config)?;
    writeln!(
        out,
        "play: hands={} seed={} bots={} bet={}",
        hands,
        engine.seed(),
        config.bots,
        engine.table().bet_amount()
    )?;

    let mut played = 0u32;
    for i in 1..=hands {
        if human_stack(engine.table()) == 0 {
            writeln!(out, "You are out of chips.")?;
            break;
        }
        writeln!(out, "Hand {}", i)?;
        engine.start_hand();
        print_hand_start(engine.table(), out)?;

        let finished = play_hand(&mut engine, out, err, stdin)?;
        if !finished {
            writeln!(out, "Quit.")?;
            break;
        }
        played += 1;
    }

    writeln!(
        out,
        "Session over: {} hand(s) played, your stack {}",
        played,
        human_stack(engine.table())
    )?;
    Ok(())
}

/// Plays one hand to showdown. Returns `false` when the user quit.
fn play_hand(
    engine: &mut Engine,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<bool, CliError> {
    let mut stage = engine.table().stage();
    loop {
        while let Some(delay) = engine.next_delay() {
            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
            if let Some(StepOutcome::Played { seat, decision }) = engine.step() {
                print_decision(engine.table(), seat, &decision, out)?;
            }
            stage = announce_stage(engine.table(), stage, out)?;
        }

        if engine.table().stage() == Stage::Showdown {
            print_showdown(engine.table(), out)?;
            return Ok(true);
        }

        let table = engine.table();
        let human_turn = table
            .current_player()
            .is_some_and(|p| p.is_human() && !p.has_folded());
        if !human_turn {
            return Err(CliError::Engine(format!(
                "no seat can act at {} (seat {})",
                table.stage().as_str(),
                table.current_player_index()
            )));
        }

        ui::prompt(out, table.current_bet())?;
        let Some(input) = read_stdin_line(stdin) else {
            return Ok(false);
        };
        let action = match parse_player_action(&input) {
            ParseResult::Action(action) => action,
            ParseResult::Quit => return Ok(false),
            ParseResult::Invalid(msg) => {
                ui::write_error(err, &msg)?;
                continue;
            }
        };

        let seat = engine.table().current_player_index();
        match engine.player_action(action) {
            Outcome::Applied(decision) => print_decision(engine.table(), seat, &decision, out)?,
            Outcome::Ignored(reason) => {
                ui::display_warning(err, &format!("action ignored: {:?}", reason))?;
            }
        }
        if let PlayerAction::Bet(_) = action {
            writeln!(out, "Pot: {}", engine.table().pot())?;
        }
        stage = announce_stage(engine.table(), stage, out)?;
    }
}

fn human_stack(table: &Table) -> u32 {
    table
        .human_index()
        .and_then(|i| table.player(i))
        .map_or(0, |p| p.stack())
}

fn print_hand_start(table: &Table, out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(
        out,
        "Blinds: SB={} BB={} Pot: {}",
        table.small_blind(),
        table.big_blind(),
        table.pot()
    )?;
    if table.record().carried_pot > 0 {
        writeln!(out, "Carried over: {}", table.record().carried_pot)?;
    }
    for seat in 0..table.seat_count() {
        if let Some(line) = format_seat(table, seat) {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

fn print_decision(
    table: &Table,
    seat: usize,
    decision: &Decision,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let name = table.player(seat).map_or("?", |p| p.name());
    writeln!(out, "{}: {}", name, format_decision(decision))?;
    Ok(())
}

/// Prints the new street when the stage moved past `last`; returns the current stage.
fn announce_stage(table: &Table, last: Stage, out: &mut dyn Write) -> Result<Stage, CliError> {
    let stage = table.stage();
    if stage != last && stage != Stage::Showdown {
        writeln!(
            out,
            "--- {} {} Pot: {}",
            stage.as_str(),
            format_board(table.community()),
            table.pot()
        )?;
    }
    Ok(stage)
}

fn print_showdown(table: &Table, out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "--- showdown {}", format_board(table.community()))?;
    for seat in 0..table.seat_count() {
        if let Some(line) = format_seat(table, seat) {
            writeln!(out, "{}", line)?;
        }
    }

    let Some(info) = table.record().showdown.as_ref() else {
        return Ok(());
    };
    let best = info.best.as_ref().map(format_score).unwrap_or_default();
    match info.winners.as_slice() {
        [] => writeln!(
            out,
            "No contenders; pot {} carries over to the next hand",
            info.carried_over
        )?,
        [only] => {
            let name = table.player(*only).map_or("?", |p| p.name());
            writeln!(out, "Winner: {} with {}, wins {}", name, best, info.share)?;
        }
        many => {
            let names: Vec<&str> = many
                .iter()
                .filter_map(|&s| table.player(s).map(|p| p.name()))
                .collect();
            writeln!(
                out,
                "Split pot: {} with {}, {} each",
                names.join(", "),
                best,
                info.share
            )?;
        }
    }
    Ok(())
}
