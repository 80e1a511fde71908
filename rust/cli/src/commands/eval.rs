//! Eval command handler: scores the best five of the given cards.

use crate::error::CliError;
use crate::formatters::{format_board, format_score};
use holdem_engine::cards::{Card, parse_cards};
use holdem_engine::errors::GameError;
use holdem_engine::hand::{Score, combinations, evaluate_five};
use std::collections::HashSet;
use std::io::Write;

/// Handle the eval command.
///
/// Accepts card identifiers (`AS`, `td`, `10h`) as separate arguments or
/// space-separated within one. At least five distinct cards are required.
pub fn handle_eval_command(cards: &[String], out: &mut dyn Write) -> Result<(), CliError> {
    let cards = parse_cards(&cards.join(" "))?;
    if cards.len() < 5 {
        return Err(GameError::NotEnoughCards {
            needed: 5,
            got: cards.len(),
        }
        .into());
    }
    let mut seen = HashSet::new();
    if let Some(dup) = cards.iter().find(|c| !seen.insert(**c)) {
        return Err(CliError::InvalidInput(format!("duplicate card {}", dup)));
    }

    let (five, score) = best_five(&cards)
        .ok_or_else(|| CliError::Engine("no five-card combination".into()))?;
    writeln!(out, "Cards: {}", format_board(&cards))?;
    writeln!(out, "Best: {}", format_score(&score))?;
    writeln!(out, "Hand: {}", format_board(&five))?;
    Ok(())
}

fn best_five(cards: &[Card]) -> Option<([Card; 5], Score)> {
    combinations(cards, 5)
        .into_iter()
        .filter_map(|combo| <[Card; 5]>::try_from(combo.as_slice()).ok())
        .map(|five| (five, evaluate_five(&five)))
        .max_by_key(|&(_, score)| score)
}
