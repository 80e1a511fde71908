//! Deal command handler: one complete hand without interaction.
//!
//! Deals a hand, lets the automated seats act, has the human seat check or
//! call every street and prints the finished table (including its hand
//! record) as JSON. The same seed always prints the same hand.

use crate::config::Config;
use crate::error::CliError;
use holdem_engine::engine::Engine;
use holdem_engine::game::Stage;
use holdem_engine::player::PlayerAction;
use std::io::Write;

/// Upper bound on human turns in one hand; four streets need at most four.
const MAX_HUMAN_TURNS: usize = 16;

/// Handle the deal command.
///
/// `seed` overrides the configured seed; a random one is used when neither
/// is set. It is echoed in the output so the hand can be replayed.
pub fn handle_deal_command(
    seed: Option<u64>,
    config: &Config,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let mut table_config = config.table_config();
    table_config.seed = Some(seed.or(config.seed).unwrap_or_else(rand::random));
    table_config.bot_delay_ms = 0;

    let mut eng = Engine::new(table_config)?;
    eng.start_hand();
    for _ in 0..MAX_HUMAN_TURNS {
        eng.run_pending();
        if eng.table().stage() == Stage::Showdown {
            break;
        }
        let action = if eng.table().current_bet() == 0 {
            PlayerAction::Check
        } else {
            PlayerAction::Call
        };
        eng.player_action(action);
    }
    if eng.table().stage() != Stage::Showdown {
        return Err(CliError::Engine("hand did not reach showdown".into()));
    }

    let display = serde_json::json!({
        "seed": eng.seed(),
        "table": eng.table(),
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
