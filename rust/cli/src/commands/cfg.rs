//! Configuration command handler.
//!
//! Prints the resolved configuration as JSON, each setting with the layer it
//! came from (`default`, `file` or `env`):
//!
//! ```json
//! {
//!   "bots": {
//!     "value": 3,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config::{self, ConfigResolved};
use crate::error::CliError;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources()
        .map_err(|e| CliError::Config(format!("Invalid configuration: {}", e)))?;
    write_resolved(&resolved, out)
}

pub(crate) fn write_resolved(resolved: &ConfigResolved, out: &mut dyn Write) -> Result<(), CliError> {
    let ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "bots": {
            "value": config.bots,
            "source": sources.bots,
        },
        "starting_stack": {
            "value": config.starting_stack,
            "source": sources.starting_stack,
        },
        "small_blind": {
            "value": config.small_blind,
            "source": sources.small_blind,
        },
        "big_blind": {
            "value": config.big_blind,
            "source": sources.big_blind,
        },
        "bet_amount": {
            "value": config.bet_amount,
            "source": sources.bet_amount,
        },
        "starting_pot": {
            "value": config.starting_pot,
            "source": sources.starting_pot,
        },
        "bot_delay_ms": {
            "value": config.bot_delay_ms,
            "source": sources.bot_delay_ms,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
