//! Command handler modules for the holdem CLI.
//!
//! Each subcommand lives in its own file with a consistent pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Module-private helpers: Helper functions specific to that command
//! - Dependency injection: Output streams (`&mut dyn Write`) and stdin passed as parameters
//! - Error propagation: All errors propagated via `CliError` enum

pub mod cfg;
pub mod deal;
pub mod eval;
pub mod play;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use eval::handle_eval_command;
pub use play::{PlayOptions, handle_play_command};
