//! # holdem CLI Library
//!
//! Terminal front-end for the `holdem-engine` crate: play hands as the human
//! seat, deal a reproducible hand, score cards and inspect configuration.
//!
//! The entry point is [`run`], which parses arguments and dispatches to a
//! subcommand handler. Output and error streams are injected so the whole
//! CLI can be driven from tests.
//!
//! ```
//! use std::io;
//! let args = vec!["holdem", "eval", "AS", "KS", "QS", "JS", "TS"];
//! let code = holdem_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play hands interactively against the automated seats
//! - `deal`: Play one hand non-interactively and print it as JSON
//! - `eval`: Score the best five of the given cards
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;
pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, HoldemCli};
use commands::{
    PlayOptions, handle_cfg_command, handle_deal_command, handle_eval_command,
    handle_play_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["play", "deal", "eval", "cfg"];

/// Main entry point for the CLI application.
///
/// # Returns
///
/// Exit code: `0` for success (including `--help`), `2` for errors
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["holdem", "deal", "--seed", "42"];
/// let code = holdem_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HoldemCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    let _ = write_usage(err, &e);
                    exit_code::ERROR
                }
            };
        }
    };

    let name = cli.cmd.name();
    tracing::debug!(command = name, "dispatching");
    let result = dispatch(cli.cmd, out, err);
    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::debug!(command = name, error = %e, "command failed");
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn dispatch(cmd: Commands, out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    match cmd {
        Commands::Cfg => handle_cfg_command(out),
        Commands::Eval { cards } => handle_eval_command(&cards, out),
        Commands::Deal { seed } => {
            let resolved = config::load_with_sources()?;
            handle_deal_command(seed, &resolved.config, out)
        }
        Commands::Play {
            hands,
            seed,
            bet,
            fast,
        } => {
            let resolved = config::load_with_sources()?;
            // Use stdin for real input (supports both TTY and piped stdin)
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            let opts = PlayOptions {
                hands,
                seed,
                bet,
                fast,
            };
            handle_play_command(opts, &resolved.config, out, err, &mut stdin_lock)
        }
    }
}

fn write_usage(err: &mut dyn Write, e: &clap::Error) -> std::io::Result<()> {
    writeln!(err, "{}", e)?;
    writeln!(err)?;
    writeln!(err, "Hold'em CLI")?;
    writeln!(err, "Usage: holdem <command> [options]\n")?;
    writeln!(err, "Commands:")?;
    for c in COMMANDS {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: holdem --help")
}
