//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "holdem", version, about = "Texas Hold'em against automated seats")]
pub struct HoldemCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play hands interactively as the human seat
    Play {
        /// Number of hands to play
        #[arg(long)]
        hands: Option<u32>,
        /// RNG seed (overrides HOLDEM_SEED and the config file)
        #[arg(long)]
        seed: Option<u64>,
        /// Flat bet amount (overrides HOLDEM_BET_AMOUNT and the config file)
        #[arg(long)]
        bet: Option<u32>,
        /// Do not pause between automated turns
        #[arg(long)]
        fast: bool,
    },
    /// Deal and play out a single hand, printing its record as JSON
    Deal {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Score the best five of the given cards (e.g. `AS KS QS JS TS`)
    Eval {
        #[arg(required = true, num_args = 1..)]
        cards: Vec<String>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Play { .. } => "play",
            Commands::Deal { .. } => "deal",
            Commands::Eval { .. } => "eval",
            Commands::Cfg => "cfg",
        }
    }
}
