use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid card identifier: {0:?}")]
    InvalidCard(String),
    #[error("Invalid seat count: {count} (allowed {min}..={max})")]
    InvalidSeatCount { count: usize, min: usize, max: usize },
    #[error("Table needs exactly one human seat, found {0}")]
    InvalidHumanSeats(usize),
    #[error("Unknown AI type: {0}")]
    UnknownAi(String),
    #[error("Need at least {needed} cards, got {got}")]
    NotEnoughCards { needed: usize, got: usize },
}
