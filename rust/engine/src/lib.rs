//! # holdem-engine: Texas Hold'em Hand Engine
//!
//! A single-table Texas Hold'em engine for one human seat against automated
//! seats. Covers dealing, betting-round progression, best-five hand scoring
//! and pot distribution with tie splitting. Rendering is left to front-ends,
//! which read the [`game::Table`] and drive the [`engine::Engine`].
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and identifiers like `AS`
//! - [`deck`] - Deck build, Fisher-Yates shuffle and draws
//! - [`hand`] - Five-card scoring and best-of-N selection
//! - [`player`] - Seat state and the human action type
//! - [`rules`] - Bet sizing and decision thresholds
//! - [`ai`] - Automated seat policies
//! - [`history`] - In-memory record of the hand in progress
//! - [`game`] - Table state machine (stages, blinds, showdown)
//! - [`engine`] - Gateway: start hand, player action, scheduled bot turns
//! - [`errors`] - Error types for construction and parsing
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::hand::{best_score, Category};
//!
//! let hole = parse_cards("AH KH").unwrap();
//! let board = parse_cards("QH JH TH 2C 3D").unwrap();
//!
//! let score = best_score(&hole, &board).unwrap();
//! assert_eq!(score.category, Category::StraightFlush);
//! assert_eq!(score.value(), 914);
//! ```
//!
//! ## Playing a Hand
//!
//! ```rust
//! use holdem_engine::engine::Engine;
//! use holdem_engine::game::{Stage, TableConfig};
//! use holdem_engine::player::PlayerAction;
//!
//! let mut engine = Engine::new(TableConfig { seed: Some(42), ..TableConfig::default() }).unwrap();
//! engine.start_hand();
//! while engine.table().stage() != Stage::Showdown {
//!     engine.run_pending();
//!     engine.player_action(PlayerAction::Call);
//! }
//! assert!(engine.table().reveal_bots());
//! ```

pub mod ai;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod history;
pub mod player;
pub mod rules;
