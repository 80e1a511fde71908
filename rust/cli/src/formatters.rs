//! Card, board, seat and decision formatters for terminal display.
//!
//! Pure functions over engine read-model types. Suits render as Unicode
//! symbols where the terminal supports them, with an ASCII letter fallback.
//!
//! ## Example
//!
//! ```rust
//! use holdem_engine::cards::{Card, Rank, Suit};
//! use holdem_cli::formatters::{format_board, format_card};
//!
//! let ace_spades = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//! assert!(format_board(&[ace_spades]).starts_with("[A"));
//! ```

use holdem_engine::ai::Decision;
use holdem_engine::cards::{Card, Suit};
use holdem_engine::game::Table;
use holdem_engine::hand::Score;

/// Check if the terminal supports Unicode card symbols.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: Suit) -> String {
    if supports_unicode() {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
        .to_string()
    } else {
        suit.symbol().to_ascii_lowercase().to_string()
    }
}

/// String like "A♠" (Unicode) or "As" (ASCII).
pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.symbol(), format_suit(card.suit))
}

/// Bracketed board like "[A♠ K♥ Q♦]", or "[]" before the flop.
pub fn format_board(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// Hole cards for display; bots stay hidden until the table reveals them.
pub fn format_hole(cards: &[Card], visible: bool) -> String {
    if visible {
        format_board(cards)
    } else {
        let hidden: Vec<&str> = cards.iter().map(|_| "??").collect();
        format!("[{}]", hidden.join(" "))
    }
}

/// Formatted decision like "fold", "call", "bet 40".
///
/// ```rust
/// use holdem_engine::ai::Decision;
/// use holdem_cli::formatters::format_decision;
///
/// assert_eq!(format_decision(&Decision::Fold), "fold");
/// assert_eq!(format_decision(&Decision::Bet(40)), "bet 40");
/// ```
pub fn format_decision(decision: &Decision) -> String {
    match decision {
        Decision::Check => "check".to_string(),
        Decision::Call => "call".to_string(),
        Decision::Bet(amount) => format!("bet {}", amount),
        Decision::Fold => "fold".to_string(),
        Decision::Pass => "pass".to_string(),
    }
}

pub fn format_score(score: &Score) -> String {
    format!("{} ({})", score.category.label(), score.value())
}

/// One line per seat: marker, name, stack and hole cards.
pub fn format_seat(table: &Table, seat: usize) -> Option<String> {
    let player = table.player(seat)?;
    let mut marker = String::new();
    if seat == table.dealer_index() {
        marker.push('D');
    }
    if seat == table.current_player_index() && !table.reveal_bots() {
        marker.push('>');
    }
    let visible = player.is_human() || table.reveal_bots();
    let mut line = format!(
        "{:>2} {:<8} stack {:>5} {}",
        marker,
        player.name(),
        player.stack(),
        format_hole(player.hand(), visible)
    );
    if player.has_folded() {
        line.push_str(" folded");
    }
    if player.pot_won() > 0 {
        line.push_str(&format!(" won {}", player.pot_won()));
    }
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::cards::Rank;
    use holdem_engine::game::TableConfig;
    use holdem_engine::hand::Category;

    #[test]
    fn test_format_card() {
        let card = Card::new(Rank::Ten, Suit::Diamonds);
        let formatted = format_card(&card);
        assert!(formatted == "T♦" || formatted == "Td");
    }

    #[test]
    fn test_format_board_empty() {
        assert_eq!(format_board(&[]), "[]");
    }

    #[test]
    fn test_hidden_hole_cards() {
        let cards = [
            Card::new(Rank::Ace, Suit::Spades),
            Card::new(Rank::Two, Suit::Clubs),
        ];
        assert_eq!(format_hole(&cards, false), "[?? ??]");
        assert!(format_hole(&cards, true).starts_with("[A"));
    }

    #[test]
    fn test_format_decision() {
        assert_eq!(format_decision(&Decision::Check), "check");
        assert_eq!(format_decision(&Decision::Call), "call");
        assert_eq!(format_decision(&Decision::Pass), "pass");
    }

    #[test]
    fn test_format_score() {
        let score = Score {
            category: Category::Flush,
            high_card: 12,
        };
        assert_eq!(format_score(&score), format!("{} (612)", Category::Flush.label()));
    }

    #[test]
    fn test_format_seat_hides_bots() {
        let table = holdem_engine::game::Table::new(&TableConfig::default()).unwrap();
        let line = format_seat(&table, 0).unwrap();
        assert!(line.contains("Bot 1"));
        assert!(line.contains("stack  1000"));
        assert!(format_seat(&table, 99).is_none());
    }
}
