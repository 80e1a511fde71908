//! Input parsing for the interactive `play` command.

use holdem_engine::player::PlayerAction;

/// Result type for parsing user input into player actions.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Valid player action parsed from input
    Action(PlayerAction),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse user input string into a PlayerAction or special commands.
///
/// Accepts the following input formats (case-insensitive):
/// - "f" or "fold" → Fold
/// - "k" or "check" → Check
/// - "c" or "call" → Call
/// - "b" or "bet" → Bet at the table's flat amount
/// - "bet X" → Bet with amount X
/// - "q" or "quit" → Quit command
///
/// # Example
///
/// ```rust
/// use holdem_cli::validation::{parse_player_action, ParseResult};
/// use holdem_engine::player::PlayerAction;
///
/// assert_eq!(
///     parse_player_action("fold"),
///     ParseResult::Action(PlayerAction::Fold)
/// );
/// assert_eq!(
///     parse_player_action("bet 100"),
///     ParseResult::Action(PlayerAction::Bet(Some(100)))
/// );
/// assert_eq!(parse_player_action("bet"), ParseResult::Action(PlayerAction::Bet(None)));
/// assert_eq!(parse_player_action("q"), ParseResult::Quit);
///
/// match parse_player_action("raise 5") {
///     ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
///     _ => panic!("Expected Invalid"),
/// }
/// ```
pub fn parse_player_action(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&command) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    if command == "q" || command == "quit" {
        return ParseResult::Quit;
    }

    match command {
        "fold" | "f" => ParseResult::Action(PlayerAction::Fold),
        "check" | "k" => ParseResult::Action(PlayerAction::Check),
        "call" | "c" => ParseResult::Action(PlayerAction::Call),
        "bet" | "b" => match parts.get(1) {
            None => ParseResult::Action(PlayerAction::Bet(None)),
            Some(raw) => match raw.parse::<u32>() {
                Ok(amount) if amount > 0 => ParseResult::Action(PlayerAction::Bet(Some(amount))),
                Ok(_) => ParseResult::Invalid("Bet amount must be positive".to_string()),
                Err(_) => ParseResult::Invalid("Invalid bet amount".to_string()),
            },
        },
        other => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Use check, call, bet [amount], fold or q",
            other
        )),
    }
}
