//! UI helper functions for terminal output formatting.
//!
//! Keeps error, warning and prompt lines consistent across commands.

use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Writes the action prompt without a newline and flushes so it shows
/// before blocking on input.
pub fn prompt(out: &mut dyn Write, to_call: u32) -> std::io::Result<()> {
    if to_call > 0 {
        write!(out, "To call: {}. Enter action (check/call/bet [n]/fold/q): ", to_call)?;
    } else {
        write!(out, "Enter action (check/call/bet [n]/fold/q): ")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_and_warning_prefixes() {
        let mut err = Vec::new();
        write_error(&mut err, "boom").unwrap();
        display_warning(&mut err, "careful").unwrap();
        assert_eq!(String::from_utf8(err).unwrap(), "Error: boom\nWARNING: careful\n");
    }

    #[test]
    fn prompt_mentions_amount_to_call() {
        let mut out = Vec::new();
        prompt(&mut out, 10).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert!(s.starts_with("To call: 10."));
        assert!(!s.ends_with('\n'));
    }
}
