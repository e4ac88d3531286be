//! Command parsing and response lines.
//!
//! Commands are parsed from raw input into the [`Command`] enum. The session
//! decides what to do with each one; this module only knows the grammar and
//! the fixed text blocks a command writes.

use crate::config::{
    DECODE_FAILED, DECODED_HEADING, ECHO_PREFIX, EXIT_MESSAGE, HELP_TEXT, UNKNOWN_COMMAND,
    WELCOME_LINES,
};
use crate::core::error::DecodeError;
use crate::models::{DecodeResult, SessionLine, TokenStatus};

/// Parsed terminal command
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Decode the given token
    Jwt(String),
    Clear,
    Help,
    /// Close the terminal after a short delay
    Back,
    /// Anything else, including known verbs with the wrong arguments
    Unknown(String),
}

impl Command {
    /// Parse a raw input line. Returns `None` for blank input.
    ///
    /// Verbs match exactly as typed. `jwt` takes the first argument and ignores
    /// the rest; the other verbs take none.
    pub fn parse(input: &str) -> Option<Self> {
        let mut words = input.split_whitespace();
        let verb = words.next()?;
        let first_arg = words.next();

        let cmd = match (verb, first_arg) {
            ("jwt", Some(token)) => Self::Jwt(token.to_string()),
            ("clear" | "cls" | "clr", None) => Self::Clear,
            ("help" | "h", None) => Self::Help,
            ("back" | "bck", None) => Self::Back,
            _ => Self::Unknown(input.trim().to_string()),
        };
        Some(cmd)
    }
}

/// The echo written before any response: `"> " + raw input`.
pub fn echo_line(input: &str) -> SessionLine {
    SessionLine::instant(format!("{ECHO_PREFIX}{input}"))
}

/// Lines a fresh or cleared session starts with.
pub fn welcome_lines() -> Vec<SessionLine> {
    WELCOME_LINES.iter().map(|l| SessionLine::instant(*l)).collect()
}

pub fn help_lines() -> Vec<SessionLine> {
    HELP_TEXT.lines().map(SessionLine::instant).collect()
}

pub fn exit_lines() -> Vec<SessionLine> {
    vec![SessionLine::typed(EXIT_MESSAGE)]
}

pub fn unknown_lines() -> Vec<SessionLine> {
    vec![SessionLine::typed(UNKNOWN_COMMAND)]
}

/// Status badge plus details for a decode attempt.
pub fn decode_lines(outcome: &Result<DecodeResult, DecodeError>) -> Vec<SessionLine> {
    match outcome {
        Ok(result) => vec![
            SessionLine::StatusBadge(TokenStatus::Valid),
            SessionLine::typed(DECODED_HEADING),
            SessionLine::DecodedBlock(result.clone()),
        ],
        Err(e) => vec![
            SessionLine::StatusBadge(TokenStatus::Invalid),
            SessionLine::typed(format!("{DECODE_FAILED}: {e}")),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RevealMode;

    #[test]
    fn test_parse_jwt() {
        assert_eq!(
            Command::parse("jwt abc.def.ghi"),
            Some(Command::Jwt("abc.def.ghi".to_string()))
        );
        assert_eq!(
            Command::parse("  jwt   abc.def.ghi  extra "),
            Some(Command::Jwt("abc.def.ghi".to_string()))
        );
    }

    #[test]
    fn test_parse_jwt_without_token() {
        assert_eq!(
            Command::parse("jwt"),
            Some(Command::Unknown("jwt".to_string()))
        );
    }

    #[test]
    fn test_parse_aliases() {
        for input in ["clear", "cls", "clr"] {
            assert_eq!(Command::parse(input), Some(Command::Clear));
        }
        for input in ["help", "h"] {
            assert_eq!(Command::parse(input), Some(Command::Help));
        }
        for input in ["back", "bck"] {
            assert_eq!(Command::parse(input), Some(Command::Back));
        }
    }

    #[test]
    fn test_parse_verbs_are_case_sensitive() {
        assert_eq!(
            Command::parse("JWT a.b.c"),
            Some(Command::Unknown("JWT a.b.c".to_string()))
        );
        assert_eq!(
            Command::parse("CLEAR"),
            Some(Command::Unknown("CLEAR".to_string()))
        );
        assert_eq!(
            Command::parse("Back"),
            Some(Command::Unknown("Back".to_string()))
        );
    }

    #[test]
    fn test_parse_unexpected_arguments() {
        assert_eq!(
            Command::parse("clear now"),
            Some(Command::Unknown("clear now".to_string()))
        );
        assert!(matches!(Command::parse("help me"), Some(Command::Unknown(_))));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            Command::parse("frobnicate"),
            Some(Command::Unknown("frobnicate".to_string()))
        );
    }

    #[test]
    fn test_parse_blank() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("   \t "), None);
    }


    #[test]
    fn test_fixed_blocks() {
        assert_eq!(welcome_lines().len(), 4);
        assert!(
            help_lines()
                .iter()
                .all(|l| l.reveal_mode() == RevealMode::Instant)
        );
        assert_eq!(help_lines()[0].text(), "Available commands:");
        assert_eq!(echo_line("help").text(), "> help");
    }

    #[test]
    fn test_failure_lines_name_the_reason() {
        let lines = decode_lines(&Err(DecodeError::MalformedStructure(
            "expected 3 segments, found 1".to_string(),
        )));
        assert_eq!(lines[0], SessionLine::StatusBadge(TokenStatus::Invalid));
        assert_eq!(
            lines[1].text(),
            "Failed to decode token: malformed structure: expected 3 segments, found 1"
        );
    }
}
