//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.
//! Text assets are loaded at compile time using `include_str!`.

// =============================================================================
// Text Assets (loaded at compile time)
// =============================================================================

/// Help text for the `help` command.
pub const HELP_TEXT: &str = include_str!("../assets/text/help.txt");

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name displayed on the landing screen.
pub const APP_NAME: &str = "jwtsh";

/// Landing screen headline.
pub const APP_HEADLINE: &str = "Decode your JWT";

/// Landing screen tagline.
pub const APP_TAGLINE: &str = "Paste, inspect, and validate your JSON Web Tokens with ease.";

// =============================================================================
// Persistence
// =============================================================================

/// localStorage key for the decode-attempt history.
pub const DECODE_HISTORY_KEY: &str = "decodeHistory";

/// localStorage key for the submitted command history.
pub const COMMAND_HISTORY_KEY: &str = "terminalHistory";

// =============================================================================
// Terminal Text
// =============================================================================

/// Lines shown when a session starts and after `clear`.
pub const WELCOME_LINES: [&str; 4] = [
    "Welcome to JWT Decoder Terminal",
    "Type 'jwt <your_token>' to decode",
    "Type 'clear' to reset",
    "Type 'back' to close the terminal.",
];

/// Prefix of the echo line written for every submitted command.
pub const ECHO_PREFIX: &str = "> ";

/// Heading written above a decoded token.
pub const DECODED_HEADING: &str = "Decoded token:";

/// Failure line written when a token cannot be decoded.
pub const DECODE_FAILED: &str = "Failed to decode token";

/// Line written for an unrecognized command.
pub const UNKNOWN_COMMAND: &str = "Unknown command";

/// Line written before the terminal closes.
pub const EXIT_MESSAGE: &str = "Exiting decoder...";

/// Status badge labels.
pub mod badge {
    pub const VALID: &str = "Token is valid";
    pub const INVALID: &str = "Token is invalid";
}

// =============================================================================
// Timing (milliseconds)
// =============================================================================

/// Reveal speed for plain lines, per character.
pub const CHAR_TICK_MS: u32 = 25;

/// Reveal speed for pretty-printed blocks, per line.
pub const LINE_TICK_MS: u32 = 120;

/// Delay between the `back` command and the terminal closing.
pub const BACK_DELAY_MS: u32 = 1000;

/// Debounce applied to the history search field.
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

// =============================================================================
// Time Constants
// =============================================================================

/// Milliseconds per second for time conversion.
pub const MS_PER_SECOND: f64 = 1000.0;
