//! Session log data types.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::{CHAR_TICK_MS, LINE_TICK_MS, badge};

use super::{DecodeResult, TokenStatus};

/// Granularity of an incremental reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealUnit {
    /// One character per tick (plain terminal lines).
    Char,
    /// One line per tick (pretty-printed blocks).
    Line,
}

impl RevealUnit {
    /// Tick period for this unit.
    pub fn period_ms(&self) -> u32 {
        match self {
            Self::Char => CHAR_TICK_MS,
            Self::Line => LINE_TICK_MS,
        }
    }
}

/// Whether a line appears at once or unit-by-unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealMode {
    Instant,
    Incremental(RevealUnit),
}

/// A single entry of the session log.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionLine {
    /// Plain terminal text
    Plain { text: String, mode: RevealMode },
    /// Valid/invalid badge
    StatusBadge(TokenStatus),
    /// Decoded token object, revealed line by line
    DecodedBlock(DecodeResult),
}

impl SessionLine {
    /// Plain text that appears at once.
    pub fn instant(text: impl Into<String>) -> Self {
        Self::Plain {
            text: text.into(),
            mode: RevealMode::Instant,
        }
    }

    /// Plain text typed out character by character.
    pub fn typed(text: impl Into<String>) -> Self {
        Self::Plain {
            text: text.into(),
            mode: RevealMode::Incremental(RevealUnit::Char),
        }
    }

    /// The full text a renderer shows once the reveal completes.
    pub fn text(&self) -> String {
        match self {
            Self::Plain { text, .. } => text.clone(),
            Self::StatusBadge(TokenStatus::Valid) => badge::VALID.to_string(),
            Self::StatusBadge(TokenStatus::Invalid) => badge::INVALID.to_string(),
            Self::DecodedBlock(result) => result.to_pretty_json(),
        }
    }

    pub fn reveal_mode(&self) -> RevealMode {
        match self {
            Self::Plain { mode, .. } => *mode,
            Self::StatusBadge(_) => RevealMode::Instant,
            Self::DecodedBlock(_) => RevealMode::Incremental(RevealUnit::Line),
        }
    }
}

/// Unique ID of a log entry, for keyed rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(usize);

// Global counter for generating unique IDs
static LINE_ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

impl LineId {
    pub fn next() -> Self {
        Self(LINE_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Snapshot of one log entry and its reveal progress.
#[derive(Clone, Debug, PartialEq)]
pub struct LogLine {
    pub id: LineId,
    pub line: SessionLine,
    /// Text revealed so far.
    pub shown: String,
    pub finished: bool,
}

/// Whether the terminal is on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Hidden,
    Active,
}
