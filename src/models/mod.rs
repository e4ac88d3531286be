//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`DecodeResult`], [`Claims`], [`TokenStatus`] - Decoded token representation
//! - [`SessionLine`], [`LogLine`], [`RevealMode`] - Session log entries
//! - [`HistoryEntry`], [`HistoryQuery`] - Decode history records and queries

mod history;
mod session;
mod token;

pub use history::{HistoryEntry, HistoryFilter, HistoryQuery, SortOrder, UnknownOption};
pub use session::{LineId, LogLine, RevealMode, RevealUnit, SessionLine, Visibility};
pub use token::{Claims, DecodeResult, TokenStatus};
