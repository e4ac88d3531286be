//! Centralized icon definitions.
//!
//! Maps semantic icon names to lucide icons.

use icondata::Icon;

use crate::models::TokenStatus;

pub const TERMINAL: Icon = icondata::LuTerminal;
pub const CLOSE: Icon = icondata::LuX;
pub const SEARCH: Icon = icondata::LuSearch;
pub const HISTORY: Icon = icondata::LuHistory;
pub const VALID: Icon = icondata::LuCircleCheck;
pub const INVALID: Icon = icondata::LuCircleX;

/// Icon for a token status badge.
pub fn status(status: TokenStatus) -> Icon {
    match status {
        TokenStatus::Valid => VALID,
        TokenStatus::Invalid => INVALID,
    }
}
