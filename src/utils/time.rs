//! Wall-clock access that works both in the browser and natively.

use crate::config::MS_PER_SECOND;

/// Current time in epoch milliseconds.
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Current time in epoch milliseconds.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * MS_PER_SECOND)
        .unwrap_or(0.0)
}

/// Current time in epoch seconds.
pub fn now_secs() -> f64 {
    now_ms() / MS_PER_SECOND
}
