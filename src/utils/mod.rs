//! Utility modules for browser access, persistence and timing.
//!
//! Provides:
//! - [`Timers`] with [`BrowserTimers`] and, for tests, `ManualTimers`
//! - [`Storage`] with [`LocalStorage`] and [`MemoryStorage`]
//! - [`format_timestamp`] for history rows

pub mod dom;
mod format;
pub mod logger;
pub mod storage;
pub mod time;
pub mod timer;

pub use format::{abbreviate_token, format_date_iso, format_timestamp};
pub use storage::{LocalStorage, MemoryStorage, Storage};
pub use timer::{BrowserTimers, TimerHandle, Timers};

#[cfg(any(test, feature = "mock"))]
pub use timer::ManualTimers;
