//! Core logic of the decoder terminal.
//!
//! This module provides:
//! - [`jwt::decode`] token decoding and expiry check
//! - [`Command`] parsing and the fixed response lines
//! - [`Session`] the command interpreter with its log, reveals and histories
//! - [`HistoryStore`] and [`InputHistoryNavigator`] for the two histories

pub mod commands;
pub mod error;
mod history;
pub mod jwt;
mod navigator;
pub mod reveal;
mod session;

pub use commands::Command;
pub use error::{DecodeError, StorageError};
pub use history::HistoryStore;
pub use navigator::InputHistoryNavigator;
pub use reveal::{Reveal, RevealPlan};
pub use session::{Session, SessionEvent};
