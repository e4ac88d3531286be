//! UI components built with Leptos.
//!
//! - [`landing`] - Landing screen with the launch button
//! - [`terminal`] - Decoder terminal overlay
//! - [`history`] - Decode history panel with filter, search and sort
//! - [`icons`] - Centralized icon definitions

pub mod history;
pub mod icons;
pub mod landing;
pub mod terminal;
