//! Browser JWT decoder terminal.
//!
//! The decoding, session and history logic under [`core`] has no DOM
//! dependency and is tested natively. [`app`] and [`components`] bind it to
//! Leptos.

pub mod app;
pub mod components;
pub mod config;
pub mod core;
pub mod models;
pub mod utils;
