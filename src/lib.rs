//! Deskpet Library
//!
//! Page state, settings persistence and the window host for the Deskpet
//! desktop companion.

pub mod audit;
pub mod config;
pub mod error;
pub mod gui;
pub mod host;
pub mod i18n;
pub mod ipc;
pub mod router;
pub mod settings;
pub mod window_state;
