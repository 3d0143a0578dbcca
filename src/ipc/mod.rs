//! IPC (Inter-Process Communication) Module
//!
//! Unix socket used to keep a single running instance: a second launch
//! forwards its window request to the first one and exits.
//! Protocol: JSON over newline-delimited messages.

pub mod client;
pub mod messages;
pub mod server;

pub use client::IpcClient;
pub use messages::*;
pub use server::IpcServer;

use std::path::PathBuf;

/// Get the Unix socket path for IPC
pub fn socket_path() -> PathBuf {
    let user = std::env::var("USER").unwrap_or_else(|_| "deskpet".to_string());
    PathBuf::from(format!("/tmp/deskpet-{}.sock", user))
}
