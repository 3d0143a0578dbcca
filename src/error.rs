//! Deskpet Error Types
//!
//! Centralized error handling for the library side of the app.

use thiserror::Error;

/// Central error type for Deskpet
#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Settings store error: {0}")]
    Settings(String),

    #[error("Window state error: {0}")]
    WindowState(String),

    #[error("IPC error: {0}")]
    Ipc(String),

    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    #[error("Unknown window label: {0}")]
    UnknownWindow(String),

    #[error("Lock poisoned: {0}")]
    Lock(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Deskpet operations
pub type DeskResult<T> = Result<T, DeskError>;

/// Helper to convert Mutex poison errors
impl<T> From<std::sync::PoisonError<T>> for DeskError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        DeskError::Lock(err.to_string())
    }
}
