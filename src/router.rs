//! Route table
//!
//! Four flat paths, each rendered by exactly one page in its own window.

use std::fmt;
use std::str::FromStr;

use crate::error::DeskError;
use crate::host::WindowLabel;

/// A navigable page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Home,
    Todo,
    Markdown,
    Settings,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Home, Route::Todo, Route::Markdown, Route::Settings];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Todo => "/todo",
            Route::Markdown => "/markdown",
            Route::Settings => "/settings",
        }
    }

    /// Resolve a path. A single trailing slash is tolerated on non-root paths.
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.strip_suffix('/').unwrap_or(trimmed)
        } else {
            trimmed
        };

        Route::ALL.into_iter().find(|r| r.path() == normalized)
    }

    /// Window that hosts this route's page
    pub fn window_label(self) -> WindowLabel {
        match self {
            Route::Home => WindowLabel::Main,
            Route::Todo => WindowLabel::Todo,
            Route::Markdown => WindowLabel::Markdown,
            Route::Settings => WindowLabel::Settings,
        }
    }

    /// Initial inner size when no saved window state exists
    pub fn default_size(self) -> (f64, f64) {
        match self {
            Route::Home => (800.0, 600.0),
            Route::Todo | Route::Markdown | Route::Settings => (600.0, 400.0),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::from_path(s).ok_or_else(|| DeskError::UnknownRoute(s.to_string()))
    }
}
