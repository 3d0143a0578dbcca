//! Host bridge vocabulary
//!
//! Pages never touch native windows directly. They emit [`HostRequest`]s and
//! the GUI host turns them into window tasks. Requests are best-effort,
//! non-blocking and never retried; nothing is reported back to the page.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DeskError;
use crate::router::Route;

/// Stable name of a native window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowLabel {
    Main,
    Settings,
    Todo,
    Markdown,
}

impl WindowLabel {
    pub const ALL: [WindowLabel; 4] = [
        WindowLabel::Main,
        WindowLabel::Settings,
        WindowLabel::Todo,
        WindowLabel::Markdown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WindowLabel::Main => "main",
            WindowLabel::Settings => "settings",
            WindowLabel::Todo => "todo",
            WindowLabel::Markdown => "markdown",
        }
    }

    /// Page rendered inside this window
    pub fn route(self) -> Route {
        match self {
            WindowLabel::Main => Route::Home,
            WindowLabel::Settings => Route::Settings,
            WindowLabel::Todo => Route::Todo,
            WindowLabel::Markdown => Route::Markdown,
        }
    }
}

impl fmt::Display for WindowLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindowLabel {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WindowLabel::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| DeskError::UnknownWindow(s.to_string()))
    }
}

/// A fire-and-forget call into the window host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostRequest {
    /// Make sure the window exists and is visible
    ShowWindow(WindowLabel),
    /// Show the window and bring it to the foreground
    RevealAndFocus(WindowLabel),
}

impl HostRequest {
    pub fn label(&self) -> WindowLabel {
        match self {
            HostRequest::ShowWindow(label) | HostRequest::RevealAndFocus(label) => *label,
        }
    }

    pub fn wants_focus(&self) -> bool {
        matches!(self, HostRequest::RevealAndFocus(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_parse() {
        assert_eq!("settings".parse::<WindowLabel>().unwrap(), WindowLabel::Settings);
        assert!("Settings".parse::<WindowLabel>().is_err());
    }

    #[test]
    fn test_label_serializes_lowercase() {
        let json = serde_json::to_string(&WindowLabel::Markdown).unwrap();
        assert_eq!(json, "\"markdown\"");
    }

    #[test]
    fn test_request_label() {
        assert_eq!(
            HostRequest::RevealAndFocus(WindowLabel::Settings).label(),
            WindowLabel::Settings
        );
        assert!(!HostRequest::ShowWindow(WindowLabel::Todo).wants_focus());
    }
}
