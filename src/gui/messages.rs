//! Message types for the Deskpet GUI
//!
//! All messages that can be sent to update the application state.

use iced::widget::{markdown, text_editor};
use iced::{window, Point, Size};

use crate::host::HostRequest;
use crate::settings::{Field, FieldUpdate, Section};

use super::tray::TrayCommand;

/// What to do once a window's modes have been read back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterCapture {
    /// Close this window
    Close,
    /// Exit once every captured window has reported
    Exit,
}

/// Messages that drive the application
#[derive(Debug, Clone)]
pub enum Message {
    // Window lifecycle
    WindowOpened(window::Id),
    WindowMoved(window::Id, Point),
    WindowResized(window::Id, Size),
    WindowCloseRequested(window::Id),
    /// Maximized and fullscreen flags read from the window system
    WindowStateCaptured(window::Id, bool, bool, AfterCapture),
    WindowClosed(window::Id),

    // Host bridge (pages and IPC)
    Host(HostRequest),
    Tray(TrayCommand),

    // Home page
    HomeCursorMoved(Point),
    HomeRightClicked,
    HomeClicked,
    OpenSettingsFromMenu,

    // Settings page
    SectionSelected(Section),
    FieldChanged(FieldUpdate),
    NumberInput(Field, String),
    TouchPromptEdited(text_editor::Action),
    ResetSettings,
    SaveSettings,
    DismissAcknowledgement,
    CloseSettings,

    // Markdown page
    LinkClicked(markdown::Url),
}
