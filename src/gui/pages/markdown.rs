//! Read-only markdown note window

use iced::widget::{container, markdown, scrollable};
use iced::{Element, Length, Theme};

use crate::gui::Message;
use crate::host::{HostRequest, WindowLabel};

const NOTE: &str = r#"# Deskpet

Right-click the main window and pick **Settings** to tune the pet.

- Model, scale and default action
- Idle timing before the action plays
- Stage and scene appearance
- Interface language
- The prompt shown when the pet is touched

Settings are stored as JSON in your config directory.
"#;

pub fn on_mount() -> Vec<HostRequest> {
    vec![HostRequest::ShowWindow(WindowLabel::Markdown)]
}

pub fn parse_note() -> Vec<markdown::Item> {
    markdown::parse(NOTE).collect()
}

pub fn view(items: &[markdown::Item]) -> Element<'_, Message> {
    let note = markdown::view(
        items,
        markdown::Settings::default(),
        markdown::Style::from_palette(Theme::Light.palette()),
    )
    .map(Message::LinkClicked);

    container(scrollable(note))
        .padding(20)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_parses() {
        assert!(!parse_note().is_empty());
    }

    #[test]
    fn test_mount_shows_own_window() {
        assert_eq!(on_mount(), vec![HostRequest::ShowWindow(WindowLabel::Markdown)]);
    }
}
