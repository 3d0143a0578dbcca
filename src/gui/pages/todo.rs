use iced::widget::{center, column, text};
use iced::Element;

use crate::gui::Message;
use crate::host::{HostRequest, WindowLabel};
use crate::i18n::tr;

pub fn on_mount() -> Vec<HostRequest> {
    vec![HostRequest::ShowWindow(WindowLabel::Todo)]
}

pub fn view() -> Element<'static, Message> {
    center(
        column![
            text(tr("window.todo")).size(28),
            text(tr("todo.body")).style(text::secondary),
        ]
        .spacing(10),
    )
    .into()
}
