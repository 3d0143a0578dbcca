use iced::widget::{button, column, container, mouse_area, stack, text};
use iced::{Alignment, Element, Length, Padding};

use crate::gui::{HomePage, Message};
use crate::i18n::tr;

pub fn view(home: &HomePage) -> Element<'_, Message> {
    let body = container(
        column![
            text(tr("home.heading")).size(36),
            text(tr("home.hint")).size(16).style(text::secondary),
        ]
        .spacing(12)
        .align_x(Alignment::Center),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .center_x(Length::Fill)
    .center_y(Length::Fill);

    let mut layers = stack![body];

    if let Some(at) = home.menu().position() {
        let menu = container(
            button(text(tr("menu.settings")))
                .padding([6, 16])
                .style(button::text)
                .on_press(Message::OpenSettingsFromMenu),
        )
        .padding(4)
        .style(container::bordered_box);

        layers = layers.push(
            container(menu)
                .padding(Padding {
                    top: at.y,
                    right: 0.0,
                    bottom: 0.0,
                    left: at.x,
                })
                .width(Length::Fill)
                .height(Length::Fill),
        );
    }

    mouse_area(layers)
        .on_move(Message::HomeCursorMoved)
        .on_right_press(Message::HomeRightClicked)
        .on_press(Message::HomeClicked)
        .into()
}
