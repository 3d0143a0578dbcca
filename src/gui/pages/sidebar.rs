use iced::widget::{button, column, container, row, text, Space};
use iced::{Element, Length};

use crate::gui::Message;
use crate::i18n::tr;
use crate::settings::{Section, SettingsPage};

/// Section navigation plus the reset and save actions
pub fn view(page: &SettingsPage) -> Element<'static, Message> {
    let mut sections = column![text(tr("settings.title")).size(24), Space::with_height(10)]
        .spacing(5)
        .padding(10);

    for section in Section::ALL {
        sections = sections.push(section_button(page, section));
    }

    let actions = row![
        button(text(tr("settings.reset")))
            .padding(10)
            .style(button::danger)
            .on_press(Message::ResetSettings),
        button(text(tr("settings.save")))
            .padding(10)
            .style(button::success)
            .on_press(Message::SaveSettings),
    ]
    .spacing(8);

    let sections = sections
        .push(Space::with_height(Length::Fill))
        .push(actions)
        .push(text(concat!("v", env!("CARGO_PKG_VERSION"))).size(12).style(text::secondary));

    container(sections)
        .width(Length::Fixed(220.0))
        .height(Length::Fill)
        .style(container::rounded_box)
        .into()
}

fn section_button(page: &SettingsPage, section: Section) -> Element<'static, Message> {
    button(text(section.to_string()))
        .width(Length::Fill)
        .padding(10)
        .style(if page.is_visible(section) {
            button::primary
        } else {
            button::secondary
        })
        .on_press(Message::SectionSelected(section))
        .into()
}
