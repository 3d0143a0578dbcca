//! Settings window: sidebar plus the active section's panel

use iced::widget::{
    button, checkbox, column, container, pick_list, row, scrollable, slider, text, text_editor,
    text_input, Column, Space,
};
use iced::{Alignment, Element, Length};

use crate::gui::Message;
use crate::i18n::tr;
use crate::settings::fields::{
    AppLanguage, DefaultAction, FloatRange, ModelChoice, SceneEnvironment, SceneWeather,
    StageBackground, StageLighting, ACTION_SPEED_RANGE, IDLE_DURATION_RANGE, MODEL_SCALE_RANGE,
    PROMPT_DURATION_RANGE, TOUCH_PROMPT_MAX_CHARS,
};
use crate::settings::{Acknowledgement, Field, FieldUpdate, SettingsForm, SettingsPage};

use super::sidebar;

/// Editor buffer for the touch prompt, cursor at the end
pub fn prompt_editor(value: &str) -> text_editor::Content {
    let mut content = text_editor::Content::with_text(value);
    content.perform(text_editor::Action::Move(text_editor::Motion::DocumentEnd));
    content
}

/// Editor text without the trailing newline the buffer always reports
pub fn editor_text(content: &text_editor::Content) -> String {
    let mut value = content.text();
    if value.ends_with('\n') {
        value.pop();
    }
    value
}

pub fn view<'a>(page: &'a SettingsPage, editor: &'a text_editor::Content) -> Element<'a, Message> {
    let header = row![
        Space::with_width(Length::Fill),
        button(text(tr("settings.close")))
            .style(button::secondary)
            .on_press(Message::CloseSettings),
    ];

    let mut main = column![header].spacing(15).padding(20);
    if let Some(ack) = page.acknowledgement() {
        main = main.push(acknowledgement(ack));
    }
    main = main.push(scrollable(panel(page, editor)).height(Length::Fill));

    row![sidebar::view(page), main].into()
}

fn acknowledgement(ack: &Acknowledgement) -> Element<'static, Message> {
    let message = text(ack.text()).style(if ack.is_error() {
        text::danger
    } else {
        text::success
    });

    container(
        row![
            message,
            Space::with_width(Length::Fill),
            button(text("✕"))
                .style(button::text)
                .on_press(Message::DismissAcknowledgement),
        ]
        .align_y(Alignment::Center),
    )
    .padding(10)
    .width(Length::Fill)
    .style(container::rounded_box)
    .into()
}

/// Heading and fields of the visible section
fn panel<'a>(page: &'a SettingsPage, editor: &'a text_editor::Content) -> Element<'a, Message> {
    let form = page.form();
    let fields = page
        .visible_fields()
        .iter()
        .map(|field| field_row(form, editor, *field));

    column![
        text(tr(page.section().heading_key())).size(28),
        Column::with_children(fields).spacing(20),
    ]
    .spacing(20)
    .into()
}

fn field_row<'a>(
    form: &'a SettingsForm,
    editor: &'a text_editor::Content,
    field: Field,
) -> Element<'a, Message> {
    let label = text(tr(field.label_key()));

    match field {
        Field::Model => labeled(
            label,
            pick_list(ModelChoice::ALL, Some(form.model()), |v| {
                Message::FieldChanged(FieldUpdate::Model(v))
            }),
        ),
        Field::ModelScale => labeled(
            label,
            ranged_slider(MODEL_SCALE_RANGE, form.model_scale(), FieldUpdate::ModelScale),
        ),
        Field::DefaultAction => labeled(
            label,
            pick_list(DefaultAction::ALL, Some(form.default_action()), |v| {
                Message::FieldChanged(FieldUpdate::DefaultAction(v))
            }),
        ),
        Field::ActionSpeed => labeled(
            label,
            ranged_slider(ACTION_SPEED_RANGE, form.action_speed(), FieldUpdate::ActionSpeed),
        ),
        Field::IdleDuration => column![
            labeled(
                label,
                number_input(
                    Field::IdleDuration,
                    form.idle_duration(),
                    IDLE_DURATION_RANGE.min,
                    IDLE_DURATION_RANGE.max,
                ),
            ),
            text(tr("hint.idle_duration")).size(14).style(text::secondary),
        ]
        .spacing(8)
        .into(),
        Field::StageLighting => labeled(
            label,
            pick_list(StageLighting::ALL, Some(form.stage_lighting()), |v| {
                Message::FieldChanged(FieldUpdate::StageLighting(v))
            }),
        ),
        Field::StageBackground => labeled(
            label,
            pick_list(StageBackground::ALL, Some(form.stage_background()), |v| {
                Message::FieldChanged(FieldUpdate::StageBackground(v))
            }),
        ),
        Field::SceneEnvironment => labeled(
            label,
            pick_list(SceneEnvironment::ALL, Some(form.scene_environment()), |v| {
                Message::FieldChanged(FieldUpdate::SceneEnvironment(v))
            }),
        ),
        Field::SceneWeather => labeled(
            label,
            pick_list(SceneWeather::ALL, Some(form.scene_weather()), |v| {
                Message::FieldChanged(FieldUpdate::SceneWeather(v))
            }),
        ),
        Field::AppLanguage => column![
            labeled(
                label,
                pick_list(AppLanguage::ALL, Some(form.app_language()), |v| {
                    Message::FieldChanged(FieldUpdate::AppLanguage(v))
                }),
            ),
            text(tr("hint.app_language")).size(14).style(text::secondary),
        ]
        .spacing(8)
        .into(),
        Field::TouchPromptText => column![
            label,
            text_editor(editor)
                .placeholder(tr("hint.touch_prompt_text"))
                .on_action(Message::TouchPromptEdited)
                .height(Length::Fixed(100.0))
                .padding(8),
            text(format!(
                "{}/{}",
                form.touch_prompt_text().chars().count(),
                TOUCH_PROMPT_MAX_CHARS
            ))
            .size(12)
            .style(text::secondary),
        ]
        .spacing(8)
        .into(),
        Field::PromptDisplayDuration => labeled(
            label,
            number_input(
                Field::PromptDisplayDuration,
                form.prompt_display_duration(),
                PROMPT_DURATION_RANGE.min,
                PROMPT_DURATION_RANGE.max,
            ),
        ),
        Field::EnableTouchPrompt => checkbox(tr(field.label_key()), form.enable_touch_prompt())
            .on_toggle(|b| Message::FieldChanged(FieldUpdate::EnableTouchPrompt(b)))
            .into(),
    }
}

fn labeled<'a>(
    label: iced::widget::Text<'a>,
    control: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    row![label.width(Length::Fixed(260.0)), control.into()]
        .spacing(10)
        .align_y(Alignment::Center)
        .into()
}

fn ranged_slider(
    range: FloatRange,
    value: f32,
    update: fn(f32) -> FieldUpdate,
) -> Element<'static, Message> {
    row![
        slider(range.min..=range.max, value, move |v| {
            Message::FieldChanged(update(v))
        })
        .step(range.step)
        .width(Length::Fixed(220.0)),
        text(format!("{:.1}x", value)),
    ]
    .spacing(10)
    .align_y(Alignment::Center)
    .into()
}

fn number_input(field: Field, value: u32, min: u32, max: u32) -> Element<'static, Message> {
    row![
        text_input("", &value.to_string())
            .on_input(move |s| Message::NumberInput(field, s))
            .width(Length::Fixed(100.0))
            .padding(8),
        text(format!("{}–{}", min, max)).size(12).style(text::secondary),
    ]
    .spacing(10)
    .align_y(Alignment::Center)
    .into()
}
