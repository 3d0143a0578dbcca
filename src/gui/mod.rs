//! GUI module using iced
//!
//! A multi-window daemon: one native window per route, driven by host
//! requests from the pages and from the IPC server.

use iced::widget::{center, text};
use iced::{event, window, Element, Event, Subscription, Task, Theme};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::host::WindowLabel;
use crate::i18n::{self, tr};
use crate::ipc::IpcServer;
use crate::router::Route;
use crate::settings::{Field, FieldUpdate};

// Sub-modules
pub mod app;
pub mod messages;
pub mod pages;
pub mod state;
pub mod tray;

// Re-exports for convenience
pub use app::{DeskpetApp, LaunchOptions};
pub use messages::{AfterCapture, Message};
pub use state::{ContextMenu, HomePage};
pub use tray::TrayCommand;

impl DeskpetApp {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::WindowOpened(id) => return self.window_opened(id),
            Message::WindowMoved(id, position) => {
                if let Some(label) = self.label_of(id) {
                    self.geometry
                        .entry(label)
                        .or_default()
                        .record_move(position.x, position.y);
                }
            }
            Message::WindowResized(id, size) => {
                if let Some(label) = self.label_of(id) {
                    self.geometry
                        .entry(label)
                        .or_default()
                        .record_resize(size.width, size.height);
                }
            }
            Message::WindowCloseRequested(id) => {
                return Self::capture_state(id, AfterCapture::Close);
            }
            Message::WindowStateCaptured(id, maximized, fullscreen, then) => {
                return self.state_captured(id, maximized, fullscreen, then);
            }
            Message::WindowClosed(id) => return self.window_closed(id),

            Message::Host(request) => return self.perform(request),
            Message::Tray(command) => return self.tray_command(command),

            Message::HomeCursorMoved(position) => self.home.cursor_moved(position),
            Message::HomeRightClicked => self.home.right_clicked(),
            Message::HomeClicked => self.home.clicked(),
            Message::OpenSettingsFromMenu => {
                let request = self.home.open_settings();
                return self.perform(request);
            }

            Message::SectionSelected(section) => {
                if let Some(page) = self.settings.as_mut() {
                    page.select(section);
                }
            }
            Message::FieldChanged(update) => {
                if let Some(page) = self.settings.as_mut() {
                    if let FieldUpdate::AppLanguage(language) = &update {
                        i18n::set_language(language.code());
                    }
                    page.set(update);
                }
            }
            Message::NumberInput(field, input) => {
                let Some(page) = self.settings.as_mut() else {
                    return Task::none();
                };
                let Ok(value) = input.trim().parse::<i64>() else {
                    debug!("Ignoring non-numeric input for {:?}: {:?}", field, input);
                    return Task::none();
                };
                match field {
                    Field::IdleDuration => page.set(FieldUpdate::IdleDuration(value)),
                    Field::PromptDisplayDuration => {
                        page.set(FieldUpdate::PromptDisplayDuration(value))
                    }
                    other => warn!("{:?} is not a number field", other),
                }
            }
            Message::TouchPromptEdited(action) => {
                let Some(page) = self.settings.as_mut() else {
                    return Task::none();
                };
                let is_edit = action.is_edit();
                self.prompt_editor.perform(action);
                if is_edit {
                    let value = pages::settings::editor_text(&self.prompt_editor);
                    page.set(FieldUpdate::TouchPromptText(value.clone()));
                    // Over-long input was cut by the form
                    if page.form().touch_prompt_text() != value {
                        self.prompt_editor =
                            pages::settings::prompt_editor(page.form().touch_prompt_text());
                    }
                }
            }
            Message::ResetSettings => {
                if let Some(page) = self.settings.as_mut() {
                    page.reset_all();
                    i18n::set_language(page.form().app_language().code());
                    self.prompt_editor =
                        pages::settings::prompt_editor(page.form().touch_prompt_text());
                }
            }
            Message::SaveSettings => {
                if let Some(page) = self.settings.as_mut() {
                    page.save();
                }
            }
            Message::DismissAcknowledgement => {
                if let Some(page) = self.settings.as_mut() {
                    page.dismiss_acknowledgement();
                }
            }
            Message::CloseSettings => {
                if let Some(id) = self.window_id(WindowLabel::Settings) {
                    return Self::capture_state(id, AfterCapture::Close);
                }
            }

            Message::LinkClicked(url) => {
                info!("🔗 Link clicked: {}", url);
            }
        }

        Task::none()
    }

    pub fn view(&self, id: window::Id) -> Element<'_, Message> {
        let Some(label) = self.label_of(id) else {
            return center(text("")).into();
        };

        match label.route() {
            Route::Home => pages::home::view(&self.home),
            Route::Settings => match &self.settings {
                Some(page) => pages::settings::view(page, &self.prompt_editor),
                None => center(text(tr("settings.title")).size(24)).into(),
            },
            Route::Todo => pages::todo::view(),
            Route::Markdown => pages::markdown::view(&self.markdown),
        }
    }

    pub fn title(&self, id: window::Id) -> String {
        let app = tr("app.title");
        match self.label_of(id) {
            Some(WindowLabel::Settings) => format!("{} · {}", app, tr("window.settings")),
            Some(WindowLabel::Todo) => format!("{} · {}", app, tr("window.todo")),
            Some(WindowLabel::Markdown) => format!("{} · {}", app, tr("window.markdown")),
            Some(WindowLabel::Main) | None => app,
        }
    }

    pub fn theme(&self, _id: window::Id) -> Theme {
        Theme::Light
    }

    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            window::resize_events().map(|(id, size)| Message::WindowResized(id, size)),
            window::close_requests().map(Message::WindowCloseRequested),
            window::close_events().map(Message::WindowClosed),
            event::listen_with(window_moved),
            Subscription::run(ipc_requests),
            Subscription::run(tray::events),
        ])
    }
}

/// Moves have no dedicated window subscription
fn window_moved(event: Event, _status: event::Status, id: window::Id) -> Option<Message> {
    match event {
        Event::Window(window::Event::Moved(position)) => Some(Message::WindowMoved(id, position)),
        _ => None,
    }
}

/// Run the IPC server for the lifetime of the app, forwarding window requests
fn ipc_requests() -> impl futures::Stream<Item = Message> {
    iced::stream::channel(16, |output| async move {
        let forward = Arc::new(Mutex::new(output));

        let mut server = IpcServer::default();
        let started = server.start(move |request| {
            forward
                .lock()
                .map(|mut tx| tx.try_send(Message::Host(request)).is_ok())
                .unwrap_or(false)
        });

        if let Err(e) = started {
            warn!("⚠️ Failed to start IPC server: {}", e);
            return;
        }

        // Keep the server alive with the subscription
        loop {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::host::HostRequest;
    use crate::settings::{AppLanguage, SettingsStore};
    use crate::window_state::WindowState;
    use iced::widget::text_editor;
    use iced::Point;
    use tempfile::TempDir;

    fn app(dir: &TempDir, config: AppConfig) -> DeskpetApp {
        let options = LaunchOptions {
            config,
            initial_route: Route::Home,
            settings_store: SettingsStore::new(dir.path().join("settings.json")),
            window_state_dir: dir.path().join("windows"),
        };
        DeskpetApp::new(options).0
    }

    fn main_only() -> AppConfig {
        AppConfig {
            todo_visible: false,
            markdown_visible: false,
        }
    }

    fn open_settings(app: &mut DeskpetApp) -> window::Id {
        let _ = app.update(Message::OpenSettingsFromMenu);
        let id = app.window_id(WindowLabel::Settings).unwrap();
        let _ = app.update(Message::WindowOpened(id));
        id
    }

    #[test]
    fn test_startup_windows_follow_config() {
        let dir = TempDir::new().unwrap();
        let minimal = app(&dir, main_only());
        assert_eq!(minimal.windows.len(), 1);
        assert!(minimal.window_id(WindowLabel::Main).is_some());

        let full = app(&dir, AppConfig::default());
        assert!(full.window_id(WindowLabel::Todo).is_some());
        assert!(full.window_id(WindowLabel::Markdown).is_some());
    }

    #[test]
    fn test_menu_opens_settings_once() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, main_only());

        let _ = app.update(Message::HomeCursorMoved(Point::new(40.0, 40.0)));
        let _ = app.update(Message::HomeRightClicked);
        assert!(app.home.menu().is_visible());

        let _ = app.update(Message::OpenSettingsFromMenu);
        assert!(!app.home.menu().is_visible());
        assert!(app.pending_focus.contains(&WindowLabel::Settings));

        // Already open: no second window
        let _ = app.update(Message::Host(HostRequest::RevealAndFocus(WindowLabel::Settings)));
        let settings_windows = app
            .windows
            .values()
            .filter(|l| **l == WindowLabel::Settings)
            .count();
        assert_eq!(settings_windows, 1);
    }

    #[test]
    fn test_settings_page_lives_with_window() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, main_only());
        assert!(app.settings.is_none());

        let id = open_settings(&mut app);
        assert!(app.settings.is_some());
        assert!(!app.pending_focus.contains(&WindowLabel::Settings));

        let _ = app.update(Message::WindowClosed(id));
        assert!(app.settings.is_none());
        assert!(app.window_id(WindowLabel::Settings).is_none());
    }

    #[test]
    fn test_unsaved_language_reverts_on_close() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, main_only());
        let id = open_settings(&mut app);

        let _ = app.update(Message::FieldChanged(FieldUpdate::AppLanguage(AppLanguage::EnUs)));
        assert_eq!(
            app.settings.as_ref().unwrap().form().app_language(),
            AppLanguage::EnUs
        );

        let _ = app.update(Message::WindowClosed(id));
        assert_eq!(i18n::current_language(), "zh-CN");
        assert_eq!(app.settings_store.load().app_language(), AppLanguage::ZhCn);
    }

    #[test]
    fn test_tray_hides_and_shows_main() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, main_only());
        assert!(!app.main_hidden);

        let _ = app.update(Message::Tray(TrayCommand::Hide));
        assert!(app.main_hidden);
        let _ = app.update(Message::Tray(TrayCommand::Show));
        assert!(!app.main_hidden);

        let _ = app.update(Message::Tray(TrayCommand::Toggle));
        assert!(app.main_hidden);
        let _ = app.update(Message::Tray(TrayCommand::Toggle));
        assert!(!app.main_hidden);
    }

    #[test]
    fn test_reveal_request_unhides_main() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, main_only());

        let _ = app.update(Message::Tray(TrayCommand::Hide));
        let _ = app.update(Message::Host(HostRequest::RevealAndFocus(WindowLabel::Main)));
        assert!(!app.main_hidden);

        // Hiding the tray's window does not touch the others
        let _ = app.update(Message::Tray(TrayCommand::Hide));
        let _ = app.update(Message::OpenSettingsFromMenu);
        assert!(app.main_hidden);
    }

    #[test]
    fn test_tray_quit_saves_every_window() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, main_only());
        let main = app.window_id(WindowLabel::Main).unwrap();
        let _ = app.update(Message::WindowResized(main, iced::Size::new(500.0, 300.0)));

        let _ = app.update(Message::Tray(TrayCommand::Quit));
        assert_eq!(app.exit_pending, 1);
        // Quitting leaves windows open until the exit task runs
        assert!(app.window_id(WindowLabel::Main).is_some());

        let _ = app.update(Message::WindowStateCaptured(main, true, false, AfterCapture::Exit));
        assert_eq!(app.exit_pending, 0);

        let saved = WindowState::load(&dir.path().join("windows"), WindowLabel::Main);
        assert_eq!(saved.size_or((0.0, 0.0)), (500.0, 300.0));
        assert_eq!(saved.maximized, Some(true));
    }

    #[test]
    fn test_number_input_is_parsed_and_clamped() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, main_only());
        open_settings(&mut app);

        let _ = app.update(Message::NumberInput(Field::IdleDuration, "999".into()));
        assert_eq!(app.settings.as_ref().unwrap().form().idle_duration(), 300);

        let _ = app.update(Message::NumberInput(Field::IdleDuration, "abc".into()));
        assert_eq!(app.settings.as_ref().unwrap().form().idle_duration(), 300);

        let _ = app.update(Message::NumberInput(Field::PromptDisplayDuration, "0".into()));
        assert_eq!(app.settings.as_ref().unwrap().form().prompt_display_duration(), 1);
    }

    #[test]
    fn test_touch_prompt_editor_feeds_form() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, main_only());
        open_settings(&mut app);

        for c in "hi".chars() {
            let _ = app.update(Message::TouchPromptEdited(text_editor::Action::Edit(
                text_editor::Edit::Insert(c),
            )));
        }
        let _ = app.update(Message::TouchPromptEdited(text_editor::Action::Edit(
            text_editor::Edit::Enter,
        )));
        let _ = app.update(Message::TouchPromptEdited(text_editor::Action::Edit(
            text_editor::Edit::Insert('!'),
        )));
        assert_eq!(app.settings.as_ref().unwrap().form().touch_prompt_text(), "hi\n!");

        // Cursor moves alone leave the form untouched
        let _ = app.update(Message::TouchPromptEdited(text_editor::Action::Move(
            text_editor::Motion::DocumentStart,
        )));
        assert_eq!(app.settings.as_ref().unwrap().form().touch_prompt_text(), "hi\n!");
    }

    #[test]
    fn test_touch_prompt_paste_is_truncated() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, main_only());
        open_settings(&mut app);

        let long = Arc::new("a".repeat(250));
        let _ = app.update(Message::TouchPromptEdited(text_editor::Action::Edit(
            text_editor::Edit::Paste(long),
        )));

        let stored = app.settings.as_ref().unwrap().form().touch_prompt_text().to_string();
        assert_eq!(stored.chars().count(), 200);
        assert_eq!(pages::settings::editor_text(&app.prompt_editor), stored);

        let _ = app.update(Message::ResetSettings);
        assert_eq!(pages::settings::editor_text(&app.prompt_editor), "");
    }

    #[test]
    fn test_reset_through_update() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, main_only());
        open_settings(&mut app);

        let _ = app.update(Message::FieldChanged(FieldUpdate::ModelScale(1.8)));
        assert!((app.settings.as_ref().unwrap().form().model_scale() - 1.8).abs() < 1e-6);

        let _ = app.update(Message::ResetSettings);
        let page = app.settings.as_ref().unwrap();
        assert_eq!(page.form().model_scale(), 1.0);
        assert!(page.acknowledgement().is_some());
    }

    #[test]
    fn test_settings_messages_without_page_are_ignored() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, main_only());

        let _ = app.update(Message::SaveSettings);
        let _ = app.update(Message::ResetSettings);
        assert!(app.settings.is_none());
        assert!(!dir.path().join("settings.json").exists());
    }

    #[test]
    fn test_geometry_saved_on_close_request() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, main_only());
        let id = open_settings(&mut app);

        let _ = app.update(Message::WindowMoved(id, Point::new(120.0, 80.0)));
        let _ = app.update(Message::WindowResized(id, iced::Size::new(640.0, 480.0)));
        let _ = app.update(Message::WindowCloseRequested(id));
        let _ = app.update(Message::WindowStateCaptured(id, false, false, AfterCapture::Close));

        let saved = WindowState::load(&dir.path().join("windows"), WindowLabel::Settings);
        assert_eq!(saved.position(), Some((120, 80)));
        assert_eq!(saved.size_or((0.0, 0.0)), (640.0, 480.0));
        assert_eq!(saved.maximized, Some(false));
    }

    #[test]
    fn test_maximized_state_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, main_only());
        let id = open_settings(&mut app);

        let _ = app.update(Message::WindowStateCaptured(id, true, false, AfterCapture::Close));
        let _ = app.update(Message::WindowClosed(id));
        assert!(app.window_id(WindowLabel::Settings).is_none());

        let saved = WindowState::load(&dir.path().join("windows"), WindowLabel::Settings);
        assert_eq!(saved.maximized, Some(true));
        assert_eq!(saved.fullscreen, Some(false));

        // Reopening loads the flags that WindowOpened restores
        open_settings(&mut app);
        assert_eq!(app.geometry[&WindowLabel::Settings].maximized, Some(true));
    }

    #[test]
    fn test_main_close_captures_remaining_windows() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, AppConfig::default());
        let main = app.window_id(WindowLabel::Main).unwrap();
        let todo = app.window_id(WindowLabel::Todo).unwrap();
        let markdown = app.window_id(WindowLabel::Markdown).unwrap();

        let _ = app.update(Message::WindowClosed(main));
        assert_eq!(app.exit_pending, 2);

        let _ = app.update(Message::WindowStateCaptured(todo, false, true, AfterCapture::Exit));
        assert_eq!(app.exit_pending, 1);
        let _ = app.update(Message::WindowStateCaptured(markdown, true, false, AfterCapture::Exit));
        assert_eq!(app.exit_pending, 0);

        let windows = dir.path().join("windows");
        assert_eq!(WindowState::load(&windows, WindowLabel::Todo).fullscreen, Some(true));
        assert_eq!(WindowState::load(&windows, WindowLabel::Markdown).maximized, Some(true));
    }
}
