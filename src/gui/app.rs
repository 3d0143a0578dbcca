//! Main application state for the Deskpet GUI
//!
//! Contains the DeskpetApp struct, its launch options and the window host:
//! the code that turns [`HostRequest`]s into window tasks.

use iced::widget::{markdown, text_editor};
use iced::{window, Point, Size, Task};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::host::{HostRequest, WindowLabel};
use crate::i18n;
use crate::router::Route;
use crate::settings::{SettingsPage, SettingsStore};
use crate::window_state::{self, WindowState};

use super::messages::{AfterCapture, Message};
use super::pages;
use super::state::HomePage;
use super::tray::TrayCommand;

/// Everything `main` decides before the event loop starts
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub config: AppConfig,
    /// Page requested on the command line
    pub initial_route: Route,
    pub settings_store: SettingsStore,
    pub window_state_dir: PathBuf,
}

impl LaunchOptions {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            initial_route: Route::Home,
            settings_store: SettingsStore::default(),
            window_state_dir: window_state::default_dir(),
        }
    }
}

/// Main application state
pub struct DeskpetApp {
    /// Window visibility flags from the app config
    pub(crate) config: AppConfig,
    /// Open windows by id
    pub(crate) windows: BTreeMap<window::Id, WindowLabel>,
    /// Windows that take focus once they finish opening
    pub(crate) pending_focus: HashSet<WindowLabel>,
    /// Geometry tracked since each window opened
    pub(crate) geometry: HashMap<WindowLabel, WindowState>,
    pub(crate) window_state_dir: PathBuf,
    /// Main window minimized from the tray
    pub(crate) main_hidden: bool,
    /// Windows still to report their modes before the app exits
    pub(crate) exit_pending: usize,
    /// Home page state
    pub(crate) home: HomePage,
    /// Settings page state, present while the settings window is open
    pub(crate) settings: Option<SettingsPage>,
    pub(crate) settings_store: SettingsStore,
    /// Multi-line buffer behind the touch prompt field
    pub(crate) prompt_editor: text_editor::Content,
    /// Parsed markdown note
    pub(crate) markdown: Vec<markdown::Item>,
}

impl DeskpetApp {
    pub fn new(options: LaunchOptions) -> (Self, Task<Message>) {
        let LaunchOptions {
            config,
            initial_route,
            settings_store,
            window_state_dir,
        } = options;

        // Saved language applies before the first frame
        let language = settings_store.load().app_language();
        i18n::init(Some(language.code()));

        let mut app = Self {
            config,
            windows: BTreeMap::new(),
            pending_focus: HashSet::new(),
            geometry: HashMap::new(),
            window_state_dir,
            main_hidden: false,
            exit_pending: 0,
            home: HomePage::default(),
            settings: None,
            settings_store,
            prompt_editor: text_editor::Content::new(),
            markdown: pages::markdown::parse_note(),
        };

        let mut startup = vec![app.open_window(WindowLabel::Main)];
        if app.config.todo_visible {
            startup.push(app.open_window(WindowLabel::Todo));
        }
        if app.config.markdown_visible {
            startup.push(app.open_window(WindowLabel::Markdown));
        }
        if initial_route != Route::Home {
            startup.push(app.perform(HostRequest::RevealAndFocus(initial_route.window_label())));
        }

        info!("🚀 Deskpet initialized ({} windows opening)", app.windows.len());
        (app, Task::batch(startup))
    }

    pub(crate) fn window_id(&self, label: WindowLabel) -> Option<window::Id> {
        self.windows
            .iter()
            .find(|(_, open)| **open == label)
            .map(|(id, _)| *id)
    }

    pub(crate) fn label_of(&self, id: window::Id) -> Option<WindowLabel> {
        self.windows.get(&id).copied()
    }

    /// Execute a host request. Failures are logged, never reported back.
    pub(crate) fn perform(&mut self, request: HostRequest) -> Task<Message> {
        let label = request.label();
        debug!("🪟 Host request: {:?}", request);
        if label == WindowLabel::Main {
            self.main_hidden = false;
        }

        match self.window_id(label) {
            Some(id) => {
                let show = window::minimize(id, false);
                if request.wants_focus() {
                    Task::batch([show, window::gain_focus(id)])
                } else {
                    show
                }
            }
            None => {
                if request.wants_focus() {
                    self.pending_focus.insert(label);
                }
                self.open_window(label)
            }
        }
    }

    pub(crate) fn tray_command(&mut self, command: TrayCommand) -> Task<Message> {
        debug!("🧺 Tray command: {:?}", command);
        match command {
            TrayCommand::Show => self.perform(HostRequest::RevealAndFocus(WindowLabel::Main)),
            TrayCommand::Hide => {
                let Some(id) = self.window_id(WindowLabel::Main) else {
                    return Task::none();
                };
                self.main_hidden = true;
                window::minimize(id, true)
            }
            TrayCommand::Toggle if self.main_hidden => self.tray_command(TrayCommand::Show),
            TrayCommand::Toggle => self.tray_command(TrayCommand::Hide),
            TrayCommand::Quit => {
                info!("👋 Quit from tray");
                self.capture_all_then_exit()
            }
        }
    }

    /// Open a window with its saved geometry
    pub(crate) fn open_window(&mut self, label: WindowLabel) -> Task<Message> {
        let state = WindowState::load(&self.window_state_dir, label);
        let (width, height) = state.size_or(label.route().default_size());
        let position = state
            .position()
            .map(|(x, y)| window::Position::Specific(Point::new(x as f32, y as f32)))
            .unwrap_or(window::Position::Default);

        let (id, opened) = window::open(window::Settings {
            size: Size::new(width as f32, height as f32),
            position,
            exit_on_close_request: false,
            ..window::Settings::default()
        });

        info!("🪟 Opening '{}' window ({}x{})", label, width, height);
        self.windows.insert(id, label);
        self.geometry.insert(label, state);
        opened.map(Message::WindowOpened)
    }

    /// Finish opening: restore window modes, apply pending focus, mount the page
    pub(crate) fn window_opened(&mut self, id: window::Id) -> Task<Message> {
        let Some(label) = self.label_of(id) else {
            return Task::none();
        };

        let mut tasks = Vec::new();
        let state = self.geometry.get(&label).cloned().unwrap_or_default();
        if state.maximized == Some(true) {
            tasks.push(window::maximize(id, true));
        }
        if state.fullscreen == Some(true) {
            tasks.push(window::change_mode(id, window::Mode::Fullscreen));
        }
        if self.pending_focus.remove(&label) {
            tasks.push(window::gain_focus(id));
        }

        for request in self.mount(label) {
            tasks.push(self.perform(request));
        }

        Task::batch(tasks)
    }

    /// Create page state for a freshly opened window and collect its requests
    fn mount(&mut self, label: WindowLabel) -> Vec<HostRequest> {
        match label.route() {
            Route::Home => self.home.on_mount(),
            Route::Settings => {
                let (page, requests) = SettingsPage::mount(self.settings_store.clone());
                i18n::set_language(page.form().app_language().code());
                self.prompt_editor = pages::settings::prompt_editor(page.form().touch_prompt_text());
                self.settings = Some(page);
                requests
            }
            Route::Todo => pages::todo::on_mount(),
            Route::Markdown => pages::markdown::on_mount(),
        }
    }

    pub(crate) fn persist_geometry(&self, label: WindowLabel) {
        let Some(state) = self.geometry.get(&label) else {
            return;
        };
        if let Err(e) = state.save(&self.window_state_dir, label) {
            warn!("Failed to save '{}' window state: {}", label, e);
        }
    }

    /// Read a window's modes back, then close it or count it towards exit
    pub(crate) fn capture_state(id: window::Id, then: AfterCapture) -> Task<Message> {
        window::get_maximized(id).then(move |maximized| {
            window::get_mode(id).map(move |mode| {
                Message::WindowStateCaptured(id, maximized, mode == window::Mode::Fullscreen, then)
            })
        })
    }

    /// Capture every open window, exiting after the last one reports
    pub(crate) fn capture_all_then_exit(&mut self) -> Task<Message> {
        let ids: Vec<window::Id> = self.windows.keys().copied().collect();
        if ids.is_empty() {
            info!("👋 Exiting");
            return iced::exit();
        }
        self.exit_pending = ids.len();
        Task::batch(
            ids.into_iter()
                .map(|id| Self::capture_state(id, AfterCapture::Exit)),
        )
    }

    pub(crate) fn state_captured(
        &mut self,
        id: window::Id,
        maximized: bool,
        fullscreen: bool,
        then: AfterCapture,
    ) -> Task<Message> {
        if let Some(label) = self.label_of(id) {
            self.geometry
                .entry(label)
                .or_default()
                .record_modes(maximized, fullscreen);
            self.persist_geometry(label);
        }

        match then {
            AfterCapture::Close => window::close(id),
            AfterCapture::Exit => {
                self.exit_pending = self.exit_pending.saturating_sub(1);
                if self.exit_pending == 0 {
                    info!("👋 Window state saved, exiting");
                    iced::exit()
                } else {
                    Task::none()
                }
            }
        }
    }

    /// Forget a closed window. Closing the main window ends the app.
    pub(crate) fn window_closed(&mut self, id: window::Id) -> Task<Message> {
        let Some(label) = self.windows.remove(&id) else {
            return Task::none();
        };
        debug!("🪟 '{}' window closed", label);
        self.pending_focus.remove(&label);

        match label {
            WindowLabel::Settings => {
                self.settings = None;
                // Unsaved language choices die with the page
                let saved = self.settings_store.load().app_language();
                i18n::set_language(saved.code());
                Task::none()
            }
            WindowLabel::Main => {
                info!("👋 Main window closed");
                self.capture_all_then_exit()
            }
            WindowLabel::Todo | WindowLabel::Markdown => Task::none(),
        }
    }
}
