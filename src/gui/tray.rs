//! System tray icon
//!
//! Show, hide and quit from the tray menu; a left click on the icon toggles
//! the main window. Events are read back by the GUI subscription.

use std::time::Duration;
use tracing::{debug, info, warn};
use tray_icon::menu::{Menu, MenuEvent, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, MouseButton, MouseButtonState, TrayIcon, TrayIconBuilder, TrayIconEvent};

use super::messages::Message;
use crate::i18n::tr;

const ICON_SIZE: u32 = 32;

/// What a tray interaction asks of the main window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayCommand {
    Show,
    Hide,
    Toggle,
    Quit,
}

impl TrayCommand {
    pub fn from_menu_id(id: &str) -> Option<Self> {
        match id {
            "show" => Some(TrayCommand::Show),
            "hide" => Some(TrayCommand::Hide),
            "quit" => Some(TrayCommand::Quit),
            _ => None,
        }
    }

    fn from_icon_event(event: &TrayIconEvent) -> Option<Self> {
        match event {
            TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            } => Some(TrayCommand::Toggle),
            _ => None,
        }
    }
}

/// Create the tray icon. On Linux it lives on its own gtk thread and `None`
/// is returned; elsewhere the caller keeps the icon alive.
#[cfg(target_os = "linux")]
pub fn install() -> Option<TrayIcon> {
    let spawned = std::thread::Builder::new()
        .name("deskpet-tray".into())
        .spawn(|| {
            if let Err(e) = gtk::init() {
                warn!("⚠️ Tray unavailable, gtk failed to start: {}", e);
                return;
            }
            let Some(_tray) = build() else {
                return;
            };
            gtk::main();
        });

    if let Err(e) = spawned {
        warn!("⚠️ Failed to spawn tray thread: {}", e);
    }
    None
}

#[cfg(not(target_os = "linux"))]
pub fn install() -> Option<TrayIcon> {
    build()
}

fn build() -> Option<TrayIcon> {
    let menu = Menu::new();
    let show = MenuItem::with_id("show", tr("tray.show"), true, None);
    let hide = MenuItem::with_id("hide", tr("tray.hide"), true, None);
    let quit = MenuItem::with_id("quit", tr("tray.quit"), true, None);
    if let Err(e) = menu.append_items(&[&show, &hide, &PredefinedMenuItem::separator(), &quit]) {
        warn!("⚠️ Failed to build tray menu: {}", e);
        return None;
    }

    let icon = match Icon::from_rgba(icon_rgba(ICON_SIZE), ICON_SIZE, ICON_SIZE) {
        Ok(icon) => icon,
        Err(e) => {
            warn!("⚠️ Bad tray icon: {}", e);
            return None;
        }
    };

    match TrayIconBuilder::new()
        .with_menu(Box::new(menu))
        .with_menu_on_left_click(false)
        .with_tooltip(tr("app.title"))
        .with_icon(icon)
        .build()
    {
        Ok(tray) => {
            info!("🧺 Tray icon ready");
            Some(tray)
        }
        Err(e) => {
            warn!("⚠️ Failed to create tray icon: {}", e);
            None
        }
    }
}

/// A filled disc on a transparent square, RGBA8
fn icon_rgba(size: u32) -> Vec<u8> {
    let center = (size as f32 - 1.0) / 2.0;
    let radius = size as f32 / 2.0 - 1.0;
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);

    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            let alpha = if dx * dx + dy * dy <= radius * radius { 255 } else { 0 };
            rgba.extend_from_slice(&[0xF4, 0x8F, 0xB1, alpha]);
        }
    }
    rgba
}

/// Poll the tray channels for the lifetime of the app
pub fn events() -> impl futures::Stream<Item = Message> {
    iced::stream::channel(16, |mut output| async move {
        use futures::SinkExt;

        loop {
            let mut commands = Vec::new();
            while let Ok(event) = MenuEvent::receiver().try_recv() {
                debug!("🧺 Tray menu: {}", event.id.0);
                commands.extend(TrayCommand::from_menu_id(&event.id.0));
            }
            while let Ok(event) = TrayIconEvent::receiver().try_recv() {
                commands.extend(TrayCommand::from_icon_event(&event));
            }

            for command in commands {
                if output.send(Message::Tray(command)).await.is_err() {
                    return;
                }
            }

            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    })
}
