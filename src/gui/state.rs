//! State types for the Deskpet GUI
//!
//! Page state that is not tied to a widget: the home page's context menu.

use iced::Point;

use crate::host::{HostRequest, WindowLabel};

/// Overlay menu on the home page
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ContextMenu {
    #[default]
    Hidden,
    Visible { at: Point },
}

impl ContextMenu {
    pub fn is_visible(&self) -> bool {
        matches!(self, ContextMenu::Visible { .. })
    }

    pub fn position(&self) -> Option<Point> {
        match self {
            ContextMenu::Visible { at } => Some(*at),
            ContextMenu::Hidden => None,
        }
    }
}

/// Home page state
#[derive(Debug, Clone)]
pub struct HomePage {
    menu: ContextMenu,
    /// Last pointer position inside the page body
    cursor: Point,
}

impl Default for HomePage {
    fn default() -> Self {
        Self {
            menu: ContextMenu::Hidden,
            cursor: Point::ORIGIN,
        }
    }
}

impl HomePage {
    /// The home page renders static content and asks nothing of the host
    pub fn on_mount(&self) -> Vec<HostRequest> {
        Vec::new()
    }

    pub fn menu(&self) -> ContextMenu {
        self.menu
    }

    pub fn cursor_moved(&mut self, position: Point) {
        self.cursor = position;
    }

    /// Right-click anywhere: show the menu at the pointer
    pub fn right_clicked(&mut self) {
        self.menu = ContextMenu::Visible { at: self.cursor };
    }

    /// Primary click anywhere: hide the menu
    pub fn clicked(&mut self) {
        self.menu = ContextMenu::Hidden;
    }

    /// The menu's settings item. The request is produced before the menu hides.
    pub fn open_settings(&mut self) -> HostRequest {
        let request = HostRequest::RevealAndFocus(WindowLabel::Settings);
        self.clicked();
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_hidden() {
        let home = HomePage::default();
        assert_eq!(home.menu(), ContextMenu::Hidden);
        assert!(home.on_mount().is_empty());
    }

    #[test]
    fn test_right_click_shows_at_pointer() {
        let mut home = HomePage::default();
        home.cursor_moved(Point::new(140.0, 62.5));
        home.right_clicked();

        assert!(home.menu().is_visible());
        assert_eq!(home.menu().position(), Some(Point::new(140.0, 62.5)));
    }

    #[test]
    fn test_second_right_click_moves_menu() {
        let mut home = HomePage::default();
        home.cursor_moved(Point::new(10.0, 10.0));
        home.right_clicked();
        home.cursor_moved(Point::new(300.0, 20.0));
        home.right_clicked();

        assert_eq!(home.menu().position(), Some(Point::new(300.0, 20.0)));
    }

    #[test]
    fn test_any_click_hides() {
        let mut home = HomePage::default();
        home.right_clicked();
        home.clicked();
        assert_eq!(home.menu(), ContextMenu::Hidden);

        // Clicking while already hidden stays hidden
        home.clicked();
        assert_eq!(home.menu(), ContextMenu::Hidden);
    }

    #[test]
    fn test_settings_item_fires_then_hides() {
        let mut home = HomePage::default();
        home.cursor_moved(Point::new(5.0, 5.0));
        home.right_clicked();

        let request = home.open_settings();
        assert_eq!(request, HostRequest::RevealAndFocus(WindowLabel::Settings));
        assert_eq!(home.menu(), ContextMenu::Hidden);
    }

    #[test]
    fn test_settings_item_independent_of_menu_state() {
        let mut home = HomePage::default();
        assert_eq!(
            home.open_settings(),
            HostRequest::RevealAndFocus(WindowLabel::Settings)
        );
        assert!(!home.menu().is_visible());
    }
}
