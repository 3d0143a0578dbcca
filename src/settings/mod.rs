//! Settings page state
//!
//! Owns the active section, the form and the last acknowledgment. Lives for
//! as long as the settings window is open.

pub mod fields;
pub mod form;
pub mod section;
pub mod store;

pub use fields::{AppLanguage, Field, FieldUpdate};
pub use form::SettingsForm;
pub use section::Section;
pub use store::SettingsStore;

use tracing::{debug, info, warn};

use crate::host::{HostRequest, WindowLabel};
use crate::i18n::tr;

/// Message shown after reset or save
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acknowledgement {
    Reset,
    Saved,
    SaveFailed(String),
}

impl Acknowledgement {
    pub fn text(&self) -> String {
        match self {
            Acknowledgement::Reset => tr("ack.reset"),
            Acknowledgement::Saved => tr("ack.saved"),
            Acknowledgement::SaveFailed(reason) => format!("{}: {}", tr("ack.save_failed"), reason),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Acknowledgement::SaveFailed(_))
    }
}

#[derive(Debug, Clone)]
pub struct SettingsPage {
    section: Section,
    form: SettingsForm,
    acknowledgement: Option<Acknowledgement>,
    store: SettingsStore,
}

impl SettingsPage {
    /// Create page state on mount. Asks the host to show the settings window.
    pub fn mount(store: SettingsStore) -> (Self, Vec<HostRequest>) {
        let form = store.load();
        info!("⚙️ Settings page mounted ({} non-default fields)", form.changed_fields().len());

        let page = Self {
            section: Section::default(),
            form,
            acknowledgement: None,
            store,
        };

        (page, vec![HostRequest::ShowWindow(WindowLabel::Settings)])
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn form(&self) -> &SettingsForm {
        &self.form
    }

    pub fn acknowledgement(&self) -> Option<&Acknowledgement> {
        self.acknowledgement.as_ref()
    }

    pub fn select(&mut self, section: Section) {
        debug!("Settings section selected: {}", section.id());
        self.section = section;
    }

    pub fn is_visible(&self, section: Section) -> bool {
        self.section == section
    }

    /// Fields currently rendered: exactly those of the active section
    pub fn visible_fields(&self) -> &'static [Field] {
        self.section.fields()
    }

    pub fn set(&mut self, update: FieldUpdate) {
        debug!("✏️ {:?} changed", update.field());
        self.form.set(update);
    }

    pub fn reset_all(&mut self) -> &Acknowledgement {
        self.form.reset_all();
        info!("↩️ Settings reset to defaults");
        self.acknowledgement.insert(Acknowledgement::Reset)
    }

    pub fn save(&mut self) -> &Acknowledgement {
        let ack = match self.store.save(&self.form) {
            Ok(()) => Acknowledgement::Saved,
            Err(e) => {
                warn!("Failed to save settings: {}", e);
                Acknowledgement::SaveFailed(e.to_string())
            }
        };
        self.acknowledgement.insert(ack)
    }

    pub fn dismiss_acknowledgement(&mut self) {
        self.acknowledgement = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::fields::ModelChoice;

    fn page_in(dir: &tempfile::TempDir) -> SettingsPage {
        let (page, _) = SettingsPage::mount(SettingsStore::new(dir.path().join("settings.json")));
        page
    }

    #[test]
    fn test_mount_requests_own_window() {
        let dir = tempfile::tempdir().unwrap();
        let (page, requests) =
            SettingsPage::mount(SettingsStore::new(dir.path().join("settings.json")));
        assert_eq!(requests, vec![HostRequest::ShowWindow(WindowLabel::Settings)]);
        assert_eq!(page.section(), Section::Model);
        assert!(page.acknowledgement().is_none());
    }

    #[test]
    fn test_exactly_one_section_visible() {
        let dir = tempfile::tempdir().unwrap();
        let mut page = page_in(&dir);

        for selected in Section::ALL {
            page.select(selected);
            let visible: Vec<Section> = Section::ALL
                .into_iter()
                .filter(|s| page.is_visible(*s))
                .collect();
            assert_eq!(visible, vec![selected]);

            for field in page.visible_fields() {
                assert_eq!(field.section(), selected);
            }
            let hidden = Field::ALL
                .iter()
                .filter(|f| f.section() != selected)
                .any(|f| page.visible_fields().contains(f));
            assert!(!hidden, "fields of other sections must not render");
        }
    }

    #[test]
    fn test_reset_acknowledges() {
        let dir = tempfile::tempdir().unwrap();
        let mut page = page_in(&dir);
        page.set(FieldUpdate::Model(ModelChoice::Model2));

        assert_eq!(page.reset_all(), &Acknowledgement::Reset);
        assert_eq!(page.form().model(), ModelChoice::Model1);
        assert_eq!(page.acknowledgement(), Some(&Acknowledgement::Reset));
    }

    #[test]
    fn test_save_persists_and_next_mount_reads_it() {
        let dir = tempfile::tempdir().unwrap();
        let mut page = page_in(&dir);
        page.set(FieldUpdate::ModelScale(1.2));
        assert_eq!(page.save(), &Acknowledgement::Saved);

        let reopened = page_in(&dir);
        assert_eq!(reopened.form().model_scale(), 1.2);
    }

    #[test]
    fn test_save_failure_still_acknowledged() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the parent directory should be makes the write fail
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let path = blocker.join("settings.json");

        let (mut page, _) = SettingsPage::mount(SettingsStore::new(&path));
        let ack = page.save().clone();
        assert!(ack.is_error());
        assert_eq!(page.form(), &SettingsForm::default());
    }
}
