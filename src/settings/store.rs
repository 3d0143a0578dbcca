//! Settings persistence
//!
//! The form is stored as pretty JSON in the user config directory.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::form::SettingsForm;
use crate::error::{DeskError, DeskResult};

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(settings_path())
    }
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved form, falling back to defaults when missing or corrupt
    pub fn load(&self) -> SettingsForm {
        if !self.path.exists() {
            debug!("No saved settings at {:?}, using defaults", self.path);
            return SettingsForm::default();
        }

        match self.read() {
            Ok(form) => form,
            Err(e) => {
                warn!("⚠️ Settings file unreadable, using defaults: {}", e);
                let backup_path = self.path.with_extension("json.corrupt");
                let _ = std::fs::rename(&self.path, &backup_path);
                SettingsForm::default()
            }
        }
    }

    fn read(&self) -> DeskResult<SettingsForm> {
        let content = std::fs::read_to_string(&self.path)?;
        let form: SettingsForm = serde_json::from_str(&content)?;
        Ok(form.normalized())
    }

    pub fn save(&self, form: &SettingsForm) -> DeskResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DeskError::Settings(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        let content = serde_json::to_string_pretty(form)?;
        std::fs::write(&self.path, content)?;
        info!("💾 Settings saved to {:?}", self.path);
        Ok(())
    }
}

pub fn settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("deskpet")
        .join("settings.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::fields::{FieldUpdate, StageLighting};

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        assert_eq!(store.load(), SettingsForm::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("nested/settings.json"));

        let mut form = SettingsForm::default();
        form.set(FieldUpdate::StageLighting(StageLighting::Dim));
        form.set(FieldUpdate::IdleDuration(45));
        store.save(&form).expect("save should succeed");

        let loaded = store.load();
        assert_eq!(loaded, form);

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"stage_lighting\": \"dim\""));
    }

    #[test]
    fn test_corrupt_file_is_moved_aside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = SettingsStore::new(&path);
        assert_eq!(store.load(), SettingsForm::default());
        assert!(!path.exists());
        assert!(dir.path().join("settings.json.corrupt").exists());
    }
}
