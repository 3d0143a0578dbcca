//! Per-window geometry persistence
//!
//! Each window's last position, size and modes are kept in
//! `<data_dir>/deskpet/<label>-window-state.json`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::DeskResult;
use crate::host::WindowLabel;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowState {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub maximized: Option<bool>,
    pub fullscreen: Option<bool>,
}

impl WindowState {
    pub fn file_path(dir: &Path, label: WindowLabel) -> PathBuf {
        dir.join(format!("{}-window-state.json", label))
    }

    /// Missing or unparsable files give the empty state
    pub fn load(dir: &Path, label: WindowLabel) -> Self {
        let path = Self::file_path(dir, label);
        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                debug!("Ignoring bad window state {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self, dir: &Path, label: WindowLabel) -> DeskResult<()> {
        std::fs::create_dir_all(dir)?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(Self::file_path(dir, label), content)?;
        Ok(())
    }

    /// Saved size, or the given default per missing dimension
    pub fn size_or(&self, default: (f64, f64)) -> (f64, f64) {
        (
            self.width.unwrap_or(default.0),
            self.height.unwrap_or(default.1),
        )
    }

    /// Position is only restored when both coordinates are known
    pub fn position(&self) -> Option<(i32, i32)> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        }
    }

    pub fn record_move(&mut self, x: f32, y: f32) {
        self.x = Some(x.round() as i32);
        self.y = Some(y.round() as i32);
    }

    pub fn record_resize(&mut self, width: f32, height: f32) {
        self.width = Some(width as f64);
        self.height = Some(height as f64);
    }

    pub fn record_modes(&mut self, maximized: bool, fullscreen: bool) {
        self.maximized = Some(maximized);
        self.fullscreen = Some(fullscreen);
    }
}

pub fn default_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("deskpet")
}
