//! Startup configuration
//!
//! Decides which secondary windows open at launch. The file is looked up in
//! several places so that both installed builds and `cargo run` from the
//! project tree find it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_visible")]
    pub todo_visible: bool,
    #[serde(default = "default_visible")]
    pub markdown_visible: bool,
}

fn default_visible() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            todo_visible: true,
            markdown_visible: true,
        }
    }
}

impl AppConfig {
    /// Load from the first candidate path that parses, or defaults
    pub fn load() -> Self {
        Self::load_first(&candidate_paths())
    }

    pub fn load_first(paths: &[PathBuf]) -> Self {
        for path in paths {
            debug!("Trying config file: {:?}", path);

            let content = match std::fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    debug!("Cannot read {}: {}", path.display(), e);
                    continue;
                }
            };

            match serde_json::from_str(&content) {
                Ok(config) => {
                    info!("📄 Loaded config from {:?}", path);
                    return config;
                }
                Err(e) => {
                    warn!("⚠️ Config file {:?} is invalid: {}", path, e);
                }
            }
        }

        info!("No config file found, using defaults");
        Self::default()
    }

    /// Load an explicitly named file. Unlike [`AppConfig::load`], failures are errors.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Where `config.json` may live, in lookup order
pub fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![config_path()];

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            paths.push(exe_dir.join("config.json"));
        }
    }

    if let Ok(current_dir) = std::env::current_dir() {
        paths.push(current_dir.join("config.json"));

        // Running from target/debug: look in the project root
        if current_dir.ends_with("target/debug") || current_dir.ends_with("target\\debug") {
            if let Some(root) = current_dir.parent().and_then(Path::parent) {
                paths.push(root.join("config.json"));
            }
        }
    }

    paths.push(PathBuf::from("config.json"));
    paths.push(PathBuf::from("../config.json"));
    paths.push(PathBuf::from("../../config.json"));

    paths
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("deskpet")
        .join("config.json")
}
