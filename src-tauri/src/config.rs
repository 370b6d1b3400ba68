use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tauri::{AppHandle, Manager, Runtime};

pub const CONFIG_FILE: &str = "config.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window_width: f64,
    pub window_height: f64,
    /// Opened by Help → Visit Website.
    pub help_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: 1000.0,
            window_height: 720.0,
            help_url: "https://commonmark.org/help/".to_string(),
        }
    }
}

impl AppConfig {
    /// Reads `<app config dir>/config.json`, falling back to defaults.
    pub fn load<R: Runtime>(app: &AppHandle<R>) -> Self {
        match app.path().app_config_dir() {
            Ok(dir) => Self::load_from(&dir.join(CONFIG_FILE)),
            Err(e) => {
                log::warn!("No app config directory, using defaults: {}", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match serde_json::from_str::<Self>(&raw) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring malformed {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
