//! Settings persistence
//!
//! Loads and saves the [`EngineConfig`] as JSON. Missing fields take their
//! defaults, so a settings file only needs the keys it wants to change:
//!
//! ```json
//! { "depth": 6, "book_path": "books/Perfect2023.bin" }
//! ```
//!
//! Load failures fall back to default settings and are logged; save failures
//! are returned to the caller.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use minimax_engine::EngineConfig;
use tracing::{info, warn};

use super::error::CoreResult;

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// Resolve the default settings file path
///
/// `settings.json` in the user's configuration directory, e.g.
/// `~/.config/minimax-chess/settings.json`. Falls back to a local
/// `settings.json` if the system config dir cannot be found.
pub fn settings_path() -> PathBuf {
    match ProjectDirs::from("com", "trilltino", "minimax-chess") {
        Some(proj_dirs) => proj_dirs.config_dir().join(SETTINGS_FILENAME),
        None => PathBuf::from(SETTINGS_FILENAME),
    }
}

/// Load settings from `path`, or defaults if the file is missing or invalid
pub fn load_settings(path: &Path) -> EngineConfig {
    if !path.exists() {
        info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
        return EngineConfig::default();
    }

    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str::<EngineConfig>(&contents) {
            Ok(config) => {
                info!("[SETTINGS] Loaded settings from {:?}", path);
                config
            }
            Err(e) => {
                warn!(
                    "[SETTINGS] Failed to parse settings file at {:?}: {}. Using defaults.",
                    path, e
                );
                EngineConfig::default()
            }
        },
        Err(e) => {
            warn!(
                "[SETTINGS] Failed to read settings file at {:?}: {}. Using defaults.",
                path, e
            );
            EngineConfig::default()
        }
    }
}

/// Write `config` to `path` as pretty JSON, creating parent directories
pub fn save_settings(path: &Path, config: &EngineConfig) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    info!("[SETTINGS] Saved settings to {:?}", path);
    Ok(())
}
