//! Game configuration
//!
//! Loaded from a JSON file, every field has a default so a partial file (or
//! no file at all) is fine.
//!
//! ```json
//! {
//!     "title": "My Game",
//!     "display_size": [1280, 720],
//!     "fps": 60,
//!     "entry_page": "menu",
//!     "assets_directory": "assets"
//! }
//! ```

use crate::controller::DEFAULT_PAGE;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub title: String,
    pub display_size: (u32, u32),
    /// Frame rate cap, 0 disables the cap
    pub fps: u32,
    /// Registered page shown first, `"welcome"` selects the built-in page
    pub entry_page: String,
    pub assets_directory: Option<PathBuf>,
    pub background_color: (u8, u8, u8),
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            title: "framekit".to_string(),
            display_size: (1280, 720),
            fps: 60,
            entry_page: DEFAULT_PAGE.to_string(),
            assets_directory: None,
            background_color: (0, 0, 0),
        }
    }
}

impl GameConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// `<config dir>/framekit/config.json`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("framekit").join("config.json"))
    }

    /// Load `path` (or the default path) and fall back to defaults when the
    /// file is absent. A file that exists but fails to parse is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => {
                    warn!(target: "config", "no_config_dir_using_defaults");
                    return Ok(Self::default());
                }
            },
        };

        if !path.exists() {
            info!(target: "config", path = %path.display(), "config_missing_using_defaults");
            return Ok(Self::default());
        }

        let config = Self::load_from_file(&path)?;
        info!(target: "config", path = %path.display(), entry_page = %config.entry_page, "config_loaded");
        Ok(config)
    }
}
