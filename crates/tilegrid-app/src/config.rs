//! Application configuration: the map, the sprite sheet and where to store.

use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tilegrid_core::config::SheetSettings;
use tilegrid_core::{ConfigError, EditorConfig};

/// Configuration of a map editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub map: EditorConfig,
    pub sheet: SheetSettings,
    /// Canvas size of the sprite palette.
    pub sheet_canvas: Size,
    /// Directory of the file store; the platform data dir when unset.
    pub store_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            map: EditorConfig::default(),
            sheet: SheetSettings {
                texture_size: 32.0,
                sprite_size: 48.0,
                image_width: 256.0,
                image_height: 256.0,
            },
            sheet_canvas: Size::new(400.0, 800.0),
            store_dir: None,
        }
    }
}

impl AppConfig {
    /// Editor configuration of the sprite palette.
    pub fn sheet_editor(&self) -> EditorConfig {
        EditorConfig::for_sheet(self.sheet, self.sheet_canvas)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.map.validate()?;
        if !(self.sheet.texture_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "sheet texture_size must be positive, got {}",
                self.sheet.texture_size
            )));
        }
        self.sheet_editor().validate()
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }
}
