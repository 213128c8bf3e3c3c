//! Editor configuration.

use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default nominal cell edge length in pixels.
pub const DEFAULT_CELL_SIZE: f64 = 100.0;
/// Default zoom step in pixels per wheel notch.
pub const DEFAULT_SCROLL_PITCH: f64 = 20.0;
/// Default smallest on-screen cell edge.
pub const DEFAULT_MIN_ZOOM: f64 = 20.0;
/// Default largest on-screen cell edge.
pub const DEFAULT_MAX_ZOOM: f64 = 350.0;
/// Default storage key of the map schema.
pub const DEFAULT_MAP_KEY: &str = "storedMap";
/// Default storage key of the sheet schema.
pub const DEFAULT_SHEET_KEY: &str = "storedSheet";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Zoom step and bounds, all in on-screen pixels per cell edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomSettings {
    pub pitch: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            pitch: DEFAULT_SCROLL_PITCH,
            min: DEFAULT_MIN_ZOOM,
            max: DEFAULT_MAX_ZOOM,
        }
    }
}

/// World dimensions of a map, from which its grid size is derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    pub cell_size: f64,
    pub world_width: f64,
    pub world_height: f64,
}

/// Sprite sheet dimensions, from which the palette grid size is derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetSettings {
    /// Edge of one sprite in the sheet image.
    pub texture_size: f64,
    /// On-screen edge of one palette cell.
    pub sprite_size: f64,
    pub image_width: f64,
    pub image_height: f64,
}

/// Configuration of one editor grid and its viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Nominal cell edge length; zoom resets to this.
    pub cell_size: f64,
    pub columns: u32,
    pub rows: u32,
    /// Canvas size in pixels.
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub zoom: ZoomSettings,
    /// Key the schema is persisted under.
    pub storage_key: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            columns: 6,
            rows: 4,
            canvas_width: 1280.0,
            canvas_height: 800.0,
            zoom: ZoomSettings::default(),
            storage_key: DEFAULT_MAP_KEY.to_string(),
        }
    }
}

impl EditorConfig {
    /// Configuration for a map whose grid covers the given world.
    pub fn for_map(settings: MapSettings, canvas: Size) -> Self {
        Self {
            cell_size: settings.cell_size,
            columns: (settings.world_width / settings.cell_size).floor() as u32,
            rows: (settings.world_height / settings.cell_size).floor() as u32,
            canvas_width: canvas.width,
            canvas_height: canvas.height,
            ..Self::default()
        }
    }

    /// Configuration for a palette grid with one cell per sprite.
    pub fn for_sheet(settings: SheetSettings, canvas: Size) -> Self {
        Self {
            cell_size: settings.sprite_size,
            columns: (settings.image_width / settings.texture_size).floor() as u32,
            rows: (settings.image_height / settings.texture_size).floor() as u32,
            canvas_width: canvas.width,
            canvas_height: canvas.height,
            storage_key: DEFAULT_SHEET_KEY.to_string(),
            ..Self::default()
        }
    }

    pub fn canvas_size(&self) -> Size {
        Size::new(self.canvas_width, self.canvas_height)
    }

    /// Number of cells in the grid.
    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Check the configuration for values the viewport cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cell_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "cell_size must be positive, got {}",
                self.cell_size
            )));
        }
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must have at least one cell, got {}x{}",
                self.columns, self.rows
            )));
        }
        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            return Err(ConfigError::Invalid("canvas size must be positive".to_string()));
        }
        let zoom = &self.zoom;
        if !(zoom.pitch > 0.0 && zoom.min > 0.0 && zoom.min <= zoom.max) {
            return Err(ConfigError::Invalid(format!(
                "zoom needs 0 < min <= max and a positive pitch, got {:?}",
                zoom
            )));
        }
        if self.storage_key.is_empty() {
            return Err(ConfigError::Invalid("storage_key must not be empty".to_string()));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Write this configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
