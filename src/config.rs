use std::fs;
use std::path::{Path, PathBuf};

use egui::{Color32, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::surface::MAX_SURFACE_DIMENSION;
use crate::tools::{ToolState, DEFAULT_ERASER_WIDTH, DEFAULT_PENCIL_WIDTH};

/// Environment variable naming a JSON config file for the native app
pub const CONFIG_ENV_VAR: &str = "SKETCHPAD_CONFIG";

/// Settings for the sketchpad engine and its host shell.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Surface width as a fraction of the viewport width
    pub width_factor: f32,
    /// Surface height as a fraction of the viewport height
    pub height_factor: f32,
    /// Colour the eraser paints with; also what the canvas is displayed over
    pub background: Color32,
    pub pencil_color: Color32,
    pub pencil_width: u32,
    pub eraser_width: u32,
    /// JPEG quality, 1-100
    pub jpeg_quality: u8,
    /// File name without extension used for exports
    pub export_file_stem: String,
    /// Directory the native app writes exported images into
    pub export_dir: PathBuf,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            width_factor: 0.9,
            height_factor: 0.6,
            background: Color32::WHITE,
            pencil_color: Color32::BLACK,
            pencil_width: DEFAULT_PENCIL_WIDTH,
            eraser_width: DEFAULT_ERASER_WIDTH,
            jpeg_quality: 92,
            export_file_stem: "drawing".to_owned(),
            export_dir: PathBuf::from("."),
        }
    }
}

impl SketchConfig {
    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, factor) in [("width_factor", self.width_factor), ("height_factor", self.height_factor)] {
            if !(factor > 0.0 && factor <= 1.0) {
                return Err(ConfigError::Invalid(format!("{name} must be in (0, 1], got {factor}")));
            }
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::Invalid(format!(
                "jpeg_quality must be in 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        if self.export_file_stem.trim().is_empty() {
            return Err(ConfigError::Invalid("export_file_stem is empty".to_owned()));
        }
        Ok(())
    }

    /// Surface dimensions for a viewport of the given size, each in
    /// `1..=MAX_SURFACE_DIMENSION`
    pub fn surface_size(&self, viewport: Vec2) -> (u32, u32) {
        let scale = |extent: f32, factor: f32| {
            (extent * factor)
                .floor()
                .max(1.0)
                .min(MAX_SURFACE_DIMENSION as f32) as u32
        };
        (
            scale(viewport.x, self.width_factor),
            scale(viewport.y, self.height_factor),
        )
    }

    /// Initial tool settings
    pub fn tool_state(&self) -> ToolState {
        ToolState::new(self.pencil_color, self.pencil_width, self.eraser_width)
    }
}
