//! User-tunable settings, stored as RON.

use crate::curve::CurveKind;
use crate::gesture::GestureMode;
use crate::scene::SceneStyle;
use crate::transform::{
    DEFAULT_UNIT, DEFAULT_ZOOM_MAX, DEFAULT_ZOOM_MIN, MIN_GRID_SPACING, ViewTransform,
    ZoomLimits,
};
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the settings file, both embedded and in the user config dir.
pub const CONFIG_FILE_NAME: &str = "graph.ron";

/// Bundled assets. Read from disk in debug builds, compressed into the
/// binary in release builds.
#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Assets;

/// Errors that can occur when loading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("graph.ron not found in embedded assets")]
    NotFound,
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid UTF-8 in graph.ron: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::de::SpannedError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// All settings. Missing fields take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Pixels per world unit at zoom 1.0.
    pub unit: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    /// Zoom multiplier per scroll notch or key press.
    pub zoom_speed: f32,
    pub tick_length: f32,
    pub label_font_size: f32,
    pub x_label_offset: f32,
    pub y_label_offset: f32,
    pub curve: CurveKind,
    pub gesture_mode: GestureMode,
}

impl Default for GraphConfig {
    fn default() -> Self {
        let style = SceneStyle::default();
        Self {
            unit: DEFAULT_UNIT,
            zoom_min: DEFAULT_ZOOM_MIN,
            zoom_max: DEFAULT_ZOOM_MAX,
            zoom_speed: 1.2,
            tick_length: style.tick_length,
            label_font_size: style.label_font_size,
            x_label_offset: style.x_label_offset,
            y_label_offset: style.y_label_offset,
            curve: CurveKind::default(),
            gesture_mode: GestureMode::default(),
        }
    }
}

impl GraphConfig {
    /// Parses and validates RON text.
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the settings compiled into the binary.
    pub fn embedded() -> Result<Self, ConfigError> {
        let file = Assets::get(CONFIG_FILE_NAME).ok_or(ConfigError::NotFound)?;
        Self::from_ron(std::str::from_utf8(&file.data)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.unit.is_finite() && self.unit > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "unit must be positive, got {}",
                self.unit
            )));
        }
        if ZoomLimits::new(self.zoom_min, self.zoom_max).is_none() {
            return Err(ConfigError::Invalid(format!(
                "zoom range must satisfy 0 < zoom_min <= zoom_max, got {}..{}",
                self.zoom_min, self.zoom_max
            )));
        }
        if self.unit * self.zoom_min < MIN_GRID_SPACING {
            return Err(ConfigError::Invalid(format!(
                "unit * zoom_min must be at least {MIN_GRID_SPACING}px, got {}",
                self.unit * self.zoom_min
            )));
        }
        if !(self.zoom_speed.is_finite() && self.zoom_speed > 1.0) {
            return Err(ConfigError::Invalid(format!(
                "zoom_speed must be greater than 1, got {}",
                self.zoom_speed
            )));
        }
        let lengths = [
            ("tick_length", self.tick_length),
            ("label_font_size", self.label_font_size),
            ("x_label_offset", self.x_label_offset),
            ("y_label_offset", self.y_label_offset),
        ];
        if let Some((name, value)) = lengths
            .iter()
            .find(|(_, value)| !(value.is_finite() && *value >= 0.0))
        {
            return Err(ConfigError::Invalid(format!(
                "{name} must be a non-negative number, got {value}"
            )));
        }
        Ok(())
    }

    pub fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits::new(self.zoom_min, self.zoom_max).unwrap_or_default()
    }

    /// A fresh view at zoom 1.0 under these settings.
    pub fn view_transform(&self) -> ViewTransform {
        ViewTransform::new(self.unit, self.zoom_limits())
    }

    /// Scene style with these settings applied over the default colors.
    pub fn scene_style(&self) -> SceneStyle {
        SceneStyle {
            tick_length: self.tick_length,
            label_font_size: self.label_font_size,
            x_label_offset: self.x_label_offset,
            y_label_offset: self.y_label_offset,
            ..SceneStyle::default()
        }
    }
}

/// `<config dir>/graph-canvas/graph.ron`, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join("graph-canvas").join(CONFIG_FILE_NAME))
}
