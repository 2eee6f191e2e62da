//! Configuration for tikzkit
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Export settings (figure scale, surface size, picture wrapping)
//! - Editor preferences (hit tolerance, handle size, grid snapping)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tikzkit_core::constants::{HANDLE_RADIUS, HIT_TOLERANCE, PIXELS_PER_UNIT};
use tikzkit_core::{CoordinateTransform, TransformError};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Multiplier applied on top of the fixed pixels-per-unit constant
    pub figure_scale: f64,
    /// Drawing surface width in pixels
    pub surface_width: f64,
    /// Drawing surface height in pixels, the pivot of the Y flip
    pub surface_height: f64,
    /// Wrap exported commands in a tikzpicture environment
    pub wrap_picture: bool,
    /// Prepend the package and library lines the exported kinds need
    pub emit_preamble: bool,
    /// Spaces used to indent commands inside the picture
    pub indent: usize,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            figure_scale: 1.0,
            surface_width: 800.0,
            surface_height: 600.0,
            wrap_picture: true,
            emit_preamble: false,
            indent: 2,
        }
    }
}

impl ExportSettings {
    /// Effective pixels per output unit.
    pub fn pixels_per_unit(&self) -> f64 {
        PIXELS_PER_UNIT / self.figure_scale
    }

    /// Builds the coordinate transform these settings describe.
    pub fn transform(&self) -> Result<CoordinateTransform, TransformError> {
        CoordinateTransform::from_figure_scale(self.figure_scale, self.surface_height)
    }
}

/// Editor preference settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Base hit tolerance in pixels, added to a shape's line width
    pub hit_tolerance: f64,
    /// Grab radius of resize handles in pixels
    pub handle_radius: f64,
    /// Snap created shapes to the output grid
    pub grid_snap: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            hit_tolerance: HIT_TOLERANCE,
            handle_radius: HANDLE_RADIUS,
            grid_snap: false,
        }
    }
}

/// Complete configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Export settings
    pub export: ExportSettings,
    /// Editor preferences
    pub editor: EditorSettings,
}

impl Config {
    /// Default config location: `<config dir>/tikzkit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string())
        })?;
        Ok(dir.join("tikzkit").join("config.toml"))
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> SettingsResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(content: &str) -> SettingsResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> SettingsResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config = match Format::of(path)? {
            Format::Json => Self::from_json_str(&content)?,
            Format::Toml => Self::from_toml_str(&content)?,
        };
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => self.to_toml_string()?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let export = &self.export;
        if !(export.figure_scale.is_finite() && export.figure_scale > 0.0) {
            return Err(invalid("export.figure_scale", "must be > 0"));
        }
        if !(export.surface_width.is_finite() && export.surface_width > 0.0) {
            return Err(invalid("export.surface_width", "must be > 0"));
        }
        if !(export.surface_height.is_finite() && export.surface_height > 0.0) {
            return Err(invalid("export.surface_height", "must be > 0"));
        }

        let editor = &self.editor;
        if !(editor.hit_tolerance.is_finite() && editor.hit_tolerance >= 0.0) {
            return Err(ConfigError::ValueOutOfRange {
                key: "editor.hit_tolerance".to_string(),
                value: editor.hit_tolerance.to_string(),
            }
            .into());
        }
        if !(editor.handle_radius.is_finite() && editor.handle_radius >= 0.0) {
            return Err(ConfigError::ValueOutOfRange {
                key: "editor.handle_radius".to_string(),
                value: editor.handle_radius.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> SettingsError {
    tracing::warn!(key, reason, "rejected config value");
    SettingsError::InvalidSetting {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
        }
    }
}
