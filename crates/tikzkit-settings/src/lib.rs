//! tikzkit Settings Crate
//!
//! Handles export and editor configuration and its persistence.

pub mod config;
pub mod error;

pub use config::{Config, EditorSettings, ExportSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
