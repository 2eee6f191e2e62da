//! # tikzkit
//!
//! Editing core for a 2D figure editor that exports TikZ drawing commands.
//!
//! ## Architecture
//!
//! tikzkit is organized as a workspace with multiple crates:
//!
//! 1. **tikzkit-core** - Points, bounds, geometry primitives, the coordinate
//!    transform and error types
//! 2. **tikzkit-settings** - Export and editor configuration
//! 3. **tikzkit-designer** - Styles, shape kinds, hit testing, handles,
//!    creation, the canvas and TikZ export
//! 4. **tikzkit** - This crate, which re-exports the others and sets up logging

pub use tikzkit_core as core;
pub use tikzkit_designer as designer;
pub use tikzkit_settings as settings;

pub use tikzkit_core::{
    Bounds, CoordinateTransform, Error, Point, Result, ShapeError, StyleError, TransformError,
};
pub use tikzkit_designer::{
    Attr, Canvas, Creation, CreationState, Geometry, Handle, HandleId, Rendering, Shape,
    ShapeKind, Style, StyleValue,
};
pub use tikzkit_settings::{Config, EditorSettings, ExportSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Installs a `fmt` layer filtered by `RUST_LOG`, falling back to `info`.
/// Returns an error if a global subscriber is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    tracing::debug!(version = VERSION, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice_fails() {
        // Another test in this binary may have installed a subscriber first.
        let _ = init_logging();
        assert!(init_logging().is_err());
    }
}
