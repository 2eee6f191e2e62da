//! Visual calibration constants.
//!
//! These are tuning values for on-screen editing; they carry no meaning
//! beyond how the editor looks and feels.

/// Pixels per TikZ unit (1cm) at figure scale 1.
pub const PIXELS_PER_UNIT: f64 = 40.0;

/// Base pixel distance within which a pointer hits a stroked outline.
/// The shape's line width is added on top.
pub const HIT_TOLERANCE: f64 = 5.0;

/// Radius around a handle centre that counts as grabbing the handle.
pub const HANDLE_RADIUS: f64 = 6.0;

/// Side length of the square drawn for a handle marker.
pub const HANDLE_SIZE: f64 = 8.0;

/// Decimal digits kept in exported coordinates.
pub const OUTPUT_DECIMALS: i32 = 2;

/// Polyline samples used to approximate a cubic Bézier for hit testing.
pub const CURVE_SAMPLES: usize = 32;

/// Polyline samples used to approximate a full circle turn.
pub const ARC_SAMPLES: usize = 64;
