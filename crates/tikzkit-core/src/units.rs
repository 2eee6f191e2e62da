//! Pixel to TikZ coordinate conversion
//!
//! Pixel coordinates are in surface space (0,0 at top-left, +Y down).
//! TikZ coordinates are in figure units (0,0 at bottom-left, +Y up).
//!
//! ```text
//! out_x = round2(pixel_x / scale)
//! out_y = round2((surface_height - pixel_y) / scale)   // Flip Y-axis
//! ```
//!
//! Rounding keeps a fixed number of decimals, so exporting is lossy: the
//! textual form does not reproduce pixel coordinates exactly.

use serde::{Deserialize, Serialize};

use crate::constants::{OUTPUT_DECIMALS, PIXELS_PER_UNIT};
use crate::error::TransformError;
use crate::geometry::Point;

/// Rounds to the fixed output precision.
///
/// Halves round away from zero; the value is not truncated, so `1.239`
/// becomes `1.24` and `-0.125` becomes `-0.13`.
pub fn round2(value: f64) -> f64 {
    let factor = 10f64.powi(OUTPUT_DECIMALS);
    (value * factor).round() / factor
}

/// Formats a number the way it appears in exported TikZ: rounded, without
/// trailing zeros and never as `-0`.
pub fn format_number(value: f64) -> String {
    let r = round2(value);
    if r == 0.0 || !r.is_finite() {
        "0".to_string()
    } else {
        format!("{}", r)
    }
}

/// Converts pixel-space values into TikZ output space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateTransform {
    scale: f64,
    surface_height: f64,
}

impl CoordinateTransform {
    /// Creates a transform from a pixels-per-unit scale and the surface height in pixels.
    pub fn new(scale: f64, surface_height: f64) -> Result<Self, TransformError> {
        if !(scale.is_finite() && scale > 0.0) {
            tracing::warn!(scale, "Rejecting transform scale");
            return Err(TransformError::NonPositiveScale { scale });
        }
        if !surface_height.is_finite() {
            tracing::warn!(surface_height, "Rejecting transform surface height");
            return Err(TransformError::NonFiniteHeight {
                height: surface_height,
            });
        }
        Ok(Self {
            scale,
            surface_height,
        })
    }

    /// Creates a transform from a user figure scale applied on top of
    /// [`PIXELS_PER_UNIT`]. A figure scale of 2 doubles the exported size.
    pub fn from_figure_scale(
        figure_scale: f64,
        surface_height: f64,
    ) -> Result<Self, TransformError> {
        if !(figure_scale.is_finite() && figure_scale > 0.0) {
            return Err(TransformError::NonPositiveScale {
                scale: figure_scale,
            });
        }
        Self::new(PIXELS_PER_UNIT / figure_scale, surface_height)
    }

    /// Pixels per output unit.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn surface_height(&self) -> f64 {
        self.surface_height
    }

    /// Unrounded horizontal conversion.
    pub fn raw_x(&self, pixel_x: f64) -> f64 {
        pixel_x / self.scale
    }

    /// Unrounded vertical conversion with the Y flip.
    pub fn raw_y(&self, pixel_y: f64) -> f64 {
        (self.surface_height - pixel_y) / self.scale
    }

    pub fn x(&self, pixel_x: f64) -> f64 {
        round2(self.raw_x(pixel_x))
    }

    pub fn y(&self, pixel_y: f64) -> f64 {
        round2(self.raw_y(pixel_y))
    }

    /// Converts a pixel length (radius, width) without any flip.
    pub fn length(&self, pixels: f64) -> f64 {
        round2(pixels / self.scale)
    }

    pub fn point(&self, p: Point) -> (f64, f64) {
        (self.x(p.x), self.y(p.y))
    }

    /// TikZ coordinate literal `(x,y)`.
    pub fn coord(&self, p: Point) -> String {
        format!(
            "({},{})",
            format_number(self.raw_x(p.x)),
            format_number(self.raw_y(p.y))
        )
    }

    /// Inverse of [`coord`](Self::coord) before rounding; used to snap in pixel space.
    pub fn to_pixel(&self, out_x: f64, out_y: f64) -> Point {
        Point::new(out_x * self.scale, self.surface_height - out_y * self.scale)
    }
}

impl Default for CoordinateTransform {
    fn default() -> Self {
        Self {
            scale: PIXELS_PER_UNIT,
            surface_height: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.235_1), 1.24);
        assert_eq!(round2(-0.004), 0.0);
    }

    #[test]
    fn test_round2_rounds_rather_than_truncates() {
        assert_eq!(round2(1.239), 1.24);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(format_number(2.999), "3");
    }

    #[test]
    fn test_format_number_trims() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-0.001), "0");
        assert_eq!(format_number(0.1 + 0.2), "0.3");
    }

    #[test]
    fn test_y_flip() {
        let t = CoordinateTransform::new(40.0, 400.0).unwrap();
        assert_eq!(t.point(Point::new(0.0, 400.0)), (0.0, 0.0));
        assert_eq!(t.point(Point::new(80.0, 0.0)), (2.0, 10.0));
        assert_eq!(t.coord(Point::new(20.0, 380.0)), "(0.5,0.5)");
    }

    #[test]
    fn test_figure_scale_enlarges_output() {
        let t = CoordinateTransform::from_figure_scale(2.0, 0.0).unwrap();
        assert_eq!(t.scale(), 20.0);
        assert_eq!(t.x(40.0), 2.0);
    }

    #[test]
    fn test_rejects_bad_scale() {
        assert!(CoordinateTransform::new(0.0, 10.0).is_err());
        assert!(CoordinateTransform::new(-1.0, 10.0).is_err());
        assert!(CoordinateTransform::new(f64::NAN, 10.0).is_err());
        assert!(CoordinateTransform::new(40.0, f64::INFINITY).is_err());
    }
}
