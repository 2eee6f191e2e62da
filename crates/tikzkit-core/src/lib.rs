//! # tikzkit Core
//!
//! Core types shared by every tikzkit crate:
//! - Pixel-space points and axis-aligned bounds
//! - Pure geometry primitives used by hit testing and bounding boxes
//! - The pixel-to-TikZ coordinate transform
//! - Named visual calibration constants
//! - Error types

pub mod constants;
pub mod error;
pub mod geometry;
pub mod units;

pub use error::{Error, Result, ShapeError, StyleError, TransformError};
pub use geometry::{
    bounds_of_points, cubic_point, distance_to_polyline, distance_to_segment, normalize_angle,
    point_in_ellipse, point_in_polygon, point_in_triangle, rotate_visual, sample_cubic, Bounds,
    Point,
};
pub use units::{format_number, round2, CoordinateTransform};
