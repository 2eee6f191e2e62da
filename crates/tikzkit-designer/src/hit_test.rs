//! Hit testing.
//!
//! The engine rejects points outside the bounding box grown by the
//! tolerance, accepts points on any handle, then defers to the kind's own
//! test. The tolerance is the base value plus the shape's line width.

use tikzkit_core::constants::{HANDLE_RADIUS, HIT_TOLERANCE};
use tikzkit_core::{distance_to_polyline, point_in_polygon, Point};

use crate::handles::handle_at;
use crate::model::Shape;

/// Effective tolerance for a shape.
pub fn tolerance(shape: &Shape, base: f64) -> f64 {
    base + shape.line_width()
}

/// Hit test with the default tolerance and grab radius.
pub fn hit_test(shape: &Shape, p: Point) -> bool {
    hit_test_with(shape, p, HIT_TOLERANCE, HANDLE_RADIUS)
}

/// Hit test with explicit base tolerance and handle grab radius.
pub fn hit_test_with(shape: &Shape, p: Point, base_tolerance: f64, handle_radius: f64) -> bool {
    let caps = shape.capabilities();
    let tol = tolerance(shape, base_tolerance);
    if !(caps.bounding_box)(shape).expanded(tol).contains(p) {
        tracing::trace!(id = shape.id, kind = caps.tag, "Hit rejected by bounds");
        return false;
    }
    if handle_at(shape, p, handle_radius.max(tol)).is_some() {
        tracing::trace!(id = shape.id, kind = caps.tag, "Hit on handle");
        return true;
    }
    let hit = (caps.hit_test)(shape, p, tol);
    tracing::trace!(id = shape.id, kind = caps.tag, hit, "Hit test");
    hit
}

/// Closed outline: area when filled, boundary distance otherwise.
pub(crate) fn hit_outline(shape: &Shape, outline: &[Point], p: Point, tol: f64) -> bool {
    if shape.is_filled() && point_in_polygon(p, outline) {
        return true;
    }
    distance_to_polyline(p, outline, true) < tol
}

/// Open path: boundary distance only.
pub(crate) fn hit_path(points: &[Point], p: Point, tol: f64) -> bool {
    distance_to_polyline(p, points, false) < tol
}

/// Anything inside the (already grown) bounding box.
pub(crate) fn hit_bounds(_: &Shape, _: Point, _: f64) -> bool {
    true
}
