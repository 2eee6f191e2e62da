//! Straight line between two points, optionally with arrow tips.

use tikzkit_core::{distance_to_segment, CoordinateTransform, Point};

use super::{segment_frame, Outline, Rendering, Shape};
use crate::style::Attr;

/// Length of a rendered arrow tip along the line.
pub const ARROW_LENGTH: f64 = 8.0;
/// Half the width of a rendered arrow tip.
pub const ARROW_HALF_WIDTH: f64 = 4.0;

/// Open `wing, tip, wing` polyline for an arrow tip at `tip` pointing away
/// from `from`.
pub fn arrow_head(from: Point, tip: Point) -> [Point; 3] {
    let (u, v) = segment_frame(from, tip);
    let len = from.distance_to(&tip).min(ARROW_LENGTH);
    let base = tip - u * len;
    [
        base + v * ARROW_HALF_WIDTH,
        tip,
        base - v * ARROW_HALF_WIDTH,
    ]
}

pub fn hit_line(shape: &Shape, p: Point, tol: f64) -> bool {
    distance_to_segment(p, shape.p1, shape.p2) < tol
}

pub fn render_line(shape: &Shape, _t: &CoordinateTransform) -> Rendering {
    let mut outline = Outline::new();
    outline.segment(shape.p1, shape.p2);
    let arrow = shape.style.text(Attr::Arrow);
    if arrow.ends_with('>') || arrow.ends_with("stealth") {
        outline.polyline(&arrow_head(shape.p1, shape.p2), false);
    }
    if arrow.starts_with('<') || arrow.starts_with("stealth") {
        outline.polyline(&arrow_head(shape.p2, shape.p1), false);
    }
    Rendering::new(outline.build(), false)
}

pub fn serialize_line(shape: &Shape, t: &CoordinateTransform) -> String {
    format!("{} -- {};", t.coord(shape.p1), t.coord(shape.p2))
}
