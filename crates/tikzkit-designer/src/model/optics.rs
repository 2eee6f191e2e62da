//! Optical elements: lens and plane mirror, both anchored on their axis.

use std::f64::consts::{FRAC_1_SQRT_2, TAU};
use tikzkit_core::constants::ARC_SAMPLES;
use tikzkit_core::{
    distance_to_segment, format_number, point_in_ellipse, round2, Bounds, CoordinateTransform,
    Point,
};

use super::{output_angle, segment_frame, Outline, Rendering, Shape};
use crate::hit_test::hit_outline;
use crate::style::option_clause;

/// Lens thickness relative to its length.
const LENS_ASPECT: f64 = 0.25;
const MIRROR_HATCH_COUNT: usize = 6;
/// Reach of a hatch stroke behind the mirror surface.
const MIRROR_HATCH_LENGTH: f64 = 6.0;

/// Semi-axes of the lens: along the axis, then across it.
fn lens_radii(shape: &Shape) -> (f64, f64) {
    let len = shape.p1.distance_to(&shape.p2);
    (len / 2.0, len * LENS_ASPECT / 2.0)
}

fn lens_outline(shape: &Shape) -> Vec<Point> {
    let (u, v) = segment_frame(shape.p1, shape.p2);
    let (a, b) = lens_radii(shape);
    let mid = shape.p1.midpoint(&shape.p2);
    (0..ARC_SAMPLES)
        .map(|i| {
            let theta = TAU * i as f64 / ARC_SAMPLES as f64;
            mid + u * (a * theta.cos()) + v * (b * theta.sin())
        })
        .collect()
}

/// Exact box of the rotated ellipse.
pub fn lens_bounds(shape: &Shape) -> Bounds {
    let (u, v) = segment_frame(shape.p1, shape.p2);
    let (a, b) = lens_radii(shape);
    let mid = shape.p1.midpoint(&shape.p2);
    let hx = ((a * u.x).powi(2) + (b * v.x).powi(2)).sqrt();
    let hy = ((a * u.y).powi(2) + (b * v.y).powi(2)).sqrt();
    Bounds::new(mid.x - hx, mid.y - hy, mid.x + hx, mid.y + hy)
}

pub fn hit_lens(shape: &Shape, p: Point, tol: f64) -> bool {
    let (a, b) = lens_radii(shape);
    if b <= 0.0 {
        return false;
    }
    let (u, v) = segment_frame(shape.p1, shape.p2);
    let d = p - shape.p1.midpoint(&shape.p2);
    let local = Point::new(d.x * u.x + d.y * u.y, d.x * v.x + d.y * v.y);
    if shape.is_filled() && point_in_ellipse(local, Point::default(), a, b) {
        return true;
    }
    hit_outline(shape, &lens_outline(shape), p, tol)
}

pub fn render_lens(shape: &Shape, _t: &CoordinateTransform) -> Rendering {
    let mut outline = Outline::new();
    outline.polyline(&lens_outline(shape), true);
    Rendering::new(outline.build(), shape.is_filled())
}

/// An ellipse rotated around its center to follow the lens axis.
pub fn serialize_lens(shape: &Shape, t: &CoordinateTransform) -> String {
    let (a, b) = lens_radii(shape);
    let center = t.coord(shape.p1.midpoint(&shape.p2));
    let mut tokens = shape.style.option_tokens();
    let angle = round2(output_angle(shape.p1, shape.p2));
    if angle != 0.0 {
        tokens.push(format!("rotate around={{{}:{}}}", format_number(angle), center));
    }
    format!(
        "\\draw{} {} ellipse ({} and {});",
        option_clause(&tokens),
        center,
        format_number(t.length(a)),
        format_number(t.length(b))
    )
}

/// Start and end of each hatch stroke.
fn hatches(shape: &Shape) -> Vec<(Point, Point)> {
    let (u, v) = segment_frame(shape.p1, shape.p2);
    let back = (v + u) * (-MIRROR_HATCH_LENGTH * FRAC_1_SQRT_2);
    (0..MIRROR_HATCH_COUNT)
        .map(|i| {
            let q = shape
                .p1
                .lerp(&shape.p2, (i as f64 + 0.5) / MIRROR_HATCH_COUNT as f64);
            (q, q + back)
        })
        .collect()
}

pub fn mirror_bounds(shape: &Shape) -> Bounds {
    Bounds::from_corners(shape.p1, shape.p2).expanded(MIRROR_HATCH_LENGTH)
}

pub fn hit_mirror(shape: &Shape, p: Point, tol: f64) -> bool {
    distance_to_segment(p, shape.p1, shape.p2) < tol
}

pub fn render_mirror(shape: &Shape, _t: &CoordinateTransform) -> Rendering {
    let mut outline = Outline::new();
    outline.segment(shape.p1, shape.p2);
    for (a, b) in hatches(shape) {
        outline.segment(a, b);
    }
    Rendering::new(outline.build(), false)
}

/// A thick surface line followed by one command holding every hatch.
pub fn serialize_mirror(shape: &Shape, t: &CoordinateTransform) -> String {
    let tokens = shape.style.option_tokens();
    let mut surface = tokens.clone();
    surface.push("very thick".to_string());
    let strokes: Vec<String> = hatches(shape)
        .into_iter()
        .map(|(a, b)| format!("{} -- {}", t.coord(a), t.coord(b)))
        .collect();
    format!(
        "\\draw{} {} -- {};\n\\draw{} {};",
        option_clause(&surface),
        t.coord(shape.p1),
        t.coord(shape.p2),
        option_clause(&tokens),
        strokes.join(" ")
    )
}
