//! Regular polygon and star, both inscribed in the anchor box.
//!
//! Vertices sit on the ellipse inscribed in the box, so a non-square box
//! stretches the figure. The first vertex points up.

use std::f64::consts::{FRAC_PI_2, TAU};
use tikzkit_core::{Bounds, CoordinateTransform, Point};

use super::{Outline, Rendering, Shape};
use crate::hit_test::hit_outline;
use crate::style::Attr;
use crate::tikz::closed_path;

fn on_ellipse(bounds: &Bounds, scale: f64, angle: f64) -> Point {
    let c = bounds.center();
    Point::new(
        c.x + bounds.width() / 2.0 * scale * angle.cos(),
        c.y + bounds.height() / 2.0 * scale * angle.sin(),
    )
}

pub fn polygon_vertices(shape: &Shape) -> Vec<Point> {
    let bounds = shape.bounding_box();
    let sides = shape.style.number(Attr::PolySides).round().max(3.0) as usize;
    (0..sides)
        .map(|i| on_ellipse(&bounds, 1.0, -FRAC_PI_2 + TAU * i as f64 / sides as f64))
        .collect()
}

/// Alternating outer and inner vertices.
pub fn star_vertices(shape: &Shape) -> Vec<Point> {
    let bounds = shape.bounding_box();
    let points = shape.style.number(Attr::StarPoints).round().max(3.0) as usize;
    let ratio = shape.style.number(Attr::StarRatio);
    (0..points * 2)
        .map(|i| {
            let scale = if i % 2 == 0 { 1.0 } else { ratio };
            on_ellipse(&bounds, scale, -FRAC_PI_2 + TAU * i as f64 / (points * 2) as f64)
        })
        .collect()
}

pub fn hit_polygon(shape: &Shape, p: Point, tol: f64) -> bool {
    hit_outline(shape, &polygon_vertices(shape), p, tol)
}

pub fn hit_star(shape: &Shape, p: Point, tol: f64) -> bool {
    hit_outline(shape, &star_vertices(shape), p, tol)
}

pub fn render_polygon(shape: &Shape, _t: &CoordinateTransform) -> Rendering {
    let mut outline = Outline::new();
    outline.polyline(&polygon_vertices(shape), true);
    Rendering::new(outline.build(), shape.is_filled())
}

pub fn render_star(shape: &Shape, _t: &CoordinateTransform) -> Rendering {
    let mut outline = Outline::new();
    outline.polyline(&star_vertices(shape), true);
    Rendering::new(outline.build(), shape.is_filled())
}

pub fn serialize_polygon(shape: &Shape, t: &CoordinateTransform) -> String {
    closed_path(&polygon_vertices(shape), t)
}

pub fn serialize_star(shape: &Shape, t: &CoordinateTransform) -> String {
    closed_path(&star_vertices(shape), t)
}
