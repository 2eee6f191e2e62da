//! Circle (center plus rim point) and ellipse (inscribed in the box).

use std::f64::consts::TAU;
use tikzkit_core::constants::ARC_SAMPLES;
use tikzkit_core::{format_number, point_in_ellipse, Bounds, CoordinateTransform, Point};

use super::{Cursor, Handle, HandleId, Outline, Rendering, Shape};
use crate::handles::translate_points;
use crate::hit_test::hit_outline;

fn radius(shape: &Shape) -> f64 {
    shape.p1.distance_to(&shape.p2)
}

pub fn circle_bounds(shape: &Shape) -> Bounds {
    let c = shape.p1;
    let r = radius(shape);
    Bounds::new(c.x - r, c.y - r, c.x + r, c.y + r)
}

pub fn hit_circle(shape: &Shape, p: Point, tol: f64) -> bool {
    let r = radius(shape);
    if r <= 0.0 {
        return false;
    }
    let d = shape.p1.distance_to(&p);
    (shape.is_filled() && d <= r) || (d - r).abs() < tol
}

pub fn circle_handles(shape: &Shape) -> Vec<Handle> {
    let c = shape.p1;
    let r = radius(shape);
    vec![
        Handle::new(HandleId::Center, c, Cursor::Move),
        Handle::new(HandleId::Top, Point::new(c.x, c.y - r), Cursor::NsResize),
        Handle::new(HandleId::Right, Point::new(c.x + r, c.y), Cursor::EwResize),
        Handle::new(HandleId::Bottom, Point::new(c.x, c.y + r), Cursor::NsResize),
        Handle::new(HandleId::Left, Point::new(c.x - r, c.y), Cursor::EwResize),
    ]
}

/// The center handle moves the circle; the rim handles set the radius.
pub fn resize_circle(shape: &mut Shape, handle: HandleId, to: Point, _: &CoordinateTransform) {
    match handle {
        HandleId::Center => {
            let c = shape.p1;
            translate_points(shape, to.x - c.x, to.y - c.y);
        }
        HandleId::Top
        | HandleId::Right
        | HandleId::Bottom
        | HandleId::Left
        | HandleId::Radius => shape.p2 = to,
        other => tracing::trace!(handle = %other, "Handle not used by circle"),
    }
}

pub fn render_circle(shape: &Shape, _t: &CoordinateTransform) -> Rendering {
    let mut outline = Outline::new();
    outline.circle(shape.p1, radius(shape));
    Rendering::new(outline.build(), shape.is_filled())
}

pub fn serialize_circle(shape: &Shape, t: &CoordinateTransform) -> String {
    format!(
        "{} circle ({});",
        t.coord(shape.p1),
        format_number(t.length(radius(shape)))
    )
}

fn ellipse_outline(center: Point, rx: f64, ry: f64) -> Vec<Point> {
    (0..ARC_SAMPLES)
        .map(|i| {
            let a = TAU * i as f64 / ARC_SAMPLES as f64;
            Point::new(center.x + rx * a.cos(), center.y + ry * a.sin())
        })
        .collect()
}

pub fn hit_ellipse(shape: &Shape, p: Point, tol: f64) -> bool {
    let b = shape.bounding_box();
    let (c, rx, ry) = (b.center(), b.width() / 2.0, b.height() / 2.0);
    if shape.is_filled() && point_in_ellipse(p, c, rx, ry) {
        return true;
    }
    hit_outline(shape, &ellipse_outline(c, rx, ry), p, tol)
}

pub fn render_ellipse(shape: &Shape, _t: &CoordinateTransform) -> Rendering {
    let b = shape.bounding_box();
    let mut outline = Outline::new();
    outline.ellipse(b.center(), b.width() / 2.0, b.height() / 2.0);
    Rendering::new(outline.build(), shape.is_filled())
}

pub fn serialize_ellipse(shape: &Shape, t: &CoordinateTransform) -> String {
    let b = shape.bounding_box();
    format!(
        "{} ellipse ({} and {});",
        t.coord(b.center()),
        format_number(t.length(b.width() / 2.0)),
        format_number(t.length(b.height() / 2.0))
    )
}
