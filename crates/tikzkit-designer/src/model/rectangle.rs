//! Rectangle and diamond: the plain two-corner box kinds.

use lyon::math::{point, Box2D};
use lyon::path::builder::BorderRadii;
use lyon::path::Winding;
use tikzkit_core::{Bounds, CoordinateTransform, Point};

use super::{Outline, Rendering, Shape};
use crate::hit_test::hit_outline;
use crate::style::Attr;
use crate::tikz::closed_path;

/// TikZ default `rounded corners` radius, in points.
const ROUNDED_CORNER_PT: f64 = 4.0;
/// TeX points per output unit (1 cm).
const PT_PER_UNIT: f64 = 28.452_756;

pub fn hit_rect(shape: &Shape, p: Point, tol: f64) -> bool {
    let bounds = shape.bounding_box();
    hit_outline(shape, &bounds.corners(), p, tol)
}

/// Pixel radius of `rounded corners` at the transform's scale.
pub fn corner_radius(t: &CoordinateTransform) -> f64 {
    ROUNDED_CORNER_PT / PT_PER_UNIT * t.scale()
}

pub fn render_rect(shape: &Shape, t: &CoordinateTransform) -> Rendering {
    let bounds = shape.bounding_box();
    let mut outline = Outline::new();
    if shape.style.flag(Attr::Rounded) {
        outline.builder().add_rounded_rectangle(
            &Box2D::new(
                point(bounds.min_x as f32, bounds.min_y as f32),
                point(bounds.max_x as f32, bounds.max_y as f32),
            ),
            &BorderRadii::new(corner_radius(t) as f32),
            Winding::Positive,
        );
    } else {
        outline.polyline(&bounds.corners(), true);
    }
    Rendering::new(outline.build(), shape.is_filled())
}

pub fn serialize_rect(shape: &Shape, t: &CoordinateTransform) -> String {
    format!("{} rectangle {};", t.coord(shape.p1), t.coord(shape.p2))
}

/// Edge midpoints clockwise from the top.
pub fn diamond_vertices(bounds: &Bounds) -> [Point; 4] {
    let c = bounds.center();
    [
        Point::new(c.x, bounds.min_y),
        Point::new(bounds.max_x, c.y),
        Point::new(c.x, bounds.max_y),
        Point::new(bounds.min_x, c.y),
    ]
}

pub fn hit_diamond(shape: &Shape, p: Point, tol: f64) -> bool {
    let bounds = shape.bounding_box();
    if shape.is_filled() {
        let hw = bounds.width() / 2.0;
        let hh = bounds.height() / 2.0;
        if hw > 0.0 && hh > 0.0 {
            let c = bounds.center();
            if (p.x - c.x).abs() / hw + (p.y - c.y).abs() / hh <= 1.0 {
                return true;
            }
        }
    }
    hit_outline(shape, &diamond_vertices(&bounds), p, tol)
}

pub fn render_diamond(shape: &Shape, _t: &CoordinateTransform) -> Rendering {
    let mut outline = Outline::new();
    outline.polyline(&diamond_vertices(&shape.bounding_box()), true);
    Rendering::new(outline.build(), shape.is_filled())
}

pub fn serialize_diamond(shape: &Shape, t: &CoordinateTransform) -> String {
    closed_path(&diamond_vertices(&shape.bounding_box()), t)
}
