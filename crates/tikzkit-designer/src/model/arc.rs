//! Circular arc around `p1`.
//!
//! Angles are kept in output convention (degrees, counter-clockwise, y up)
//! so they serialize verbatim. The start angle lives in `[0, 360)` and the
//! end angle in `(start, start + 360]`. `p2` always sits on the arc at the
//! end angle.

use tikzkit_core::constants::ARC_SAMPLES;
use tikzkit_core::{format_number, normalize_angle, Bounds, CoordinateTransform, Point};

use super::{output_angle, ArcParams, Cursor, Geometry, Handle, HandleId, Outline, Rendering, Shape};
use crate::handles::translate_points;
use crate::hit_test::hit_path;

/// Point at `degrees` (output convention) on a circle in pixel space.
pub fn point_at(center: Point, radius: f64, degrees: f64) -> Point {
    let (s, c) = degrees.to_radians().sin_cos();
    Point::new(center.x + radius * c, center.y - radius * s)
}

/// Counter-clockwise sweep from `start` to `end`, in `(0, 360]`.
pub fn sweep(start: f64, end: f64) -> f64 {
    let s = normalize_angle(end - start);
    if s == 0.0 {
        360.0
    } else {
        s
    }
}

fn set_arc(shape: &mut Shape, radius: f64, start: f64, end: f64) {
    let start = normalize_angle(start);
    let end = start + sweep(start, end);
    let anchor = point_at(shape.p1, radius, end);
    if let Geometry::Arc {
        radius: r,
        start_angle,
        end_angle,
    } = &mut shape.geometry
    {
        *r = radius.max(0.0);
        *start_angle = start;
        *end_angle = end;
        shape.p2 = anchor;
    }
}

fn samples(shape: &Shape) -> Vec<Point> {
    let ArcParams {
        radius,
        start_angle,
        end_angle,
    } = shape.arc();
    let span = end_angle - start_angle;
    let n = ((ARC_SAMPLES as f64 * span / 360.0).ceil() as usize).max(2);
    (0..=n)
        .map(|i| point_at(shape.p1, radius, start_angle + span * i as f64 / n as f64))
        .collect()
}

pub fn arc_bounds(shape: &Shape) -> Bounds {
    let c = shape.p1;
    let r = shape.arc().radius;
    Bounds::new(c.x - r, c.y - r, c.x + r, c.y + r)
}

pub fn hit_arc(shape: &Shape, p: Point, tol: f64) -> bool {
    let arc = shape.arc();
    if arc.radius <= 0.0 {
        return false;
    }
    let on_circle = (shape.p1.distance_to(&p) - arc.radius).abs() < tol;
    let within = normalize_angle(output_angle(shape.p1, p) - arc.start_angle)
        <= arc.end_angle - arc.start_angle;
    (on_circle && within) || hit_path(&samples(shape), p, tol)
}

pub fn arc_handles(shape: &Shape) -> Vec<Handle> {
    let arc = shape.arc();
    let c = shape.p1;
    let mid = (arc.start_angle + arc.end_angle) / 2.0;
    vec![
        Handle::new(HandleId::Center, c, Cursor::Move),
        Handle::new(
            HandleId::StartAngle,
            point_at(c, arc.radius, arc.start_angle),
            Cursor::Crosshair,
        ),
        Handle::new(
            HandleId::EndAngle,
            point_at(c, arc.radius, arc.end_angle),
            Cursor::Crosshair,
        ),
        Handle::new(HandleId::Radius, point_at(c, arc.radius, mid), Cursor::Grab),
    ]
}

/// Angle handles turn around the fixed center; the radius handle scales.
pub fn resize_arc(shape: &mut Shape, handle: HandleId, to: Point, _: &CoordinateTransform) {
    let arc = shape.arc();
    let c = shape.p1;
    match handle {
        HandleId::Center => translate_points(shape, to.x - c.x, to.y - c.y),
        HandleId::StartAngle => set_arc(shape, arc.radius, output_angle(c, to), arc.end_angle),
        HandleId::EndAngle => set_arc(shape, arc.radius, arc.start_angle, output_angle(c, to)),
        HandleId::Radius => set_arc(shape, c.distance_to(&to), arc.start_angle, arc.end_angle),
        other => tracing::trace!(handle = %other, "Handle not used by arc"),
    }
}

/// The drag sets the radius and end angle; the arc starts at 0°.
pub fn drag_arc(shape: &mut Shape, at: Point, _: usize) {
    let start = shape.arc().start_angle;
    let radius = shape.p1.distance_to(&at);
    set_arc(shape, radius, start, output_angle(shape.p1, at));
}

pub fn render_arc(shape: &Shape, _t: &CoordinateTransform) -> Rendering {
    let mut outline = Outline::new();
    outline.polyline(&samples(shape), false);
    Rendering::new(outline.build(), false)
}

pub fn serialize_arc(shape: &Shape, t: &CoordinateTransform) -> String {
    let arc = shape.arc();
    let start = point_at(shape.p1, arc.radius, arc.start_angle);
    format!(
        "{} arc ({}:{}:{});",
        t.coord(start),
        format_number(arc.start_angle),
        format_number(arc.end_angle),
        format_number(t.length(arc.radius))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShapeKind;
    use crate::style::Style;

    fn quarter() -> Shape {
        let mut shape = Shape::new(ShapeKind::Arc, Point::new(40.0, 40.0), &Style::new());
        drag_arc(&mut shape, Point::new(40.0, 0.0), 0);
        shape
    }

    #[test]
    fn test_drag_sets_radius_and_end() {
        let arc = quarter().arc();
        assert_eq!(arc.radius, 40.0);
        assert_eq!(arc.start_angle, 0.0);
        assert_eq!(arc.end_angle, 90.0);
    }

    #[test]
    fn test_end_is_normalized_after_start() {
        assert_eq!(sweep(300.0, 30.0), 90.0);
        assert_eq!(sweep(30.0, 30.0), 360.0);
        let mut shape = quarter();
        set_arc(&mut shape, 40.0, 300.0, 30.0);
        assert_eq!(shape.arc().start_angle, 300.0);
        assert_eq!(shape.arc().end_angle, 390.0);
    }

    #[test]
    fn test_hit_respects_sweep() {
        let shape = quarter();
        // 45° on the arc
        let on = point_at(Point::new(40.0, 40.0), 40.0, 45.0);
        assert!(hit_arc(&shape, on, 6.0));
        // 225° is on the circle but outside the sweep
        let off = point_at(Point::new(40.0, 40.0), 40.0, 225.0);
        assert!(!hit_arc(&shape, off, 6.0));
    }

    #[test]
    fn test_end_angle_handle() {
        let mut shape = quarter();
        let t = CoordinateTransform::default();
        resize_arc(&mut shape, HandleId::EndAngle, Point::new(0.0, 40.0), &t);
        assert_eq!(shape.arc().end_angle, 180.0);
        assert!(shape.p2.distance_to(&Point::new(0.0, 40.0)) < 1e-9);
    }

    #[test]
    fn test_serialize_arc() {
        let t = CoordinateTransform::new(40.0, 80.0).unwrap();
        assert_eq!(serialize_arc(&quarter(), &t), "(2,1) arc (0:90:1);");
    }
}
