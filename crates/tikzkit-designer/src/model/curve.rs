//! Cubic Bézier curve, created in three steps: drag the endpoints, then
//! click the first and second control points.

use tikzkit_core::constants::CURVE_SAMPLES;
use tikzkit_core::{bounds_of_points, sample_cubic, Bounds, CoordinateTransform, Point};

use super::{Cursor, Geometry, Handle, HandleId, Outline, Rendering, Shape};
use crate::hit_test::hit_path;

pub fn curve_bounds(shape: &Shape) -> Bounds {
    let (cp1, cp2) = shape.controls();
    bounds_of_points([shape.p1, cp1, cp2, shape.p2])
}

pub fn hit_curve(shape: &Shape, p: Point, tol: f64) -> bool {
    let (cp1, cp2) = shape.controls();
    hit_path(&sample_cubic(shape.p1, cp1, cp2, shape.p2, CURVE_SAMPLES), p, tol)
}

pub fn curve_handles(shape: &Shape) -> Vec<Handle> {
    let (cp1, cp2) = shape.controls();
    vec![
        Handle::new(HandleId::Start, shape.p1, Cursor::Crosshair),
        Handle::new(HandleId::End, shape.p2, Cursor::Crosshair),
        Handle::new(HandleId::Control1, cp1, Cursor::Grab),
        Handle::new(HandleId::Control2, cp2, Cursor::Grab),
    ]
}

pub fn resize_curve(shape: &mut Shape, handle: HandleId, to: Point, _: &CoordinateTransform) {
    match (handle, &mut shape.geometry) {
        (HandleId::Start, _) => shape.p1 = to,
        (HandleId::End, _) => shape.p2 = to,
        (HandleId::Control1, Geometry::Curve { cp1, .. }) => *cp1 = to,
        (HandleId::Control2, Geometry::Curve { cp2, .. }) => *cp2 = to,
        (other, _) => tracing::trace!(handle = %other, "Handle not used by curve"),
    }
}

/// Step 0 drags the end point with the controls on the chord, step 1
/// places both controls, step 2 moves the second control on its own.
pub fn drag_curve(shape: &mut Shape, at: Point, step: usize) {
    let start = shape.p1;
    match (step, &mut shape.geometry) {
        (0, Geometry::Curve { cp1, cp2 }) => {
            shape.p2 = at;
            *cp1 = start.lerp(&at, 1.0 / 3.0);
            *cp2 = start.lerp(&at, 2.0 / 3.0);
        }
        (1, Geometry::Curve { cp1, cp2 }) => {
            *cp1 = at;
            *cp2 = at;
        }
        (_, Geometry::Curve { cp2, .. }) => *cp2 = at,
        _ => shape.p2 = at,
    }
}

pub fn needs_control(_: &Shape, step: usize) -> bool {
    step < 2
}

pub fn render_curve(shape: &Shape, _t: &CoordinateTransform) -> Rendering {
    let (cp1, cp2) = shape.controls();
    let mut outline = Outline::new();
    outline.cubic(shape.p1, cp1, cp2, shape.p2);
    Rendering::new(outline.build(), false)
}

pub fn serialize_curve(shape: &Shape, t: &CoordinateTransform) -> String {
    let (cp1, cp2) = shape.controls();
    format!(
        "{} .. controls {} and {} .. {};",
        t.coord(shape.p1),
        t.coord(cp1),
        t.coord(cp2),
        t.coord(shape.p2)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShapeKind;
    use crate::style::Style;

    fn curve() -> Shape {
        let mut shape = Shape::new(ShapeKind::Curve, Point::new(0.0, 40.0), &Style::new());
        drag_curve(&mut shape, Point::new(120.0, 40.0), 0);
        drag_curve(&mut shape, Point::new(40.0, 0.0), 1);
        drag_curve(&mut shape, Point::new(80.0, 0.0), 2);
        shape
    }

    #[test]
    fn test_first_step_keeps_curve_straight() {
        let mut shape = Shape::new(ShapeKind::Curve, Point::new(0.0, 0.0), &Style::new());
        drag_curve(&mut shape, Point::new(90.0, 0.0), 0);
        let (cp1, cp2) = shape.controls();
        assert!(cp1.distance_to(&Point::new(30.0, 0.0)) < 1e-9);
        assert!(cp2.distance_to(&Point::new(60.0, 0.0)) < 1e-9);
        assert!(needs_control(&shape, 0));
        assert!(needs_control(&shape, 1));
        assert!(!needs_control(&shape, 2));
    }

    #[test]
    fn test_hit_follows_samples() {
        let shape = curve();
        // the apex of this symmetric curve is at y = 10
        assert!(hit_curve(&shape, Point::new(60.0, 10.0), 6.0));
        assert!(!hit_curve(&shape, Point::new(60.0, 30.0), 6.0));
    }

    #[test]
    fn test_serialize_curve() {
        let t = CoordinateTransform::new(40.0, 40.0).unwrap();
        assert_eq!(
            serialize_curve(&curve(), &t),
            "(0,0) .. controls (1,1) and (2,1) .. (3,0);"
        );
    }
}
