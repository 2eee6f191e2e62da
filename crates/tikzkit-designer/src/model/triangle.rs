//! Three-point triangle, created in two steps: the first drag places the
//! base, a second click places the apex.

use tikzkit_core::{bounds_of_points, point_in_triangle, Bounds, CoordinateTransform, Point};

use super::{Cursor, Geometry, Handle, HandleId, Outline, Rendering, Shape};
use crate::handles::translate_points;
use crate::hit_test::hit_outline;
use crate::tikz::closed_path;

fn vertices(shape: &Shape) -> [Point; 3] {
    [shape.p1, shape.p2, shape.p3()]
}

fn centroid(shape: &Shape) -> Point {
    let [a, b, c] = vertices(shape);
    Point::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0)
}

pub fn triangle_bounds(shape: &Shape) -> Bounds {
    bounds_of_points(vertices(shape))
}

pub fn hit_triangle(shape: &Shape, p: Point, tol: f64) -> bool {
    let [a, b, c] = vertices(shape);
    if shape.is_filled() && point_in_triangle(p, a, b, c) {
        return true;
    }
    hit_outline(shape, &[a, b, c], p, tol)
}

pub fn triangle_handles(shape: &Shape) -> Vec<Handle> {
    vec![
        Handle::new(HandleId::Start, shape.p1, Cursor::Crosshair),
        Handle::new(HandleId::End, shape.p2, Cursor::Crosshair),
        Handle::new(HandleId::Apex, shape.p3(), Cursor::Crosshair),
        Handle::new(HandleId::Center, centroid(shape), Cursor::Move),
    ]
}

pub fn resize_triangle(shape: &mut Shape, handle: HandleId, to: Point, _: &CoordinateTransform) {
    match handle {
        HandleId::Start => shape.p1 = to,
        HandleId::End => shape.p2 = to,
        HandleId::Apex => {
            if let Geometry::Triangle { p3 } = &mut shape.geometry {
                *p3 = to;
            }
        }
        HandleId::Center => {
            let c = centroid(shape);
            translate_points(shape, to.x - c.x, to.y - c.y);
        }
        other => tracing::trace!(handle = %other, "Handle not used by triangle"),
    }
}

/// Step 0 drags the base end (the apex trails it), step 1 places the apex.
pub fn drag_triangle(shape: &mut Shape, at: Point, step: usize) {
    match (step, &mut shape.geometry) {
        (0, Geometry::Triangle { p3 }) => {
            shape.p2 = at;
            *p3 = at;
        }
        (_, Geometry::Triangle { p3 }) => *p3 = at,
        _ => shape.p2 = at,
    }
}

pub fn needs_apex(_: &Shape, step: usize) -> bool {
    step == 0
}

pub fn render_triangle(shape: &Shape, _t: &CoordinateTransform) -> Rendering {
    let mut outline = Outline::new();
    outline.polyline(&vertices(shape), true);
    Rendering::new(outline.build(), shape.is_filled())
}

pub fn serialize_triangle(shape: &Shape, t: &CoordinateTransform) -> String {
    closed_path(&vertices(shape), t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShapeKind;
    use crate::style::{Attr, Style};

    fn triangle() -> Shape {
        let mut shape = Shape::new(ShapeKind::Triangle, Point::new(0.0, 60.0), &Style::new());
        drag_triangle(&mut shape, Point::new(60.0, 60.0), 0);
        drag_triangle(&mut shape, Point::new(30.0, 0.0), 1);
        shape
    }

    #[test]
    fn test_steps_position_points() {
        let shape = triangle();
        assert_eq!(shape.p2, Point::new(60.0, 60.0));
        assert_eq!(shape.p3(), Point::new(30.0, 0.0));
        assert_eq!(triangle_bounds(&shape), Bounds::new(0.0, 0.0, 60.0, 60.0));
    }

    #[test]
    fn test_filled_triangle_hits_inside() {
        let mut shape = triangle();
        assert!(!hit_triangle(&shape, Point::new(30.0, 40.0), 6.0));
        shape.style.set(Attr::Fill, "green");
        assert!(hit_triangle(&shape, Point::new(30.0, 40.0), 6.0));
    }

    #[test]
    fn test_serialize_triangle() {
        let t = CoordinateTransform::new(40.0, 60.0).unwrap();
        assert_eq!(
            serialize_triangle(&triangle(), &t),
            "(0,0) -- (1.5,0) -- (0.75,1.5) -- cycle;"
        );
    }

    #[test]
    fn test_apex_handle() {
        let mut shape = triangle();
        resize_triangle(
            &mut shape,
            HandleId::Apex,
            Point::new(10.0, 5.0),
            &CoordinateTransform::default(),
        );
        assert_eq!(shape.p3(), Point::new(10.0, 5.0));
    }
}
