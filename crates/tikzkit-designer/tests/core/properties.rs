use lyon::path::Event;
use proptest::prelude::*;
use tikzkit_core::constants::{HANDLE_RADIUS, HIT_TOLERANCE};
use tikzkit_core::{CoordinateTransform, Point};
use tikzkit_designer::hit_test::{hit_test_with, tolerance};
use tikzkit_designer::tikz::{command, export};
use tikzkit_designer::{Creation, CreationState, Shape, ShapeKind, Style};

/// Slack for the f32 path coordinates.
const PATH_EPSILON: f64 = 1e-2;

/// Places a shape through the pointer protocol, one drag per point.
fn build(kind: ShapeKind, points: &[Point]) -> Shape {
    let mut creation = Creation::begin(kind, points[0], &Style::new());
    for p in &points[1..] {
        creation.drag(*p).unwrap();
        if creation.release() == CreationState::Ready {
            break;
        }
    }
    creation.finish().unwrap()
}

fn kind_strategy() -> impl Strategy<Value = ShapeKind> {
    (0..ShapeKind::ALL.len()).prop_map(|i| ShapeKind::ALL[i])
}

fn point_strategy() -> impl Strategy<Value = Point> {
    (0.0f64..800.0, 0.0f64..600.0).prop_map(|(x, y)| Point::new(x, y))
}

fn path_points(shape: &Shape) -> Vec<Point> {
    let rendering = shape.render(&CoordinateTransform::default());
    let mut points: Vec<Point> = rendering.text.iter().map(|run| run.position).collect();
    let p = |v: lyon::math::Point| Point::new(v.x as f64, v.y as f64);
    for event in rendering.path.iter() {
        match event {
            Event::Begin { at } => points.push(p(at)),
            Event::Line { to, .. } => points.push(p(to)),
            Event::Quadratic { ctrl, to, .. } => points.extend([p(ctrl), p(to)]),
            Event::Cubic {
                ctrl1, ctrl2, to, ..
            } => points.extend([p(ctrl1), p(ctrl2), p(to)]),
            Event::End { .. } => {}
        }
    }
    points
}

proptest! {
    #[test]
    fn handles_are_always_hittable(
        kind in kind_strategy(),
        points in prop::collection::vec(point_strategy(), 4),
    ) {
        let shape = build(kind, &points);
        for handle in shape.handles() {
            prop_assert!(
                hit_test_with(&shape, handle.position, HIT_TOLERANCE, HANDLE_RADIUS),
                "{} handle {} at {:?} not hittable",
                kind,
                handle.id,
                handle.position
            );
        }
    }

    #[test]
    fn bounds_contain_render(
        kind in kind_strategy(),
        points in prop::collection::vec(point_strategy(), 4),
    ) {
        let shape = build(kind, &points);
        let grown = shape
            .bounding_box()
            .expanded(tolerance(&shape, HIT_TOLERANCE) + PATH_EPSILON);
        for p in path_points(&shape) {
            prop_assert!(grown.contains(p), "{} draws {:?} outside {:?}", kind, p, grown);
        }
    }

    #[test]
    fn default_style_has_no_option_clause(
        kind in kind_strategy(),
        points in prop::collection::vec(point_strategy(), 4),
    ) {
        let shape = build(kind, &points);
        prop_assert!(shape.style().option_tokens().is_empty());
        let t = CoordinateTransform::new(40.0, 600.0).unwrap();
        let out = command(&shape, &t);
        prop_assert!(!out.contains("[]"), "{}", out);
        prop_assert!(!out.contains("[, "), "{}", out);
        prop_assert!(!out.contains(", ]"), "{}", out);
        if !shape.is_standalone() {
            prop_assert!(out.starts_with("\\draw "), "{}", out);
        }
    }

    #[test]
    fn export_is_pure_and_repeatable(
        kinds in prop::collection::vec(kind_strategy(), 1..12),
        points in prop::collection::vec(point_strategy(), 4),
    ) {
        let shapes: Vec<Shape> = kinds.iter().map(|k| build(*k, &points)).collect();
        let before = shapes.clone();
        let t = CoordinateTransform::new(40.0, 600.0).unwrap();
        let first = export(&shapes, &t);
        let second = export(&shapes, &t);
        prop_assert_eq!(first, second);
        prop_assert_eq!(shapes, before);
    }
}
