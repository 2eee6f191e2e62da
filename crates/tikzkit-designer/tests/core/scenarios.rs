use tikzkit_core::{CoordinateTransform, Point, ShapeError};
use tikzkit_designer::tikz::command;
use tikzkit_designer::{hit_test, Creation, HandleId, Shape, ShapeKind, Style};

#[test]
fn test_line_serializes_in_output_units() {
    let t = CoordinateTransform::new(40.0, 0.0).unwrap();
    let line = Shape::with_points(ShapeKind::Line, Point::new(0.0, 0.0), Point::new(80.0, 0.0));
    assert_eq!(line.serialize(&t), "(0,0) -- (2,0);");
    assert_eq!(command(&line, &t), "\\draw (0,0) -- (2,0);");
}

#[test]
fn test_circle_radius_in_output_units() {
    let t = CoordinateTransform::new(40.0, 80.0).unwrap();
    let circle =
        Shape::with_points(ShapeKind::Circle, Point::new(40.0, 40.0), Point::new(80.0, 40.0));
    assert_eq!(circle.serialize(&t), "(1,1) circle (1);");
}

#[test]
fn test_rect_edge_hit_and_miss() {
    let rect = Shape::with_points(
        ShapeKind::Rect,
        Point::new(100.0, 100.0),
        Point::new(200.0, 160.0),
    );
    assert!(hit_test(&rect, Point::new(100.0, 130.0)));
    assert!(!hit_test(&rect, Point::new(80.0, 130.0)));
    assert!(!hit_test(&rect, Point::new(220.0, 130.0)));
    assert!(!hit_test(&rect, Point::new(150.0, 80.0)));
    assert!(!hit_test(&rect, Point::new(150.0, 180.0)));
    // unfilled: the interior is not part of the shape
    assert!(!hit_test(&rect, Point::new(150.0, 130.0)));
}

#[test]
fn test_triangle_not_final_after_one_move() {
    let mut creation = Creation::begin(ShapeKind::Triangle, Point::new(0.0, 0.0), &Style::new());
    creation.drag(Point::new(100.0, 0.0)).unwrap();
    let err = creation.finish().unwrap_err();
    assert_eq!(
        err,
        ShapeError::IncompleteCreation {
            kind: "triangle".to_string(),
            step: 0,
            required: 2,
        }
    );
}

#[test]
fn test_grid_corner_resize_snaps() {
    let t = CoordinateTransform::new(40.0, 600.0).unwrap();
    let mut grid = Shape::with_points(ShapeKind::Grid, Point::new(0.0, 0.0), Point::new(80.0, 80.0));
    grid.resize(HandleId::BottomRight, Point::new(93.0, 51.0), &t);
    assert_eq!(grid.p2, Point::new(80.0, 40.0));

    grid.style_mut().set(tikzkit_designer::Attr::GridStep, 0.5);
    grid.resize(HandleId::BottomRight, Point::new(93.0, 51.0), &t);
    assert_eq!(grid.p2, Point::new(100.0, 60.0));
    assert_eq!(grid.p1, Point::new(0.0, 0.0));
}
