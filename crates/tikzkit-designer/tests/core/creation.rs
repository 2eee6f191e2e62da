use tikzkit_core::Point;
use tikzkit_designer::{Attr, Creation, CreationState, Geometry, ShapeKind, Style};

#[test]
fn test_curve_places_controls_in_order() {
    let mut creation = Creation::begin(ShapeKind::Curve, Point::new(0.0, 0.0), &Style::new());
    creation.drag(Point::new(90.0, 0.0)).unwrap();
    assert_eq!(creation.release(), CreationState::NeedsMore);
    creation.drag(Point::new(30.0, -40.0)).unwrap();
    assert_eq!(creation.release(), CreationState::NeedsMore);
    creation.drag(Point::new(60.0, 40.0)).unwrap();
    assert_eq!(creation.release(), CreationState::Ready);

    let curve = creation.finish().unwrap();
    assert_eq!(curve.p2, Point::new(90.0, 0.0));
    assert_eq!(
        *curve.geometry(),
        Geometry::Curve {
            cp1: Point::new(30.0, -40.0),
            cp2: Point::new(60.0, 40.0),
        }
    );
}

#[test]
fn test_curve_may_finish_during_last_drag() {
    let mut creation = Creation::begin(ShapeKind::Curve, Point::new(0.0, 0.0), &Style::new());
    creation.drag(Point::new(90.0, 0.0)).unwrap();
    creation.release();
    creation.drag(Point::new(30.0, -40.0)).unwrap();
    creation.release();
    assert!(creation.clone().finish().is_err());
    creation.drag(Point::new(60.0, 40.0)).unwrap();
    assert!(creation.finish().is_ok());
}

#[test]
fn test_style_snapshot_is_copied() {
    let mut snapshot = Style::new();
    snapshot.set(Attr::Fill, "blue");
    snapshot.set(Attr::FontSize, "huge");
    let creation = Creation::begin(ShapeKind::Rect, Point::new(0.0, 0.0), &snapshot);
    snapshot.set(Attr::Fill, "red");

    let rect = creation.finish().unwrap();
    assert_eq!(rect.style().text(Attr::Fill), "blue");
    // only declared attributes are carried over
    assert!(!rect.style().contains(Attr::FontSize));
}

#[test]
fn test_arc_drag_sets_radius_and_end_angle() {
    let mut creation = Creation::begin(ShapeKind::Arc, Point::new(100.0, 100.0), &Style::new());
    creation.drag(Point::new(100.0, 60.0)).unwrap();
    creation.release();
    let arc = creation.finish().unwrap().arc();
    assert!((arc.radius - 40.0).abs() < 1e-9);
    assert!((arc.end_angle - 90.0).abs() < 1e-9);
}
