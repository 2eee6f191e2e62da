use tikzkit_core::{Point, ShapeError};
use tikzkit_designer::{Attr, Canvas, HandleId, Shape, ShapeKind, Style};
use tikzkit_settings::{Config, EditorSettings};

fn drawn(canvas: &mut Canvas, kind: ShapeKind, from: Point, to: Point) -> u64 {
    let mut creation = canvas.begin(kind, from, &Style::new());
    creation.drag(to).unwrap();
    creation.release();
    canvas.commit(creation).unwrap()
}

#[test]
fn test_canvas_add_and_remove() {
    let mut canvas = Canvas::new();
    let line = drawn(&mut canvas, ShapeKind::Line, Point::new(0.0, 0.0), Point::new(80.0, 0.0));
    let rect = drawn(&mut canvas, ShapeKind::Rect, Point::new(0.0, 0.0), Point::new(40.0, 40.0));
    assert_eq!(canvas.len(), 2);
    assert_ne!(line, rect);

    let removed = canvas.remove(line).unwrap();
    assert_eq!(removed.kind(), ShapeKind::Line);
    assert_eq!(canvas.remove(line), Err(ShapeError::NotFound { id: line }));
    assert_eq!(canvas.ids(), vec![rect]);
}

#[test]
fn test_canvas_select_filled_over_outline() {
    let mut canvas = Canvas::new();
    let back = drawn(&mut canvas, ShapeKind::Rect, Point::new(0.0, 0.0), Point::new(200.0, 200.0));
    let front = drawn(&mut canvas, ShapeKind::Circle, Point::new(100.0, 100.0), Point::new(130.0, 100.0));
    // an unfilled circle is only its rim
    assert_eq!(canvas.shape_at(Point::new(110.0, 100.0)), None);
    canvas.get_mut(front).unwrap().style_mut().set(Attr::Fill, "green");
    assert_eq!(canvas.shape_at(Point::new(110.0, 100.0)), Some(front));
    assert_eq!(canvas.shape_at(Point::new(0.0, 100.0)), Some(back));
}

#[test]
fn test_canvas_resize_through_handle() {
    let mut canvas = Canvas::new();
    let id = drawn(&mut canvas, ShapeKind::Rect, Point::new(0.0, 0.0), Point::new(40.0, 40.0));
    let handle = canvas.handle_at(id, Point::new(41.0, 41.0)).unwrap();
    assert_eq!(handle.id, HandleId::BottomRight);
    canvas.resize(id, handle.id, Point::new(60.0, 50.0)).unwrap();
    assert_eq!(canvas.get(id).unwrap().p2, Point::new(60.0, 50.0));
    assert!(canvas.resize(999, HandleId::Left, Point::default()).is_err());
}

#[test]
fn test_canvas_translate_moves_every_point() {
    let mut canvas = Canvas::new();
    let id = canvas.add(Shape::with_points(
        ShapeKind::Curve,
        Point::new(0.0, 0.0),
        Point::new(90.0, 0.0),
    ));
    let (c1, c2) = canvas.get(id).unwrap().controls();
    canvas.translate(id, 10.0, -5.0).unwrap();
    let moved = canvas.get(id).unwrap();
    assert_eq!(moved.p1, Point::new(10.0, -5.0));
    assert_eq!(moved.controls(), (c1.translated(10.0, -5.0), c2.translated(10.0, -5.0)));
}

#[test]
fn test_canvas_from_config_uses_editor_settings() {
    let config = Config {
        editor: EditorSettings {
            hit_tolerance: 30.0,
            ..EditorSettings::default()
        },
        ..Config::default()
    };
    let mut canvas = Canvas::from_config(&config).unwrap();
    let id = drawn(&mut canvas, ShapeKind::Line, Point::new(0.0, 0.0), Point::new(100.0, 0.0));
    assert_eq!(canvas.shape_at(Point::new(50.0, 25.0)), Some(id));
}
