use tikzkit_core::{Point, StyleError};
use tikzkit_designer::{Attr, Canvas, Shape, ShapeKind};
use tikzkit_settings::ExportSettings;

fn settings(height: f64) -> ExportSettings {
    ExportSettings {
        surface_height: height,
        ..ExportSettings::default()
    }
}

fn sample_canvas() -> Canvas {
    let mut canvas = Canvas::new();
    canvas.set_export_settings(settings(160.0)).unwrap();
    canvas.add(Shape::with_points(
        ShapeKind::Rect,
        Point::new(0.0, 0.0),
        Point::new(80.0, 40.0),
    ));
    let mut resistor = Shape::with_points(
        ShapeKind::Resistor,
        Point::new(0.0, 80.0),
        Point::new(120.0, 80.0),
    );
    resistor.style_mut().set(Attr::Label, "$R_1$");
    canvas.add(resistor);
    canvas.add(Shape::with_points(
        ShapeKind::Mirror,
        Point::new(0.0, 160.0),
        Point::new(80.0, 160.0),
    ));
    canvas
}

#[test]
fn test_export_in_draw_order() {
    let canvas = sample_canvas();
    let commands = canvas.export();
    assert_eq!(commands.len(), 3);
    assert_eq!(commands[0], "\\draw (0,4) rectangle (2,3);");
    assert_eq!(commands[1], "\\draw (0,2) to[R, l={$R_1$}] (3,2);");
    assert_eq!(commands[2].lines().count(), 2);
}

#[test]
fn test_export_picture_with_preamble() {
    let mut canvas = sample_canvas();
    canvas
        .set_export_settings(ExportSettings {
            emit_preamble: true,
            indent: 4,
            ..settings(160.0)
        })
        .unwrap();
    let picture = canvas.export_picture().unwrap();
    let lines: Vec<&str> = picture.lines().collect();
    assert_eq!(lines[0], "\\usepackage{circuitikz}");
    assert_eq!(lines[1], "\\begin{tikzpicture}");
    assert_eq!(lines[2], "    \\draw (0,4) rectangle (2,3);");
    // the mirror's two commands are indented separately
    assert!(lines[4].starts_with("    \\draw[very thick]"));
    assert!(lines[5].starts_with("    \\draw ("));
    assert_eq!(lines[6], "\\end{tikzpicture}");
}

#[test]
fn test_export_without_wrapping() {
    let mut canvas = sample_canvas();
    canvas
        .set_export_settings(ExportSettings {
            wrap_picture: false,
            ..settings(160.0)
        })
        .unwrap();
    let out = canvas.export_picture().unwrap();
    assert!(!out.contains("tikzpicture"));
    assert!(out.starts_with("\\draw (0,4) rectangle (2,3);\n"));
}

#[test]
fn test_figure_scale_doubles_output() {
    let mut canvas = sample_canvas();
    canvas
        .set_export_settings(ExportSettings {
            figure_scale: 2.0,
            ..settings(160.0)
        })
        .unwrap();
    assert_eq!(canvas.export()[0], "\\draw (0,8) rectangle (4,6);");
}

#[test]
fn test_export_leaves_canvas_untouched() {
    let canvas = sample_canvas();
    let before = canvas.shapes().to_vec();
    let first = canvas.export_picture().unwrap();
    let second = canvas.export_picture().unwrap();
    assert_eq!(first, second);
    assert_eq!(canvas.shapes(), before.as_slice());
}

#[test]
fn test_undeclared_attributes_never_reach_export() {
    let mut canvas = Canvas::new();
    canvas.set_export_settings(settings(0.0)).unwrap();
    let id = canvas.add(Shape::with_points(
        ShapeKind::Rect,
        Point::new(0.0, 0.0),
        Point::new(80.0, 0.0),
    ));
    let rect = canvas.get_mut(id).unwrap();
    assert_eq!(
        rect.style_mut().try_set(Attr::FontSize, "Large"),
        Err(StyleError::NotApplicable {
            name: "fontSize".to_string(),
            kind: "rect".to_string(),
        })
    );
    rect.style_mut().set(Attr::Rotation, 30.0);
    rect.style_mut().set(Attr::Rounded, true);
    assert_eq!(
        canvas.export(),
        vec!["\\draw[rounded corners] (0,0) rectangle (2,0);"]
    );
}
