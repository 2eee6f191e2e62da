use tikzkit::{Canvas, Config, Point, ShapeKind, Style};

const CONFIG: &str = r#"
[export]
figure_scale = 2.0
surface_height = 200.0
emit_preamble = true

[editor]
grid_snap = true
"#;

#[test]
fn test_configured_canvas_exports_picture() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, CONFIG).unwrap();
    let config = Config::load_from_file(&path).unwrap();

    let mut canvas = Canvas::from_config(&config).unwrap();
    // 20 px per unit at figure scale 2, so the click snaps to (0, 200)
    let mut creation = canvas.begin(ShapeKind::Line, Point::new(3.0, 198.0), &Style::new());
    creation.drag(Point::new(40.0, 200.0)).unwrap();
    creation.release();
    canvas.commit(creation).unwrap();

    let mut creation = canvas.begin(ShapeKind::Diode, Point::new(0.0, 160.0), &Style::new());
    creation.drag(Point::new(60.0, 160.0)).unwrap();
    creation.release();
    canvas.commit(creation).unwrap();

    let picture = canvas.export_picture().unwrap();
    assert_eq!(
        picture,
        "\\usepackage{circuitikz}\n\
         \\begin{tikzpicture}\n  \
         \\draw (0,0) -- (2,0);\n  \
         \\draw (0,2) to[D] (3,2);\n\
         \\end{tikzpicture}\n"
    );
}
