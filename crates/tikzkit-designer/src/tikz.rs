//! TikZ export.
//!
//! Wrapped kinds serialize to a path body such as `(0,0) -- (2,0);` and
//! get a `\draw[opts] ` prefix here. Standalone kinds already carry their
//! own command and are used verbatim. Exporting never mutates a shape.

use tikzkit_core::{CoordinateTransform, Point, TransformError};
use tikzkit_settings::ExportSettings;

use crate::model::Shape;
use crate::registry::Requirement;
use crate::style::option_clause;

/// `(a) -- (b) -- ... -- cycle;`
pub fn closed_path(points: &[Point], t: &CoordinateTransform) -> String {
    let coords: Vec<String> = points.iter().map(|p| t.coord(*p)).collect();
    format!("{} -- cycle;", coords.join(" -- "))
}

/// The complete command(s) for one shape.
pub fn command(shape: &Shape, t: &CoordinateTransform) -> String {
    let body = shape.serialize(t);
    if shape.is_standalone() {
        body
    } else {
        format!("\\draw{} {}", option_clause(&shape.style().option_tokens()), body)
    }
}

/// One entry per shape, in order. Multi-line kinds keep their line breaks.
pub fn export<'a, I>(shapes: I, t: &CoordinateTransform) -> Vec<String>
where
    I: IntoIterator<Item = &'a Shape>,
{
    let commands: Vec<String> = shapes.into_iter().map(|s| command(s, t)).collect();
    tracing::debug!(count = commands.len(), "Exported shapes");
    commands
}

/// Packages and libraries the shapes need, deduplicated and sorted.
pub fn requirements<'a, I>(shapes: I) -> Vec<Requirement>
where
    I: IntoIterator<Item = &'a Shape>,
{
    let mut required: Vec<Requirement> = shapes
        .into_iter()
        .flat_map(|s| s.capabilities().requires.iter().copied())
        .collect();
    required.sort();
    required.dedup();
    required
}

/// Preamble lines for the shapes' requirements.
pub fn preamble<'a, I>(shapes: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Shape>,
{
    requirements(shapes)
        .iter()
        .map(Requirement::preamble_line)
        .collect()
}

/// Full document fragment following the export settings.
pub fn export_picture(shapes: &[Shape], settings: &ExportSettings) -> Result<String, TransformError> {
    let t = settings.transform()?;
    let mut out = String::new();
    if settings.emit_preamble {
        for line in preamble(shapes) {
            out.push_str(&line);
            out.push('\n');
        }
    }
    let commands = export(shapes, &t);
    if !settings.wrap_picture {
        for command in commands {
            out.push_str(&command);
            out.push('\n');
        }
        return Ok(out);
    }
    let indent = " ".repeat(settings.indent);
    out.push_str("\\begin{tikzpicture}\n");
    for command in commands {
        for line in command.lines() {
            out.push_str(&indent);
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push_str("\\end{tikzpicture}\n");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShapeKind;
    use crate::style::Attr;

    fn line() -> Shape {
        Shape::with_points(ShapeKind::Line, Point::new(0.0, 0.0), Point::new(80.0, 0.0))
    }

    #[test]
    fn test_wrapped_command() {
        let t = CoordinateTransform::new(40.0, 0.0).unwrap();
        let mut l = line();
        assert_eq!(command(&l, &t), "\\draw (0,0) -- (2,0);");
        l.style_mut().set(Attr::LineStyle, "dashed");
        l.style_mut().set(Attr::Arrow, "->");
        assert_eq!(command(&l, &t), "\\draw[dashed, ->] (0,0) -- (2,0);");
    }

    #[test]
    fn test_standalone_command_is_verbatim() {
        let t = CoordinateTransform::new(40.0, 40.0).unwrap();
        let gate = Shape::with_points(ShapeKind::LogicAnd, Point::new(0.0, 0.0), Point::new(40.0, 40.0));
        assert_eq!(command(&gate, &t), gate.serialize(&t));
    }

    #[test]
    fn test_requirements_are_deduplicated() {
        let shapes = vec![
            Shape::with_points(ShapeKind::Resistor, Point::default(), Point::new(40.0, 0.0)),
            Shape::with_points(ShapeKind::FlowIo, Point::default(), Point::new(40.0, 40.0)),
            Shape::with_points(ShapeKind::Ground, Point::default(), Point::new(0.0, 40.0)),
            line(),
        ];
        assert_eq!(
            preamble(&shapes),
            vec![
                "\\usepackage{circuitikz}".to_string(),
                "\\usetikzlibrary{shapes.geometric}".to_string()
            ]
        );
    }

    #[test]
    fn test_export_picture_wraps_and_indents() {
        let settings = ExportSettings {
            surface_height: 0.0,
            ..ExportSettings::default()
        };
        let out = export_picture(&[line()], &settings).unwrap();
        assert_eq!(
            out,
            "\\begin{tikzpicture}\n  \\draw (0,0) -- (2,0);\n\\end{tikzpicture}\n"
        );
    }

    #[test]
    fn test_export_picture_rejects_bad_scale() {
        let settings = ExportSettings {
            figure_scale: 0.0,
            ..ExportSettings::default()
        };
        assert!(export_picture(&[line()], &settings).is_err());
    }
}
