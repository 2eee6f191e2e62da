//! Background grid and coordinate axes. Both serialize as standalone
//! `\draw` commands.

use tikzkit_core::{distance_to_segment, CoordinateTransform, Point};

use super::line::arrow_head;
use super::{font_px, HandleId, Outline, Rendering, Shape, TextRun};
use crate::handles::resize_box_with;
use crate::style::{option_clause, Attr};

/// Box resize with every moved coordinate snapped to a multiple of
/// `gridStep × scale`.
pub fn resize_grid(shape: &mut Shape, handle: HandleId, to: Point, t: &CoordinateTransform) {
    let step = shape.style.number(Attr::GridStep) * t.scale();
    resize_box_with(shape, handle, to, |v| {
        if step > 0.0 {
            (v / step).round() * step
        } else {
            v
        }
    });
}

/// Pixel positions of the grid lines along one axis, edges included.
/// Interior lines sit on `origin + k × step`.
fn grid_lines(min: f64, max: f64, step: f64, origin: f64) -> Vec<f64> {
    let mut lines = vec![min];
    if step > 0.0 {
        let mut v = ((min - origin) / step).floor() * step + step + origin;
        while v < max {
            if v > min {
                lines.push(v);
            }
            v += step;
        }
    }
    if max > min {
        lines.push(max);
    }
    lines
}

/// Lines fall where the exported grid puts them: every `gridStep` output
/// units, counted from the output origin (the bottom-left of the surface).
pub fn render_grid(shape: &Shape, t: &CoordinateTransform) -> Rendering {
    let b = shape.bounding_box();
    let step = shape.style.number(Attr::GridStep) * t.scale();
    let mut outline = Outline::new();
    for x in grid_lines(b.min_x, b.max_x, step, 0.0) {
        outline.segment(Point::new(x, b.min_y), Point::new(x, b.max_y));
    }
    for y in grid_lines(b.min_y, b.max_y, step, t.surface_height()) {
        outline.segment(Point::new(b.min_x, y), Point::new(b.max_x, y));
    }
    Rendering::new(outline.build(), false)
}

/// `\draw[opts] (lower left) grid (upper right);`
pub fn serialize_grid(shape: &Shape, t: &CoordinateTransform) -> String {
    let b = shape.bounding_box();
    format!(
        "\\draw{} {} grid {};",
        option_clause(&shape.style.option_tokens()),
        t.coord(Point::new(b.min_x, b.max_y)),
        t.coord(Point::new(b.max_x, b.min_y))
    )
}

fn axis_tips(shape: &Shape) -> (Point, Point) {
    (
        Point::new(shape.p2.x, shape.p1.y),
        Point::new(shape.p1.x, shape.p2.y),
    )
}

pub fn hit_axes(shape: &Shape, p: Point, tol: f64) -> bool {
    let (x_tip, y_tip) = axis_tips(shape);
    distance_to_segment(p, shape.p1, x_tip) < tol || distance_to_segment(p, shape.p1, y_tip) < tol
}

pub fn render_axes(shape: &Shape, _t: &CoordinateTransform) -> Rendering {
    let (x_tip, y_tip) = axis_tips(shape);
    let mut outline = Outline::new();
    for tip in [x_tip, y_tip] {
        outline.segment(shape.p1, tip);
        outline.polyline(&arrow_head(shape.p1, tip), false);
    }
    let px = font_px("normalsize");
    let label = |position: Point, content: &str| TextRun {
        position,
        content: content.to_string(),
        font_px: px,
        rotation: 0.0,
    };
    Rendering::new(outline.build(), false)
        .with_text(label(x_tip, "x"))
        .with_text(label(y_tip, "y"))
}

/// One arrow per axis, each labelled at its tip.
pub fn serialize_axes(shape: &Shape, t: &CoordinateTransform) -> String {
    let (x_tip, y_tip) = axis_tips(shape);
    let mut tokens = vec!["->".to_string()];
    tokens.extend(shape.style.option_tokens());
    let clause = option_clause(&tokens);
    let x_side = if shape.p2.x >= shape.p1.x { "right" } else { "left" };
    let y_side = if shape.p2.y <= shape.p1.y { "above" } else { "below" };
    format!(
        "\\draw{clause} {o} -- {x} node[{x_side}] {{$x$}};\n\\draw{clause} {o} -- {y} node[{y_side}] {{$y$}};",
        clause = clause,
        o = t.coord(shape.p1),
        x = t.coord(x_tip),
        y = t.coord(y_tip),
        x_side = x_side,
        y_side = y_side,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShapeKind;

    fn grid() -> Shape {
        Shape::with_points(ShapeKind::Grid, Point::new(0.0, 0.0), Point::new(80.0, 80.0))
    }

    #[test]
    fn test_corner_resize_snaps_to_step() {
        let mut g = grid();
        g.style.set(Attr::GridStep, 0.5);
        let t = CoordinateTransform::new(40.0, 80.0).unwrap();
        resize_grid(&mut g, HandleId::BottomRight, Point::new(107.0, 93.0), &t);
        assert_eq!(g.p2, Point::new(100.0, 100.0));
        resize_grid(&mut g, HandleId::TopLeft, Point::new(9.0, -11.0), &t);
        assert_eq!(g.p1, Point::new(0.0, -20.0));
    }

    #[test]
    fn test_serialize_grid() {
        let mut g = grid();
        let t = CoordinateTransform::new(40.0, 80.0).unwrap();
        assert_eq!(serialize_grid(&g, &t), "\\draw (0,0) grid (2,2);");
        g.style.set(Attr::GridStep, 0.5);
        g.style.set(Attr::Stroke, "gray");
        assert_eq!(
            serialize_grid(&g, &t),
            "\\draw[draw=gray, step=0.5] (0,0) grid (2,2);"
        );
    }

    #[test]
    fn test_grid_lines_include_edges() {
        assert_eq!(grid_lines(0.0, 80.0, 40.0, 0.0), vec![0.0, 40.0, 80.0]);
        assert_eq!(grid_lines(10.0, 50.0, 40.0, 0.0), vec![10.0, 40.0, 50.0]);
        assert_eq!(grid_lines(0.0, 50.0, 40.0, 30.0), vec![0.0, 30.0, 50.0]);
    }

    fn vertical_lines(rendering: &Rendering) -> Vec<f64> {
        let mut xs: Vec<f64> = rendering
            .path
            .iter()
            .filter_map(|event| match event {
                lyon::path::Event::Line { from, to } if from.x == to.x => Some(from.x as f64),
                _ => None,
            })
            .collect();
        xs.dedup();
        xs
    }

    #[test]
    fn test_rendered_grid_matches_figure_scale() {
        let g = grid();
        let t = CoordinateTransform::from_figure_scale(2.0, 80.0).unwrap();
        assert_eq!(serialize_grid(&g, &t), "\\draw (0,0) grid (4,4);");
        assert_eq!(
            vertical_lines(&render_grid(&g, &t)),
            vec![0.0, 20.0, 40.0, 60.0, 80.0]
        );
    }

    #[test]
    fn test_rendered_grid_counts_rows_from_bottom() {
        let g = Shape::with_points(ShapeKind::Grid, Point::new(0.0, 0.0), Point::new(40.0, 50.0));
        let t = CoordinateTransform::new(40.0, 90.0).unwrap();
        let ys: Vec<f64> = render_grid(&g, &t)
            .path
            .iter()
            .filter_map(|event| match event {
                lyon::path::Event::Line { from, to } if from.y == to.y => Some(from.y as f64),
                _ => None,
            })
            .collect();
        // output y = 2 sits at pixel 10
        assert_eq!(ys, vec![0.0, 10.0, 50.0]);
    }

    #[test]
    fn test_serialize_axes() {
        let axes = Shape::with_points(ShapeKind::Axes, Point::new(0.0, 80.0), Point::new(120.0, 0.0));
        let t = CoordinateTransform::new(40.0, 80.0).unwrap();
        assert_eq!(
            serialize_axes(&axes, &t),
            "\\draw[->] (0,0) -- (3,0) node[right] {$x$};\n\\draw[->] (0,0) -- (0,2) node[above] {$y$};"
        );
    }

    #[test]
    fn test_axes_hit_along_either_axis() {
        let axes = Shape::with_points(ShapeKind::Axes, Point::new(0.0, 80.0), Point::new(120.0, 0.0));
        assert!(hit_axes(&axes, Point::new(60.0, 78.0), 6.0));
        assert!(hit_axes(&axes, Point::new(2.0, 30.0), 6.0));
        assert!(!hit_axes(&axes, Point::new(60.0, 30.0), 6.0));
    }
}
