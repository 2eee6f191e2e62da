//! Logic gates drawn inside their box, exported as circuitikz ports.

use tikzkit_core::{format_number, round2, Bounds, CoordinateTransform, Point};

use super::{to_lyon as lp, Outline, Rendering, Shape, ShapeKind};
use crate::style::option_clause;

/// Cubic control distance for a quarter ellipse.
const KAPPA: f64 = 0.552_284_749_8;
/// Inversion bubble radius relative to the box height, capped at a quarter
/// of the width.
const BUBBLE_RATIO: f64 = 0.1;
/// Gap between the extra XOR input curve and the body, relative to width.
const XOR_GAP_RATIO: f64 = 0.1;

/// circuitikz node name of a gate kind.
pub fn port_name(kind: ShapeKind) -> &'static str {
    match kind {
        ShapeKind::LogicOr => "or port",
        ShapeKind::LogicNot => "not port",
        ShapeKind::LogicNand => "nand port",
        ShapeKind::LogicNor => "nor port",
        ShapeKind::LogicXor => "xor port",
        _ => "and port",
    }
}

/// D-shaped AND body over `[x1, x2]`.
fn and_body(outline: &mut Outline, b: &Bounds, x2: f64) {
    let (x1, y1, y2) = (b.min_x, b.min_y, b.max_y);
    let cy = b.center().y;
    let rx = (x2 - x1) / 2.0;
    let ry = (y2 - y1) / 2.0;
    let xm = x1 + rx;
    let builder = outline.builder();
    builder.begin(lp(Point::new(x1, y1)));
    builder.line_to(lp(Point::new(xm, y1)));
    builder.cubic_bezier_to(
        lp(Point::new(xm + rx * KAPPA, y1)),
        lp(Point::new(x2, cy - ry * KAPPA)),
        lp(Point::new(x2, cy)),
    );
    builder.cubic_bezier_to(
        lp(Point::new(x2, cy + ry * KAPPA)),
        lp(Point::new(xm + rx * KAPPA, y2)),
        lp(Point::new(xm, y2)),
    );
    builder.line_to(lp(Point::new(x1, y2)));
    builder.end(true);
}

/// Shield-shaped OR body over `[x1, x2]`.
fn or_body(outline: &mut Outline, b: &Bounds, x1: f64, x2: f64) {
    let (y1, y2) = (b.min_y, b.max_y);
    let cy = b.center().y;
    let w = x2 - x1;
    let h = y2 - y1;
    let builder = outline.builder();
    builder.begin(lp(Point::new(x1, y1)));
    builder.cubic_bezier_to(
        lp(Point::new(x1 + w * 0.6, y1)),
        lp(Point::new(x2 - w * 0.1, cy - h * 0.2)),
        lp(Point::new(x2, cy)),
    );
    builder.cubic_bezier_to(
        lp(Point::new(x2 - w * 0.1, cy + h * 0.2)),
        lp(Point::new(x1 + w * 0.6, y2)),
        lp(Point::new(x1, y2)),
    );
    builder.quadratic_bezier_to(lp(Point::new(x1 + w * 0.25, cy)), lp(Point::new(x1, y1)));
    builder.end(true);
}

pub fn render_gate(shape: &Shape, _t: &CoordinateTransform) -> Rendering {
    let b = shape.bounding_box();
    let bubble = (b.height() * BUBBLE_RATIO).min(b.width() / 4.0);
    let cy = b.center().y;
    let inverted = matches!(
        shape.kind(),
        ShapeKind::LogicNot | ShapeKind::LogicNand | ShapeKind::LogicNor
    );
    // Inverted gates end in a bubble, the body stops short of it.
    let body_end = if inverted {
        (b.max_x - 2.0 * bubble).max(b.min_x)
    } else {
        b.max_x
    };
    let mut outline = Outline::new();
    match shape.kind() {
        ShapeKind::LogicOr | ShapeKind::LogicNor => or_body(&mut outline, &b, b.min_x, body_end),
        ShapeKind::LogicXor => {
            let gap = b.width() * XOR_GAP_RATIO;
            or_body(&mut outline, &b, b.min_x + gap, body_end);
            let builder = outline.builder();
            builder.begin(lp(Point::new(b.min_x, b.min_y)));
            builder.quadratic_bezier_to(
                lp(Point::new(b.min_x + (b.width() - gap) * 0.25, cy)),
                lp(Point::new(b.min_x, b.max_y)),
            );
            builder.end(false);
        }
        ShapeKind::LogicNot => outline.polyline(
            &[
                Point::new(b.min_x, b.min_y),
                Point::new(body_end, cy),
                Point::new(b.min_x, b.max_y),
            ],
            true,
        ),
        _ => and_body(&mut outline, &b, body_end),
    }
    if inverted {
        outline.circle(Point::new(b.max_x - bubble, cy), bubble);
    }
    Rendering::new(outline.build(), shape.is_filled())
}

/// `\node[and port, scale=s, opts] at (c) {};` where the scale is the box
/// width in output units.
pub fn serialize_gate(shape: &Shape, t: &CoordinateTransform) -> String {
    let b = shape.bounding_box();
    let mut tokens = vec![
        port_name(shape.kind()).to_string(),
        format!("scale={}", format_number(round2(b.width() / t.scale()))),
    ];
    tokens.extend(shape.style.option_tokens());
    format!("\\node{} at {} {{}};", option_clause(&tokens), t.coord(b.center()))
}
