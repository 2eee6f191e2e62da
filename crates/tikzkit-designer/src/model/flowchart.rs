//! Flowchart nodes: process, decision, terminal and input/output.
//!
//! Each node fills its box and is selectable anywhere inside it. The
//! label is the node text.

use std::f64::consts::{FRAC_PI_2, PI};
use tikzkit_core::{format_number, Bounds, CoordinateTransform, Point};

use super::rectangle::diamond_vertices;
use super::{font_px, Outline, Rendering, Shape, ShapeKind, TextRun};
use crate::style::{option_clause, Attr};

/// Horizontal slant of the input/output parallelogram, relative to width.
const IO_SKEW_RATIO: f64 = 0.15;
/// Samples per rounded end of a terminal node.
const TERMINAL_CAP_SAMPLES: usize = 12;

/// Shape keys placed after `draw` in the node options.
fn shape_keys(kind: ShapeKind, b: &Bounds) -> String {
    match kind {
        ShapeKind::FlowDecision => {
            let aspect = if b.height() > 0.0 {
                b.width() / b.height()
            } else {
                1.0
            };
            format!("diamond, aspect={}", format_number(aspect))
        }
        ShapeKind::FlowTerminal => "rectangle, rounded corners".to_string(),
        ShapeKind::FlowIo => {
            "trapezium, trapezium left angle=70, trapezium right angle=110".to_string()
        }
        _ => "rectangle".to_string(),
    }
}

fn terminal_outline(b: &Bounds) -> Vec<Point> {
    let r = (b.height() / 2.0).min(b.width() / 2.0);
    let cy = b.center().y;
    let right = Point::new(b.max_x - r, cy);
    let left = Point::new(b.min_x + r, cy);
    let cap = |center: Point, from: f64| {
        (0..=TERMINAL_CAP_SAMPLES).map(move |i| {
            let a = from + PI * i as f64 / TERMINAL_CAP_SAMPLES as f64;
            Point::new(center.x + r * a.cos(), center.y + r * a.sin())
        })
    };
    cap(right, -FRAC_PI_2)
        .chain(cap(left, FRAC_PI_2))
        .collect()
}

fn io_outline(b: &Bounds) -> [Point; 4] {
    let skew = b.width() * IO_SKEW_RATIO;
    [
        Point::new(b.min_x + skew, b.min_y),
        Point::new(b.max_x, b.min_y),
        Point::new(b.max_x - skew, b.max_y),
        Point::new(b.min_x, b.max_y),
    ]
}

pub fn render_node(shape: &Shape, _t: &CoordinateTransform) -> Rendering {
    let b = shape.bounding_box();
    let mut outline = Outline::new();
    match shape.kind() {
        ShapeKind::FlowDecision => outline.polyline(&diamond_vertices(&b), true),
        ShapeKind::FlowTerminal => outline.polyline(&terminal_outline(&b), true),
        ShapeKind::FlowIo => outline.polyline(&io_outline(&b), true),
        _ => outline.polyline(&b.corners(), true),
    }
    let rendering = Rendering::new(outline.build(), shape.is_filled());
    let label = shape.style.text(Attr::Label);
    if label.is_empty() {
        return rendering;
    }
    rendering.with_text(TextRun {
        position: b.center(),
        content: label,
        font_px: font_px(&shape.style.text(Attr::FontSize)),
        rotation: 0.0,
    })
}

/// `\node[draw, <shape>, minimum width=w, minimum height=h, opts] at (c) {label};`
pub fn serialize_node(shape: &Shape, t: &CoordinateTransform) -> String {
    let b = shape.bounding_box();
    let mut tokens = vec![
        "draw".to_string(),
        shape_keys(shape.kind(), &b),
        format!("minimum width={}cm", format_number(t.length(b.width()))),
        format!("minimum height={}cm", format_number(t.length(b.height()))),
    ];
    tokens.extend(shape.style.option_tokens());
    format!(
        "\\node{} at {} {{{}}};",
        option_clause(&tokens),
        t.coord(b.center()),
        shape.style.text(Attr::Label)
    )
}
