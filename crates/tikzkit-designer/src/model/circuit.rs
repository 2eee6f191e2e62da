//! Two-terminal circuit elements and ground, exported as circuitikz.
//!
//! Elements are anchored by their two terminals. The symbol body occupies
//! the middle of the span and never extends more than
//! [`SYMBOL_HALF_WIDTH`] away from the terminal axis.

use std::f64::consts::{FRAC_1_SQRT_2, PI};
use tikzkit_core::{distance_to_segment, normalize_angle, Bounds, CoordinateTransform, Point};

use super::{output_angle, segment_frame, Outline, Rendering, Shape, ShapeKind};
use crate::style::Attr;

/// Largest distance of any symbol stroke from the terminal axis.
pub const SYMBOL_HALF_WIDTH: f64 = 8.0;
/// Fraction of the terminal span taken by the symbol body.
const SYMBOL_BODY_RATIO: f64 = 0.5;
const RESISTOR_PEAKS: usize = 6;
const INDUCTOR_LOOPS: usize = 4;
const CAPACITOR_GAP: f64 = 3.0;
const BATTERY_GAP: f64 = 3.0;
/// Spacing between the three ground bars.
const GROUND_BAR_GAP: f64 = 3.0;

/// circuitikz path key of an element kind.
pub fn element_key(kind: ShapeKind) -> &'static str {
    match kind {
        ShapeKind::Resistor => "R",
        ShapeKind::Capacitor => "C",
        ShapeKind::Inductor => "L",
        ShapeKind::Diode => "D",
        ShapeKind::Battery => "battery1",
        ShapeKind::Switch => "nos",
        ShapeKind::Lamp => "lamp",
        _ => "short",
    }
}

/// Local frame along the terminal axis: `s` runs from p1 to p2 around the
/// midpoint, `t` is the offset to the left of the axis.
struct Frame {
    mid: Point,
    u: Point,
    v: Point,
    half_body: f64,
}

impl Frame {
    fn new(shape: &Shape) -> Self {
        let (u, v) = segment_frame(shape.p1, shape.p2);
        Self {
            mid: shape.p1.midpoint(&shape.p2),
            u,
            v,
            half_body: shape.p1.distance_to(&shape.p2) * SYMBOL_BODY_RATIO / 2.0,
        }
    }

    fn at(&self, s: f64, t: f64) -> Point {
        self.mid + self.u * s + self.v * t
    }
}

pub fn symbol_bounds(shape: &Shape) -> Bounds {
    Bounds::from_corners(shape.p1, shape.p2).expanded(SYMBOL_HALF_WIDTH)
}

pub fn hit_symbol(shape: &Shape, p: Point, tol: f64) -> bool {
    distance_to_segment(p, shape.p1, shape.p2) <= tol.max(SYMBOL_HALF_WIDTH)
}

fn leads(outline: &mut Outline, shape: &Shape, f: &Frame, body: f64) {
    outline.segment(shape.p1, f.at(-body, 0.0));
    outline.segment(f.at(body, 0.0), shape.p2);
}

pub fn render_element(shape: &Shape, _t: &CoordinateTransform) -> Rendering {
    let f = Frame::new(shape);
    let hb = f.half_body;
    let w = SYMBOL_HALF_WIDTH;
    let mut outline = Outline::new();
    match shape.kind() {
        ShapeKind::Resistor => {
            leads(&mut outline, shape, &f, hb);
            let n = RESISTOR_PEAKS * 2;
            let zigzag: Vec<Point> = (0..=n)
                .map(|i| {
                    let s = -hb + 2.0 * hb * i as f64 / n as f64;
                    let t = match i {
                        0 => 0.0,
                        i if i == n => 0.0,
                        i if i % 2 == 1 => w,
                        _ => -w,
                    };
                    f.at(s, t)
                })
                .collect();
            outline.polyline(&zigzag, false);
        }
        ShapeKind::Capacitor => {
            let gap = hb.min(CAPACITOR_GAP);
            leads(&mut outline, shape, &f, gap);
            outline.segment(f.at(-gap, -w), f.at(-gap, w));
            outline.segment(f.at(gap, -w), f.at(gap, w));
        }
        ShapeKind::Inductor => {
            leads(&mut outline, shape, &f, hb);
            let loop_radius = hb / INDUCTOR_LOOPS as f64;
            let height = loop_radius.min(w);
            for i in 0..INDUCTOR_LOOPS {
                let center = -hb + loop_radius * (2 * i + 1) as f64;
                let hump: Vec<Point> = (0..=8)
                    .map(|k| {
                        let theta = PI * k as f64 / 8.0;
                        f.at(center - loop_radius * theta.cos(), height * theta.sin())
                    })
                    .collect();
                outline.polyline(&hump, false);
            }
        }
        ShapeKind::Diode => {
            let d = hb.min(w);
            leads(&mut outline, shape, &f, d);
            outline.polyline(&[f.at(-d, -w), f.at(-d, w), f.at(d, 0.0)], true);
            outline.segment(f.at(d, -w), f.at(d, w));
        }
        ShapeKind::Battery => {
            let gap = hb.min(BATTERY_GAP);
            leads(&mut outline, shape, &f, gap);
            outline.segment(f.at(-gap, -w), f.at(-gap, w));
            outline.segment(f.at(gap, -w / 2.0), f.at(gap, w / 2.0));
        }
        ShapeKind::Switch => {
            leads(&mut outline, shape, &f, hb);
            outline.segment(f.at(-hb, 0.0), f.at(hb * 0.8, w));
        }
        ShapeKind::Lamp => {
            let r = hb.min(w);
            leads(&mut outline, shape, &f, r);
            outline.circle(f.mid, r);
            let d = r * FRAC_1_SQRT_2;
            outline.segment(f.at(-d, -d), f.at(d, d));
            outline.segment(f.at(-d, d), f.at(d, -d));
        }
        _ => outline.segment(shape.p1, shape.p2),
    }
    Rendering::new(outline.build(), false)
}

/// `(a) to[KEY, l={label}] (b);`
pub fn serialize_element(shape: &Shape, t: &CoordinateTransform) -> String {
    let label = shape.style.text(Attr::Label);
    let key = element_key(shape.kind());
    let options = if label.is_empty() {
        key.to_string()
    } else {
        format!("{}, l={{{}}}", key, label)
    };
    format!(
        "{} to[{}] {};",
        t.coord(shape.p1),
        options,
        t.coord(shape.p2)
    )
}

fn ground_tip(shape: &Shape) -> Point {
    let (u, _) = segment_frame(shape.p1, shape.p2);
    shape.p2 + u * (2.0 * GROUND_BAR_GAP)
}

pub fn hit_ground(shape: &Shape, p: Point, tol: f64) -> bool {
    distance_to_segment(p, shape.p1, ground_tip(shape)) <= tol.max(SYMBOL_HALF_WIDTH)
}

/// Stem from the connection point to `p2`, then three shrinking bars.
pub fn render_ground(shape: &Shape, _t: &CoordinateTransform) -> Rendering {
    let (u, v) = segment_frame(shape.p1, shape.p2);
    let mut outline = Outline::new();
    outline.segment(shape.p1, shape.p2);
    for (k, scale) in [1.0, 0.6, 0.25].into_iter().enumerate() {
        let c = shape.p2 + u * (GROUND_BAR_GAP * k as f64);
        let half = v * (SYMBOL_HALF_WIDTH * scale);
        outline.segment(c - half, c + half);
    }
    Rendering::new(outline.build(), false)
}

/// The symbol points down by default; other directions rotate the node.
pub fn serialize_ground(shape: &Shape, t: &CoordinateTransform) -> String {
    let mut rotation = normalize_angle(output_angle(shape.p1, shape.p2) + 90.0);
    if rotation > 180.0 {
        rotation -= 360.0;
    }
    let rotation = tikzkit_core::round2(rotation);
    if rotation == 0.0 || shape.p1 == shape.p2 {
        format!("{} node[ground] {{}};", t.coord(shape.p1))
    } else {
        format!(
            "{} node[ground, rotate={}] {{}};",
            t.coord(shape.p1),
            tikzkit_core::format_number(rotation)
        )
    }
}
