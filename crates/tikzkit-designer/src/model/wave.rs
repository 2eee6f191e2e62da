//! Periodic wave laid across the anchor box.
//!
//! The wave runs left to right along the box's horizontal center line with
//! an amplitude of half the box height.

use std::f64::consts::TAU;
use tikzkit_core::{CoordinateTransform, Point};

use super::{Outline, Rendering, Shape};
use crate::hit_test::hit_path;
use crate::style::Attr;

/// Sine samples per cycle.
const SINE_SAMPLES_PER_CYCLE: usize = 12;

/// Wave vertices in pixel space.
pub fn wave_points(shape: &Shape) -> Vec<Point> {
    let b = shape.bounding_box();
    let cycles = shape.style.number(Attr::WaveCycles).round().max(1.0) as usize;
    let period = b.width() / cycles as f64;
    let amp = b.height() / 2.0;
    let cy = b.center().y;
    let x0 = b.min_x;
    match shape.style.text(Attr::WaveType).as_str() {
        "square" => {
            let mut points = vec![Point::new(x0, cy)];
            for k in 0..cycles {
                let start = x0 + period * k as f64;
                let half = start + period / 2.0;
                points.extend([
                    Point::new(start, cy - amp),
                    Point::new(half, cy - amp),
                    Point::new(half, cy + amp),
                    Point::new(start + period, cy + amp),
                ]);
            }
            points.push(Point::new(b.max_x, cy));
            points
        }
        "triangle" => {
            let mut points = vec![Point::new(x0, cy)];
            for k in 0..cycles {
                let start = x0 + period * k as f64;
                points.extend([
                    Point::new(start + period / 4.0, cy - amp),
                    Point::new(start + period * 3.0 / 4.0, cy + amp),
                    Point::new(start + period, cy),
                ]);
            }
            points
        }
        "sawtooth" => {
            let mut points = vec![Point::new(x0, cy + amp)];
            for k in 1..=cycles {
                let x = x0 + period * k as f64;
                points.push(Point::new(x, cy - amp));
                if k < cycles {
                    points.push(Point::new(x, cy + amp));
                }
            }
            points
        }
        _ => {
            let n = cycles * SINE_SAMPLES_PER_CYCLE;
            (0..=n)
                .map(|i| {
                    let f = i as f64 / n as f64;
                    Point::new(
                        x0 + b.width() * f,
                        cy - amp * (TAU * cycles as f64 * f).sin(),
                    )
                })
                .collect()
        }
    }
}

pub fn hit_wave(shape: &Shape, p: Point, tol: f64) -> bool {
    hit_path(&wave_points(shape), p, tol)
}

pub fn render_wave(shape: &Shape, _t: &CoordinateTransform) -> Rendering {
    let mut outline = Outline::new();
    outline.polyline(&wave_points(shape), false);
    Rendering::new(outline.build(), false)
}

/// Sine waves become a smooth plot, the others a straight polyline.
pub fn serialize_wave(shape: &Shape, t: &CoordinateTransform) -> String {
    let coords: Vec<String> = wave_points(shape).into_iter().map(|p| t.coord(p)).collect();
    if shape.style.text(Attr::WaveType) == "sine" {
        format!("plot[smooth] coordinates {{{}}};", coords.join(" "))
    } else {
        format!("{};", coords.join(" -- "))
    }
}
