//! Text node anchored at its center, optionally rotated.

use tikzkit_core::{bounds_of_points, normalize_angle, rotate_visual, Bounds, CoordinateTransform, Point};

use super::{
    font_px, measure_text, output_angle, Cursor, Handle, HandleId, Outline, Rendering, Shape,
    TextRun,
};
use crate::handles::translate_points;
use crate::style::{option_clause, Attr};

/// Content of a freshly placed text shape.
pub const DEFAULT_CONTENT: &str = "Text";

/// Space between the glyph extent and the bounding box.
const TEXT_PADDING: f64 = 4.0;

fn rotation(shape: &Shape) -> f64 {
    shape.style.number(Attr::Rotation)
}

/// Half extents of the unrotated text box including padding.
fn half_extents(shape: &Shape) -> (f64, f64) {
    let px = font_px(&shape.style.text(Attr::FontSize));
    let (w, h) = measure_text(shape.text(), px);
    (w / 2.0 + TEXT_PADDING, h / 2.0 + TEXT_PADDING)
}

pub fn text_bounds(shape: &Shape) -> Bounds {
    let (hw, hh) = half_extents(shape);
    let c = shape.p1;
    let angle = rotation(shape);
    bounds_of_points(
        [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)]
            .into_iter()
            .map(|(dx, dy)| rotate_visual(Point::new(c.x + dx, c.y + dy), c, angle)),
    )
}

pub fn hit_text(shape: &Shape, p: Point, _: f64) -> bool {
    let (hw, hh) = half_extents(shape);
    let c = shape.p1;
    let local = rotate_visual(p, c, -rotation(shape));
    (local.x - c.x).abs() <= hw && (local.y - c.y).abs() <= hh
}

pub fn text_handles(shape: &Shape) -> Vec<Handle> {
    let (_, hh) = half_extents(shape);
    let c = shape.p1;
    let top = rotate_visual(Point::new(c.x, c.y - hh), c, rotation(shape));
    vec![
        Handle::new(HandleId::Center, c, Cursor::Move),
        Handle::new(HandleId::Rotate, top, Cursor::Grab),
    ]
}

/// `center` moves the node, `rotate` turns it toward the pointer.
pub fn resize_text(shape: &mut Shape, handle: HandleId, to: Point, _: &CoordinateTransform) {
    match handle {
        HandleId::Center => {
            let c = shape.p1;
            translate_points(shape, to.x - c.x, to.y - c.y);
        }
        HandleId::Rotate => {
            let mut angle = normalize_angle(output_angle(shape.p1, to) - 90.0);
            if angle > 180.0 {
                angle -= 360.0;
            }
            shape.style.set(Attr::Rotation, angle.round());
        }
        other => tracing::trace!(handle = %other, "Handle not used by text"),
    }
}

/// Text follows the pointer until released.
pub fn drag_text(shape: &mut Shape, at: Point, _: usize) {
    shape.p1 = at;
    shape.p2 = at;
}

pub fn render_text(shape: &Shape, _t: &CoordinateTransform) -> Rendering {
    Rendering::new(Outline::new().build(), false).with_text(TextRun {
        position: shape.p1,
        content: shape.text().to_string(),
        font_px: font_px(&shape.style.text(Attr::FontSize)),
        rotation: rotation(shape),
    })
}

pub fn serialize_text(shape: &Shape, t: &CoordinateTransform) -> String {
    let clause = option_clause(&shape.style.option_tokens());
    format!("\\node{} at {} {{{}}};", clause, t.coord(shape.p1), shape.text())
}
