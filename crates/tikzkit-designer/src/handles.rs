//! Handle layouts and the shared resize behaviour.
//!
//! Resize dispatches purely on the handle name. Box handles move whichever
//! anchor currently holds the matching extreme, so anchors may be stored in
//! any order; segment handles move one endpoint; `center` handles translate.

use tikzkit_core::constants::{HANDLE_RADIUS, HANDLE_SIZE};
use tikzkit_core::{Bounds, CoordinateTransform, Point};

use crate::model::{Cursor, Handle, HandleId, Shape};

/// The 8 box handles, corners and edge midpoints, clockwise from top-left.
pub fn box_handles_for(bounds: &Bounds) -> Vec<Handle> {
    let c = bounds.center();
    vec![
        Handle::new(
            HandleId::TopLeft,
            Point::new(bounds.min_x, bounds.min_y),
            Cursor::NwseResize,
        ),
        Handle::new(HandleId::Top, Point::new(c.x, bounds.min_y), Cursor::NsResize),
        Handle::new(
            HandleId::TopRight,
            Point::new(bounds.max_x, bounds.min_y),
            Cursor::NeswResize,
        ),
        Handle::new(HandleId::Right, Point::new(bounds.max_x, c.y), Cursor::EwResize),
        Handle::new(
            HandleId::BottomRight,
            Point::new(bounds.max_x, bounds.max_y),
            Cursor::NwseResize,
        ),
        Handle::new(
            HandleId::Bottom,
            Point::new(c.x, bounds.max_y),
            Cursor::NsResize,
        ),
        Handle::new(
            HandleId::BottomLeft,
            Point::new(bounds.min_x, bounds.max_y),
            Cursor::NeswResize,
        ),
        Handle::new(HandleId::Left, Point::new(bounds.min_x, c.y), Cursor::EwResize),
    ]
}

/// Box handles over the two anchors.
pub fn box_handles(shape: &Shape) -> Vec<Handle> {
    box_handles_for(&Bounds::from_corners(shape.p1, shape.p2))
}

/// Start, end and midpoint handles of a two-point shape.
pub fn segment_handles(shape: &Shape) -> Vec<Handle> {
    vec![
        Handle::new(HandleId::Start, shape.p1, Cursor::Crosshair),
        Handle::new(HandleId::End, shape.p2, Cursor::Crosshair),
        Handle::new(HandleId::Center, shape.p1.midpoint(&shape.p2), Cursor::Move),
    ]
}

/// Moves every stored point by a delta.
pub fn translate_points(shape: &mut Shape, dx: f64, dy: f64) {
    for p in shape.points_mut() {
        *p = p.translated(dx, dy);
    }
}

fn move_x_extreme(shape: &mut Shape, to: f64, max: bool) {
    let p1_holds = if max {
        shape.p1.x >= shape.p2.x
    } else {
        shape.p1.x <= shape.p2.x
    };
    if p1_holds {
        shape.p1.x = to;
    } else {
        shape.p2.x = to;
    }
}

fn move_y_extreme(shape: &mut Shape, to: f64, max: bool) {
    let p1_holds = if max {
        shape.p1.y >= shape.p2.y
    } else {
        shape.p1.y <= shape.p2.y
    };
    if p1_holds {
        shape.p1.y = to;
    } else {
        shape.p2.y = to;
    }
}

/// Applies a box handle with a per-axis snapping function.
pub(crate) fn resize_box_with(
    shape: &mut Shape,
    handle: HandleId,
    to: Point,
    snap: impl Fn(f64) -> f64,
) {
    if handle == HandleId::Center {
        let c = shape.p1.midpoint(&shape.p2);
        translate_points(shape, snap(to.x) - snap(c.x), snap(to.y) - snap(c.y));
        return;
    }
    if handle.moves_left() {
        move_x_extreme(shape, snap(to.x), false);
    }
    if handle.moves_right() {
        move_x_extreme(shape, snap(to.x), true);
    }
    if handle.moves_top() {
        move_y_extreme(shape, snap(to.y), false);
    }
    if handle.moves_bottom() {
        move_y_extreme(shape, snap(to.y), true);
    }
}

/// Default box resize.
pub fn resize_box(shape: &mut Shape, handle: HandleId, to: Point, _: &CoordinateTransform) {
    resize_box_with(shape, handle, to, |v| v);
}

/// Endpoint resize for two-point shapes.
pub fn resize_segment(shape: &mut Shape, handle: HandleId, to: Point, _: &CoordinateTransform) {
    match handle {
        HandleId::Start => shape.p1 = to,
        HandleId::End => shape.p2 = to,
        HandleId::Center => {
            let c = shape.p1.midpoint(&shape.p2);
            translate_points(shape, to.x - c.x, to.y - c.y);
        }
        other => tracing::trace!(handle = %other, kind = %shape.kind(), "Handle not used by segment"),
    }
}

/// The handle under `p`, if any, preferring the closest.
pub fn handle_at(shape: &Shape, p: Point, radius: f64) -> Option<Handle> {
    shape
        .handles()
        .into_iter()
        .map(|h| (h.position.distance_to(&p), h))
        .filter(|(d, _)| *d <= radius)
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, h)| h)
}

/// Square drawn for a handle marker.
pub fn handle_marker(handle: &Handle) -> Bounds {
    let half = HANDLE_SIZE / 2.0;
    Bounds::new(
        handle.position.x - half,
        handle.position.y - half,
        handle.position.x + half,
        handle.position.y + half,
    )
}

/// [`handle_at`] with the default grab radius.
pub fn handle_under(shape: &Shape, p: Point) -> Option<Handle> {
    handle_at(shape, p, HANDLE_RADIUS)
}
