//! Geometry primitives in pixel space.
//!
//! Pixel space has its origin at the top-left of the drawing surface with
//! +Y pointing down. Nothing in here knows about shape kinds.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Linear interpolation; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Box spanned by two opposite corners given in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Grows the box by `amount` on every side.
    pub fn expanded(&self, amount: f64) -> Bounds {
        Bounds::new(
            self.min_x - amount,
            self.min_y - amount,
            self.max_x + amount,
            self.max_y + amount,
        )
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// The four corners, clockwise from top-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }
}

/// Distance from `p` to the closest point of segment `ab`.
///
/// A zero-length segment collapses to point distance.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let l2 = (b.x - a.x).powi(2) + (b.y - a.y).powi(2);
    if l2 == 0.0 {
        return p.distance_to(&a);
    }
    let t = ((p.x - a.x) * (b.x - a.x) + (p.y - a.y) * (b.y - a.y)) / l2;
    let t = t.clamp(0.0, 1.0);
    p.distance_to(&a.lerp(&b, t))
}

/// Smallest distance from `p` to a polyline, optionally closed.
pub fn distance_to_polyline(p: Point, points: &[Point], closed: bool) -> f64 {
    match points {
        [] => f64::INFINITY,
        [only] => p.distance_to(only),
        _ => {
            let mut best = points
                .windows(2)
                .map(|w| distance_to_segment(p, w[0], w[1]))
                .fold(f64::INFINITY, f64::min);
            if closed {
                let last = points[points.len() - 1];
                best = best.min(distance_to_segment(p, last, points[0]));
            }
            best
        }
    }
}

/// Componentwise min/max of a point set. An empty set yields an empty box at the origin.
pub fn bounds_of_points<I>(points: I) -> Bounds
where
    I: IntoIterator<Item = Point>,
{
    let mut iter = points.into_iter();
    let Some(first) = iter.next() else {
        return Bounds::default();
    };
    iter.fold(Bounds::from_corners(first, first), |b, p| {
        Bounds::new(
            b.min_x.min(p.x),
            b.min_y.min(p.y),
            b.max_x.max(p.x),
            b.max_y.max(p.y),
        )
    })
}

/// Barycentric point-in-triangle test, edges inclusive.
///
/// Degenerate (zero-area) triangles contain nothing.
pub fn point_in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    let denom = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
    if denom.abs() < f64::EPSILON {
        return false;
    }
    let u = ((b.y - c.y) * (p.x - c.x) + (c.x - b.x) * (p.y - c.y)) / denom;
    let v = ((c.y - a.y) * (p.x - c.x) + (a.x - c.x) * (p.y - c.y)) / denom;
    let w = 1.0 - u - v;
    u >= 0.0 && v >= 0.0 && w >= 0.0
}

/// Normalized-distance ellipse test: `(dx/rx)^2 + (dy/ry)^2 <= 1`.
///
/// Ellipses with a non-positive radius contain nothing.
pub fn point_in_ellipse(p: Point, center: Point, rx: f64, ry: f64) -> bool {
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let nx = (p.x - center.x) / rx;
    let ny = (p.y - center.y) / ry;
    nx * nx + ny * ny <= 1.0
}

/// Even-odd ray casting test.
pub fn point_in_polygon(p: Point, vertices: &[Point]) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (vi, vj) = (vertices[i], vertices[j]);
        if (vi.y > p.y) != (vj.y > p.y) && p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Normalizes an angle in degrees into `[0, 360)`.
pub fn normalize_angle(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let a = degrees.rem_euclid(360.0);
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Rotates `p` around `center` by `degrees`, counter-clockwise as seen on screen.
///
/// Pixel space is y-down, so a visual counter-clockwise turn is a clockwise
/// turn in the raw coordinate math.
pub fn rotate_visual(p: Point, center: Point, degrees: f64) -> Point {
    let (s, c) = degrees.to_radians().sin_cos();
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    Point::new(center.x + dx * c + dy * s, center.y - dx * s + dy * c)
}

/// Point on a cubic Bézier at parameter `t`.
pub fn cubic_point(p0: Point, c1: Point, c2: Point, p3: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    Point::new(
        a * p0.x + b * c1.x + c * c2.x + d * p3.x,
        a * p0.y + b * c1.y + c * c2.y + d * p3.y,
    )
}

/// Polyline approximation of a cubic Bézier with `samples` segments.
pub fn sample_cubic(p0: Point, c1: Point, c2: Point, p3: Point, samples: usize) -> Vec<Point> {
    let n = samples.max(1);
    (0..=n)
        .map(|i| cubic_point(p0, c1, c2, p3, i as f64 / n as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_segment_projection_clamps() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert_eq!(distance_to_segment(Point::new(5.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_segment(Point::new(-4.0, 3.0), a, b), 5.0);
        assert_eq!(distance_to_segment(Point::new(13.0, 4.0), a, b), 5.0);
    }

    #[test]
    fn test_distance_to_degenerate_segment() {
        let a = Point::new(2.0, 2.0);
        assert_eq!(distance_to_segment(Point::new(5.0, 6.0), a, a), 5.0);
    }

    #[test]
    fn test_bounds_from_corners_any_order() {
        let b = Bounds::from_corners(Point::new(10.0, 2.0), Point::new(4.0, 8.0));
        assert_eq!(b, Bounds::new(4.0, 2.0, 10.0, 8.0));
        assert_eq!(b.center(), Point::new(7.0, 5.0));
    }

    #[test]
    fn test_bounds_of_points_empty_is_well_formed() {
        let b = bounds_of_points(Vec::new());
        assert_eq!(b.width(), 0.0);
        assert_eq!(b.height(), 0.0);
    }

    #[test]
    fn test_point_in_triangle() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        let c = Point::new(0.0, 10.0);
        assert!(point_in_triangle(Point::new(2.0, 2.0), a, b, c));
        assert!(point_in_triangle(Point::new(0.0, 5.0), a, b, c));
        assert!(!point_in_triangle(Point::new(8.0, 8.0), a, b, c));
    }

    #[test]
    fn test_point_in_degenerate_triangle() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(5.0, 5.0);
        let c = Point::new(10.0, 10.0);
        assert!(!point_in_triangle(Point::new(5.0, 5.0), a, b, c));
    }

    #[test]
    fn test_point_in_ellipse_guards_zero_radius() {
        let c = Point::new(0.0, 0.0);
        assert!(point_in_ellipse(Point::new(9.0, 0.0), c, 10.0, 5.0));
        assert!(!point_in_ellipse(Point::new(0.0, 6.0), c, 10.0, 5.0));
        assert!(!point_in_ellipse(c, c, 0.0, 5.0));
    }

    #[test]
    fn test_point_in_polygon_square() {
        let square = Bounds::new(0.0, 0.0, 10.0, 10.0).corners();
        assert!(point_in_polygon(Point::new(5.0, 5.0), &square));
        assert!(!point_in_polygon(Point::new(15.0, 5.0), &square));
    }

    #[test]
    fn test_normalize_angle() {
        assert_eq!(normalize_angle(370.0), 10.0);
        assert_eq!(normalize_angle(-90.0), 270.0);
        assert_eq!(normalize_angle(360.0), 0.0);
    }

    #[test]
    fn test_rotate_visual_quarter_turn_goes_up() {
        let p = rotate_visual(Point::new(10.0, 0.0), Point::new(0.0, 0.0), 90.0);
        assert!((p.x - 0.0).abs() < 1e-9);
        assert!((p.y + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_sample_cubic_endpoints() {
        let pts = sample_cubic(
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
            8,
        );
        assert_eq!(pts.len(), 9);
        assert_eq!(pts[0], Point::new(0.0, 0.0));
        assert_eq!(pts[8], Point::new(10.0, 0.0));
    }
}
