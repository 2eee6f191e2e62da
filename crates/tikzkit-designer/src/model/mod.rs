//! Shape model.
//!
//! A [`Shape`] is the single persisted record: an immutable [`ShapeKind`],
//! two anchor points, a kind-specific [`Geometry`] payload and an owned
//! [`Style`]. Everything a kind does is looked up in its capability set
//! (see [`crate::registry`]); the per-kind modules below supply those
//! operations.

use lyon::math::{point, vector, Angle};
use lyon::path::{Path, Winding};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tikzkit_core::{Bounds, CoordinateTransform, Point, ShapeError};

use crate::registry::Capabilities;
use crate::style::{Attr, Style};

pub mod arc;
pub mod circle;
pub mod circuit;
pub mod curve;
pub mod flowchart;
pub mod grid;
pub mod line;
pub mod logic;
pub mod optics;
pub mod polygon;
pub mod rectangle;
pub mod text;
pub mod triangle;
pub mod wave;

/// The closed set of shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Line,
    Rect,
    Ellipse,
    Circle,
    Triangle,
    Diamond,
    Polygon,
    Star,
    Text,
    Curve,
    Arc,
    Wave,
    Grid,
    Axes,
    Resistor,
    Capacitor,
    Inductor,
    Diode,
    Battery,
    Switch,
    Lamp,
    Ground,
    Lens,
    Mirror,
    LogicAnd,
    LogicOr,
    LogicNot,
    LogicNand,
    LogicNor,
    LogicXor,
    FlowProcess,
    FlowDecision,
    FlowTerminal,
    FlowIo,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 34] = [
        ShapeKind::Line,
        ShapeKind::Rect,
        ShapeKind::Ellipse,
        ShapeKind::Circle,
        ShapeKind::Triangle,
        ShapeKind::Diamond,
        ShapeKind::Polygon,
        ShapeKind::Star,
        ShapeKind::Text,
        ShapeKind::Curve,
        ShapeKind::Arc,
        ShapeKind::Wave,
        ShapeKind::Grid,
        ShapeKind::Axes,
        ShapeKind::Resistor,
        ShapeKind::Capacitor,
        ShapeKind::Inductor,
        ShapeKind::Diode,
        ShapeKind::Battery,
        ShapeKind::Switch,
        ShapeKind::Lamp,
        ShapeKind::Ground,
        ShapeKind::Lens,
        ShapeKind::Mirror,
        ShapeKind::LogicAnd,
        ShapeKind::LogicOr,
        ShapeKind::LogicNot,
        ShapeKind::LogicNand,
        ShapeKind::LogicNor,
        ShapeKind::LogicXor,
        ShapeKind::FlowProcess,
        ShapeKind::FlowDecision,
        ShapeKind::FlowTerminal,
        ShapeKind::FlowIo,
    ];

    /// Public identifier of the kind.
    pub fn tag(&self) -> &'static str {
        self.capabilities().tag
    }

    /// Resolves a tag. Tags outside the registry are rejected.
    pub fn from_tag(tag: &str) -> Result<ShapeKind, ShapeError> {
        ShapeKind::ALL
            .iter()
            .copied()
            .find(|k| k.tag() == tag)
            .ok_or_else(|| ShapeError::UnknownKind {
                tag: tag.to_string(),
            })
    }

    /// The kind's capability set.
    pub fn capabilities(&self) -> &'static Capabilities {
        crate::registry::capabilities(*self)
    }

    pub fn is_standalone(&self) -> bool {
        self.capabilities().standalone
    }

    /// Initial kind-specific payload.
    fn initial_geometry(&self, at: Point) -> Geometry {
        match self {
            ShapeKind::Triangle => Geometry::Triangle { p3: at },
            ShapeKind::Curve => Geometry::Curve { cp1: at, cp2: at },
            ShapeKind::Arc => Geometry::Arc {
                radius: 0.0,
                start_angle: 0.0,
                end_angle: 360.0,
            },
            ShapeKind::Text => Geometry::Text {
                content: text::DEFAULT_CONTENT.to_string(),
            },
            _ => Geometry::Plain,
        }
    }

    /// Rejects a payload of another kind's variant.
    pub fn check_geometry(&self, geometry: &Geometry) -> Result<(), ShapeError> {
        let expected = self.initial_geometry(Point::default());
        if std::mem::discriminant(&expected) == std::mem::discriminant(geometry) {
            Ok(())
        } else {
            Err(ShapeError::GeometryMismatch {
                kind: self.tag().to_string(),
                geometry: geometry.name().to_string(),
            })
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ShapeKind {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::from_tag(s)
    }
}

/// Kind-specific coordinates and fields beyond the two anchors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Geometry {
    Plain,
    Triangle {
        p3: Point,
    },
    Curve {
        cp1: Point,
        cp2: Point,
    },
    /// Angles in output convention: degrees, counter-clockwise, y up.
    Arc {
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    Text {
        content: String,
    },
}

impl Geometry {
    pub fn name(&self) -> &'static str {
        match self {
            Geometry::Plain => "plain",
            Geometry::Triangle { .. } => "triangle",
            Geometry::Curve { .. } => "curve",
            Geometry::Arc { .. } => "arc",
            Geometry::Text { .. } => "text",
        }
    }
}

/// Parameters of an arc shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

/// A shape record.
///
/// The geometry payload always matches the kind and the style is scoped to
/// the kind's declared attributes; records loaded through serde are checked
/// and rescoped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ShapeRecord")]
pub struct Shape {
    pub id: u64,
    kind: ShapeKind,
    pub p1: Point,
    pub p2: Point,
    geometry: Geometry,
    style: Style,
}

/// Unchecked wire form of a [`Shape`].
#[derive(Deserialize)]
struct ShapeRecord {
    id: u64,
    kind: ShapeKind,
    p1: Point,
    p2: Point,
    geometry: Geometry,
    style: Style,
}

impl TryFrom<ShapeRecord> for Shape {
    type Error = ShapeError;

    fn try_from(record: ShapeRecord) -> Result<Self, ShapeError> {
        let ShapeRecord {
            id,
            kind,
            p1,
            p2,
            geometry,
            style,
        } = record;
        kind.check_geometry(&geometry)?;
        let dropped: Vec<&str> = style
            .attributes()
            .filter(|attr| !kind.capabilities().attributes.contains(attr))
            .map(|attr| attr.name())
            .collect();
        if !dropped.is_empty() {
            tracing::warn!(id, kind = %kind, ?dropped, "Dropping undeclared style attributes");
        }
        Ok(Self {
            id,
            kind,
            p1,
            p2,
            geometry,
            style: Style::for_attributes(kind.tag(), kind.capabilities().attributes, &style),
        })
    }
}

impl Shape {
    /// Creates a shape of `kind` with both anchors at `at`. The style holds
    /// every attribute the kind declares, copied from `snapshot` or defaulted.
    pub fn new(kind: ShapeKind, at: Point, snapshot: &Style) -> Self {
        let caps = kind.capabilities();
        Self {
            id: 0,
            kind,
            p1: at,
            p2: at,
            geometry: kind.initial_geometry(at),
            style: Style::for_attributes(caps.tag, caps.attributes, snapshot),
        }
    }

    /// Creates a shape spanning two points with default style.
    pub fn with_points(kind: ShapeKind, p1: Point, p2: Point) -> Self {
        let mut shape = Self::new(kind, p1, &Style::new());
        (shape.capabilities().on_create_start)(&mut shape, p1);
        (shape.capabilities().on_create_drag)(&mut shape, p2, 0);
        shape
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn capabilities(&self) -> &'static Capabilities {
        self.kind.capabilities()
    }

    pub fn is_standalone(&self) -> bool {
        self.capabilities().standalone
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Replaces the kind-specific payload; it must be the kind's variant.
    pub fn set_geometry(&mut self, geometry: Geometry) -> Result<(), ShapeError> {
        self.kind.check_geometry(&geometry)?;
        self.geometry = geometry;
        Ok(())
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// The style for editing; it stays scoped to the kind.
    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    /// Whether the kind declares a fill and it is set.
    pub fn is_filled(&self) -> bool {
        self.style.contains(Attr::Fill) && self.style.text(Attr::Fill) != "none"
    }

    pub fn line_width(&self) -> f64 {
        self.style.number(Attr::LineWidth)
    }

    pub fn bounding_box(&self) -> Bounds {
        (self.capabilities().bounding_box)(self)
    }

    pub fn handles(&self) -> Vec<Handle> {
        (self.capabilities().handles)(self)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        (self.capabilities().translate)(self, dx, dy)
    }

    /// Moves one named handle to `to`.
    pub fn resize(&mut self, handle: HandleId, to: Point, transform: &CoordinateTransform) {
        tracing::trace!(id = self.id, kind = %self.kind, handle = %handle, "Resize");
        (self.capabilities().resize)(self, handle, to, transform)
    }

    /// Display list in pixel space for the given output transform.
    pub fn render(&self, transform: &CoordinateTransform) -> Rendering {
        (self.capabilities().render)(self, transform)
    }

    /// Kind template body; standalone kinds include their own command.
    pub fn serialize(&self, transform: &CoordinateTransform) -> String {
        (self.capabilities().serialize)(self, transform)
    }

    /// Third triangle vertex, or `p2` for other kinds.
    pub fn p3(&self) -> Point {
        match &self.geometry {
            Geometry::Triangle { p3 } => *p3,
            _ => self.p2,
        }
    }

    /// Bézier control points; anchors for non-curve kinds.
    pub fn controls(&self) -> (Point, Point) {
        match &self.geometry {
            Geometry::Curve { cp1, cp2 } => (*cp1, *cp2),
            _ => (self.p1, self.p2),
        }
    }

    /// Arc parameters; a full turn through `p2` for other kinds.
    pub fn arc(&self) -> ArcParams {
        match &self.geometry {
            Geometry::Arc {
                radius,
                start_angle,
                end_angle,
            } => ArcParams {
                radius: *radius,
                start_angle: *start_angle,
                end_angle: *end_angle,
            },
            _ => ArcParams {
                radius: self.p1.distance_to(&self.p2),
                start_angle: 0.0,
                end_angle: 360.0,
            },
        }
    }

    /// Text content for text shapes.
    pub fn text(&self) -> &str {
        match &self.geometry {
            Geometry::Text { content } => content,
            _ => "",
        }
    }

    /// Replaces the content of a text shape; ignored for other kinds.
    pub fn set_text(&mut self, content: impl Into<String>) {
        if let Geometry::Text { content: current } = &mut self.geometry {
            *current = content.into();
        }
    }

    /// Every point stored on the shape, anchors first.
    pub(crate) fn points_mut(&mut self) -> Vec<&mut Point> {
        let mut points = vec![&mut self.p1, &mut self.p2];
        match &mut self.geometry {
            Geometry::Triangle { p3 } => points.push(p3),
            Geometry::Curve { cp1, cp2 } => {
                points.push(cp1);
                points.push(cp2);
            }
            _ => {}
        }
        points
    }
}

/// Named handle positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HandleId {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    Center,
    Start,
    End,
    Apex,
    Control1,
    Control2,
    Radius,
    StartAngle,
    EndAngle,
    Rotate,
}

impl HandleId {
    pub fn name(&self) -> &'static str {
        match self {
            HandleId::TopLeft => "top-left",
            HandleId::Top => "top",
            HandleId::TopRight => "top-right",
            HandleId::Right => "right",
            HandleId::BottomRight => "bottom-right",
            HandleId::Bottom => "bottom",
            HandleId::BottomLeft => "bottom-left",
            HandleId::Left => "left",
            HandleId::Center => "center",
            HandleId::Start => "start",
            HandleId::End => "end",
            HandleId::Apex => "apex",
            HandleId::Control1 => "cp1",
            HandleId::Control2 => "cp2",
            HandleId::Radius => "radius",
            HandleId::StartAngle => "start-angle",
            HandleId::EndAngle => "end-angle",
            HandleId::Rotate => "rotate",
        }
    }

    pub(crate) fn moves_left(&self) -> bool {
        matches!(
            self,
            HandleId::TopLeft | HandleId::Left | HandleId::BottomLeft
        )
    }

    pub(crate) fn moves_right(&self) -> bool {
        matches!(
            self,
            HandleId::TopRight | HandleId::Right | HandleId::BottomRight
        )
    }

    pub(crate) fn moves_top(&self) -> bool {
        matches!(self, HandleId::TopLeft | HandleId::Top | HandleId::TopRight)
    }

    pub(crate) fn moves_bottom(&self) -> bool {
        matches!(
            self,
            HandleId::BottomLeft | HandleId::Bottom | HandleId::BottomRight
        )
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pointer cursor suggested while hovering a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cursor {
    Move,
    NsResize,
    EwResize,
    NwseResize,
    NeswResize,
    Crosshair,
    Grab,
}

impl Cursor {
    /// CSS cursor name.
    pub fn css_name(&self) -> &'static str {
        match self {
            Cursor::Move => "move",
            Cursor::NsResize => "ns-resize",
            Cursor::EwResize => "ew-resize",
            Cursor::NwseResize => "nwse-resize",
            Cursor::NeswResize => "nesw-resize",
            Cursor::Crosshair => "crosshair",
            Cursor::Grab => "grab",
        }
    }
}

/// A draggable control point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Handle {
    pub id: HandleId,
    pub position: Point,
    pub cursor: Cursor,
}

impl Handle {
    pub fn new(id: HandleId, position: Point, cursor: Cursor) -> Self {
        Self {
            id,
            position,
            cursor,
        }
    }
}

/// A positioned text run for the drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Center of the run in pixel space.
    pub position: Point,
    pub content: String,
    pub font_px: f64,
    /// Degrees, counter-clockwise on screen.
    pub rotation: f64,
}

/// Display list for one shape.
#[derive(Debug, Clone)]
pub struct Rendering {
    pub path: Path,
    pub filled: bool,
    pub text: Vec<TextRun>,
}

impl Rendering {
    pub fn new(path: Path, filled: bool) -> Self {
        Self {
            path,
            filled,
            text: Vec::new(),
        }
    }

    pub fn with_text(mut self, run: TextRun) -> Self {
        self.text.push(run);
        self
    }
}

pub(crate) fn to_lyon(p: Point) -> lyon::math::Point {
    point(p.x as f32, p.y as f32)
}

/// Thin wrapper over the lyon builder speaking pixel-space points.
pub(crate) struct Outline {
    builder: lyon::path::path::Builder,
}

impl Outline {
    pub fn new() -> Self {
        Self {
            builder: Path::builder(),
        }
    }

    pub fn polyline(&mut self, points: &[Point], closed: bool) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.builder.begin(to_lyon(*first));
        for p in rest {
            self.builder.line_to(to_lyon(*p));
        }
        self.builder.end(closed);
    }

    pub fn segment(&mut self, a: Point, b: Point) {
        self.polyline(&[a, b], false);
    }

    pub fn cubic(&mut self, from: Point, c1: Point, c2: Point, to: Point) {
        self.builder.begin(to_lyon(from));
        self.builder
            .cubic_bezier_to(to_lyon(c1), to_lyon(c2), to_lyon(to));
        self.builder.end(false);
    }

    pub fn circle(&mut self, center: Point, radius: f64) {
        self.builder
            .add_circle(to_lyon(center), radius.abs() as f32, Winding::Positive);
    }

    pub fn ellipse(&mut self, center: Point, rx: f64, ry: f64) {
        self.builder.add_ellipse(
            to_lyon(center),
            vector(rx.abs() as f32, ry.abs() as f32),
            Angle::radians(0.0),
            Winding::Positive,
        );
    }

    pub fn builder(&mut self) -> &mut lyon::path::path::Builder {
        &mut self.builder
    }

    pub fn build(self) -> Path {
        self.builder.build()
    }
}

/// Pixel font size for a `fontSize` choice.
pub fn font_px(size: &str) -> f64 {
    match size {
        "tiny" => 7.0,
        "small" => 10.0,
        "large" => 14.0,
        "Large" => 17.0,
        "huge" => 24.0,
        _ => 12.0,
    }
}

/// Average glyph advance relative to the font size.
const CHAR_WIDTH_RATIO: f64 = 0.6;
/// Line height relative to the font size.
const LINE_HEIGHT_RATIO: f64 = 1.2;

/// Approximate extent of `content` at `font_px`.
///
/// Deterministic and font-independent so bounding boxes are reproducible
/// anywhere.
pub fn measure_text(content: &str, font_px: f64) -> (f64, f64) {
    let mut lines = 0usize;
    let mut widest = 0usize;
    for line in content.lines() {
        lines += 1;
        widest = widest.max(line.chars().count());
    }
    let lines = lines.max(1);
    (
        widest as f64 * font_px * CHAR_WIDTH_RATIO,
        lines as f64 * font_px * LINE_HEIGHT_RATIO,
    )
}

/// Unit direction and left normal of the segment `a -> b`; points down when
/// the segment is degenerate.
pub(crate) fn segment_frame(a: Point, b: Point) -> (Point, Point) {
    let len = a.distance_to(&b);
    let u = if len > f64::EPSILON {
        (b - a) * (1.0 / len)
    } else {
        Point::new(0.0, 1.0)
    };
    (u, Point::new(-u.y, u.x))
}

/// Angle of `a -> b` in output convention (degrees, counter-clockwise, y up).
pub fn output_angle(a: Point, b: Point) -> f64 {
    (-(b.y - a.y)).atan2(b.x - a.x).to_degrees()
}
