//! Shape capability registry.
//!
//! Each kind maps to a static [`Capabilities`] table of function pointers.
//! [`BOX_DEFAULTS`] covers the two-corner box family; every kind starts
//! from it (or from [`SEGMENT_DEFAULTS`], itself derived from it) and
//! overrides only the operations whose geometry differs.

use tikzkit_core::{Bounds, CoordinateTransform, Point};

use crate::handles::{box_handles, resize_box, resize_segment, segment_handles, translate_points};
use crate::hit_test::hit_bounds;
use crate::model::{
    arc, circle, circuit, curve, flowchart, grid, line, logic, optics, polygon, rectangle, text,
    triangle, wave, Handle, HandleId, Rendering, Shape, ShapeKind,
};
use crate::style::Attr;

/// A LaTeX package or TikZ library an exported kind depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Requirement {
    Package(&'static str),
    Library(&'static str),
}

impl Requirement {
    /// Preamble line for the requirement.
    pub fn preamble_line(&self) -> String {
        match self {
            Requirement::Package(name) => format!("\\usepackage{{{}}}", name),
            Requirement::Library(name) => format!("\\usetikzlibrary{{{}}}", name),
        }
    }
}

const CIRCUITIKZ: &[Requirement] = &[Requirement::Package("circuitikz")];
const SHAPES_GEOMETRIC: &[Requirement] = &[Requirement::Library("shapes.geometric")];

/// Operations and metadata of one kind.
#[derive(Clone, Copy)]
pub struct Capabilities {
    pub tag: &'static str,
    /// The serialized form carries its own command and options.
    pub standalone: bool,
    /// Style attributes the kind declares, in clause order.
    pub attributes: &'static [Attr],
    pub requires: &'static [Requirement],
    pub bounding_box: fn(&Shape) -> Bounds,
    /// Kind geometry test; called with the point already inside the grown
    /// bounding box and not on a handle.
    pub hit_test: fn(&Shape, Point, f64) -> bool,
    pub translate: fn(&mut Shape, f64, f64),
    pub resize: fn(&mut Shape, HandleId, Point, &CoordinateTransform),
    pub handles: fn(&Shape) -> Vec<Handle>,
    pub on_create_start: fn(&mut Shape, Point),
    /// Live update during a creation drag; the `usize` is the step index.
    pub on_create_drag: fn(&mut Shape, Point, usize),
    /// Whether another click is needed after `step` has been placed.
    pub on_next_step: fn(&Shape, usize) -> bool,
    /// Display list; grid-like kinds align to the transform's unit.
    pub render: fn(&Shape, &CoordinateTransform) -> Rendering,
    pub serialize: fn(&Shape, &CoordinateTransform) -> String,
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("tag", &self.tag)
            .field("standalone", &self.standalone)
            .field("attributes", &self.attributes)
            .field("requires", &self.requires)
            .finish_non_exhaustive()
    }
}

fn anchor_bounds(shape: &Shape) -> Bounds {
    Bounds::from_corners(shape.p1, shape.p2)
}

fn start_at(shape: &mut Shape, at: Point) {
    for p in shape.points_mut() {
        *p = at;
    }
}

fn drag_second_anchor(shape: &mut Shape, at: Point, _step: usize) {
    shape.p2 = at;
}

fn single_step(_: &Shape, _: usize) -> bool {
    false
}

const STROKE_ATTRS: &[Attr] = &[
    Attr::Stroke,
    Attr::LineWidth,
    Attr::Opacity,
    Attr::LineStyle,
    Attr::Arrow,
];
const CLOSED_ATTRS: &[Attr] = &[
    Attr::Stroke,
    Attr::Fill,
    Attr::LineWidth,
    Attr::Opacity,
    Attr::LineStyle,
];
const RECT_ATTRS: &[Attr] = &[
    Attr::Stroke,
    Attr::Fill,
    Attr::LineWidth,
    Attr::Opacity,
    Attr::LineStyle,
    Attr::Rounded,
];
const POLYGON_ATTRS: &[Attr] = &[
    Attr::Stroke,
    Attr::Fill,
    Attr::LineWidth,
    Attr::Opacity,
    Attr::LineStyle,
    Attr::PolySides,
];
const STAR_ATTRS: &[Attr] = &[
    Attr::Stroke,
    Attr::Fill,
    Attr::LineWidth,
    Attr::Opacity,
    Attr::LineStyle,
    Attr::StarPoints,
    Attr::StarRatio,
];
const TEXT_ATTRS: &[Attr] = &[
    Attr::Opacity,
    Attr::FontSize,
    Attr::TextColor,
    Attr::Rotation,
];
const WAVE_ATTRS: &[Attr] = &[
    Attr::Stroke,
    Attr::LineWidth,
    Attr::Opacity,
    Attr::LineStyle,
    Attr::WaveType,
    Attr::WaveCycles,
];
const GRID_ATTRS: &[Attr] = &[
    Attr::Stroke,
    Attr::LineWidth,
    Attr::Opacity,
    Attr::LineStyle,
    Attr::GridStep,
];
const PLAIN_ATTRS: &[Attr] = &[Attr::Stroke, Attr::LineWidth, Attr::Opacity];
const ELEMENT_ATTRS: &[Attr] = &[Attr::Stroke, Attr::LineWidth, Attr::Opacity, Attr::Label];
const FILLED_ATTRS: &[Attr] = &[Attr::Stroke, Attr::Fill, Attr::LineWidth, Attr::Opacity];
const FLOW_ATTRS: &[Attr] = &[
    Attr::Stroke,
    Attr::Fill,
    Attr::LineWidth,
    Attr::Opacity,
    Attr::LineStyle,
    Attr::FontSize,
    Attr::TextColor,
    Attr::Label,
];

/// The two-corner box family: rectangles and anything laid out in a box.
pub const BOX_DEFAULTS: Capabilities = Capabilities {
    tag: "rect",
    standalone: false,
    attributes: RECT_ATTRS,
    requires: &[],
    bounding_box: anchor_bounds,
    hit_test: rectangle::hit_rect,
    translate: translate_points,
    resize: resize_box,
    handles: box_handles,
    on_create_start: start_at,
    on_create_drag: drag_second_anchor,
    on_next_step: single_step,
    render: rectangle::render_rect,
    serialize: rectangle::serialize_rect,
};

/// Two endpoints with start, end and center handles.
pub const SEGMENT_DEFAULTS: Capabilities = Capabilities {
    tag: "line",
    attributes: STROKE_ATTRS,
    hit_test: line::hit_line,
    resize: resize_segment,
    handles: segment_handles,
    render: line::render_line,
    serialize: line::serialize_line,
    ..BOX_DEFAULTS
};

static LINE: Capabilities = SEGMENT_DEFAULTS;

static RECT: Capabilities = BOX_DEFAULTS;

static ELLIPSE: Capabilities = Capabilities {
    tag: "ellipse",
    attributes: CLOSED_ATTRS,
    hit_test: circle::hit_ellipse,
    render: circle::render_ellipse,
    serialize: circle::serialize_ellipse,
    ..BOX_DEFAULTS
};

static CIRCLE: Capabilities = Capabilities {
    tag: "circle",
    attributes: CLOSED_ATTRS,
    bounding_box: circle::circle_bounds,
    hit_test: circle::hit_circle,
    resize: circle::resize_circle,
    handles: circle::circle_handles,
    render: circle::render_circle,
    serialize: circle::serialize_circle,
    ..BOX_DEFAULTS
};

static TRIANGLE: Capabilities = Capabilities {
    tag: "triangle",
    attributes: CLOSED_ATTRS,
    bounding_box: triangle::triangle_bounds,
    hit_test: triangle::hit_triangle,
    resize: triangle::resize_triangle,
    handles: triangle::triangle_handles,
    on_create_drag: triangle::drag_triangle,
    on_next_step: triangle::needs_apex,
    render: triangle::render_triangle,
    serialize: triangle::serialize_triangle,
    ..BOX_DEFAULTS
};

static DIAMOND: Capabilities = Capabilities {
    tag: "diamond",
    attributes: CLOSED_ATTRS,
    hit_test: rectangle::hit_diamond,
    render: rectangle::render_diamond,
    serialize: rectangle::serialize_diamond,
    ..BOX_DEFAULTS
};

static POLYGON: Capabilities = Capabilities {
    tag: "polygon",
    attributes: POLYGON_ATTRS,
    hit_test: polygon::hit_polygon,
    render: polygon::render_polygon,
    serialize: polygon::serialize_polygon,
    ..BOX_DEFAULTS
};

static STAR: Capabilities = Capabilities {
    tag: "star",
    attributes: STAR_ATTRS,
    hit_test: polygon::hit_star,
    render: polygon::render_star,
    serialize: polygon::serialize_star,
    ..BOX_DEFAULTS
};

static TEXT: Capabilities = Capabilities {
    tag: "text",
    standalone: true,
    attributes: TEXT_ATTRS,
    bounding_box: text::text_bounds,
    hit_test: text::hit_text,
    resize: text::resize_text,
    handles: text::text_handles,
    on_create_drag: text::drag_text,
    render: text::render_text,
    serialize: text::serialize_text,
    ..BOX_DEFAULTS
};

static CURVE: Capabilities = Capabilities {
    tag: "curve",
    attributes: STROKE_ATTRS,
    bounding_box: curve::curve_bounds,
    hit_test: curve::hit_curve,
    resize: curve::resize_curve,
    handles: curve::curve_handles,
    on_create_drag: curve::drag_curve,
    on_next_step: curve::needs_control,
    render: curve::render_curve,
    serialize: curve::serialize_curve,
    ..BOX_DEFAULTS
};

static ARC: Capabilities = Capabilities {
    tag: "arc",
    attributes: STROKE_ATTRS,
    bounding_box: arc::arc_bounds,
    hit_test: arc::hit_arc,
    resize: arc::resize_arc,
    handles: arc::arc_handles,
    on_create_drag: arc::drag_arc,
    render: arc::render_arc,
    serialize: arc::serialize_arc,
    ..BOX_DEFAULTS
};

static WAVE: Capabilities = Capabilities {
    tag: "wave",
    attributes: WAVE_ATTRS,
    hit_test: wave::hit_wave,
    render: wave::render_wave,
    serialize: wave::serialize_wave,
    ..BOX_DEFAULTS
};

static GRID: Capabilities = Capabilities {
    tag: "grid",
    standalone: true,
    attributes: GRID_ATTRS,
    hit_test: hit_bounds,
    resize: grid::resize_grid,
    render: grid::render_grid,
    serialize: grid::serialize_grid,
    ..BOX_DEFAULTS
};

static AXES: Capabilities = Capabilities {
    tag: "axes",
    standalone: true,
    attributes: PLAIN_ATTRS,
    hit_test: grid::hit_axes,
    render: grid::render_axes,
    serialize: grid::serialize_axes,
    ..BOX_DEFAULTS
};

const ELEMENT_DEFAULTS: Capabilities = Capabilities {
    tag: "resistor",
    attributes: ELEMENT_ATTRS,
    requires: CIRCUITIKZ,
    bounding_box: circuit::symbol_bounds,
    hit_test: circuit::hit_symbol,
    render: circuit::render_element,
    serialize: circuit::serialize_element,
    ..SEGMENT_DEFAULTS
};

static RESISTOR: Capabilities = ELEMENT_DEFAULTS;

static CAPACITOR: Capabilities = Capabilities {
    tag: "capacitor",
    ..ELEMENT_DEFAULTS
};

static INDUCTOR: Capabilities = Capabilities {
    tag: "inductor",
    ..ELEMENT_DEFAULTS
};

static DIODE: Capabilities = Capabilities {
    tag: "diode",
    ..ELEMENT_DEFAULTS
};

static BATTERY: Capabilities = Capabilities {
    tag: "battery",
    ..ELEMENT_DEFAULTS
};

static SWITCH: Capabilities = Capabilities {
    tag: "switch",
    ..ELEMENT_DEFAULTS
};

static LAMP: Capabilities = Capabilities {
    tag: "lamp",
    ..ELEMENT_DEFAULTS
};

static GROUND: Capabilities = Capabilities {
    tag: "ground",
    attributes: PLAIN_ATTRS,
    requires: CIRCUITIKZ,
    bounding_box: circuit::symbol_bounds,
    hit_test: circuit::hit_ground,
    render: circuit::render_ground,
    serialize: circuit::serialize_ground,
    ..SEGMENT_DEFAULTS
};

static LENS: Capabilities = Capabilities {
    tag: "lens",
    standalone: true,
    attributes: FILLED_ATTRS,
    bounding_box: optics::lens_bounds,
    hit_test: optics::hit_lens,
    render: optics::render_lens,
    serialize: optics::serialize_lens,
    ..SEGMENT_DEFAULTS
};

static MIRROR: Capabilities = Capabilities {
    tag: "mirror",
    standalone: true,
    attributes: PLAIN_ATTRS,
    bounding_box: optics::mirror_bounds,
    hit_test: optics::hit_mirror,
    render: optics::render_mirror,
    serialize: optics::serialize_mirror,
    ..SEGMENT_DEFAULTS
};

const GATE_DEFAULTS: Capabilities = Capabilities {
    tag: "logic_and",
    standalone: true,
    attributes: FILLED_ATTRS,
    requires: CIRCUITIKZ,
    hit_test: hit_bounds,
    render: logic::render_gate,
    serialize: logic::serialize_gate,
    ..BOX_DEFAULTS
};

static LOGIC_AND: Capabilities = GATE_DEFAULTS;

static LOGIC_OR: Capabilities = Capabilities {
    tag: "logic_or",
    ..GATE_DEFAULTS
};

static LOGIC_NOT: Capabilities = Capabilities {
    tag: "logic_not",
    ..GATE_DEFAULTS
};

static LOGIC_NAND: Capabilities = Capabilities {
    tag: "logic_nand",
    ..GATE_DEFAULTS
};

static LOGIC_NOR: Capabilities = Capabilities {
    tag: "logic_nor",
    ..GATE_DEFAULTS
};

static LOGIC_XOR: Capabilities = Capabilities {
    tag: "logic_xor",
    ..GATE_DEFAULTS
};

const FLOW_DEFAULTS: Capabilities = Capabilities {
    tag: "flow_process",
    standalone: true,
    attributes: FLOW_ATTRS,
    hit_test: hit_bounds,
    render: flowchart::render_node,
    serialize: flowchart::serialize_node,
    ..BOX_DEFAULTS
};

static FLOW_PROCESS: Capabilities = FLOW_DEFAULTS;

static FLOW_DECISION: Capabilities = Capabilities {
    tag: "flow_decision",
    requires: SHAPES_GEOMETRIC,
    ..FLOW_DEFAULTS
};

static FLOW_TERMINAL: Capabilities = Capabilities {
    tag: "flow_terminal",
    ..FLOW_DEFAULTS
};

static FLOW_IO: Capabilities = Capabilities {
    tag: "flow_io",
    requires: SHAPES_GEOMETRIC,
    ..FLOW_DEFAULTS
};

/// Capability set of a kind.
pub fn capabilities(kind: ShapeKind) -> &'static Capabilities {
    match kind {
        ShapeKind::Line => &LINE,
        ShapeKind::Rect => &RECT,
        ShapeKind::Ellipse => &ELLIPSE,
        ShapeKind::Circle => &CIRCLE,
        ShapeKind::Triangle => &TRIANGLE,
        ShapeKind::Diamond => &DIAMOND,
        ShapeKind::Polygon => &POLYGON,
        ShapeKind::Star => &STAR,
        ShapeKind::Text => &TEXT,
        ShapeKind::Curve => &CURVE,
        ShapeKind::Arc => &ARC,
        ShapeKind::Wave => &WAVE,
        ShapeKind::Grid => &GRID,
        ShapeKind::Axes => &AXES,
        ShapeKind::Resistor => &RESISTOR,
        ShapeKind::Capacitor => &CAPACITOR,
        ShapeKind::Inductor => &INDUCTOR,
        ShapeKind::Diode => &DIODE,
        ShapeKind::Battery => &BATTERY,
        ShapeKind::Switch => &SWITCH,
        ShapeKind::Lamp => &LAMP,
        ShapeKind::Ground => &GROUND,
        ShapeKind::Lens => &LENS,
        ShapeKind::Mirror => &MIRROR,
        ShapeKind::LogicAnd => &LOGIC_AND,
        ShapeKind::LogicOr => &LOGIC_OR,
        ShapeKind::LogicNot => &LOGIC_NOT,
        ShapeKind::LogicNand => &LOGIC_NAND,
        ShapeKind::LogicNor => &LOGIC_NOR,
        ShapeKind::LogicXor => &LOGIC_XOR,
        ShapeKind::FlowProcess => &FLOW_PROCESS,
        ShapeKind::FlowDecision => &FLOW_DECISION,
        ShapeKind::FlowTerminal => &FLOW_TERMINAL,
        ShapeKind::FlowIo => &FLOW_IO,
    }
}
