//! Style attributes and their TikZ option projection.
//!
//! Every attribute carries a declared default, a value domain and a
//! projection rule to an option token. The projection returns `None` when
//! the value is the neutral default, so a shape with an untouched style
//! exports an empty option clause.
//!
//! The [`Attr`] enum is declared in option clause order; [`Style`] keeps its
//! values in a `BTreeMap`, so iterating a style yields tokens in that order.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tikzkit_core::{format_number, StyleError};

/// Colors accepted by the color pickers. Any other non-empty literal (hex
/// or xcolor expression) is passed through unchanged.
pub const NAMED_COLORS: &[&str] = &[
    "black", "white", "red", "green", "blue", "cyan", "magenta", "yellow", "gray", "darkgray",
    "lightgray", "brown", "lime", "olive", "orange", "pink", "purple", "teal", "violet", "none",
];

const LINE_STYLES: &[&str] = &["solid", "dashed", "dotted", "dash dot", "densely dashed"];
const ARROWS: &[&str] = &["none", "->", "<-", "<->", "-stealth", "stealth-stealth"];
const FONT_SIZES: &[&str] = &["tiny", "small", "normalsize", "large", "Large", "huge"];
const WAVE_TYPES: &[&str] = &["sine", "square", "triangle", "sawtooth"];

/// TikZ points per pixel of line width.
const LINE_WIDTH_PT_PER_PX: f64 = 0.4;

const EPSILON: f64 = 1e-9;

/// A style attribute. Variant order is the option clause order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Attr {
    Stroke,
    Fill,
    LineWidth,
    Opacity,
    LineStyle,
    Arrow,
    Rounded,
    FontSize,
    TextColor,
    Rotation,
    Label,
    PolySides,
    StarPoints,
    StarRatio,
    WaveType,
    WaveCycles,
    GridStep,
}

impl Attr {
    pub const ALL: [Attr; 17] = [
        Attr::Stroke,
        Attr::Fill,
        Attr::LineWidth,
        Attr::Opacity,
        Attr::LineStyle,
        Attr::Arrow,
        Attr::Rounded,
        Attr::FontSize,
        Attr::TextColor,
        Attr::Rotation,
        Attr::Label,
        Attr::PolySides,
        Attr::StarPoints,
        Attr::StarRatio,
        Attr::WaveType,
        Attr::WaveCycles,
        Attr::GridStep,
    ];

    /// Declared attribute table entry.
    pub fn spec(&self) -> &'static AttrSpec {
        &ATTRIBUTES[*self as usize]
    }

    pub fn name(&self) -> &'static str {
        self.spec().name
    }

    /// Looks an attribute up by its public name.
    pub fn from_name(name: &str) -> Option<Attr> {
        Attr::ALL.iter().copied().find(|a| a.name() == name)
    }

    pub fn default_value(&self) -> StyleValue {
        self.spec().default.to_value()
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value domain of an attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Domain {
    /// Named color or literal color expression.
    Color,
    /// Inclusive numeric range snapped to `step`.
    Range { min: f64, max: f64, step: f64 },
    /// One of a fixed set of options.
    Choice(&'static [&'static str]),
    Flag,
    /// Free text.
    Text,
}

impl Domain {
    fn describe(&self) -> String {
        match self {
            Domain::Color => "a color".to_string(),
            Domain::Range { min, max, .. } => format!("a number in {}..{}", min, max),
            Domain::Choice(options) => format!("one of {}", options.join(", ")),
            Domain::Flag => "a boolean".to_string(),
            Domain::Text => "text".to_string(),
        }
    }
}

/// A stored style value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl StyleValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) => Some(*n),
            StyleValue::Text(s) => s.trim().parse().ok(),
            StyleValue::Flag(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StyleValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            StyleValue::Flag(b) => Some(*b),
            StyleValue::Text(s) => match s.as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            StyleValue::Number(_) => None,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Flag(b) => write!(f, "{}", b),
            StyleValue::Number(n) => write!(f, "{}", n),
            StyleValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<bool> for StyleValue {
    fn from(value: bool) -> Self {
        StyleValue::Flag(value)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

/// Default value in the static attribute table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Flag(bool),
    Number(f64),
    Text(&'static str),
}

impl DefaultValue {
    pub fn to_value(self) -> StyleValue {
        match self {
            DefaultValue::Flag(b) => StyleValue::Flag(b),
            DefaultValue::Number(n) => StyleValue::Number(n),
            DefaultValue::Text(s) => StyleValue::Text(s.to_string()),
        }
    }
}

/// One row of the attribute table.
#[derive(Debug, Clone, Copy)]
pub struct AttrSpec {
    pub attr: Attr,
    pub name: &'static str,
    pub default: DefaultValue,
    pub domain: Domain,
    /// Option token for a value, `None` when nothing is emitted.
    pub project: fn(&StyleValue) -> Option<String>,
}

fn no_token(_: &StyleValue) -> Option<String> {
    None
}

fn text_unless(value: &StyleValue, neutral: &str) -> Option<String> {
    match value.as_text() {
        Some(s) if !s.is_empty() && s != neutral => Some(s.to_string()),
        _ => None,
    }
}

fn number_unless(value: &StyleValue, neutral: f64) -> Option<f64> {
    match value.as_number() {
        Some(n) if (n - neutral).abs() > EPSILON => Some(n),
        _ => None,
    }
}

fn project_stroke(value: &StyleValue) -> Option<String> {
    text_unless(value, "black").map(|c| format!("draw={}", c))
}

fn project_fill(value: &StyleValue) -> Option<String> {
    text_unless(value, "none").map(|c| format!("fill={}", c))
}

fn project_line_width(value: &StyleValue) -> Option<String> {
    number_unless(value, 1.0)
        .map(|w| format!("line width={}pt", format_number(w * LINE_WIDTH_PT_PER_PX)))
}

fn project_opacity(value: &StyleValue) -> Option<String> {
    number_unless(value, 1.0).map(|o| format!("opacity={}", format_number(o)))
}

fn project_line_style(value: &StyleValue) -> Option<String> {
    text_unless(value, "solid")
}

fn project_arrow(value: &StyleValue) -> Option<String> {
    text_unless(value, "none")
}

fn project_rounded(value: &StyleValue) -> Option<String> {
    match value.as_flag() {
        Some(true) => Some("rounded corners".to_string()),
        _ => None,
    }
}

fn project_font_size(value: &StyleValue) -> Option<String> {
    text_unless(value, "normalsize").map(|s| format!("font=\\{}", s))
}

fn project_text_color(value: &StyleValue) -> Option<String> {
    text_unless(value, "black").map(|c| format!("text={}", c))
}

fn project_rotation(value: &StyleValue) -> Option<String> {
    number_unless(value, 0.0).map(|r| format!("rotate={}", format_number(r)))
}

fn project_grid_step(value: &StyleValue) -> Option<String> {
    number_unless(value, 1.0).map(|s| format!("step={}", format_number(s)))
}

/// The attribute table, indexed by `Attr as usize`.
pub static ATTRIBUTES: [AttrSpec; 17] = [
    AttrSpec {
        attr: Attr::Stroke,
        name: "stroke",
        default: DefaultValue::Text("black"),
        domain: Domain::Color,
        project: project_stroke,
    },
    AttrSpec {
        attr: Attr::Fill,
        name: "fill",
        default: DefaultValue::Text("none"),
        domain: Domain::Color,
        project: project_fill,
    },
    AttrSpec {
        attr: Attr::LineWidth,
        name: "lineWidth",
        default: DefaultValue::Number(1.0),
        domain: Domain::Range {
            min: 0.1,
            max: 10.0,
            step: 0.1,
        },
        project: project_line_width,
    },
    AttrSpec {
        attr: Attr::Opacity,
        name: "opacity",
        default: DefaultValue::Number(1.0),
        domain: Domain::Range {
            min: 0.0,
            max: 1.0,
            step: 0.05,
        },
        project: project_opacity,
    },
    AttrSpec {
        attr: Attr::LineStyle,
        name: "lineStyle",
        default: DefaultValue::Text("solid"),
        domain: Domain::Choice(LINE_STYLES),
        project: project_line_style,
    },
    AttrSpec {
        attr: Attr::Arrow,
        name: "arrow",
        default: DefaultValue::Text("none"),
        domain: Domain::Choice(ARROWS),
        project: project_arrow,
    },
    AttrSpec {
        attr: Attr::Rounded,
        name: "rounded",
        default: DefaultValue::Flag(false),
        domain: Domain::Flag,
        project: project_rounded,
    },
    AttrSpec {
        attr: Attr::FontSize,
        name: "fontSize",
        default: DefaultValue::Text("normalsize"),
        domain: Domain::Choice(FONT_SIZES),
        project: project_font_size,
    },
    AttrSpec {
        attr: Attr::TextColor,
        name: "textColor",
        default: DefaultValue::Text("black"),
        domain: Domain::Color,
        project: project_text_color,
    },
    AttrSpec {
        attr: Attr::Rotation,
        name: "rotation",
        default: DefaultValue::Number(0.0),
        domain: Domain::Range {
            min: -180.0,
            max: 180.0,
            step: 1.0,
        },
        project: project_rotation,
    },
    AttrSpec {
        attr: Attr::Label,
        name: "label",
        default: DefaultValue::Text(""),
        domain: Domain::Text,
        project: no_token,
    },
    AttrSpec {
        attr: Attr::PolySides,
        name: "polySides",
        default: DefaultValue::Number(5.0),
        domain: Domain::Range {
            min: 3.0,
            max: 12.0,
            step: 1.0,
        },
        project: no_token,
    },
    AttrSpec {
        attr: Attr::StarPoints,
        name: "starPoints",
        default: DefaultValue::Number(5.0),
        domain: Domain::Range {
            min: 3.0,
            max: 12.0,
            step: 1.0,
        },
        project: no_token,
    },
    AttrSpec {
        attr: Attr::StarRatio,
        name: "starRatio",
        default: DefaultValue::Number(0.5),
        domain: Domain::Range {
            min: 0.1,
            max: 0.9,
            step: 0.05,
        },
        project: no_token,
    },
    AttrSpec {
        attr: Attr::WaveType,
        name: "waveType",
        default: DefaultValue::Text("sine"),
        domain: Domain::Choice(WAVE_TYPES),
        project: no_token,
    },
    AttrSpec {
        attr: Attr::WaveCycles,
        name: "waveCycles",
        default: DefaultValue::Number(3.0),
        domain: Domain::Range {
            min: 1.0,
            max: 20.0,
            step: 1.0,
        },
        project: no_token,
    },
    AttrSpec {
        attr: Attr::GridStep,
        name: "gridStep",
        default: DefaultValue::Number(1.0),
        domain: Domain::Range {
            min: 0.1,
            max: 5.0,
            step: 0.1,
        },
        project: project_grid_step,
    },
];

fn snap_to_step(value: f64, min: f64, max: f64, step: f64) -> f64 {
    let clamped = value.clamp(min, max);
    let snapped = if step > 0.0 {
        min + ((clamped - min) / step).round() * step
    } else {
        clamped
    };
    // Strip float noise from the step multiplication.
    (snapped.clamp(min, max) * 1e6).round() / 1e6
}

/// Checks a value against the attribute's domain without coercion.
fn validate(attr: Attr, value: &StyleValue) -> Result<StyleValue, StyleError> {
    let spec = attr.spec();
    let mismatch = || StyleError::TypeMismatch {
        name: spec.name.to_string(),
        expected: spec.domain.describe(),
    };
    let out_of_domain = || StyleError::OutOfDomain {
        name: spec.name.to_string(),
        value: value.to_string(),
    };
    match spec.domain {
        Domain::Color => match value.as_text() {
            Some(c) if !c.trim().is_empty() => Ok(StyleValue::Text(c.trim().to_string())),
            Some(_) => Err(out_of_domain()),
            None => Err(mismatch()),
        },
        Domain::Range { min, max, step } => {
            let n = value.as_number().ok_or_else(mismatch)?;
            if !n.is_finite() || n < min - EPSILON || n > max + EPSILON {
                return Err(out_of_domain());
            }
            Ok(StyleValue::Number(snap_to_step(n, min, max, step)))
        }
        Domain::Choice(options) => match value.as_text() {
            Some(s) if options.contains(&s) => Ok(StyleValue::Text(s.to_string())),
            Some(_) => Err(out_of_domain()),
            None => Err(mismatch()),
        },
        Domain::Flag => value.as_flag().map(StyleValue::Flag).ok_or_else(mismatch),
        Domain::Text => Ok(StyleValue::Text(value.to_string())),
    }
}

/// Forces a value into the attribute's domain, falling back to the default.
fn coerce(attr: Attr, value: &StyleValue) -> StyleValue {
    match validate(attr, value) {
        Ok(v) => v,
        Err(err) => {
            let spec = attr.spec();
            let fallback = match (spec.domain, value.as_number()) {
                (Domain::Range { min, max, step }, Some(n)) if n.is_finite() => {
                    StyleValue::Number(snap_to_step(n, min, max, step))
                }
                _ => attr.default_value(),
            };
            tracing::warn!(attribute = spec.name, error = %err, fallback = %fallback, "Style value coerced");
            fallback
        }
    }
}

/// Kind a style belongs to and the attributes that kind declares.
#[derive(Debug, Clone, PartialEq)]
struct Scope {
    kind: &'static str,
    attributes: BTreeSet<Attr>,
}

/// Shape-owned attribute values.
///
/// A style built for a kind only holds and accepts the attributes that kind
/// declares; edits to any other attribute are rejected. An unscoped style
/// (a snapshot of the current editor choices) accepts every attribute.
/// Reads of an attribute that is not held answer the declared default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Style {
    values: BTreeMap<Attr, StyleValue>,
    #[serde(skip)]
    scope: Option<Scope>,
}

impl Style {
    /// An empty style, usable as a snapshot with no user choices.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot from name/value pairs. Unknown names are skipped.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<StyleValue>,
    {
        let mut style = Self::new();
        for (name, value) in pairs {
            style.set_by_name(name.as_ref(), value.into());
        }
        style
    }

    /// Builds the style of a `kind` shape. Every attribute in `attrs` is
    /// populated from the snapshot's value when present and the declared
    /// default otherwise; nothing else is kept.
    pub fn for_attributes(kind: &'static str, attrs: &[Attr], snapshot: &Style) -> Self {
        let values = attrs
            .iter()
            .map(|attr| {
                let value = match snapshot.values.get(attr) {
                    Some(v) => coerce(*attr, v),
                    None => attr.default_value(),
                };
                (*attr, value)
            })
            .collect();
        Self {
            values,
            scope: Some(Scope {
                kind,
                attributes: attrs.iter().copied().collect(),
            }),
        }
    }

    pub fn contains(&self, attr: Attr) -> bool {
        self.values.contains_key(&attr)
    }

    /// Whether edits to `attr` are accepted.
    pub fn declares(&self, attr: Attr) -> bool {
        self.scope
            .as_ref()
            .map_or(true, |scope| scope.attributes.contains(&attr))
    }

    /// Kind tag of the owning shape; `None` for a snapshot.
    pub fn kind(&self) -> Option<&'static str> {
        self.scope.as_ref().map(|scope| scope.kind)
    }

    fn check_declared(&self, attr: Attr) -> Result<(), StyleError> {
        match &self.scope {
            Some(scope) if !scope.attributes.contains(&attr) => Err(StyleError::NotApplicable {
                name: attr.name().to_string(),
                kind: scope.kind.to_string(),
            }),
            _ => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Attributes held, in clause order.
    pub fn attributes(&self) -> impl Iterator<Item = Attr> + '_ {
        self.values.keys().copied()
    }

    pub fn get(&self, attr: Attr) -> StyleValue {
        self.values
            .get(&attr)
            .cloned()
            .unwrap_or_else(|| attr.default_value())
    }

    pub fn number(&self, attr: Attr) -> f64 {
        self.values
            .get(&attr)
            .and_then(StyleValue::as_number)
            .or_else(|| attr.default_value().as_number())
            .unwrap_or(0.0)
    }

    pub fn text(&self, attr: Attr) -> String {
        match self.values.get(&attr).and_then(StyleValue::as_text) {
            Some(s) => s.to_string(),
            None => match attr.spec().default {
                DefaultValue::Text(s) => s.to_string(),
                _ => String::new(),
            },
        }
    }

    pub fn flag(&self, attr: Attr) -> bool {
        self.values
            .get(&attr)
            .and_then(StyleValue::as_flag)
            .unwrap_or(matches!(attr.spec().default, DefaultValue::Flag(true)))
    }

    /// Stores a value, coercing it into the attribute's domain. Attributes
    /// the owning kind does not declare are skipped.
    pub fn set(&mut self, attr: Attr, value: impl Into<StyleValue>) {
        if let Err(err) = self.check_declared(attr) {
            tracing::warn!(error = %err, "Style edit skipped");
            return;
        }
        let value = coerce(attr, &value.into());
        self.values.insert(attr, value);
    }

    /// Stores a value only if the attribute is declared and the value lies
    /// inside its domain.
    pub fn try_set(&mut self, attr: Attr, value: impl Into<StyleValue>) -> Result<(), StyleError> {
        self.check_declared(attr)?;
        let value = validate(attr, &value.into())?;
        self.values.insert(attr, value);
        Ok(())
    }

    /// Sets by public name. Unknown names are ignored; returns whether the
    /// name was recognized.
    pub fn set_by_name(&mut self, name: &str, value: StyleValue) -> bool {
        match Attr::from_name(name) {
            Some(attr) => {
                self.set(attr, value);
                true
            }
            None => {
                tracing::warn!(attribute = name, "Ignoring unknown style attribute");
                false
            }
        }
    }

    /// Strict [`Style::set_by_name`].
    pub fn try_set_by_name(
        &mut self,
        name: &str,
        value: impl Into<StyleValue>,
    ) -> Result<(), StyleError> {
        let attr = Attr::from_name(name).ok_or_else(|| StyleError::UnknownAttribute {
            name: name.to_string(),
        })?;
        self.try_set(attr, value)
    }

    /// Non-empty option tokens of the declared attributes, in clause order.
    pub fn option_tokens(&self) -> Vec<String> {
        self.values
            .iter()
            .filter(|(attr, _)| self.declares(**attr))
            .filter_map(|(attr, value)| (attr.spec().project)(value))
            .collect()
    }
}

/// Joins option tokens into `[a, b]`, or nothing when there are none.
pub fn option_clause<S: AsRef<str>>(tokens: &[S]) -> String {
    if tokens.is_empty() {
        String::new()
    } else {
        let joined: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
        format!("[{}]", joined.join(", "))
    }
}
