//! Error handling for tikzkit
//!
//! The interactive operations (hit testing, bounding boxes, resize, export)
//! never fail; these types cover the boundary operations:
//! - Shape errors (unknown kinds, unfinished creation, mismatched geometry)
//! - Style errors (strict attribute edits)
//! - Transform errors (invalid scale or coordinates)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Shape lifecycle error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// The kind tag is not part of the registry
    #[error("Unknown shape kind: {tag}")]
    UnknownKind {
        /// The rejected tag.
        tag: String,
    },

    /// A multi-step shape was finalized before all steps were placed
    #[error("Shape '{kind}' is incomplete: step {step} of {required}")]
    IncompleteCreation {
        /// Kind tag of the shape under construction.
        kind: String,
        /// The step the creation stopped at.
        step: usize,
        /// Number of steps the kind needs.
        required: usize,
    },

    /// The creation was already finalized
    #[error("Creation already finished")]
    CreationFinished,

    /// A kind-specific payload does not belong to the shape's kind
    #[error("Shape '{kind}' cannot hold {geometry} geometry")]
    GeometryMismatch {
        /// Kind tag of the shape.
        kind: String,
        /// Name of the rejected payload.
        geometry: String,
    },

    /// No shape with that id exists in the collection
    #[error("Shape {id} not found")]
    NotFound {
        /// The missing id.
        id: u64,
    },
}

/// Style attribute error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    /// The attribute name is not declared
    #[error("Unknown style attribute: {name}")]
    UnknownAttribute {
        /// The rejected name.
        name: String,
    },

    /// The value does not fit the attribute's domain type
    #[error("Style attribute '{name}' expects {expected}")]
    TypeMismatch {
        /// Attribute name.
        name: String,
        /// Human readable domain description.
        expected: String,
    },

    /// The value lies outside the attribute's domain
    #[error("Value {value} out of range for style attribute '{name}'")]
    OutOfDomain {
        /// Attribute name.
        name: String,
        /// The rejected value, rendered as text.
        value: String,
    },

    /// The attribute does not apply to the shape's kind
    #[error("Style attribute '{name}' does not apply to '{kind}'")]
    NotApplicable {
        /// Attribute name.
        name: String,
        /// Kind tag.
        kind: String,
    },
}

/// Coordinate transform error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// Scale must be strictly positive and finite
    #[error("Scale must be positive, got {scale}")]
    NonPositiveScale {
        /// The rejected scale.
        scale: f64,
    },

    /// Surface height must be finite
    #[error("Surface height must be finite, got {height}")]
    NonFiniteHeight {
        /// The rejected height.
        height: f64,
    },
}

/// Main error type for tikzkit
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Shape error
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// Style error
    #[error(transparent)]
    Style(#[from] StyleError),

    /// Transform error
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a shape error
    pub fn is_shape_error(&self) -> bool {
        matches!(self, Error::Shape(_))
    }

    /// Check if this is a style error
    pub fn is_style_error(&self) -> bool {
        matches!(self, Error::Style(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
