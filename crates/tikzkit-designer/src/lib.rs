//! # tikzkit Designer
//!
//! Shape editing and TikZ export for a 2D figure editor.
//!
//! ## Core Components
//!
//! - **Style**: declared attributes with domains, defaults and option tokens
//! - **Model**: the closed set of shape kinds and the shape record
//! - **Registry**: one capability table per kind, built from shared defaults
//! - **Hit testing and handles**: selection and resize by named handle
//! - **Creation**: the multi-step pointer protocol for new shapes
//! - **TikZ**: serialization of shapes into drawing commands
//! - **Canvas**: the ordered shape collection
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tikzkit_designer::{Canvas, ShapeKind, Style};
//! use tikzkit_core::Point;
//!
//! let mut canvas = Canvas::new();
//! let mut creation = canvas.begin(ShapeKind::Line, Point::new(0.0, 0.0), &Style::new());
//! creation.drag(Point::new(80.0, 0.0))?;
//! creation.release();
//! canvas.commit(creation)?;
//! let picture = canvas.export_picture()?;
//! ```

pub mod canvas;
pub mod creation;
pub mod handles;
pub mod hit_test;
pub mod model;
pub mod registry;
pub mod style;
pub mod tikz;

pub use canvas::Canvas;
pub use creation::{Creation, CreationState};
pub use hit_test::{hit_test, hit_test_with};
pub use model::{
    Cursor, Geometry, Handle, HandleId, Rendering, Shape, ShapeKind, TextRun,
};
pub use registry::{capabilities, Capabilities, Requirement};
pub use style::{option_clause, Attr, Style, StyleValue};
