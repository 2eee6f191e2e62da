//! Ordered shape collection.
//!
//! Shapes are kept in draw order: the last shape is drawn on top and wins
//! hit tests. Ids are handed out in increasing order and never reused.

use tikzkit_core::{CoordinateTransform, Point, ShapeError, TransformError};
use tikzkit_settings::{Config, EditorSettings, ExportSettings};

use crate::creation::Creation;
use crate::handles::handle_at;
use crate::hit_test::{hit_test_with, tolerance};
use crate::model::{Handle, HandleId, Shape, ShapeKind};
use crate::style::Style;
use crate::tikz;

/// The drawing: shapes in draw order plus the settings they are edited
/// and exported with.
#[derive(Debug, Clone)]
pub struct Canvas {
    shapes: Vec<Shape>,
    next_id: u64,
    export: ExportSettings,
    editor: EditorSettings,
    transform: CoordinateTransform,
}

impl Default for Canvas {
    fn default() -> Self {
        let export = ExportSettings::default();
        let transform = export.transform().unwrap_or_default();
        Self {
            shapes: Vec::new(),
            next_id: 1,
            export,
            editor: EditorSettings::default(),
            transform,
        }
    }
}

impl Canvas {
    /// Creates an empty canvas with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty canvas from a loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, TransformError> {
        Ok(Self {
            transform: config.export.transform()?,
            export: config.export.clone(),
            editor: config.editor.clone(),
            ..Self::default()
        })
    }

    pub fn export_settings(&self) -> &ExportSettings {
        &self.export
    }

    /// Replaces the export settings; the transform follows them.
    pub fn set_export_settings(&mut self, export: ExportSettings) -> Result<(), TransformError> {
        self.transform = export.transform()?;
        self.export = export;
        Ok(())
    }

    pub fn editor_settings(&self) -> &EditorSettings {
        &self.editor
    }

    pub fn set_editor_settings(&mut self, editor: EditorSettings) {
        self.editor = editor;
    }

    pub fn transform(&self) -> &CoordinateTransform {
        &self.transform
    }

    /// Snaps a pixel point to whole output units when grid snapping is on.
    pub fn snap(&self, p: Point) -> Point {
        if !self.editor.grid_snap {
            return p;
        }
        let unit = self.transform.scale();
        Point::new((p.x / unit).round() * unit, (p.y / unit).round() * unit)
    }

    /// Starts creating a shape; commit it with [`Canvas::commit`].
    pub fn begin(&self, kind: ShapeKind, at: Point, style: &Style) -> Creation {
        Creation::begin(kind, self.snap(at), style)
    }

    /// Finishes a creation and adds the shape on top.
    pub fn commit(&mut self, creation: Creation) -> Result<u64, ShapeError> {
        let shape = creation.finish()?;
        Ok(self.add(shape))
    }

    /// Adds a shape on top and returns its new id.
    pub fn add(&mut self, mut shape: Shape) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        shape.id = id;
        tracing::debug!(id, kind = %shape.kind(), "Shape added");
        self.shapes.push(shape);
        id
    }

    pub fn remove(&mut self, id: u64) -> Result<Shape, ShapeError> {
        let index = self.index_of(id)?;
        let shape = self.shapes.remove(index);
        tracing::debug!(id, kind = %shape.kind(), "Shape removed");
        Ok(shape)
    }

    pub fn clear(&mut self) {
        tracing::debug!(count = self.shapes.len(), "Canvas cleared");
        self.shapes.clear();
    }

    pub fn get(&self, id: u64) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    /// Shapes in draw order, bottom first.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn ids(&self) -> Vec<u64> {
        self.shapes.iter().map(|s| s.id).collect()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    fn index_of(&self, id: u64) -> Result<usize, ShapeError> {
        self.shapes
            .iter()
            .position(|s| s.id == id)
            .ok_or(ShapeError::NotFound { id })
    }

    fn get_mut_or_err(&mut self, id: u64) -> Result<&mut Shape, ShapeError> {
        self.get_mut(id).ok_or(ShapeError::NotFound { id })
    }

    /// Topmost shape under `p`.
    pub fn shape_at(&self, p: Point) -> Option<u64> {
        self.shapes
            .iter()
            .rev()
            .find(|s| hit_test_with(s, p, self.editor.hit_tolerance, self.editor.handle_radius))
            .map(|s| s.id)
    }

    /// Handle of shape `id` under `p`.
    pub fn handle_at(&self, id: u64, p: Point) -> Option<Handle> {
        let shape = self.get(id)?;
        let radius = self.editor.handle_radius.max(tolerance(shape, self.editor.hit_tolerance));
        handle_at(shape, p, radius)
    }

    /// Moves a shape one place up in draw order.
    pub fn raise(&mut self, id: u64) -> Result<(), ShapeError> {
        let index = self.index_of(id)?;
        if index + 1 < self.shapes.len() {
            self.shapes.swap(index, index + 1);
            tracing::debug!(id, "Shape raised");
        }
        Ok(())
    }

    /// Moves a shape one place down in draw order.
    pub fn lower(&mut self, id: u64) -> Result<(), ShapeError> {
        let index = self.index_of(id)?;
        if index > 0 {
            self.shapes.swap(index, index - 1);
            tracing::debug!(id, "Shape lowered");
        }
        Ok(())
    }

    pub fn bring_to_front(&mut self, id: u64) -> Result<(), ShapeError> {
        let index = self.index_of(id)?;
        let shape = self.shapes.remove(index);
        self.shapes.push(shape);
        tracing::debug!(id, "Shape brought to front");
        Ok(())
    }

    pub fn send_to_back(&mut self, id: u64) -> Result<(), ShapeError> {
        let index = self.index_of(id)?;
        let shape = self.shapes.remove(index);
        self.shapes.insert(0, shape);
        tracing::debug!(id, "Shape sent to back");
        Ok(())
    }

    pub fn translate(&mut self, id: u64, dx: f64, dy: f64) -> Result<(), ShapeError> {
        self.get_mut_or_err(id)?.translate(dx, dy);
        Ok(())
    }

    /// Drags one handle of shape `id` to `to`.
    pub fn resize(&mut self, id: u64, handle: HandleId, to: Point) -> Result<(), ShapeError> {
        let to = self.snap(to);
        let transform = self.transform;
        self.get_mut_or_err(id)?.resize(handle, to, &transform);
        Ok(())
    }

    /// Copies shape `id` on top, offset by a delta. The copy owns its style.
    pub fn duplicate(&mut self, id: u64, dx: f64, dy: f64) -> Result<u64, ShapeError> {
        let mut copy = self.get(id).cloned().ok_or(ShapeError::NotFound { id })?;
        copy.translate(dx, dy);
        Ok(self.add(copy))
    }

    /// One command per shape, in draw order.
    pub fn export(&self) -> Vec<String> {
        tikz::export(&self.shapes, &self.transform)
    }

    /// The whole drawing as a `tikzpicture` following the export settings.
    pub fn export_picture(&self) -> Result<String, TransformError> {
        tikz::export_picture(&self.shapes, &self.export)
    }
}
