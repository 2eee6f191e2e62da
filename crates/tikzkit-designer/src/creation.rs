//! Interactive shape creation.
//!
//! A [`Creation`] drives the pointer protocol for one new shape: `begin` on
//! pointer-down, `drag` on every pointer-move, `release` on pointer-up and
//! `finish` once the caller wants the finished record. Kinds that need more
//! than one drag (triangle, curve) report [`CreationState::NeedsMore`] from
//! `release` until every step has been placed, and `finish` refuses to
//! hand out an incomplete shape.

use tikzkit_core::{Point, ShapeError};

use crate::model::{Shape, ShapeKind};
use crate::style::Style;

/// Upper bound on the steps any kind may ask for.
const MAX_STEPS: usize = 8;

/// Outcome of a pointer release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationState {
    /// Another drag is needed before the shape is complete.
    NeedsMore,
    /// The shape is complete and can be finished.
    Ready,
}

/// A shape under construction.
#[derive(Debug, Clone)]
pub struct Creation {
    shape: Shape,
    step: usize,
    moved: bool,
    complete: bool,
}

impl Creation {
    /// Starts a shape of `kind` at `at` with a copy of the current style.
    pub fn begin(kind: ShapeKind, at: Point, style: &Style) -> Self {
        let mut shape = Shape::new(kind, at, style);
        (shape.capabilities().on_create_start)(&mut shape, at);
        tracing::debug!(kind = %kind, x = at.x, y = at.y, "Creation started");
        Self {
            shape,
            step: 0,
            moved: false,
            complete: false,
        }
    }

    /// Live update for the current step. Fails once every step is placed.
    pub fn drag(&mut self, at: Point) -> Result<(), ShapeError> {
        if self.complete {
            return Err(ShapeError::CreationFinished);
        }
        (self.shape.capabilities().on_create_drag)(&mut self.shape, at, self.step);
        self.moved = true;
        Ok(())
    }

    /// Ends the current step.
    ///
    /// The first step counts as placed even without movement (a click). Later
    /// steps only count once the pointer has moved during them.
    pub fn release(&mut self) -> CreationState {
        if self.complete {
            return CreationState::Ready;
        }
        if self.step > 0 && !self.moved {
            return CreationState::NeedsMore;
        }
        if (self.shape.capabilities().on_next_step)(&self.shape, self.step) {
            self.step += 1;
            self.moved = false;
            tracing::debug!(kind = %self.shape.kind(), step = self.step, "Creation needs another step");
            CreationState::NeedsMore
        } else {
            self.complete = true;
            CreationState::Ready
        }
    }

    /// Hands out the finished shape.
    ///
    /// A pending final step whose drag has already moved the pointer counts
    /// as placed, so callers may finish without a trailing `release`.
    pub fn finish(self) -> Result<Shape, ShapeError> {
        let next_step = self.shape.capabilities().on_next_step;
        let placed = self.step == 0 || self.moved;
        if self.complete || (placed && !next_step(&self.shape, self.step)) {
            tracing::debug!(kind = %self.shape.kind(), steps = self.step + 1, "Creation finished");
            return Ok(self.shape);
        }
        let required = required_steps(&self.shape);
        tracing::warn!(
            kind = %self.shape.kind(),
            step = self.step,
            required,
            "Refusing to finish incomplete shape"
        );
        Err(ShapeError::IncompleteCreation {
            kind: self.shape.kind().tag().to_string(),
            step: self.step,
            required,
        })
    }

    /// Abandons the creation.
    pub fn cancel(self) {
        tracing::debug!(kind = %self.shape.kind(), step = self.step, "Creation cancelled");
    }

    /// The shape as currently placed, for live rendering.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Index of the step being placed.
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

/// Number of drags a kind needs, counting the first.
pub fn required_steps(shape: &Shape) -> usize {
    let next_step = shape.capabilities().on_next_step;
    let mut steps = 1;
    while steps < MAX_STEPS && next_step(shape, steps - 1) {
        steps += 1;
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Geometry;

    #[test]
    fn test_single_step_kind() {
        let mut creation = Creation::begin(ShapeKind::Rect, Point::new(0.0, 0.0), &Style::new());
        creation.drag(Point::new(40.0, 20.0)).unwrap();
        assert_eq!(creation.release(), CreationState::Ready);
        let rect = creation.finish().unwrap();
        assert_eq!(rect.p2, Point::new(40.0, 20.0));
    }

    #[test]
    fn test_click_finishes_single_step_kind() {
        let creation = Creation::begin(ShapeKind::Text, Point::new(5.0, 5.0), &Style::new());
        assert!(creation.finish().is_ok());
    }

    #[test]
    fn test_triangle_needs_two_steps() {
        let mut creation =
            Creation::begin(ShapeKind::Triangle, Point::new(0.0, 0.0), &Style::new());
        creation.drag(Point::new(80.0, 0.0)).unwrap();
        assert_eq!(creation.release(), CreationState::NeedsMore);
        assert_eq!(creation.step(), 1);
        // releasing again without moving does not place the apex
        assert_eq!(creation.release(), CreationState::NeedsMore);
        creation.drag(Point::new(40.0, -60.0)).unwrap();
        assert_eq!(creation.release(), CreationState::Ready);
        let triangle = creation.finish().unwrap();
        assert_eq!(*triangle.geometry(), Geometry::Triangle { p3: Point::new(40.0, -60.0) });
    }

    #[test]
    fn test_triangle_cannot_finish_after_one_drag() {
        let mut creation =
            Creation::begin(ShapeKind::Triangle, Point::new(0.0, 0.0), &Style::new());
        creation.drag(Point::new(80.0, 0.0)).unwrap();
        assert_eq!(
            creation.clone().finish(),
            Err(ShapeError::IncompleteCreation {
                kind: "triangle".to_string(),
                step: 0,
                required: 2,
            })
        );
        creation.release();
        assert!(matches!(
            creation.finish(),
            Err(ShapeError::IncompleteCreation { step: 1, .. })
        ));
    }

    #[test]
    fn test_required_steps() {
        let style = Style::new();
        let steps = |kind| required_steps(&Shape::new(kind, Point::default(), &style));
        assert_eq!(steps(ShapeKind::Line), 1);
        assert_eq!(steps(ShapeKind::Triangle), 2);
        assert_eq!(steps(ShapeKind::Curve), 3);
    }

    #[test]
    fn test_drag_after_completion_fails() {
        let mut creation = Creation::begin(ShapeKind::Line, Point::new(0.0, 0.0), &Style::new());
        creation.drag(Point::new(10.0, 0.0)).unwrap();
        creation.release();
        assert_eq!(
            creation.drag(Point::new(99.0, 99.0)),
            Err(ShapeError::CreationFinished)
        );
        assert_eq!(creation.shape().p2, Point::new(10.0, 0.0));
        assert!(creation.finish().is_ok());
    }
}
