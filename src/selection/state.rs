//! Selection State
//! The active x/y field pair and the pure reducer that applies label clicks.

use crate::data::{Axis, Field, UnknownField};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    #[error(transparent)]
    UnknownField(#[from] UnknownField),
    #[error("Field `{field}` cannot be plotted on the {axis} axis")]
    WrongAxis { field: Field, axis: Axis },
    #[error("Axis label must name exactly one of an x field or a y field")]
    AmbiguousLabel,
    #[error(transparent)]
    Scale(#[from] crate::scale::ScaleError),
}

/// Visual state of an axis label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMark {
    Active,
    Inactive,
}

/// A click on one of the axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelClick {
    axis: Axis,
    field: Field,
}

impl LabelClick {
    pub fn new(axis: Axis, field: Field) -> Result<Self, SelectionError> {
        if field.axis() != axis {
            return Err(SelectionError::WrongAxis { field, axis });
        }
        Ok(Self { axis, field })
    }

    /// Build a click from a label's attributes. A label names either an x
    /// field or a y field, never both.
    pub fn from_label(x_name: Option<&str>, y_name: Option<&str>) -> Result<Self, SelectionError> {
        match (x_name, y_name) {
            (Some(name), None) => Self::new(Axis::X, name.parse()?),
            (None, Some(name)) => Self::new(Axis::Y, name.parse()?),
            _ => Err(SelectionError::AmbiguousLabel),
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn field(&self) -> Field {
        self.field
    }
}

/// Result of applying a click to a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The clicked label was already active.
    Unchanged,
    Changed { previous: Selection, next: Selection },
}

/// Active field per axis. Always holds an x-axis field and a y-axis field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    x: Field,
    y: Field,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            x: Field::Poverty,
            y: Field::Healthcare,
        }
    }
}

impl Selection {
    pub fn new(x: Field, y: Field) -> Result<Self, SelectionError> {
        if x.axis() != Axis::X {
            return Err(SelectionError::WrongAxis {
                field: x,
                axis: Axis::X,
            });
        }
        if y.axis() != Axis::Y {
            return Err(SelectionError::WrongAxis {
                field: y,
                axis: Axis::Y,
            });
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> Field {
        self.x
    }

    pub fn y(&self) -> Field {
        self.y
    }

    pub fn field(&self, axis: Axis) -> Field {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    pub fn is_active(&self, field: Field) -> bool {
        self.field(field.axis()) == field
    }

    /// Apply a label click. Only the clicked axis changes; the other axis
    /// keeps its current field.
    pub fn apply(self, click: LabelClick) -> Outcome {
        if self.is_active(click.field) {
            return Outcome::Unchanged;
        }

        let next = match click.axis {
            Axis::X => Selection {
                x: click.field,
                y: self.y,
            },
            Axis::Y => Selection {
                x: self.x,
                y: click.field,
            },
        };

        Outcome::Changed {
            previous: self,
            next,
        }
    }

    /// The three labels of an axis with their marks. Exactly one is active.
    pub fn label_marks(&self, axis: Axis) -> [(Field, LabelMark); 3] {
        axis.fields().map(|field| {
            let mark = if self.is_active(field) {
                LabelMark::Active
            } else {
                LabelMark::Inactive
            };
            (field, mark)
        })
    }
}
