//! Axis Domain Computation
//! Padded min/max bounds for the active field pair, plus the linear mapping
//! between data values and the unit interval.

use crate::data::{Dataset, Field};
use crate::selection::Selection;
use thiserror::Error;

/// Lower bound is the column minimum scaled by this factor.
pub const MIN_PADDING: f64 = 0.8;
/// Upper bound is the column maximum scaled by this factor.
pub const MAX_PADDING: f64 = 1.1;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScaleError {
    #[error("Cannot compute axis bounds of an empty dataset")]
    EmptyDataset,
}

/// Closed interval of data values shown on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Padded bounds of one column.
    pub fn of_column(dataset: &Dataset, field: Field) -> Result<Self, ScaleError> {
        let (min, max) = dataset
            .column(field)
            .fold(None, |acc: Option<(i64, i64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
            .ok_or(ScaleError::EmptyDataset)?;

        Ok(Self {
            min: min as f64 * MIN_PADDING,
            max: max as f64 * MAX_PADDING,
        })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Position of `value` within the bounds: 0 at `min`, 1 at `max`.
    /// Degenerate bounds map everything to the middle.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.span();
        if span == 0.0 {
            0.5
        } else {
            (value - self.min) / span
        }
    }

    /// Inverse of [`Bounds::normalize`].
    pub fn denormalize(&self, t: f64) -> f64 {
        self.min + t * self.span()
    }

    pub fn lerp(&self, to: &Bounds, t: f64) -> Bounds {
        Bounds {
            min: self.min + (to.min - self.min) * t,
            max: self.max + (to.max - self.max) * t,
        }
    }
}

/// Bounds for both axes of the current selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisDomain {
    pub x: Bounds,
    pub y: Bounds,
}

impl AxisDomain {
    pub fn lerp(&self, to: &AxisDomain, t: f64) -> AxisDomain {
        AxisDomain {
            x: self.x.lerp(&to.x, t),
            y: self.y.lerp(&to.y, t),
        }
    }

    /// Normalized `[x, y]` position of a pair of values.
    pub fn normalize(&self, x: f64, y: f64) -> [f64; 2] {
        [self.x.normalize(x), self.y.normalize(y)]
    }
}

/// Compute the axis domain for a selection over the whole dataset.
///
/// Pure: the same dataset and selection always give the same bounds.
pub fn compute_domain(dataset: &Dataset, selection: Selection) -> Result<AxisDomain, ScaleError> {
    Ok(AxisDomain {
        x: Bounds::of_column(dataset, selection.x())?,
        y: Bounds::of_column(dataset, selection.y())?,
    })
}
