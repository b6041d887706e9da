//! Field Catalogue
//! The six survey columns the viewer knows about, and which axis each one lives on.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown field name: {0:?}")]
pub struct UnknownField(pub String);

/// Chart axis a field can be plotted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The other axis.
    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Fields selectable on this axis, in label order.
    pub fn fields(self) -> [Field; 3] {
        match self {
            Axis::X => [Field::Poverty, Field::Age, Field::Income],
            Axis::Y => [Field::Healthcare, Field::Smokes, Field::Obesity],
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// Numeric survey column.
///
/// Columns come in three fixed pairs: poverty/healthcare, age/smokes and
/// income/obesity. The first of each pair is an x-axis field, the second a
/// y-axis field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Poverty,
    Healthcare,
    Age,
    Smokes,
    Income,
    Obesity,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Poverty,
        Field::Healthcare,
        Field::Age,
        Field::Smokes,
        Field::Income,
        Field::Obesity,
    ];

    /// Column name in the CSV header.
    pub fn column(self) -> &'static str {
        match self {
            Field::Poverty => "poverty",
            Field::Healthcare => "healthcare",
            Field::Age => "age",
            Field::Smokes => "smokes",
            Field::Income => "income",
            Field::Obesity => "obesity",
        }
    }

    /// Human-readable name used by axis labels and tooltips.
    pub fn display_name(self) -> &'static str {
        match self {
            Field::Poverty => "In Poverty (%)",
            Field::Healthcare => "Lacks Healthcare (%)",
            Field::Age => "Age (Median)",
            Field::Smokes => "Smokes (%)",
            Field::Income => "Household Income (Median)",
            Field::Obesity => "Obese (%)",
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Field::Poverty | Field::Age | Field::Income => Axis::X,
            Field::Healthcare | Field::Smokes | Field::Obesity => Axis::Y,
        }
    }

    /// Position in `Field::ALL`, used to index record values.
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.column() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}
