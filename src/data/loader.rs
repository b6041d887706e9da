//! CSV Data Loader Module
//! Reads the survey CSV with Polars and converts it into an immutable `Dataset`.

use super::{Dataset, Field, Record};
use polars::prelude::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

const STATE_COLUMN: &str = "state";
const ABBR_COLUMN: &str = "abbr";

/// A single cell that could not be turned into a record value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: column `{column}` has invalid value {value:?}")]
pub struct FieldParseError {
    /// 1-based line in the CSV file, header included.
    pub line: usize,
    pub column: &'static str,
    pub value: String,
}

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Data file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Missing required column `{0}`")]
    MissingColumn(&'static str),
    #[error("Failed to parse CSV: {0}")]
    FieldParse(#[from] FieldParseError),
    #[error("No data loaded")]
    NoData,
}

/// What to do with a row whose numeric fields don't parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParsePolicy {
    /// Drop the row and log a warning.
    #[default]
    Skip,
    /// Abort the whole load.
    Fail,
}

/// Result of a successful load.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub dataset: Dataset,
    /// Rows dropped under `ParsePolicy::Skip`, in file order.
    pub skipped: Vec<FieldParseError>,
}

/// Loads the survey CSV into records.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataLoader {
    policy: ParsePolicy,
}

impl DataLoader {
    pub fn new(policy: ParsePolicy) -> Self {
        Self { policy }
    }

    /// Load a CSV file. Every column is read as text so that numeric
    /// conversion errors are reported per cell instead of becoming nulls.
    pub fn load_csv(&self, path: &Path) -> Result<LoadOutcome, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        log::debug!(
            "read {} rows x {} columns from {}",
            df.height(),
            df.width(),
            path.display()
        );

        self.parse_frame(&df)
    }

    /// Convert an already-read frame into records.
    pub fn parse_frame(&self, df: &DataFrame) -> Result<LoadOutcome, LoaderError> {
        let names: Vec<&'static str> = [STATE_COLUMN, ABBR_COLUMN]
            .into_iter()
            .chain(Field::ALL.iter().map(|f| f.column()))
            .collect();

        let columns: Vec<Column> = names
            .iter()
            .map(|name| Self::text_column(df, name))
            .collect::<Result<_, _>>()?;
        let text: Vec<&StringChunked> = columns
            .iter()
            .map(|col| col.str())
            .collect::<PolarsResult<_>>()?;

        let mut records = Vec::with_capacity(df.height());
        let mut skipped = Vec::new();

        for row in 0..df.height() {
            match Self::parse_row(row, &names, &text) {
                Ok(record) => records.push(record),
                Err(err) => match self.policy {
                    ParsePolicy::Fail => return Err(err.into()),
                    ParsePolicy::Skip => {
                        log::warn!("skipping row: {err}");
                        skipped.push(err);
                    }
                },
            }
        }

        if records.is_empty() {
            return Err(LoaderError::NoData);
        }

        Ok(LoadOutcome {
            dataset: Dataset::new(records),
            skipped,
        })
    }

    fn text_column(df: &DataFrame, name: &'static str) -> Result<Column, LoaderError> {
        if !df.get_column_names().iter().any(|c| c.as_str() == name) {
            return Err(LoaderError::MissingColumn(name));
        }
        Ok(df.column(name)?.cast(&DataType::String)?)
    }

    /// `names` and `text` are ordered state, abbr, then `Field::ALL`.
    fn parse_row(
        row: usize,
        names: &[&'static str],
        text: &[&StringChunked],
    ) -> Result<Record, FieldParseError> {
        let line = row + 2;
        let cell = |i: usize| text[i].get(row).map(str::trim).unwrap_or_default();
        let invalid = |i: usize| FieldParseError {
            line,
            column: names[i],
            value: cell(i).to_string(),
        };

        let state = cell(0);
        if state.is_empty() {
            return Err(invalid(0));
        }
        let abbr = cell(1);
        if abbr.is_empty() {
            return Err(invalid(1));
        }

        let mut values = [0i64; 6];
        for (slot, i) in values.iter_mut().zip(2..) {
            *slot = parse_integer(cell(i)).ok_or_else(|| invalid(i))?;
        }

        Ok(Record::new(state, abbr, values))
    }
}

/// Parse a numeric cell into an integer, truncating any fractional part
/// (`"19.3"` becomes `19`). Returns `None` for anything that is not a finite
/// number.
pub fn parse_integer(text: &str) -> Option<i64> {
    let value: f64 = text.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    let truncated = value.trunc();
    if truncated < i64::MIN as f64 || truncated > i64::MAX as f64 {
        return None;
    }
    Some(truncated as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_integer_truncates_decimals() {
        assert_eq!(parse_integer("19.3"), Some(19));
        assert_eq!(parse_integer(" 42000 "), Some(42000));
        assert_eq!(parse_integer("12.99"), Some(12));
    }

    #[test]
    fn parse_integer_rejects_non_numbers() {
        assert_eq!(parse_integer(""), None);
        assert_eq!(parse_integer("abc"), None);
        assert_eq!(parse_integer("12abc"), None);
        assert_eq!(parse_integer("NaN"), None);
        assert_eq!(parse_integer("inf"), None);
    }

    #[test]
    fn missing_file_is_reported_before_reading() {
        let err = DataLoader::default()
            .load_csv(Path::new("/definitely/not/here.csv"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::NotFound(_)));
    }
}
