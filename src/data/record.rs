//! Records & Dataset
//! Immutable per-state observations, shared read-only across the app.

use super::Field;
use std::sync::Arc;

/// One observed state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    state: String,
    abbr: String,
    values: [i64; 6],
}

impl Record {
    /// Build a record. `values` are ordered as `Field::ALL`.
    pub fn new(state: impl Into<String>, abbr: impl Into<String>, values: [i64; 6]) -> Self {
        Self {
            state: state.into(),
            abbr: abbr.into(),
            values,
        }
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn abbr(&self) -> &str {
        &self.abbr
    }

    pub fn value(&self, field: Field) -> i64 {
        self.values[field.index()]
    }
}

/// Ordered, immutable collection of records. Cloning is cheap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Arc<[Record]>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// All values of one column, in record order.
    pub fn column(&self, field: Field) -> impl Iterator<Item = i64> + '_ {
        self.records.iter().map(move |r| r.value(field))
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
