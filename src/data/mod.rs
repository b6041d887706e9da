//! Data module - survey fields, records and CSV loading

mod field;
mod loader;
mod record;

pub use field::{Axis, Field, UnknownField};
pub use loader::{parse_integer, DataLoader, FieldParseError, LoadOutcome, LoaderError, ParsePolicy};
pub use record::{Dataset, Record};
