//! State Scatter - interactive scatter plot of state health & demographic data
//!
//! Click an axis label to switch the plotted field; points animate to their
//! new positions and hovering a point shows its values.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod scale;
pub mod selection;
pub mod stats;

pub use config::ChartConfig;
pub use data::{Axis, DataLoader, Dataset, Field, Record};
pub use selection::{LabelClick, Selection, SelectionController};
