//! Selection module - active axis fields and label-click handling

mod controller;
mod state;

pub use controller::{RenderRequest, SelectionController};
pub use state::{LabelClick, LabelMark, Outcome, Selection, SelectionError};
