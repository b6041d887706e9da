//! Charts module - interactive scatter, transitions and static export

mod plotter;
mod renderer;
mod transition;

pub use plotter::{ChartPlotter, ScatterStyle, LABEL_COLOR, POINT_COLOR};
pub use renderer::{ExportFormat, ExportView, RenderError, StaticChartRenderer};
pub use transition::{ease_cubic_in_out, Frame, Transition};
