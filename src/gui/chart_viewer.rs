//! Chart Viewer Widget
//! Central panel: the animated scatter framed by its clickable axis labels.

use crate::charts::{ChartPlotter, ScatterStyle, Transition};
use crate::config::ChartConfig;
use crate::data::{Axis, Dataset};
use crate::selection::{LabelClick, LabelMark, RenderRequest, Selection};
use egui::{Color32, CursorIcon, RichText, Sense};

const AXIS_LABEL_SIZE: f32 = 13.0;
const INACTIVE_LABEL_COLOR: Color32 = Color32::from_rgb(170, 170, 170);

/// Displays the current dataset and animates between render requests.
#[derive(Default)]
pub struct ChartViewer {
    dataset: Option<Dataset>,
    transition: Option<Transition>,
    /// Record whose tooltip was pinned by a click.
    pinned: Option<usize>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the chart while a new file loads.
    pub fn clear(&mut self) {
        self.dataset = None;
        self.transition = None;
        self.pinned = None;
    }

    /// Show a freshly loaded dataset at rest.
    pub fn set_dataset(&mut self, dataset: Dataset, request: &RenderRequest) {
        self.transition = Some(Transition::settled(&dataset, request));
        self.dataset = Some(dataset);
        self.pinned = None;
    }

    /// Start animating towards `request`.
    pub fn apply(&mut self, request: &RenderRequest, now: f64) {
        if let (Some(dataset), Some(transition)) = (&self.dataset, &mut self.transition) {
            transition.retarget(dataset, request, now);
        }
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.transition
            .as_ref()
            .is_some_and(|t| !t.is_finished(now))
    }

    /// Draw the chart. Returns the axis label clicked this frame, if any.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        selection: Selection,
        config: &ChartConfig,
    ) -> Option<LabelClick> {
        let (Some(dataset), Some(transition)) = (&self.dataset, &self.transition) else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return None;
        };

        let now = ui.input(|i| i.time);
        let frame = transition.sample(now);
        let margin = config.margin;
        let style = ScatterStyle {
            width: config.plot_width() as f32,
            height: config.plot_height() as f32,
            point_radius: config.point_radius,
        };

        let mut clicked = None;

        ui.add_space(margin.top as f32);
        ui.horizontal(|ui| {
            // Y-axis labels, stacked in the left margin
            ui.allocate_ui_with_layout(
                egui::vec2(margin.left as f32, style.height),
                egui::Layout::top_down(egui::Align::Max),
                |ui| {
                    ui.add_space(style.height / 3.0);
                    if let Some(click) = Self::axis_labels(ui, selection, Axis::Y) {
                        clicked = Some(click);
                    }
                },
            );

            ui.vertical(|ui| {
                ChartPlotter::draw_scatter(
                    ui,
                    dataset,
                    &frame,
                    selection,
                    style,
                    &mut self.pinned,
                );

                // X-axis labels, stacked under the plot
                ui.add_space(10.0);
                ui.allocate_ui_with_layout(
                    egui::vec2(style.width, margin.bottom as f32),
                    egui::Layout::top_down(egui::Align::Center),
                    |ui| {
                        if let Some(click) = Self::axis_labels(ui, selection, Axis::X) {
                            clicked = Some(click);
                        }
                    },
                );
            });
        });

        clicked
    }

    /// The three labels of one axis. Active is bold, inactive is grey and
    /// clickable.
    fn axis_labels(ui: &mut egui::Ui, selection: Selection, axis: Axis) -> Option<LabelClick> {
        let mut clicked = None;
        for (field, mark) in selection.label_marks(axis) {
            let text = RichText::new(field.display_name()).size(AXIS_LABEL_SIZE);
            let text = match mark {
                LabelMark::Active => text.strong(),
                LabelMark::Inactive => text.color(INACTIVE_LABEL_COLOR),
            };

            let response = ui
                .add(egui::Label::new(text).sense(Sense::click()))
                .on_hover_cursor(CursorIcon::PointingHand);

            if response.clicked() {
                match LabelClick::new(axis, field) {
                    Ok(click) => clicked = Some(click),
                    Err(e) => log::error!("{e}"),
                }
            }
        }
        clicked
    }
}
