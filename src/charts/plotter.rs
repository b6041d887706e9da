//! Chart Plotter Module
//! Draws the interactive scatter (circles, state abbreviations, tooltips)
//! using egui_plot.

use crate::charts::Frame;
use crate::data::{Dataset, Record};
use crate::selection::Selection;
use egui::{Color32, Pos2, RichText};
use egui_plot::{Plot, PlotBounds, PlotPoint, PlotPoints, Points, Text};

/// Circle fill: red at 50% opacity.
pub const POINT_COLOR: Color32 = Color32::from_rgba_premultiplied(128, 0, 0, 128);
pub const LABEL_COLOR: Color32 = Color32::BLACK;
const LABEL_SIZE: f32 = 10.0;

/// Geometry of the plot area in screen points.
#[derive(Debug, Clone, Copy)]
pub struct ScatterStyle {
    pub width: f32,
    pub height: f32,
    pub point_radius: f32,
}

/// Creates the interactive scatter using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Tooltip body for a record under the active selection.
    pub fn tooltip_text(record: &Record, selection: Selection) -> String {
        let (x, y) = (selection.x(), selection.y());
        format!(
            "{}\n{}: {}\n{}: {}",
            record.state(),
            x.display_name(),
            record.value(x),
            y.display_name(),
            record.value(y)
        )
    }

    /// Index of the point closest to `pointer`, if it lies within `radius`.
    pub fn nearest_point(
        pointer: Pos2,
        points: impl IntoIterator<Item = Pos2>,
        radius: f32,
    ) -> Option<usize> {
        points
            .into_iter()
            .enumerate()
            .map(|(i, p)| (i, p.distance(pointer)))
            .filter(|&(_, d)| d <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// Draw one frame of the scatter.
    ///
    /// Hovering a circle shows its tooltip; clicking pins the tooltip in
    /// place until a click lands anywhere else on the plot.
    pub fn draw_scatter(
        ui: &mut egui::Ui,
        dataset: &Dataset,
        frame: &Frame,
        selection: Selection,
        style: ScatterStyle,
        pinned: &mut Option<usize>,
    ) {
        let points = frame.plot_points();
        let domain = frame.domain;

        let plot = Plot::new("state_scatter")
            .width(style.width)
            .height(style.height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false)
            .show_x(false)
            .show_y(false)
            .show_grid(false);

        let plot_response = plot.show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [domain.x.min, domain.y.min],
                [domain.x.max, domain.y.max],
            ));

            plot_ui.points(
                Points::new(PlotPoints::from(points.clone()))
                    .radius(style.point_radius)
                    .filled(true)
                    .color(POINT_COLOR)
                    .name("states"),
            );

            for (record, p) in dataset.records().iter().zip(points.iter()) {
                plot_ui.text(Text::new(
                    PlotPoint::new(p[0], p[1]),
                    RichText::new(record.abbr())
                        .size(LABEL_SIZE)
                        .strong()
                        .color(LABEL_COLOR),
                ));
            }
        });

        let transform = plot_response.transform;
        let screen: Vec<Pos2> = points
            .iter()
            .map(|p| transform.position_from_point(&PlotPoint::new(p[0], p[1])))
            .collect();

        let response = plot_response.response;
        let hovered = response
            .hover_pos()
            .and_then(|pos| Self::nearest_point(pos, screen.iter().copied(), style.point_radius));

        if response.clicked() {
            *pinned = match (hovered, *pinned) {
                (Some(i), Some(p)) if i == p => None,
                (hit, _) => hit,
            };
        }

        if let Some(i) = *pinned {
            if let (Some(record), Some(pos)) = (dataset.get(i), screen.get(i)) {
                let text = Self::tooltip_text(record, selection);
                egui::Area::new(egui::Id::new("pinned_tooltip"))
                    .order(egui::Order::Foreground)
                    .fixed_pos(*pos + egui::vec2(style.point_radius, style.point_radius))
                    .show(ui.ctx(), |ui| {
                        egui::Frame::popup(ui.style()).show(ui, |ui| {
                            ui.label(RichText::new(text).strong());
                        });
                    });
            }
        }

        if let Some(record) = hovered.filter(|&i| Some(i) != *pinned).and_then(|i| dataset.get(i)) {
            let text = Self::tooltip_text(record, selection);
            let _ = response.on_hover_ui_at_pointer(|ui| {
                ui.label(RichText::new(text).strong());
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Field;

    #[test]
    fn tooltip_uses_active_fields_and_display_names() {
        let record = Record::new("Alabama", "AL", [20, 12, 39, 24, 42000, 33]);
        let selection = Selection::new(Field::Income, Field::Obesity).unwrap();
        assert_eq!(
            ChartPlotter::tooltip_text(&record, selection),
            "Alabama\nHousehold Income (Median): 42000\nObese (%): 33"
        );
    }

    #[test]
    fn nearest_point_respects_radius() {
        let points = [Pos2::new(0.0, 0.0), Pos2::new(10.0, 0.0), Pos2::new(30.0, 0.0)];
        assert_eq!(
            ChartPlotter::nearest_point(Pos2::new(8.0, 0.0), points, 11.0),
            Some(1)
        );
        assert_eq!(
            ChartPlotter::nearest_point(Pos2::new(20.0, 0.0), points, 5.0),
            None
        );
    }
}
