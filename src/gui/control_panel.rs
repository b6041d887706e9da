//! Control Panel Widget
//! Left side panel: data source, active fields, statistics, export and status.

use crate::charts::ExportFormat;
use crate::data::{Axis, Field};
use crate::selection::Selection;
use crate::stats::{CorrelationStats, FieldSummary};
use egui::{Color32, RichText};
use std::collections::HashMap;
use std::path::PathBuf;

const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);
const OK_COLOR: Color32 = Color32::from_rgb(40, 167, 69);

/// Left side control panel with file selection, statistics and export.
pub struct ControlPanel {
    pub csv_path: Option<PathBuf>,
    pub record_count: usize,
    pub skipped_rows: Vec<String>,
    pub summaries: HashMap<Field, FieldSummary>,
    pub correlation: Option<CorrelationStats>,
    pub status: String,
    pub is_error: bool,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            csv_path: None,
            record_count: 0,
            skipped_rows: Vec::new(),
            summaries: HashMap::new(),
            correlation: None,
            status: "Ready".to_string(),
            is_error: false,
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything derived from the previous dataset.
    pub fn reset_data(&mut self) {
        self.record_count = 0;
        self.skipped_rows.clear();
        self.summaries.clear();
        self.correlation = None;
        self.export_enabled = false;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, selection: Selection) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("State Scatter")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Health risks vs. demographics")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });

                if self.record_count > 0 {
                    ui.label(
                        RichText::new(format!("{} states loaded", self.record_count))
                            .size(11.0)
                            .color(Color32::GRAY),
                    );
                }
                if !self.skipped_rows.is_empty() {
                    ui.collapsing(
                        RichText::new(format!("{} rows skipped", self.skipped_rows.len()))
                            .size(11.0)
                            .color(ERROR_COLOR),
                        |ui| {
                            for row in &self.skipped_rows {
                                ui.label(RichText::new(row).size(10.0));
                            }
                        },
                    );
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Active Fields Section =====
        ui.label(RichText::new("Active Fields").size(14.0).strong());
        ui.add_space(5.0);

        egui::Grid::new("active_fields")
            .num_columns(2)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                for axis in [Axis::X, Axis::Y] {
                    let field = selection.field(axis);
                    ui.label(format!("{}-axis:", axis.to_string().to_uppercase()));
                    ui.label(RichText::new(field.display_name()).strong());
                    ui.end_row();
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Statistics Section =====
        ui.label(RichText::new("Statistics").size(14.0).strong());
        ui.add_space(5.0);
        self.draw_summary_table(ui, selection);
        ui.add_space(8.0);
        self.draw_correlation(ui);

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                for format in [ExportFormat::Svg, ExportFormat::Png] {
                    let label = format!("Export {}", format.extension().to_uppercase());
                    let button = egui::Button::new(RichText::new(label).size(14.0))
                        .min_size(egui::vec2(150.0, 30.0));
                    if ui.add(button).clicked() {
                        action = ControlPanelAction::Export(format);
                    }
                    ui.add_space(6.0);
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        let status_color = if self.is_error {
            ERROR_COLOR
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    fn draw_summary_table(&self, ui: &mut egui::Ui, selection: Selection) {
        if self.summaries.is_empty() {
            ui.label(RichText::new("-").color(Color32::GRAY));
            return;
        }

        egui::Grid::new("field_summaries")
            .striped(true)
            .min_col_width(45.0)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                for header in ["Field", "Min", "Median", "Mean", "Max"] {
                    ui.label(RichText::new(header).strong().size(11.0));
                }
                ui.end_row();

                for field in [selection.x(), selection.y()] {
                    if let Some(s) = self.summaries.get(&field) {
                        ui.label(RichText::new(field.column()).size(11.0));
                        ui.label(RichText::new(format!("{:.0}", s.min)).size(11.0));
                        ui.label(RichText::new(format!("{:.1}", s.median)).size(11.0));
                        ui.label(RichText::new(format!("{:.1}", s.mean)).size(11.0));
                        ui.label(RichText::new(format!("{:.0}", s.max)).size(11.0));
                        ui.end_row();
                    }
                }
            });
    }

    fn draw_correlation(&self, ui: &mut egui::Ui) {
        let Some(c) = &self.correlation else {
            ui.label(RichText::new("Correlation: n/a").size(11.0).color(Color32::GRAY));
            return;
        };

        let p_color = if c.is_significant {
            OK_COLOR
        } else {
            ui.visuals().text_color()
        };

        egui::Grid::new("correlation")
            .num_columns(2)
            .spacing([8.0, 2.0])
            .show(ui, |ui| {
                ui.label(RichText::new("Pearson r").size(11.0));
                ui.label(RichText::new(format!("{:.3}", c.pearson_r)).size(11.0));
                ui.end_row();
                ui.label(RichText::new("r²").size(11.0));
                ui.label(RichText::new(format!("{:.3}", c.r_squared)).size(11.0));
                ui.end_row();
                ui.label(RichText::new("Fit").size(11.0));
                ui.label(
                    RichText::new(format!("y = {:.3}x + {:.3}", c.slope, c.intercept)).size(11.0),
                );
                ui.end_row();
                ui.label(RichText::new("P-value").size(11.0));
                ui.label(
                    RichText::new(format!("{:.4}", c.p_value))
                        .size(11.0)
                        .color(p_color),
                );
                ui.end_row();
            });
    }

    /// Set status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
        self.is_error = false;
    }

    /// Set status line and mark it as an error
    pub fn set_error(&mut self, status: &str) {
        self.status = format!("Error: {status}");
        self.is_error = true;
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    Export(ExportFormat),
}
