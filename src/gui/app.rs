//! State Scatter Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{ExportFormat, ExportView, StaticChartRenderer};
use crate::config::ChartConfig;
use crate::data::{DataLoader, Dataset, LoadOutcome};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::selection::{LabelClick, SelectionController};
use crate::stats::StatsCalculator;
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

/// CSV loading result from background thread
enum LoadResult {
    Progress(String),
    Complete(LoadOutcome),
    Error(String),
}

/// A loaded dataset together with the controller driving its selection.
struct LoadedData {
    dataset: Dataset,
    controller: SelectionController,
}

/// Main application window.
pub struct ScatterApp {
    config: ChartConfig,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    data: Option<LoadedData>,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl ScatterApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: ChartConfig) -> Self {
        let mut app = Self::idle(config);
        let path = app.config.data_path.clone();
        app.start_loading(path);
        app
    }

    fn idle(config: ChartConfig) -> Self {
        Self {
            config,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            data: None,
            load_rx: None,
            is_loading: false,
        }
    }

    /// Load a CSV file in a background thread. Nothing is interactive until
    /// it resolves.
    fn start_loading(&mut self, path: PathBuf) {
        if self.is_loading {
            return; // Already loading
        }

        self.chart_viewer.clear();
        self.control_panel.reset_data();
        self.control_panel.csv_path = Some(path.clone());
        self.control_panel.set_status("Loading CSV file...");
        self.data = None;
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        let loader = DataLoader::new(self.config.parse_policy);

        log::info!("loading {}", path.display());

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress("Reading CSV file...".to_string()));

            let result = match loader.load_csv(&path) {
                Ok(outcome) => LoadResult::Complete(outcome),
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_loading(path);
        }
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            loop {
                let result = match rx.try_recv() {
                    Ok(result) => result,
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        log::error!("loader thread exited without a result");
                        self.control_panel.set_error("loader stopped unexpectedly");
                        self.is_loading = false;
                        should_keep_receiver = false;
                        break;
                    }
                };
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_status(&status);
                    }
                    LoadResult::Complete(outcome) => {
                        self.handle_loaded(outcome);
                        self.is_loading = false;
                        should_keep_receiver = false;
                        break;
                    }
                    LoadResult::Error(error) => {
                        log::error!("failed to load data: {error}");
                        self.control_panel.set_error(&error);
                        self.is_loading = false;
                        should_keep_receiver = false;
                        break;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    fn handle_loaded(&mut self, outcome: LoadOutcome) {
        let LoadOutcome { dataset, skipped } = outcome;

        let controller =
            match SelectionController::new(&dataset, self.config.transition_duration()) {
                Ok(controller) => controller,
                Err(e) => {
                    self.control_panel.set_error(&e.to_string());
                    return;
                }
            };

        log::info!(
            "loaded {} records ({} rows skipped)",
            dataset.len(),
            skipped.len()
        );

        self.chart_viewer
            .set_dataset(dataset.clone(), &controller.snapshot());

        self.control_panel.record_count = dataset.len();
        self.control_panel.skipped_rows = skipped.iter().map(|e| e.to_string()).collect();
        self.control_panel.summaries = StatsCalculator::summarize_all(&dataset);
        self.control_panel.correlation =
            StatsCalculator::correlation(&dataset, controller.selection());
        self.control_panel.export_enabled = true;
        self.control_panel.set_status(&format!(
            "Loaded {} states{}",
            dataset.len(),
            if skipped.is_empty() {
                String::new()
            } else {
                format!(", {} rows skipped", skipped.len())
            }
        ));

        self.data = Some(LoadedData {
            dataset,
            controller,
        });
    }

    /// Route an axis label click through the controller and animate the result.
    fn handle_label_click(&mut self, click: LabelClick, now: f64) {
        let Some(data) = &mut self.data else {
            return;
        };

        match data.controller.handle_click(&data.dataset, click) {
            Ok(Some(request)) => {
                self.chart_viewer.apply(&request, now);
                self.control_panel.correlation =
                    StatsCalculator::correlation(&data.dataset, request.selection);
            }
            Ok(None) => {}
            Err(e) => {
                log::error!("label click rejected: {e}");
                self.control_panel.set_error(&e.to_string());
            }
        }
    }

    /// Handle chart export
    fn handle_export(&mut self, format: ExportFormat) {
        let Some(data) = &self.data else {
            self.control_panel.set_status("No chart to export");
            return;
        };

        let selection = data.controller.selection();
        let file_name = format!(
            "{}_vs_{}.{}",
            selection.x(),
            selection.y(),
            format.extension()
        );

        // Ask user for output location
        let output_path = match rfd::FileDialog::new()
            .add_filter(format.extension().to_uppercase(), &[format.extension()])
            .set_file_name(file_name)
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        let view = ExportView {
            dataset: &data.dataset,
            selection,
            domain: data.controller.domain(),
            config: &self.config,
        };

        match StaticChartRenderer::export(&view, &output_path) {
            Ok(_) => {
                self.control_panel
                    .set_status(&format!("Exported {}", output_path.display()));
                if self.config.open_after_export {
                    if let Err(e) = open::that(&output_path) {
                        log::warn!("could not open {}: {e}", output_path.display());
                    }
                }
            }
            Err(e) => {
                log::error!("export failed: {e}");
                self.control_panel.set_error(&e.to_string());
            }
        }
    }
}

impl eframe::App for ScatterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        let now = ctx.input(|i| i.time);

        // Request repaint while loading or animating
        if self.is_loading || self.chart_viewer.is_animating(now) {
            ctx.request_repaint();
        }

        let selection = self
            .data
            .as_ref()
            .map(|d| d.controller.selection())
            .unwrap_or_default();

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui, selection);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::Export(format) => self.handle_export(format),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(click) = self.chart_viewer.show(ui, selection, &self.config) {
                self.handle_label_click(click, now);
                ctx.request_repaint();
            }
        });
    }
}
