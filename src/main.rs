//! State Scatter - interactive scatter plot of state health & demographic data

use eframe::egui;
use state_scatter::gui::ScatterApp;
use state_scatter::ChartConfig;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ChartConfig::load_or_default();

    // Leave room for the control panel beside the chart canvas
    let width = config.width as f32 + 340.0;
    let height = config.height as f32 + 60.0;

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width, height])
            .with_min_inner_size([width, height])
            .with_title("State Scatter"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "State Scatter",
        options,
        Box::new(move |cc| Ok(Box::new(ScatterApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start window: {e}"))
}
