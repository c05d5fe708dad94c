mod app;
mod binding;
mod chart;
mod color;
mod config;
mod data;
mod export;
mod state;
mod ui;

use anyhow::Context;
use app::LaunchDashApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();

    // The dashboard has nothing to show without its dataset, so a bad file
    // stops the process before any window opens.
    let dataset = data::loader::load_file(&config.data_path).with_context(|| {
        format!(
            "cannot start dashboard without {}",
            config.data_path.display()
        )
    })?;
    log::info!(
        "Loaded {} launches (sites {:?}, payload {}..={} kg)",
        dataset.len(),
        dataset.sites,
        dataset.payload_min,
        dataset.payload_max
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.title.as_str())
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    let title = config.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(AppState::new(config, dataset))))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard window: {e}"))
}
