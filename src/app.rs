use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filter controls ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: records in range ----
        egui::TopBottomPanel::bottom("records_panel")
            .default_height(180.0)
            .resizable(true)
            .show(ctx, |ui| {
                table::records_table(ui, &self.state);
            });

        // ---- Central panel: linked charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(self.state.config.title.as_str());
            });
            ui.separator();

            // Title line and spacing for each chart.
            let chart_height = ((ui.available_height() - 60.0) / 2.0).max(120.0);
            let x_bounds = (self.state.dataset.payload_min, self.state.dataset.payload_max);

            plot::pie_chart(ui, &self.state.pie.chart, chart_height);
            ui.add_space(8.0);
            plot::scatter_chart(ui, &self.state.scatter.chart, x_bounds, chart_height);
        });
    }
}
