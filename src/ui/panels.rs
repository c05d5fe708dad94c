use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::{SiteSelection, snap_to_step};
use crate::export::DashboardSnapshot;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter controls
// ---------------------------------------------------------------------------

/// Render the left panel: site dropdown, payload range and booster legend.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            site_dropdown(ui, state);
            ui.add_space(8.0);
            payload_range(ui, state);
            ui.separator();
            booster_legend(ui, state);
        });
}

fn site_dropdown(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Launch Site");

    let mut chosen: Option<String> = None;
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(state.filters.site.to_string())
        .width(ui.available_width())
        // Clicks inside the popup land on the search box; keep it open for typing.
        .close_behavior(egui::PopupCloseBehavior::CloseOnClickOutside)
        .show_ui(ui, |ui: &mut Ui| {
            ui.add(
                egui::TextEdit::singleline(&mut state.site_search)
                    .hint_text("Select a Launch Site here"),
            );
            for (label, value) in state.site_options() {
                let selected = state.filters.site.value() == value;
                if ui.selectable_label(selected, label).clicked() {
                    chosen = Some(value);
                    ui.memory_mut(|mem| mem.close_popup());
                }
            }
        });

    if let Some(value) = chosen {
        state.site_search.clear();
        state.select_site(SiteSelection::from_value(&value));
    }
}

/// Two linked sliders standing in for a dual-ended range control.
fn payload_range(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Payload range (Kg)");

    let (min, max) = (state.dataset.payload_min, state.dataset.payload_max);
    let step = state.config.payload_step;
    let mut low = state.filters.payload.low;
    let mut high = state.filters.payload.high;

    let low_changed = ui
        .add(egui::Slider::new(&mut low, min..=max).text("from").integer())
        .changed();
    let high_changed = ui
        .add(egui::Slider::new(&mut high, min..=max).text("to").integer())
        .changed();

    if low_changed || high_changed {
        low = snap_to_step(low, min, max, step);
        high = snap_to_step(high, min, max, step);
        // The handle being dragged pushes the other one along.
        if low > high {
            if low_changed {
                high = low;
            } else {
                low = high;
            }
        }
        state.set_payload_range(low, high);
    }

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for mark in state.payload_marks() {
            ui.small(format!("{}", mark as i64));
        }
    });
}

fn booster_legend(ui: &mut Ui, state: &AppState) {
    ui.strong(state.booster_colors.column.as_str());
    for (label, color) in state.booster_colors.legend_entries() {
        ui.label(RichText::new(format!("● {label}")).color(color));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export chart data…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} launches loaded, {} in range",
            state.dataset.len(),
            state.visible_indices.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launches from {} (sites {:?}, payload {}..={} kg)",
                    dataset.len(),
                    path.display(),
                    dataset.sites,
                    dataset.payload_min,
                    dataset.payload_max
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export chart data")
        .set_file_name("launch_dashboard.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        match DashboardSnapshot::capture(state).write_json(&path) {
            Ok(()) => {
                log::info!("Exported chart data to {}", path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export chart data: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
