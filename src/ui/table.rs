use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::loader::{BOOSTER_COLUMN, CLASS_COLUMN, PAYLOAD_COLUMN, SITE_COLUMN};
use crate::data::model::LaunchRecord;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Records table (bottom panel)
// ---------------------------------------------------------------------------

/// List the launches currently plotted in the scatter chart.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    let rows: Vec<&LaunchRecord> = state.visible_records().collect();

    ui.strong(format!("Launch records ({} shown)", rows.len()));

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(140.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for name in [SITE_COLUMN, PAYLOAD_COLUMN, CLASS_COLUMN, BOOSTER_COLUMN] {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let rec = rows[row.index()];
                row.col(|ui| {
                    ui.label(rec.site.as_str());
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", rec.payload_mass_kg));
                });
                row.col(|ui| {
                    ui.label(rec.outcome.label());
                });
                row.col(|ui| {
                    let color = state.booster_colors.color_for(&rec.booster_category);
                    ui.label(RichText::new(rec.booster_category.as_str()).color(color));
                });
            });
        });
}
