use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::chart::{PieChart, ScatterChart};

/// Arc resolution for pie wedges.
const POINTS_PER_TURN: usize = 180;

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Render the success pie. An empty chart shows a placeholder in its place.
pub fn pie_chart(ui: &mut Ui, chart: &PieChart, height: f32) {
    ui.strong(chart.config.title.as_str());

    if chart.is_empty() {
        ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label(RichText::new("No launches for the current selection").italics());
            });
        });
        return;
    }

    ui.small(format!("{}: {}", chart.config.values_label, chart.total()));
    let wedges = chart.wedges(POINTS_PER_TURN);

    Plot::new("success_pie")
        .height(height)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.2)
        .include_x(1.2)
        .include_y(-1.2)
        .include_y(1.2)
        .show(ui, |plot_ui| {
            let mut start = 0.0;
            for (slice, polys) in chart.slices.iter().zip(wedges) {
                let name = format!("{} ({})", slice.label, slice.value);
                for poly in polys {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(poly))
                            .name(&name)
                            .fill_color(slice.color)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                }

                // Percentage label in the middle of the slice.
                let angle = FRAC_PI_2 - TAU * (start + slice.fraction / 2.0);
                start += slice.fraction;
                plot_ui.text(Text::new(
                    PlotPoint::new(0.65 * angle.cos(), 0.65 * angle.sin()),
                    RichText::new(format!("{:.1}%", slice.fraction * 100.0))
                        .color(Color32::WHITE)
                        .strong(),
                ));
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Render payload vs outcome, one coloured series per booster category.
pub fn scatter_chart(ui: &mut Ui, chart: &ScatterChart, x_bounds: (f64, f64), height: f32) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong(chart.config.title.as_str());
        ui.small(format!("{} launches", chart.point_count()));
    });
    if chart.is_empty() {
        ui.label(RichText::new("No launches in the selected payload range").italics());
    }

    Plot::new("payload_scatter")
        .height(height)
        .legend(Legend::default())
        .x_axis_label(chart.config.x_label.as_str())
        .y_axis_label(chart.config.y_label.as_str())
        .include_x(x_bounds.0)
        .include_x(x_bounds.1)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let points = Points::new(PlotPoints::from(series.points.clone()))
                    .name(&series.category)
                    .color(series.color)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(4.0);
                plot_ui.points(points);
            }
        });
}
