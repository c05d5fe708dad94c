use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::Color32;
use serde::Serialize;

use crate::color::{ColorMap, outcome_color};
use crate::config::{PieChartConfig, ScatterChartConfig};
use crate::data::aggregate::{
    ClassSummary, SiteSuccessSummary, class_summary, site_success_summary,
};
use crate::data::filter::{FilterState, SiteSelection, filter_by_payload_range};
use crate::data::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: usize,
    /// Share of the whole pie in `[0, 1]`.
    pub fraction: f64,
    #[serde(skip)]
    pub color: Color32,
}

/// A fully computed pie chart, ready to draw. Zero slices is valid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub config: PieChartConfig,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    fn from_counts(config: PieChartConfig, counts: Vec<(String, usize, Color32)>) -> Self {
        let total: usize = counts.iter().map(|(_, v, _)| v).sum();
        let slices = counts
            .into_iter()
            .map(|(label, value, color)| PieSlice {
                fraction: if total == 0 {
                    0.0
                } else {
                    value as f64 / total as f64
                },
                label,
                value,
                color,
            })
            .collect();
        PieChart { config, slices }
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Polygons making up each slice on a unit circle, in slice order.
    ///
    /// Slices start at twelve o'clock and run clockwise. A slice wider than a
    /// quarter turn is split into several wedges so every polygon stays convex.
    pub fn wedges(&self, points_per_turn: usize) -> Vec<Vec<Vec<[f64; 2]>>> {
        let mut start = 0.0;
        self.slices
            .iter()
            .map(|slice| {
                let wedges = slice_wedges(start, slice.fraction, points_per_turn);
                start += slice.fraction;
                wedges
            })
            .collect()
    }
}

/// Convex wedges covering `[start, start + sweep)` of a turn.
fn slice_wedges(start: f64, sweep: f64, points_per_turn: usize) -> Vec<Vec<[f64; 2]>> {
    if sweep <= 0.0 {
        return Vec::new();
    }
    let pieces = (sweep * 4.0).ceil().max(1.0) as usize;
    let piece_sweep = sweep / pieces as f64;
    let steps = ((piece_sweep * points_per_turn as f64).ceil() as usize).max(1);

    (0..pieces)
        .map(|p| {
            let from = start + p as f64 * piece_sweep;
            let mut poly = vec![[0.0, 0.0]];
            poly.extend((0..=steps).map(|s| {
                let t = from + piece_sweep * s as f64 / steps as f64;
                let angle = FRAC_PI_2 - TAU * t;
                [angle.cos(), angle.sin()]
            }));
            poly
        })
        .collect()
}

/// Pie of successful launches per site.
pub fn pie_from_site_summary(rows: &[SiteSuccessSummary], site_colors: &ColorMap) -> PieChart {
    let counts = rows
        .iter()
        .map(|r| (r.site.clone(), r.success_count, site_colors.color_for(&r.site)))
        .collect();
    PieChart::from_counts(PieChartConfig::all_sites(), counts)
}

/// Pie of successes vs failures at one site.
pub fn pie_from_class_summary(site: &str, rows: &[ClassSummary]) -> PieChart {
    let counts = rows
        .iter()
        .map(|r| (r.outcome.label().to_string(), r.count, outcome_color(r.outcome)))
        .collect();
    PieChart::from_counts(PieChartConfig::single_site(site), counts)
}

/// Build the pie for the current site selection.
pub fn build_pie_chart(
    dataset: &LaunchDataset,
    site: &SiteSelection,
    site_colors: &ColorMap,
) -> PieChart {
    match site {
        SiteSelection::All => pie_from_site_summary(&site_success_summary(dataset), site_colors),
        SiteSelection::Site(s) => pie_from_class_summary(s, &class_summary(dataset, s)),
    }
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Points sharing one booster category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub category: String,
    #[serde(skip)]
    pub color: Color32,
    /// `[payload_mass_kg, class]` pairs in dataset order.
    pub points: Vec<[f64; 2]>,
}

/// A fully computed scatter chart. Zero series is valid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub config: ScatterChartConfig,
    pub series: Vec<ScatterSeries>,
}

impl ScatterChart {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Build the scatter for the current filters, one series per booster category.
pub fn build_scatter_chart(
    dataset: &LaunchDataset,
    filters: &FilterState,
    booster_colors: &ColorMap,
) -> ScatterChart {
    let rows = filter_by_payload_range(
        dataset,
        filters.payload.low,
        filters.payload.high,
        &filters.site,
    );

    let mut grouped: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for rec in rows {
        grouped
            .entry(rec.booster_category.as_str())
            .or_default()
            .push([rec.payload_mass_kg, f64::from(rec.outcome.class())]);
    }

    let series = grouped
        .into_iter()
        .map(|(category, points)| ScatterSeries {
            category: category.to_string(),
            color: booster_colors.color_for(category),
            points,
        })
        .collect();

    ScatterChart {
        config: ScatterChartConfig::for_selection(&filters.site),
        series,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::filter::{PayloadRange, init_filter_state};
    use crate::data::model::fixtures::two_sites;

    fn colors_for(ds: &LaunchDataset) -> (ColorMap, ColorMap) {
        let sites: BTreeSet<String> = ds.sites.iter().cloned().collect();
        (
            ColorMap::new("Launch Site", &sites),
            ColorMap::new("Booster Version Category", &ds.booster_categories),
        )
    }

    #[test]
    fn all_sites_pie_uses_success_counts() {
        let ds = two_sites();
        let (sites, _) = colors_for(&ds);
        let pie = build_pie_chart(&ds, &SiteSelection::All, &sites);
        assert_eq!(pie.config.title, "Total Successful Launches by Site");
        assert_eq!(pie.slices.len(), 1);
        assert_eq!(pie.slices[0].label, "A");
        assert_eq!(pie.slices[0].value, 2);
        assert_eq!(pie.slices[0].fraction, 1.0);
    }

    #[test]
    fn single_site_pie_splits_success_and_failure() {
        let ds = two_sites();
        let (sites, _) = colors_for(&ds);
        let pie = build_pie_chart(&ds, &SiteSelection::from_value("A"), &sites);
        assert_eq!(pie.config.title, "Success vs Failure for site A");
        let labels: Vec<&str> = pie.slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Success", "Failure"]);
        assert_eq!(pie.total(), 3);
        let sum: f64 = pie.slices.iter().map(|s| s.fraction).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_site_pie_is_empty_but_valid() {
        let ds = two_sites();
        let (sites, _) = colors_for(&ds);
        let pie = build_pie_chart(&ds, &SiteSelection::from_value("nowhere"), &sites);
        assert!(pie.is_empty());
        assert_eq!(pie.config.title, "Success vs Failure for site nowhere");
        assert!(pie.wedges(64).is_empty());
    }

    #[test]
    fn wedges_stay_on_unit_circle_and_split_wide_slices() {
        let ds = two_sites();
        let (sites, _) = colors_for(&ds);
        let pie = build_pie_chart(&ds, &SiteSelection::from_value("A"), &sites);
        let wedges = pie.wedges(64);
        // 2/3 of a turn needs three quarter-turn pieces, 1/3 needs two.
        assert_eq!(wedges[0].len(), 3);
        assert_eq!(wedges[1].len(), 2);
        for poly in wedges.iter().flatten() {
            assert_eq!(poly[0], [0.0, 0.0]);
            for p in &poly[1..] {
                assert!(((p[0] * p[0] + p[1] * p[1]).sqrt() - 1.0).abs() < 1e-9);
            }
        }
        // First slice starts at twelve o'clock.
        let top = wedges[0][0][1];
        assert!(top[0].abs() < 1e-9 && (top[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn scatter_groups_points_by_booster_category() {
        let ds = two_sites();
        let (_, boosters) = colors_for(&ds);
        let chart = build_scatter_chart(&ds, &init_filter_state(&ds), &boosters);
        assert_eq!(chart.config.title, "Payload vs Outcome for All Sites");
        assert_eq!(chart.config.y_label, "Launch Outcome");
        assert_eq!(chart.point_count(), ds.len());
        let ft = chart.series.iter().find(|s| s.category == "FT").unwrap();
        assert_eq!(ft.points, vec![[2500.0, 0.0], [1600.0, 1.0]]);
        assert_eq!(ft.color, boosters.color_for("FT"));
    }

    #[test]
    fn scatter_respects_site_and_payload_filters() {
        let ds = two_sites();
        let (_, boosters) = colors_for(&ds);
        let filters = FilterState {
            site: SiteSelection::from_value("A"),
            payload: PayloadRange::new(500.0, 2000.0),
        };
        let chart = build_scatter_chart(&ds, &filters, &boosters);
        assert_eq!(chart.config.title, "Payload vs Outcome for site A");
        assert_eq!(chart.point_count(), 2);
    }

    #[test]
    fn scatter_for_empty_selection_has_no_series() {
        let ds = two_sites();
        let (_, boosters) = colors_for(&ds);
        let filters = FilterState {
            site: SiteSelection::from_value("nowhere"),
            payload: PayloadRange::full(&ds),
        };
        assert!(build_scatter_chart(&ds, &filters, &boosters).is_empty());
    }
}
