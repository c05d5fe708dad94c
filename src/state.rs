use std::collections::BTreeSet;
use std::sync::Arc;

use crate::binding::{ChartSlot, Control, subscribers};
use crate::chart::{PieChart, ScatterChart, build_pie_chart, build_scatter_chart};
use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::filter::{
    ALL_SITES, FilterState, PayloadRange, SiteSelection, filtered_indices,
    init_filter_state, payload_marks,
};
use crate::data::loader::{BOOSTER_COLUMN, SITE_COLUMN};
use crate::data::model::{LaunchDataset, LaunchRecord};

// ---------------------------------------------------------------------------
// Published chart output
// ---------------------------------------------------------------------------

/// A chart together with the number of times it has been rebuilt.
#[derive(Debug, Clone)]
pub struct Published<T> {
    pub chart: T,
    pub revision: u64,
}

impl<T> Published<T> {
    fn new(chart: T) -> Self {
        Self { chart, revision: 0 }
    }

    fn replace(&mut self, chart: T) {
        self.chart = chart;
        self.revision += 1;
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset, read-only once loaded.
    pub dataset: Arc<LaunchDataset>,

    /// Current control values.
    pub filters: FilterState,

    /// Stable colour per launch site (all-sites pie).
    pub site_colors: ColorMap,

    /// Stable colour per booster category (scatter).
    pub booster_colors: ColorMap,

    pub pie: Published<PieChart>,
    pub scatter: Published<ScatterChart>,

    /// Indices of records shown in the scatter chart (cached).
    pub visible_indices: Vec<usize>,

    /// Text typed into the site dropdown's search box.
    pub site_search: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig, dataset: LaunchDataset) -> Self {
        let dataset = Arc::new(dataset);
        let filters = init_filter_state(&dataset);
        let (site_colors, booster_colors) = color_maps(&dataset);
        let pie = build_pie_chart(&dataset, &filters.site, &site_colors);
        let scatter = build_scatter_chart(&dataset, &filters, &booster_colors);
        let visible_indices = (0..dataset.len()).collect();

        Self {
            config,
            dataset,
            filters,
            site_colors,
            booster_colors,
            pie: Published::new(pie),
            scatter: Published::new(scatter),
            visible_indices,
            site_search: String::new(),
            status_message: None,
        }
    }

    /// Replace the dataset, reset the controls and rebuild every chart.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        let dataset = Arc::new(dataset);
        self.filters = init_filter_state(&dataset);
        let (site_colors, booster_colors) = color_maps(&dataset);
        self.site_colors = site_colors;
        self.booster_colors = booster_colors;
        self.dataset = dataset;
        self.site_search.clear();
        self.status_message = None;

        self.rebuild(ChartSlot::SuccessPie, Control::Site);
        self.rebuild(ChartSlot::PayloadScatter, Control::Site);
    }

    /// Update the site cell. Selecting the current value again does nothing.
    pub fn select_site(&mut self, site: SiteSelection) {
        if site == self.filters.site {
            return;
        }
        if let SiteSelection::Site(s) = &site {
            if !self.dataset.has_site(s) {
                log::warn!("selected site {s:?} is not in the dataset");
            }
        }
        self.filters.site = site;
        self.publish(Control::Site);
    }

    /// Update the payload cell. Bounds are reordered and clamped into the
    /// dataset range first.
    pub fn set_payload_range(&mut self, low: f64, high: f64) {
        let range = PayloadRange::new(low, high).clamped_to(&self.dataset);
        if range == self.filters.payload {
            return;
        }
        self.filters.payload = range;
        self.publish(Control::PayloadRange);
    }

    /// Rebuild every chart subscribed to `control`.
    fn publish(&mut self, control: Control) {
        for slot in subscribers(control) {
            self.rebuild(slot, control);
        }
    }

    fn rebuild(&mut self, slot: ChartSlot, cause: Control) {
        match slot {
            ChartSlot::SuccessPie => {
                let chart = build_pie_chart(&self.dataset, &self.filters.site, &self.site_colors);
                self.pie.replace(chart);
                log::debug!(
                    "{cause:?} changed: rebuilt pie '{}' (revision {})",
                    self.pie.chart.config.title,
                    self.pie.revision
                );
            }
            ChartSlot::PayloadScatter => {
                let chart = build_scatter_chart(&self.dataset, &self.filters, &self.booster_colors);
                self.scatter.replace(chart);
                self.visible_indices =
                    filtered_indices(&self.dataset, &self.filters.payload, &self.filters.site);
                log::debug!(
                    "{cause:?} changed: rebuilt scatter '{}' with {} points (revision {})",
                    self.scatter.chart.config.title,
                    self.visible_indices.len(),
                    self.scatter.revision
                );
            }
        }
    }

    /// Records currently plotted in the scatter chart.
    pub fn visible_records(&self) -> impl Iterator<Item = &LaunchRecord> {
        self.visible_indices.iter().map(|&i| &self.dataset.records[i])
    }

    /// Dropdown options `(label, value)`: "All Sites" first, then every site
    /// in dataset order, narrowed by the search text.
    pub fn site_options(&self) -> Vec<(String, String)> {
        let needle = self.site_search.trim().to_lowercase();
        std::iter::once(("All Sites".to_string(), ALL_SITES.to_string()))
            .chain(self.dataset.sites.iter().map(|s| (s.clone(), s.clone())))
            .filter(|(label, _)| needle.is_empty() || label.to_lowercase().contains(&needle))
            .collect()
    }

    /// Tick marks under the payload slider.
    pub fn payload_marks(&self) -> Vec<f64> {
        payload_marks(
            self.dataset.payload_min,
            self.dataset.payload_max,
            self.config.payload_mark_step,
        )
    }
}

fn color_maps(dataset: &LaunchDataset) -> (ColorMap, ColorMap) {
    let sites: BTreeSet<String> = dataset.sites.iter().cloned().collect();
    (
        ColorMap::new(SITE_COLUMN, &sites),
        ColorMap::new(BOOSTER_COLUMN, &dataset.booster_categories),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{record, two_sites};
    use crate::data::model::Outcome;

    fn state() -> AppState {
        AppState::new(DashboardConfig::default(), two_sites())
    }

    #[test]
    fn starts_with_all_sites_and_full_range() {
        let st = state();
        assert_eq!(st.filters.site, SiteSelection::All);
        assert_eq!(st.filters.payload, PayloadRange::full(&st.dataset));
        assert_eq!(st.pie.chart.config.title, "Total Successful Launches by Site");
        assert_eq!(st.scatter.chart.point_count(), 5);
        assert_eq!(st.visible_indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn site_change_rebuilds_both_charts() {
        let mut st = state();
        st.select_site(SiteSelection::from_value("A"));
        assert_eq!((st.pie.revision, st.scatter.revision), (1, 1));
        assert_eq!(st.pie.chart.config.title, "Success vs Failure for site A");
        assert_eq!(st.scatter.chart.config.title, "Payload vs Outcome for site A");
        assert_eq!(st.visible_indices, vec![0, 2, 3]);
    }

    #[test]
    fn payload_change_rebuilds_only_scatter() {
        let mut st = state();
        st.set_payload_range(500.0, 1500.0);
        assert_eq!((st.pie.revision, st.scatter.revision), (0, 1));
        let payloads: Vec<f64> = st.visible_records().map(|r| r.payload_mass_kg).collect();
        assert_eq!(payloads, vec![600.0]);
    }

    #[test]
    fn unchanged_values_do_not_republish() {
        let mut st = state();
        st.select_site(SiteSelection::All);
        let full = st.filters.payload;
        st.set_payload_range(full.low, full.high);
        assert_eq!((st.pie.revision, st.scatter.revision), (0, 0));
    }

    #[test]
    fn inverted_and_out_of_bounds_range_is_normalized() {
        let mut st = state();
        st.set_payload_range(99_999.0, 1000.0);
        assert_eq!(st.filters.payload, PayloadRange { low: 1000.0, high: 5300.0 });
        assert_eq!(st.visible_indices, vec![1, 3, 4]);
    }

    #[test]
    fn unknown_site_degrades_to_empty_charts() {
        let mut st = state();
        st.select_site(SiteSelection::from_value("nowhere"));
        assert!(st.pie.chart.is_empty());
        assert!(st.scatter.chart.is_empty());
        assert!(st.visible_indices.is_empty());
    }

    #[test]
    fn search_narrows_site_options() {
        let mut st = AppState::new(
            DashboardConfig::default(),
            LaunchDataset::from_records(vec![
                record("CCAFS LC-40", 1.0, Outcome::Success, "v1.0"),
                record("KSC LC-39A", 2.0, Outcome::Success, "FT"),
            ]),
        );
        assert_eq!(st.site_options().len(), 3);
        st.site_search = "ksc".to_string();
        assert_eq!(
            st.site_options(),
            vec![("KSC LC-39A".to_string(), "KSC LC-39A".to_string())]
        );
    }

    #[test]
    fn new_dataset_resets_controls() {
        let mut st = state();
        st.select_site(SiteSelection::from_value("B"));
        st.set_dataset(LaunchDataset::from_records(vec![record(
            "C",
            10.0,
            Outcome::Success,
            "B5",
        )]));
        assert_eq!(st.filters.site, SiteSelection::All);
        assert_eq!(st.pie.chart.slices[0].label, "C");
        assert_eq!(st.visible_indices, vec![0]);
    }
}
