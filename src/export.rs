use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::chart::{PieChart, ScatterChart};
use crate::data::filter::FilterState;
use crate::state::AppState;

/// The current controls and both published charts, as written by
/// "Export chart data…".
#[derive(Debug, Serialize)]
pub struct DashboardSnapshot<'a> {
    pub filters: &'a FilterState,
    pub pie: &'a PieChart,
    pub scatter: &'a ScatterChart,
}

impl<'a> DashboardSnapshot<'a> {
    pub fn capture(state: &'a AppState) -> Self {
        Self {
            filters: &state.filters,
            pie: &state.pie.chart,
            scatter: &state.scatter.chart,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing dashboard snapshot")
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value as JsonValue;

    use super::*;
    use crate::config::DashboardConfig;
    use crate::data::filter::SiteSelection;
    use crate::data::model::fixtures::two_sites;

    #[test]
    fn snapshot_carries_filters_and_chart_data() {
        let mut st = AppState::new(DashboardConfig::default(), two_sites());
        st.select_site(SiteSelection::from_value("A"));

        let json: JsonValue =
            serde_json::from_str(&DashboardSnapshot::capture(&st).to_json().unwrap()).unwrap();
        assert_eq!(json["filters"]["site"]["Site"], "A");
        assert_eq!(json["pie"]["config"]["title"], "Success vs Failure for site A");
        assert_eq!(json["pie"]["slices"][0]["label"], "Success");
        assert_eq!(json["pie"]["slices"][0]["value"], 2);
        assert!(json["pie"]["slices"][0].get("color").is_none());
        assert_eq!(json["scatter"]["series"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn snapshot_is_written_to_disk() {
        let st = AppState::new(DashboardConfig::default(), two_sites());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.json");
        DashboardSnapshot::capture(&st).write_json(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Total Successful Launches by Site"));
    }
}
