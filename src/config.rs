use std::path::PathBuf;

use serde::Serialize;

use crate::data::filter::SiteSelection;
use crate::data::loader::{BOOSTER_COLUMN, PAYLOAD_COLUMN};

// ---------------------------------------------------------------------------
// Dashboard settings
// ---------------------------------------------------------------------------

/// Fixed settings of the dashboard. There are no flags or config files;
/// everything is decided here.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Dataset read at startup, relative to the working directory.
    pub data_path: PathBuf,
    /// Window title and page heading.
    pub title: String,
    /// Payload slider granularity in kg.
    pub payload_step: f64,
    /// Distance between payload slider tick marks in kg.
    pub payload_mark_step: f64,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("spacex_launch_dash.csv"),
            title: "SpaceX Launch Records Dashboard".to_string(),
            payload_step: 1000.0,
            payload_mark_step: 2000.0,
            window_size: [1200.0, 900.0],
            min_window_size: [700.0, 500.0],
        }
    }
}

// ---------------------------------------------------------------------------
// Chart configuration
// ---------------------------------------------------------------------------

/// Rendering options recognised by the pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChartConfig {
    pub title: String,
    /// Legend heading for slice names.
    pub names_label: String,
    /// Legend heading for slice values.
    pub values_label: String,
}

impl PieChartConfig {
    /// Successful launches per site.
    pub fn all_sites() -> Self {
        Self {
            title: "Total Successful Launches by Site".to_string(),
            names_label: "Launch Site".to_string(),
            values_label: "Success Count".to_string(),
        }
    }

    /// Success vs failure at a single site.
    pub fn single_site(site: &str) -> Self {
        Self {
            title: format!("Success vs Failure for site {site}"),
            names_label: "class".to_string(),
            values_label: "count".to_string(),
        }
    }
}

/// Rendering options recognised by the scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChartConfig {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Column whose values pick the marker colour.
    pub color_by: String,
}

impl ScatterChartConfig {
    pub fn for_selection(site: &SiteSelection) -> Self {
        let title = match site {
            SiteSelection::All => "Payload vs Outcome for All Sites".to_string(),
            SiteSelection::Site(s) => format!("Payload vs Outcome for site {s}"),
        };
        Self {
            title,
            x_label: PAYLOAD_COLUMN.to_string(),
            y_label: "Launch Outcome".to_string(),
            color_by: BOOSTER_COLUMN.to_string(),
        }
    }
}
