use serde::Serialize;

use super::model::{LaunchDataset, Outcome};

// ---------------------------------------------------------------------------
// Summary rows
// ---------------------------------------------------------------------------

/// Number of successful launches at one site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteSuccessSummary {
    pub site: String,
    pub success_count: usize,
}

/// Number of launches with one outcome at the selected site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassSummary {
    pub outcome: Outcome,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

/// Count successful launches per site.
///
/// Sites without a single success are left out. Rows are ordered by
/// descending count; ties keep the site's first-appearance order.
pub fn site_success_summary(dataset: &LaunchDataset) -> Vec<SiteSuccessSummary> {
    let mut rows: Vec<SiteSuccessSummary> = dataset
        .sites
        .iter()
        .map(|site| SiteSuccessSummary {
            site: site.clone(),
            success_count: dataset
                .records
                .iter()
                .filter(|r| r.outcome == Outcome::Success && r.site == *site)
                .count(),
        })
        .filter(|row| row.success_count > 0)
        .collect();

    // Stable sort keeps site order among equal counts.
    rows.sort_by(|a, b| b.success_count.cmp(&a.success_count));
    rows
}

/// Count successes and failures at one site.
///
/// Outcomes with no launches are omitted, so an unknown site produces an
/// empty summary. Rows are ordered by descending count, Success first on ties.
pub fn class_summary(dataset: &LaunchDataset, site: &str) -> Vec<ClassSummary> {
    let mut successes = 0;
    let mut failures = 0;
    for rec in dataset.records.iter().filter(|r| r.site == site) {
        match rec.outcome {
            Outcome::Success => successes += 1,
            Outcome::Failure => failures += 1,
        }
    }

    let mut rows: Vec<ClassSummary> = [(Outcome::Success, successes), (Outcome::Failure, failures)]
        .into_iter()
        .filter(|&(_, count)| count > 0)
        .map(|(outcome, count)| ClassSummary { outcome, count })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count));

    if rows.is_empty() && !dataset.has_site(site) {
        log::warn!("no launch records for site {site:?}");
    }
    rows
}
