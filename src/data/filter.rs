use std::fmt;

use serde::Serialize;

use super::model::{LaunchDataset, LaunchRecord};

/// Dropdown value that stands for "every site".
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// Site selection
// ---------------------------------------------------------------------------

/// The single-choice site selector: either every site or one named site.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Interpret a dropdown value; `"ALL"` is the sentinel.
    pub fn from_value(value: &str) -> Self {
        if value == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    /// Value as shown in the dropdown option list.
    pub fn value(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES,
            SiteSelection::Site(s) => s,
        }
    }

    /// Whether `site` passes this selection.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(s) => s == site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => f.write_str("All Sites"),
            SiteSelection::Site(s) => f.write_str(s),
        }
    }
}

// ---------------------------------------------------------------------------
// Payload range
// ---------------------------------------------------------------------------

/// Inclusive payload mass interval. `low <= high` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    /// Build a range, swapping inverted bounds.
    pub fn new(low: f64, high: f64) -> Self {
        if low > high {
            log::warn!("payload range [{low}, {high}] is inverted, swapping bounds");
            PayloadRange { low: high, high: low }
        } else {
            PayloadRange { low, high }
        }
    }

    /// The range spanning the whole dataset.
    pub fn full(dataset: &LaunchDataset) -> Self {
        PayloadRange {
            low: dataset.payload_min,
            high: dataset.payload_max,
        }
    }

    /// Clamp both ends into the dataset's payload bounds.
    pub fn clamped_to(self, dataset: &LaunchDataset) -> Self {
        let (min, max) = (dataset.payload_min, dataset.payload_max);
        PayloadRange {
            low: self.low.clamp(min, max),
            high: self.high.clamp(min, max),
        }
    }

    pub fn contains(&self, payload: f64) -> bool {
        self.low <= payload && payload <= self.high
    }
}

// ---------------------------------------------------------------------------
// Filter state
// ---------------------------------------------------------------------------

/// Current values of the two dashboard controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterState {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

/// Initialise a [`FilterState`] that shows everything.
pub fn init_filter_state(dataset: &LaunchDataset) -> FilterState {
    FilterState {
        site: SiteSelection::All,
        payload: PayloadRange::full(dataset),
    }
}

/// Return indices of records whose payload lies in `range` and whose site
/// passes `site`.
pub fn filtered_indices(
    dataset: &LaunchDataset,
    range: &PayloadRange,
    site: &SiteSelection,
) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| range.contains(rec.payload_mass_kg) && site.matches(&rec.site))
        .map(|(i, _)| i)
        .collect()
}

/// Return the records whose payload lies in `[low, high]`, restricted to
/// `site` unless it is [`SiteSelection::All`]. Input order is preserved.
///
/// Inverted bounds are swapped rather than producing an empty result.
pub fn filter_by_payload_range<'a>(
    dataset: &'a LaunchDataset,
    low: f64,
    high: f64,
    site: &SiteSelection,
) -> Vec<&'a LaunchRecord> {
    filtered_indices(dataset, &PayloadRange::new(low, high), site)
        .into_iter()
        .map(|i| &dataset.records[i])
        .collect()
}

// ---------------------------------------------------------------------------
// Slider helpers
// ---------------------------------------------------------------------------

/// Snap a slider value to `min + k * step`, keeping `max` reachable.
pub fn snap_to_step(value: f64, min: f64, max: f64, step: f64) -> f64 {
    if step <= 0.0 || max <= min {
        return value.clamp(min, max.max(min));
    }
    let value = value.clamp(min, max);
    if value == max {
        return max;
    }
    let snapped = min + ((value - min) / step).round() * step;
    snapped.min(max)
}

/// Upper bound on the number of slider tick marks.
pub const MAX_PAYLOAD_MARKS: usize = 100;

/// Tick marks for the payload slider: every `step` from `floor(min)` up to
/// `floor(max)` inclusive.
///
/// A range narrower than one step yields a single mark at `floor(min)`. When
/// the range would need more than [`MAX_PAYLOAD_MARKS`] marks, only every
/// n-th multiple of `step` is kept.
pub fn payload_marks(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || step.is_nan() || step <= 0.0 {
        return Vec::new();
    }
    let start = min.floor();
    let steps = ((max.floor() - start) / step).floor();
    if !steps.is_finite() || steps < 1.0 {
        return vec![start];
    }

    let stride = (steps / (MAX_PAYLOAD_MARKS - 1) as f64).ceil().max(1.0);
    let count = (steps / stride).floor() as usize;
    (0..=count)
        .map(|k| start + k as f64 * stride * step)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{record, two_sites};
    use crate::data::model::Outcome;
    use proptest::prelude::*;

    fn payloads(records: &[&LaunchRecord]) -> Vec<f64> {
        records.iter().map(|r| r.payload_mass_kg).collect()
    }

    #[test]
    fn filters_inclusive_range_across_all_sites() {
        let ds = LaunchDataset::from_records(vec![
            record("A", 400.0, Outcome::Success, "FT"),
            record("A", 600.0, Outcome::Success, "FT"),
            record("B", 1600.0, Outcome::Failure, "FT"),
        ]);
        let hits = filter_by_payload_range(&ds, 500.0, 1500.0, &SiteSelection::All);
        assert_eq!(payloads(&hits), vec![600.0]);

        let edges = filter_by_payload_range(&ds, 400.0, 1600.0, &SiteSelection::All);
        assert_eq!(edges.len(), 3);
    }

    #[test]
    fn full_range_returns_whole_dataset_in_order() {
        let ds = two_sites();
        let hits =
            filter_by_payload_range(&ds, ds.payload_min, ds.payload_max, &SiteSelection::All);
        let all: Vec<&LaunchRecord> = ds.records.iter().collect();
        assert_eq!(hits, all);
    }

    #[test]
    fn site_restriction_applies_after_range() {
        let ds = two_sites();
        let hits = filter_by_payload_range(&ds, 0.0, 10_000.0, &SiteSelection::from_value("B"));
        assert_eq!(payloads(&hits), vec![2500.0, 5300.0]);
    }

    #[test]
    fn unknown_site_yields_no_records() {
        let ds = two_sites();
        let hits = filter_by_payload_range(&ds, 0.0, 10_000.0, &SiteSelection::from_value("Z"));
        assert!(hits.is_empty());
    }

    #[test]
    fn inverted_range_is_swapped() {
        let ds = two_sites();
        let hits = filter_by_payload_range(&ds, 1500.0, 500.0, &SiteSelection::All);
        assert_eq!(payloads(&hits), vec![600.0]);
        assert_eq!(PayloadRange::new(9.0, 3.0), PayloadRange { low: 3.0, high: 9.0 });
    }

    #[test]
    fn clamping_keeps_range_inside_dataset() {
        let ds = two_sites();
        let range = PayloadRange::new(-100.0, 99_999.0).clamped_to(&ds);
        assert_eq!(range, PayloadRange::full(&ds));
    }

    #[test]
    fn all_sentinel_round_trips_through_dropdown_value() {
        assert_eq!(SiteSelection::from_value(ALL_SITES), SiteSelection::All);
        assert_eq!(SiteSelection::All.value(), "ALL");
        assert_eq!(SiteSelection::from_value("KSC LC-39A").value(), "KSC LC-39A");
    }

    #[test]
    fn snapping_follows_step_from_minimum() {
        assert_eq!(snap_to_step(1450.0, 0.0, 9600.0, 1000.0), 1000.0);
        assert_eq!(snap_to_step(1600.0, 0.0, 9600.0, 1000.0), 2000.0);
        assert_eq!(snap_to_step(9600.0, 0.0, 9600.0, 1000.0), 9600.0);
        assert_eq!(snap_to_step(9400.0, 0.0, 9600.0, 1000.0), 9000.0);
        assert_eq!(snap_to_step(12_000.0, 0.0, 9600.0, 1000.0), 9600.0);
        assert_eq!(snap_to_step(5.0, 5.0, 5.0, 1000.0), 5.0);
    }

    #[test]
    fn marks_step_from_floor_of_minimum() {
        assert_eq!(payload_marks(0.0, 9600.0, 2000.0), vec![0.0, 2000.0, 4000.0, 6000.0, 8000.0]);
        assert_eq!(payload_marks(362.5, 4400.0, 2000.0), vec![362.0, 2362.0, 4362.0]);
    }

    #[test]
    fn degenerate_marks_never_loop_or_vanish() {
        assert_eq!(payload_marks(500.0, 500.0, 2000.0), vec![500.0]);
        assert_eq!(payload_marks(500.0, 700.0, 2000.0), vec![500.0]);
        assert!(payload_marks(0.0, 100.0, 0.0).is_empty());
        assert!(payload_marks(f64::NAN, 100.0, 2000.0).is_empty());
        assert!(payload_marks(0.0, 100.0, f64::NAN).is_empty());
        assert_eq!(payload_marks(700.0, 500.0, 2000.0), vec![700.0]);
    }

    #[test]
    fn marks_at_huge_magnitudes_terminate() {
        // Adding 2000 to 1e20 does not change it.
        assert_eq!(payload_marks(1e20, 1e20, 2000.0), vec![1e20]);

        let marks = payload_marks(1e20, 2e20, 2000.0);
        assert!(marks.len() <= MAX_PAYLOAD_MARKS);
        assert_eq!(marks[0], 1e20);
        assert!(marks.iter().all(|&m| m <= 2e20));
    }

    #[test]
    fn wide_ranges_are_capped_on_step_multiples() {
        let marks = payload_marks(0.0, 1e12, 2000.0);
        assert!(marks.len() > 1 && marks.len() <= MAX_PAYLOAD_MARKS);
        assert!(marks.windows(2).all(|w| w[1] > w[0]));
        assert!(marks.iter().all(|&m| m % 2000.0 == 0.0 && m <= 1e12));

        assert_eq!(payload_marks(0.0, 1e6, 1e-300), vec![0.0]);
    }

    proptest! {
        #[test]
        fn filtered_records_are_exactly_those_in_range(
            values in proptest::collection::vec(0.0f64..10_000.0, 0..40),
            a in 0.0f64..10_000.0,
            b in 0.0f64..10_000.0,
        ) {
            let records = values
                .iter()
                .map(|&p| record("S", p, Outcome::Success, "FT"))
                .collect();
            let ds = LaunchDataset::from_records(records);
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let hits = filter_by_payload_range(&ds, low, high, &SiteSelection::All);
            let expected: Vec<f64> = values
                .iter()
                .copied()
                .filter(|&p| low <= p && p <= high)
                .collect();
            prop_assert_eq!(payloads(&hits), expected);
        }

        #[test]
        fn marks_are_bounded_and_inside_range(
            min in -1e15f64..1e15,
            span in 0.0f64..1e15,
            step in 1.0f64..5000.0,
        ) {
            let max = min + span;
            let marks = payload_marks(min, max, step);
            prop_assert!(!marks.is_empty());
            prop_assert!(marks.len() <= MAX_PAYLOAD_MARKS);
            prop_assert_eq!(marks[0], min.floor());
            prop_assert!(marks.iter().all(|&m| m <= max.floor() + step));
        }
    }
}
