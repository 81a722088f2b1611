// src/services/transform.rs
use crate::models::{SeriesPoint, TimeSeries, ViewMode, YearRange};

pub const DEFAULT_BASE_YEAR: i32 = 2020;

/// Flat annual rate used by the inflation-adjusted view. This is an
/// illustrative approximation, not CPI data.
pub const ANNUAL_INFLATION_RATE: f64 = 1.025;

/// Knobs for the view transform, built once at startup and shared with the
/// store rather than kept as globals.
#[derive(Debug, Clone, Copy)]
pub struct ViewConfig {
    pub base_year: i32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            base_year: DEFAULT_BASE_YEAR,
        }
    }
}

/// Subsequence of `series` whose year falls inside `range`, inclusive on
/// both ends. An empty result is a valid outcome, not an error.
pub fn filter_by_year_range(series: &TimeSeries, range: YearRange) -> TimeSeries {
    let points = series
        .points
        .iter()
        .filter(|p| range.contains(p.year))
        .copied()
        .collect();
    TimeSeries::new(points)
}

/// Apply a display mode to an already-filtered series.
///
/// `None` means the view is unavailable for this input: percent change needs
/// at least two points and a non-zero first value. It is never reported as a
/// zero series.
pub fn apply_view(series: &TimeSeries, mode: ViewMode, config: &ViewConfig) -> Option<TimeSeries> {
    match mode {
        ViewMode::Actual => Some(series.clone()),
        ViewMode::PercentChange => percent_change(series),
        ViewMode::InflationAdjusted => Some(inflation_adjusted(series, config.base_year)),
    }
}

/// View used for chart and table display: when the requested view is
/// unavailable for this input, the dashboard shows the actual values
/// instead of an empty panel.
pub fn display_view(series: &TimeSeries, mode: ViewMode, config: &ViewConfig) -> TimeSeries {
    apply_view(series, mode, config).unwrap_or_else(|| series.clone())
}

fn percent_change(series: &TimeSeries) -> Option<TimeSeries> {
    if series.len() < 2 {
        return None;
    }
    let first = series.first()?.value;
    if first == 0.0 {
        return None;
    }
    let points = series
        .points
        .iter()
        .map(|p| SeriesPoint {
            year: p.year,
            value: 100.0 * (p.value - first) / first,
        })
        .collect();
    Some(TimeSeries::new(points))
}

/// Scale each value by `1.025^(base_year - year)` to express it in
/// base-year dollars.
fn inflation_adjusted(series: &TimeSeries, base_year: i32) -> TimeSeries {
    let points = series
        .points
        .iter()
        .map(|p| SeriesPoint {
            year: p.year,
            value: p.value * ANNUAL_INFLATION_RATE.powi(base_year - p.year),
        })
        .collect();
    TimeSeries::new(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(i32, f64)]) -> TimeSeries {
        TimeSeries::new(
            points
                .iter()
                .map(|&(year, value)| SeriesPoint { year, value })
                .collect(),
        )
    }

    #[test]
    fn filter_keeps_only_in_range_years_in_order() {
        let s = series(&[(1998, 1.0), (2000, 2.0), (2005, 3.0), (2010, 4.0)]);
        let filtered = filter_by_year_range(&s, YearRange::new(2000, 2005).unwrap());
        assert_eq!(filtered.years(), vec![2000, 2005]);
        assert_eq!(filtered.value_at(2000), Some(2.0));
    }

    #[test]
    fn filter_outside_data_is_empty_not_an_error() {
        let s = series(&[(2000, 2.0)]);
        let filtered = filter_by_year_range(&s, YearRange::new(1980, 1990).unwrap());
        assert!(filtered.is_empty());
    }

    #[test]
    fn actual_view_is_identity_and_idempotent() {
        let s = series(&[(2000, 2.0), (2001, 3.0)]);
        let once = apply_view(&s, ViewMode::Actual, &ViewConfig::default()).unwrap();
        assert_eq!(once, s);
        let twice = apply_view(&once, ViewMode::Actual, &ViewConfig::default()).unwrap();
        assert_eq!(twice, s);
    }

    #[test]
    fn percent_change_is_relative_to_first_value() {
        let s = series(&[(2018, 70000.0), (2019, 72000.0), (2020, 75000.0)]);
        let view = apply_view(&s, ViewMode::PercentChange, &ViewConfig::default()).unwrap();
        assert_eq!(view.value_at(2018), Some(0.0));
        let last = view.last().unwrap().value;
        let expected = 100.0 * (75000.0 - 70000.0) / 70000.0;
        assert!((last - expected).abs() < 1e-9);
    }

    #[test]
    fn percent_change_unavailable_on_short_series() {
        let s = series(&[(2020, 75000.0)]);
        assert!(apply_view(&s, ViewMode::PercentChange, &ViewConfig::default()).is_none());
    }

    #[test]
    fn percent_change_unavailable_on_zero_first_value() {
        let s = series(&[(2019, 0.0), (2020, 10.0)]);
        assert!(apply_view(&s, ViewMode::PercentChange, &ViewConfig::default()).is_none());
    }

    #[test]
    fn inflation_adjustment_scales_toward_base_year() {
        // 100 at year 2000 in 2020 dollars: 100 * 1.025^20.
        let s = series(&[(2000, 100.0)]);
        let view = apply_view(&s, ViewMode::InflationAdjusted, &ViewConfig::default()).unwrap();
        let adjusted = view.value_at(2000).unwrap();
        assert!((adjusted - 163.86).abs() < 0.01);
    }

    #[test]
    fn display_view_falls_back_to_actual_when_unavailable() {
        let s = series(&[(2020, 75000.0)]);
        let shown = display_view(&s, ViewMode::PercentChange, &ViewConfig::default());
        assert_eq!(shown, s);
    }

    #[test]
    fn inflation_adjustment_respects_configured_base_year() {
        let s = series(&[(2000, 100.0)]);
        let cfg = ViewConfig { base_year: 2000 };
        let view = apply_view(&s, ViewMode::InflationAdjusted, &cfg).unwrap();
        assert_eq!(view.value_at(2000), Some(100.0));
    }
}
