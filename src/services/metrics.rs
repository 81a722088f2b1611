// src/services/metrics.rs
use crate::models::{IncomeTier, TimeSeries};

/// Percent growth from the first to the last value of an already-filtered
/// series: `100 * (last - first) / first`. Needs at least two points and a
/// non-zero first value; anything less is unavailable, never 0.
pub fn growth_percent(series: &TimeSeries) -> Option<f64> {
    if series.len() < 2 {
        return None;
    }
    let first = series.first()?.value;
    let last = series.last()?.value;
    if first == 0.0 {
        return None;
    }
    Some(100.0 * (last - first) / first)
}

/// Ratio numerator/denominator at the most recent year present in both
/// series. Unavailable when there is no common year or the denominator at
/// that year is zero.
pub fn latest_ratio(numerator: &TimeSeries, denominator: &TimeSeries) -> Option<f64> {
    let latest_common = numerator
        .points
        .iter()
        .rev()
        .map(|p| p.year)
        .find(|&year| denominator.value_at(year).is_some())?;

    let num = numerator.value_at(latest_common)?;
    let den = denominator.value_at(latest_common)?;
    if den == 0.0 {
        return None;
    }
    Some(num / den)
}

/// Personal income measured against the latest median observation in the
/// filtered window.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeComparison {
    pub personal_income: f64,
    pub median_income: f64,
    pub median_year: i32,
    /// 100 * personal / median.
    pub ratio_percent: f64,
    /// personal - median; negative when below the median.
    pub difference: f64,
    pub tier: IncomeTier,
}

pub fn income_comparison(personal_income: f64, median_series: &TimeSeries) -> Option<IncomeComparison> {
    let latest = median_series.last()?;
    if latest.value == 0.0 {
        return None;
    }
    let ratio_percent = 100.0 * personal_income / latest.value;
    Some(IncomeComparison {
        personal_income,
        median_income: latest.value,
        median_year: latest.year,
        ratio_percent,
        difference: personal_income - latest.value,
        tier: IncomeTier::from_ratio_percent(ratio_percent),
    })
}
