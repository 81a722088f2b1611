// src/services/aggregate.rs
use std::collections::{BTreeMap, HashMap};

use crate::models::{SeriesPoint, TimeSeries};

/// Year-indexed outer join of several labelled series. A missing observation
/// leaves the cell absent; it is never defaulted to 0.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedTable {
    /// Column labels in selection order.
    pub labels: Vec<String>,
    /// Rows ascending by year.
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub year: i32,
    pub cells: HashMap<String, f64>,
}

pub fn build_table(selected: &[(String, TimeSeries)]) -> AggregatedTable {
    let mut by_year: BTreeMap<i32, HashMap<String, f64>> = BTreeMap::new();

    for (label, series) in selected {
        for point in &series.points {
            by_year
                .entry(point.year)
                .or_default()
                .insert(label.clone(), point.value);
        }
    }

    AggregatedTable {
        labels: selected.iter().map(|(label, _)| label.clone()).collect(),
        rows: by_year
            .into_iter()
            .map(|(year, cells)| TableRow { year, cells })
            .collect(),
    }
}

/// Income-to-expense ratio traces for one request.
///
/// `years` is the shared x-axis: the year list of the first expense that
/// produced any ratio points. Later traces reuse it even when their own year
/// sets differ, matching the dashboard's historical charting behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioSet {
    pub years: Vec<i32>,
    pub ratios: Vec<(String, TimeSeries)>,
}

/// Per expense label: intersect years with income, divide income by expense,
/// and drop years where the expense is zero.
pub fn build_ratio_series(income: &TimeSeries, expenses: &[(String, TimeSeries)]) -> RatioSet {
    let mut years: Vec<i32> = Vec::new();
    let mut ratios: Vec<(String, TimeSeries)> = Vec::new();

    for (label, expense) in expenses {
        let points: Vec<SeriesPoint> = expense
            .points
            .iter()
            .filter(|p| p.value != 0.0)
            .filter_map(|p| {
                income.value_at(p.year).map(|income_value| SeriesPoint {
                    year: p.year,
                    value: income_value / p.value,
                })
            })
            .collect();

        if points.is_empty() {
            continue;
        }
        let series = TimeSeries::new(points);
        if years.is_empty() {
            years = series.years();
        }
        ratios.push((label.clone(), series));
    }

    RatioSet { years, ratios }
}
