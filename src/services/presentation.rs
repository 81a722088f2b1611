// src/services/presentation.rs
use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::TimeSeries;
use crate::services::aggregate::{AggregatedTable, RatioSet};

/// Token the rendering sink shows for any unavailable metric.
pub const NA: &str = "N/A";

// Trace colors carried over from the dashboard palette.
pub const COLOR_MEDIAN_INCOME: &str = "#1f77b4";
pub const COLOR_PERSONAL_INCOME: &str = "#ff7f0e";
pub const COLOR_INCOME_TREND: &str = "rgb(0, 128, 0)";
pub const COLOR_MIN_WAGE: &str = "rgb(128, 128, 0)";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: i32,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LineStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<&'static str>,
}

/// One chart trace for the rendering sink: a label, ordered (year, value)
/// pairs, and style hints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartTrace {
    pub label: String,
    pub mode: &'static str,
    pub points: Vec<ChartPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
}

impl ChartTrace {
    pub fn lines(label: impl Into<String>, series: &TimeSeries) -> Self {
        ChartTrace {
            label: label.into(),
            mode: "lines",
            points: series_points(series),
            line: None,
        }
    }

    pub fn lines_markers(label: impl Into<String>, series: &TimeSeries) -> Self {
        ChartTrace {
            label: label.into(),
            mode: "lines+markers",
            points: series_points(series),
            line: None,
        }
    }

    pub fn with_line(mut self, line: LineStyle) -> Self {
        self.line = Some(line);
        self
    }
}

fn series_points(series: &TimeSeries) -> Vec<ChartPoint> {
    series
        .points
        .iter()
        .map(|p| ChartPoint {
            x: p.year,
            y: p.value,
        })
        .collect()
}

/// Ratio traces share the request's reference year axis; a trace with fewer
/// values than axis years is truncated to the shorter of the two.
pub fn ratio_traces(set: &RatioSet) -> Vec<ChartTrace> {
    set.ratios
        .iter()
        .map(|(label, series)| ChartTrace {
            label: format!("Income-to-{} Ratio", label),
            mode: "lines+markers",
            points: set
                .years
                .iter()
                .zip(series.points.iter())
                .map(|(&year, p)| ChartPoint { x: year, y: p.value })
                .collect(),
            line: None,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableColumn {
    pub name: String,
    pub id: String,
}

/// Table shape consumed by the rendering sink: ordered column definitions
/// plus one key→value map per row. Absent observations stay absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSpec {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Map<String, Value>>,
}

/// Build a table spec from an aggregated table. `columns` pairs each series
/// label with its view-dependent display name, in column order. Cell values
/// are rounded to two decimals when `round_cells` is set (the expenses table
/// does this; the income table reports raw values).
pub fn table_spec(table: &AggregatedTable, columns: &[(String, String)], round_cells: bool) -> TableSpec {
    let mut spec_columns = vec![TableColumn {
        name: "Year".to_string(),
        id: "Year".to_string(),
    }];
    for (id, name) in columns {
        spec_columns.push(TableColumn {
            name: name.clone(),
            id: id.clone(),
        });
    }

    let rows = table
        .rows
        .iter()
        .map(|row| {
            let mut cells = Map::new();
            cells.insert("Year".to_string(), Value::from(row.year));
            for label in &table.labels {
                if let Some(&value) = row.cells.get(label) {
                    let value = if round_cells { round2(value) } else { value };
                    cells.insert(label.clone(), Value::from(value));
                }
            }
            cells
        })
        .collect();

    TableSpec {
        columns: spec_columns,
        rows,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentages render to one decimal place with a trailing `%`.
pub fn fmt_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}%", v),
        None => NA.to_string(),
    }
}

/// Ratios render to two decimal places.
pub fn fmt_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => NA.to_string(),
    }
}

/// Currency renders to whole dollars with thousands separators and a
/// leading `$`.
pub fn fmt_currency(value: f64) -> String {
    let rounded = value.round() as i64;
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{}${}", sign, group_thousands(rounded.unsigned_abs()))
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
