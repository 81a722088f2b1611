// src/handlers/expenses.rs
use std::sync::Arc;

use log::info;
use serde::Serialize;
use warp::reply::Json;
use warp::Rejection;

use super::params::{expense_categories, view_mode, year_range, ExpensesQuery};
use crate::models::{ExpenseCategory, TimeSeries, ViewMode};
use crate::services::aggregate::build_table;
use crate::services::metrics::growth_percent;
use crate::services::presentation::{fmt_percent, table_spec, ChartTrace, TableSpec, NA};
use crate::services::transform::{display_view, filter_by_year_range};
use crate::services::AppContext;

#[derive(Serialize)]
struct ExpensesResponse {
    chart: Vec<ChartTrace>,
    table: TableSpec,
    housing_growth: String,
}

fn column_display_name(label: &str, mode: ViewMode, base_year: i32) -> String {
    match mode {
        ViewMode::PercentChange => format!("{} (% Change)", label),
        ViewMode::InflationAdjusted => format!("{} ({} $)", label, base_year),
        ViewMode::Actual => label.to_string(),
    }
}

pub async fn get_expenses(query: ExpensesQuery, ctx: Arc<AppContext>) -> Result<Json, Rejection> {
    info!(
        "Handling expenses request: {}-{} view={:?} categories={:?}",
        query.start_year, query.end_year, query.view, query.categories
    );
    let range = year_range(query.start_year, query.end_year)?;
    let mode = view_mode(query.view.as_deref())?;
    let categories = expense_categories(query.categories.as_deref())?;

    let mut chart: Vec<ChartTrace> = Vec::new();
    let mut selected: Vec<(String, TimeSeries)> = Vec::new();
    let mut housing_growth = NA.to_string();

    for category in &categories {
        let filtered = filter_by_year_range(ctx.store.get(category.series_id()), range);

        // The housing KPI tracks the raw filtered values.
        if *category == ExpenseCategory::Housing {
            housing_growth = fmt_percent(growth_percent(&filtered));
        }

        let display = display_view(&filtered, mode, &ctx.view);
        chart.push(ChartTrace::lines_markers(category.label(), &display));
        selected.push((category.label().to_string(), display));
    }

    let columns: Vec<(String, String)> = categories
        .iter()
        .map(|c| {
            (
                c.label().to_string(),
                column_display_name(c.label(), mode, ctx.view.base_year),
            )
        })
        .collect();
    let table = build_table(&selected);
    let table = table_spec(&table, &columns, true);

    Ok(warp::reply::json(&ExpensesResponse {
        chart,
        table,
        housing_growth,
    }))
}
