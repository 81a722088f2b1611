// src/handlers/income.rs
use std::sync::Arc;

use log::info;
use serde::Serialize;
use warp::reply::Json;
use warp::Rejection;

use super::params::{view_mode, year_range, RangeViewQuery};
use crate::models::{SeriesId, ViewMode};
use crate::services::aggregate::build_table;
use crate::services::metrics::growth_percent;
use crate::services::presentation::{fmt_percent, table_spec, ChartTrace, TableSpec};
use crate::services::transform::{display_view, filter_by_year_range};
use crate::services::AppContext;

const INCOME_LABEL: &str = "Median Household Income";

#[derive(Serialize)]
struct IncomeResponse {
    chart: Vec<ChartTrace>,
    table: TableSpec,
    growth: String,
}

pub async fn get_income(query: RangeViewQuery, ctx: Arc<AppContext>) -> Result<Json, Rejection> {
    info!(
        "Handling income request: {}-{} view={:?}",
        query.start_year, query.end_year, query.view
    );
    let range = year_range(query.start_year, query.end_year)?;
    let mode = view_mode(query.view.as_deref())?;

    let filtered = filter_by_year_range(ctx.store.get(SeriesId::Income), range);

    // Growth is measured on the raw filtered values, not the display view.
    let growth = fmt_percent(growth_percent(&filtered));

    let display = display_view(&filtered, mode, &ctx.view);
    let chart = vec![ChartTrace::lines(INCOME_LABEL, &display)];

    let display_name = match mode {
        ViewMode::PercentChange => "Percent Change (%)".to_string(),
        ViewMode::InflationAdjusted => format!("Adjusted Income ({} $)", ctx.view.base_year),
        ViewMode::Actual => "Median Income ($)".to_string(),
    };
    let table = build_table(&[(INCOME_LABEL.to_string(), display)]);
    let table = table_spec(&table, &[(INCOME_LABEL.to_string(), display_name)], false);

    Ok(warp::reply::json(&IncomeResponse {
        chart,
        table,
        growth,
    }))
}
