// src/handlers/comparison.rs
use std::sync::Arc;

use log::info;
use serde::Serialize;
use warp::reply::Json;
use warp::Rejection;

use super::params::{expense_categories, view_mode, year_range, ExpensesQuery};
use crate::models::{ExpenseCategory, SeriesId, SeriesPoint, TimeSeries};
use crate::services::aggregate::build_ratio_series;
use crate::services::metrics::{growth_percent, latest_ratio};
use crate::services::presentation::{
    fmt_percent, fmt_ratio, ratio_traces, ChartTrace, LineStyle, COLOR_INCOME_TREND,
    COLOR_MIN_WAGE, NA,
};
use crate::services::transform::{display_view, filter_by_year_range};
use crate::services::AppContext;

/// Hours per week times weeks per year: hourly minimum wage as a full-time
/// annual salary.
const FULL_TIME_HOURS_PER_YEAR: f64 = 40.0 * 52.0;

#[derive(Serialize)]
struct ComparisonResponse {
    comparison_chart: Vec<ChartTrace>,
    ratio_chart: Vec<ChartTrace>,
    income_housing_ratio: String,
    min_wage_growth: String,
}

fn full_time_annual(series: &TimeSeries) -> TimeSeries {
    let points = series
        .points
        .iter()
        .map(|p| SeriesPoint {
            year: p.year,
            value: p.value * FULL_TIME_HOURS_PER_YEAR,
        })
        .collect();
    TimeSeries::new(points)
}

pub async fn get_comparison(query: ExpensesQuery, ctx: Arc<AppContext>) -> Result<Json, Rejection> {
    info!(
        "Handling comparison request: {}-{} view={:?} categories={:?}",
        query.start_year, query.end_year, query.view, query.categories
    );
    let range = year_range(query.start_year, query.end_year)?;
    let mode = view_mode(query.view.as_deref())?;
    let categories = expense_categories(query.categories.as_deref())?;

    let filtered_income = filter_by_year_range(ctx.store.get(SeriesId::Income), range);
    let filtered_min_wage = filter_by_year_range(ctx.store.get(SeriesId::MinWage), range);

    let min_wage_growth = fmt_percent(growth_percent(&filtered_min_wage));

    let mut comparison_chart: Vec<ChartTrace> = Vec::new();

    comparison_chart.push(
        ChartTrace::lines("Median Income", &display_view(&filtered_income, mode, &ctx.view))
            .with_line(LineStyle {
                color: Some(COLOR_INCOME_TREND),
                width: Some(3),
                dash: None,
            }),
    );

    // The wage series is hourly; the chart shows it as a full-time annual
    // equivalent, scaled after the view transform.
    let min_wage_display = full_time_annual(&display_view(&filtered_min_wage, mode, &ctx.view));
    comparison_chart.push(
        ChartTrace::lines("Full-time Min. Wage", &min_wage_display).with_line(LineStyle {
            color: Some(COLOR_MIN_WAGE),
            width: Some(2),
            dash: Some("dot"),
        }),
    );

    // Ratios are computed from the raw filtered values, never the view.
    let mut filtered_expenses: Vec<(String, TimeSeries)> = Vec::new();
    let mut income_housing_ratio = NA.to_string();

    for category in &categories {
        let filtered = filter_by_year_range(ctx.store.get(category.series_id()), range);

        if *category == ExpenseCategory::Housing {
            income_housing_ratio = fmt_ratio(latest_ratio(&filtered_income, &filtered));
        }

        comparison_chart.push(ChartTrace::lines(
            category.label(),
            &display_view(&filtered, mode, &ctx.view),
        ));
        filtered_expenses.push((category.label().to_string(), filtered));
    }

    let ratio_set = build_ratio_series(&filtered_income, &filtered_expenses);
    let ratio_chart = ratio_traces(&ratio_set);

    Ok(warp::reply::json(&ComparisonResponse {
        comparison_chart,
        ratio_chart,
        income_housing_ratio,
        min_wage_growth,
    }))
}
