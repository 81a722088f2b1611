// src/handlers/affordability.rs
use std::sync::Arc;

use log::info;
use serde::Serialize;
use warp::reply::Json;
use warp::Rejection;

use super::params::{personal_income, year_range, AffordabilityQuery};
use crate::models::{IncomeTier, SeriesId};
use crate::services::metrics::income_comparison;
use crate::services::presentation::{
    fmt_currency, fmt_percent, ChartPoint, ChartTrace, LineStyle, COLOR_MEDIAN_INCOME,
    COLOR_PERSONAL_INCOME, NA,
};
use crate::services::transform::filter_by_year_range;
use crate::services::AppContext;

#[derive(Serialize)]
struct AffordabilityResponse {
    tier: Option<IncomeTier>,
    headline: String,
    detail: String,
    message: String,
    ratio_percent: String,
    difference: String,
    chart: Vec<ChartTrace>,
}

pub async fn get_affordability(
    query: AffordabilityQuery,
    ctx: Arc<AppContext>,
) -> Result<Json, Rejection> {
    info!(
        "Handling affordability request: income={} range {}-{}",
        query.income, query.start_year, query.end_year
    );
    let income = personal_income(query.income)?;
    let range = year_range(query.start_year, query.end_year)?;

    let filtered = filter_by_year_range(ctx.store.get(SeriesId::Income), range);

    let comparison = match income_comparison(income, &filtered) {
        Some(c) => c,
        None => {
            // No median observation in the window: every field reads N/A.
            return Ok(warp::reply::json(&AffordabilityResponse {
                tier: None,
                headline: NA.to_string(),
                detail: NA.to_string(),
                message: NA.to_string(),
                ratio_percent: NA.to_string(),
                difference: NA.to_string(),
                chart: Vec::new(),
            }));
        }
    };

    let direction = if comparison.difference >= 0.0 {
        "more"
    } else {
        "less"
    };
    let headline = format!(
        "Your income is {} California's {} median income of {}",
        comparison.tier.phrase(),
        comparison.median_year,
        fmt_currency(comparison.median_income),
    );
    let detail = format!(
        "You earn {} {} than the median California household. Your income is {} of the state median.",
        fmt_currency(comparison.difference.abs()),
        direction,
        fmt_percent(Some(comparison.ratio_percent)),
    );

    let mut chart = vec![ChartTrace::lines_markers("CA Median Income", &filtered).with_line(
        LineStyle {
            color: Some(COLOR_MEDIAN_INCOME),
            width: Some(3),
            dash: None,
        },
    )];

    // Personal income as a horizontal line spanning the filtered window.
    if let (Some(first), Some(last)) = (filtered.first(), filtered.last()) {
        chart.push(ChartTrace {
            label: "Your Income".to_string(),
            mode: "lines",
            points: vec![
                ChartPoint {
                    x: first.year,
                    y: income,
                },
                ChartPoint {
                    x: last.year,
                    y: income,
                },
            ],
            line: Some(LineStyle {
                color: Some(COLOR_PERSONAL_INCOME),
                width: Some(2),
                dash: Some("dash"),
            }),
        });
    }

    Ok(warp::reply::json(&AffordabilityResponse {
        tier: Some(comparison.tier),
        headline,
        detail,
        message: comparison.tier.message().to_string(),
        ratio_percent: fmt_percent(Some(comparison.ratio_percent)),
        difference: fmt_currency(comparison.difference.abs()),
        chart,
    }))
}
