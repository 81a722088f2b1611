// src/routes.rs
use std::convert::Infallible;
use std::sync::Arc;

use log::info;
use warp::reject::Rejection;
use warp::{Filter, Reply};

use crate::handlers::error::ApiError;
use crate::handlers::params::{AffordabilityQuery, ExpensesQuery, RangeViewQuery};
use crate::handlers::{
    affordability::get_affordability, comparison::get_comparison, expenses::get_expenses,
    income::get_income, series::get_series,
};
use crate::services::AppContext;

// Recovery handling for our custom errors and warp's query rejections.
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = warp::http::StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status();
        message = api_error.message.clone();
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        code = warp::http::StatusCode::BAD_REQUEST;
        message = "Invalid query string".to_string();
    } else {
        code = warp::http::StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes(
    ctx: Arc<AppContext>,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let ctx_filter = warp::any().map(move || ctx.clone());

    let series_route = warp::path!("api" / "v1" / "series")
        .and(warp::get())
        .and(ctx_filter.clone())
        .and_then(get_series);

    let income_route = warp::path!("api" / "v1" / "income")
        .and(warp::get())
        .and(warp::query::<RangeViewQuery>())
        .and(ctx_filter.clone())
        .and_then(get_income);

    let expenses_route = warp::path!("api" / "v1" / "expenses")
        .and(warp::get())
        .and(warp::query::<ExpensesQuery>())
        .and(ctx_filter.clone())
        .and_then(get_expenses);

    let comparison_route = warp::path!("api" / "v1" / "comparison")
        .and(warp::get())
        .and(warp::query::<ExpensesQuery>())
        .and(ctx_filter.clone())
        .and_then(get_comparison);

    let affordability_route = warp::path!("api" / "v1" / "affordability")
        .and(warp::get())
        .and(warp::query::<AffordabilityQuery>())
        .and(ctx_filter.clone())
        .and_then(get_affordability);

    info!("All routes configured successfully.");

    series_route
        .or(income_route)
        .or(expenses_route)
        .or(comparison_route)
        .or(affordability_route)
        .recover(handle_rejection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SeriesPoint, TimeSeries};
    use crate::services::store::SeriesStore;
    use crate::services::transform::ViewConfig;
    use serde_json::Value;

    fn series(points: &[(i32, f64)]) -> TimeSeries {
        TimeSeries::new(
            points
                .iter()
                .map(|&(year, value)| SeriesPoint { year, value })
                .collect(),
        )
    }

    fn test_ctx() -> Arc<AppContext> {
        let min_wage = series(&[(2018, 11.0), (2019, 12.0), (2020, 13.0)]);
        let energy = series(&[(2018, 3000.0), (2019, 3100.0), (2020, 3200.0)]);
        let healthcare = series(&[(2018, 7000.0), (2019, 7400.0), (2020, 7800.0)]);
        let housing = series(&[(2018, 14000.0), (2019, 15000.0), (2020, 16000.0)]);
        let leisure = series(&[(2018, 1500.0), (2019, 1550.0), (2020, 1600.0)]);
        let income = series(&[(2018, 70000.0), (2019, 72000.0), (2020, 75000.0)]);
        Arc::new(AppContext::new(
            SeriesStore::from_parts(min_wage, energy, healthcare, housing, leisure, income),
            ViewConfig::default(),
        ))
    }

    async fn get(path: &str) -> (warp::http::StatusCode, Value) {
        let api = routes(test_ctx());
        let resp = warp::test::request().method("GET").path(path).reply(&api).await;
        let body = serde_json::from_slice(resp.body()).unwrap_or(Value::Null);
        (resp.status(), body)
    }

    #[tokio::test]
    async fn income_endpoint_reports_growth_and_table() {
        let (status, body) = get("/api/v1/income?start_year=2018&end_year=2020").await;
        assert_eq!(status, 200);
        assert_eq!(body["growth"], "7.1%");
        assert_eq!(body["chart"][0]["points"][0]["x"], 2018);
        assert_eq!(body["table"]["columns"][0]["id"], "Year");
        assert_eq!(body["table"]["columns"][1]["name"], "Median Income ($)");
        assert_eq!(body["table"]["rows"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn income_growth_is_na_for_single_year_window() {
        let (status, body) = get("/api/v1/income?start_year=2020&end_year=2020").await;
        assert_eq!(status, 200);
        assert_eq!(body["growth"], "N/A");
    }

    #[tokio::test]
    async fn percent_view_renames_columns() {
        let (_, body) = get("/api/v1/income?start_year=2018&end_year=2020&view=percent").await;
        assert_eq!(body["table"]["columns"][1]["name"], "Percent Change (%)");
        // First point of a percent-change series is always 0.
        assert_eq!(body["chart"][0]["points"][0]["y"], 0.0);
    }

    #[tokio::test]
    async fn expenses_endpoint_merges_selected_categories() {
        let (status, body) =
            get("/api/v1/expenses?start_year=2018&end_year=2020&categories=housing,energy").await;
        assert_eq!(status, 200);
        let traces = body["chart"].as_array().unwrap();
        assert_eq!(traces.len(), 2);
        // Canonical order: energy before housing.
        assert_eq!(traces[0]["label"], "Energy & Gas");
        assert_eq!(traces[1]["label"], "Housing & Utilities");
        assert_eq!(body["housing_growth"], "14.3%");
    }

    #[tokio::test]
    async fn expenses_housing_growth_is_na_when_unselected() {
        let (_, body) =
            get("/api/v1/expenses?start_year=2018&end_year=2020&categories=energy").await;
        assert_eq!(body["housing_growth"], "N/A");
    }

    #[tokio::test]
    async fn comparison_endpoint_reports_ratio_kpis() {
        let (status, body) = get("/api/v1/comparison?start_year=2018&end_year=2020").await;
        assert_eq!(status, 200);
        // 75000 / 16000 at the latest common year.
        assert_eq!(body["income_housing_ratio"], "4.69");
        assert_eq!(body["min_wage_growth"], "18.2%");

        let traces = body["comparison_chart"].as_array().unwrap();
        assert_eq!(traces[0]["label"], "Median Income");
        assert_eq!(traces[1]["label"], "Full-time Min. Wage");
        // Hourly 11.0 scaled to a full-time annual equivalent.
        assert_eq!(traces[1]["points"][0]["y"], 11.0 * 40.0 * 52.0);

        let ratio_traces = body["ratio_chart"].as_array().unwrap();
        assert_eq!(ratio_traces.len(), 4);
    }

    #[tokio::test]
    async fn affordability_endpoint_bands_personal_income() {
        let (status, body) =
            get("/api/v1/affordability?income=60000&start_year=2018&end_year=2020").await;
        assert_eq!(status, 200);
        assert_eq!(body["tier"], "near");
        assert_eq!(body["ratio_percent"], "80.0%");
        assert_eq!(body["difference"], "$15,000");
        assert!(body["detail"].as_str().unwrap().contains("less"));
        assert!(body["headline"].as_str().unwrap().contains("$75,000"));
        assert_eq!(body["chart"][1]["label"], "Your Income");
    }

    #[tokio::test]
    async fn inverted_range_is_rejected() {
        let (status, body) = get("/api/v1/income?start_year=2020&end_year=2010").await;
        assert_eq!(status, 400);
        assert!(body["error"].as_str().unwrap().contains("start_year"));
    }

    #[tokio::test]
    async fn negative_income_is_rejected() {
        let (status, _) =
            get("/api/v1/affordability?income=-5&start_year=2018&end_year=2020").await;
        assert_eq!(status, 400);
    }

    #[tokio::test]
    async fn unknown_category_is_rejected() {
        let (status, _) =
            get("/api/v1/expenses?start_year=2018&end_year=2020&categories=rent").await;
        assert_eq!(status, 400);
    }

    #[tokio::test]
    async fn missing_required_params_are_a_bad_request() {
        let (status, _) = get("/api/v1/income?start_year=2018").await;
        assert_eq!(status, 400);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (status, _) = get("/api/v1/nope").await;
        assert_eq!(status, 404);
    }

    #[tokio::test]
    async fn series_catalogue_lists_all_six() {
        let (status, body) = get("/api/v1/series").await;
        assert_eq!(status, 200);
        assert_eq!(body.as_array().unwrap().len(), 6);
    }
}
