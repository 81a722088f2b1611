// src/handlers/series.rs
use std::sync::Arc;

use log::info;
use warp::reply::Json;
use warp::Rejection;

use crate::services::AppContext;

/// Catalogue of the loaded series: label, point count, and year span each.
pub async fn get_series(ctx: Arc<AppContext>) -> Result<Json, Rejection> {
    info!("Handling series catalogue request");
    Ok(warp::reply::json(&ctx.store.summaries()))
}
