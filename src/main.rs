use std::env;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use dotenv::dotenv;
use log::{error, info, warn};
use warp::Filter;

use cali_col_dashboard::routes;
use cali_col_dashboard::services::store::SeriesStore;
use cali_col_dashboard::services::transform::{ViewConfig, DEFAULT_BASE_YEAR};
use cali_col_dashboard::services::AppContext;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // Initialize the logger
    env_logger::init();
    info!("Logger initialized. Starting the application...");

    let port_str = env::var("PORT").unwrap_or_else(|_| {
        warn!("$PORT not set, defaulting to 3030");
        "3030".to_string()
    });
    let port: u16 = port_str.parse().expect("PORT must be a number");
    info!("Using PORT: {}", port);

    let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let base_year = match env::var("INFLATION_BASE_YEAR") {
        Ok(raw) => raw
            .parse()
            .expect("INFLATION_BASE_YEAR must be a calendar year"),
        Err(_) => DEFAULT_BASE_YEAR,
    };

    // The dashboard cannot serve without all six series; abort on any
    // load failure rather than start with partial data.
    info!("Loading series data from {}", data_dir);
    let store = match SeriesStore::load(Path::new(&data_dir)) {
        Ok(store) => store,
        Err(e) => {
            error!("Cannot start without series data: {:#}", e);
            std::process::exit(1);
        }
    };

    let ctx = Arc::new(AppContext::new(store, ViewConfig { base_year }));

    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    info!("Will bind to: {}", addr);

    // Set up CORS
    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["GET"]);

    let api = routes::routes(ctx).with(cors);
    info!("Routes configured successfully with CORS.");

    info!("Starting server on {}", addr);
    warp::serve(api).run(addr).await;
}
