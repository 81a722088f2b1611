// src/bin/validate_data.rs
use std::env;
use std::path::Path;

use anyhow::Result;
use dotenv::dotenv;

use cali_col_dashboard::services::store::SeriesStore;

/// Load the data directory the way the server does and print a per-series
/// summary, for checking a new data drop before deploying.
fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
    println!("Validating series data in {}/", data_dir);

    let store = SeriesStore::load(Path::new(&data_dir))?;

    for summary in store.summaries() {
        let span = match (summary.start_year, summary.end_year) {
            (Some(start), Some(end)) => format!("{}-{}", start, end),
            _ => "empty".to_string(),
        };
        println!(
            "  {:<26} {:>4} points  {}",
            summary.label, summary.points, span
        );
    }

    println!("All series loaded successfully.");
    Ok(())
}
