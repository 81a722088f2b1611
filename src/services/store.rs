// src/services/store.rs
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};
use csv::Reader;
use log::{debug, info};
use serde::Serialize;

use crate::models::{SeriesId, SeriesPoint, TimeSeries};

/// Static description of one source file: which series it feeds, the label
/// shown to users, and the named value column. The value column is explicit
/// per series; the loader never guesses columns at runtime.
pub struct SeriesSpec {
    pub id: SeriesId,
    pub label: &'static str,
    pub file_name: &'static str,
    pub value_column: &'static str,
}

pub const SERIES_SPECS: [SeriesSpec; 6] = [
    SeriesSpec {
        id: SeriesId::MinWage,
        label: "Minimum Wage",
        file_name: "CaliMinWage.csv",
        value_column: "STTMINWGCA",
    },
    SeriesSpec {
        id: SeriesId::Energy,
        label: "Energy & Gas",
        file_name: "energyGasPC.csv",
        value_column: "CAENERGYPC",
    },
    SeriesSpec {
        id: SeriesId::Healthcare,
        label: "Healthcare",
        file_name: "healthCarePC.csv",
        value_column: "CAHEALTHPC",
    },
    SeriesSpec {
        id: SeriesId::Housing,
        label: "Housing & Utilities",
        file_name: "housingUtliPC.csv",
        value_column: "CAHOUSINGPC",
    },
    SeriesSpec {
        id: SeriesId::Leisure,
        label: "Leisure Goods",
        file_name: "leisureGoodsPC.csv",
        value_column: "CALEISUREPC",
    },
    SeriesSpec {
        id: SeriesId::Income,
        label: "Median Household Income",
        file_name: "medianHouseIncomeCal.csv",
        value_column: "MEHOINUSCAA646N",
    },
];

pub fn spec_for(id: SeriesId) -> &'static SeriesSpec {
    SERIES_SPECS
        .iter()
        .find(|s| s.id == id)
        .expect("every SeriesId has a spec")
}

#[derive(Debug, Serialize)]
pub struct SeriesSummary {
    pub id: SeriesId,
    pub label: &'static str,
    pub points: usize,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

/// The six loaded series. Built once at startup, read-only afterwards, so
/// it can be shared across request handlers behind an `Arc` without locking.
pub struct SeriesStore {
    min_wage: TimeSeries,
    energy: TimeSeries,
    healthcare: TimeSeries,
    housing: TimeSeries,
    leisure: TimeSeries,
    income: TimeSeries,
}

impl SeriesStore {
    /// Load all six series from `data_dir`. Any missing file, unreadable
    /// header, or absent named column aborts the load: the dashboard cannot
    /// serve with partial data.
    pub fn load(data_dir: &Path) -> Result<Self> {
        fn load_one(data_dir: &Path, id: SeriesId) -> Result<TimeSeries> {
            let spec = spec_for(id);
            let path = data_dir.join(spec.file_name);
            let series = load_series_file(&path, spec.value_column)
                .with_context(|| format!("failed to load series file {}", path.display()))?;
            info!(
                "Loaded {}: {} points ({:?}..{:?})",
                spec.file_name,
                series.len(),
                series.first().map(|p| p.year),
                series.last().map(|p| p.year),
            );
            Ok(series)
        }

        Ok(SeriesStore {
            min_wage: load_one(data_dir, SeriesId::MinWage)?,
            energy: load_one(data_dir, SeriesId::Energy)?,
            healthcare: load_one(data_dir, SeriesId::Healthcare)?,
            housing: load_one(data_dir, SeriesId::Housing)?,
            leisure: load_one(data_dir, SeriesId::Leisure)?,
            income: load_one(data_dir, SeriesId::Income)?,
        })
    }

    pub fn get(&self, id: SeriesId) -> &TimeSeries {
        match id {
            SeriesId::MinWage => &self.min_wage,
            SeriesId::Energy => &self.energy,
            SeriesId::Healthcare => &self.healthcare,
            SeriesId::Housing => &self.housing,
            SeriesId::Leisure => &self.leisure,
            SeriesId::Income => &self.income,
        }
    }

    pub fn summaries(&self) -> Vec<SeriesSummary> {
        SERIES_SPECS
            .iter()
            .map(|spec| {
                let series = self.get(spec.id);
                SeriesSummary {
                    id: spec.id,
                    label: spec.label,
                    points: series.len(),
                    start_year: series.first().map(|p| p.year),
                    end_year: series.last().map(|p| p.year),
                }
            })
            .collect()
    }

    #[cfg(test)]
    pub fn from_parts(
        min_wage: TimeSeries,
        energy: TimeSeries,
        healthcare: TimeSeries,
        housing: TimeSeries,
        leisure: TimeSeries,
        income: TimeSeries,
    ) -> Self {
        SeriesStore {
            min_wage,
            energy,
            healthcare,
            housing,
            leisure,
            income,
        }
    }
}

fn load_series_file(path: &Path, value_column: &str) -> Result<TimeSeries> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let mut rdr = Reader::from_reader(file);

    let headers = rdr.headers().context("cannot read CSV header")?.clone();
    let idx_date = headers
        .iter()
        .position(|h| h.trim() == "observation_date")
        .with_context(|| "no 'observation_date' column".to_string())?;
    let idx_value = headers
        .iter()
        .position(|h| h.trim() == value_column)
        .with_context(|| format!("no '{}' column", value_column))?;

    // Duplicate years resolve last-wins; the map also yields ascending order.
    let mut by_year: BTreeMap<i32, f64> = BTreeMap::new();

    for (row_no, record) in rdr.records().enumerate() {
        let row = record.with_context(|| format!("bad CSV record at row {}", row_no + 2))?;

        let raw_date = row
            .get(idx_date)
            .map(str::trim)
            .unwrap_or_default();
        let year = match parse_observation_year(raw_date) {
            Some(y) => y,
            None => bail!("unparseable observation_date {:?} at row {}", raw_date, row_no + 2),
        };

        let raw_value = row.get(idx_value).map(str::trim).unwrap_or_default();
        // Missing observations ("" or ".") and non-numeric cells are skipped,
        // never zero-filled.
        if raw_value.is_empty() || raw_value == "." {
            debug!("skipping {} row {}: empty value", path.display(), row_no + 2);
            continue;
        }
        match raw_value.parse::<f64>() {
            Ok(v) if v.is_finite() => {
                by_year.insert(year, v);
            }
            _ => {
                debug!(
                    "skipping {} row {}: unparseable value {:?}",
                    path.display(),
                    row_no + 2,
                    raw_value
                );
            }
        }
    }

    let points = by_year
        .into_iter()
        .map(|(year, value)| SeriesPoint { year, value })
        .collect();
    Ok(TimeSeries::new(points))
}

/// Extract the calendar year from an observation date. FRED exports use
/// `%Y-%m-%d`; hand-maintained files sometimes carry `%m/%d/%Y`.
fn parse_observation_year(raw: &str) -> Option<i32> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%m/%d/%Y"))
        .ok()
        .map(|d| d.year())
}
