// src/models.rs
use serde::{Deserialize, Serialize};

/// One observation: the calendar year and the value recorded for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub year: i32,
    pub value: f64,
}

/// An immutable year-ordered series for a single indicator.
/// Invariant: strictly increasing by year, one point per year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub points: Vec<SeriesPoint>,
}

impl TimeSeries {
    pub fn new(points: Vec<SeriesPoint>) -> Self {
        TimeSeries { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&SeriesPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }

    pub fn value_at(&self, year: i32) -> Option<f64> {
        self.points.iter().find(|p| p.year == year).map(|p| p.value)
    }

    pub fn years(&self) -> Vec<i32> {
        self.points.iter().map(|p| p.year).collect()
    }
}

/// Inclusive year window supplied per request. `new` enforces start <= end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Option<Self> {
        if start <= end {
            Some(YearRange { start, end })
        } else {
            None
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.start && year <= self.end
    }
}

/// Display transform applied to a filtered series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ViewMode {
    #[default]
    #[serde(rename = "actual")]
    Actual,
    #[serde(rename = "percent")]
    PercentChange,
    #[serde(rename = "adjusted")]
    InflationAdjusted,
}

impl ViewMode {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "actual" => Some(ViewMode::Actual),
            "percent" => Some(ViewMode::PercentChange),
            "adjusted" => Some(ViewMode::InflationAdjusted),
            _ => None,
        }
    }
}

/// Identifier for each of the six loaded series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesId {
    MinWage,
    Energy,
    Healthcare,
    Housing,
    Leisure,
    Income,
}

/// The four selectable expense categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpenseCategory {
    Energy,
    Healthcare,
    Housing,
    Leisure,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 4] = [
        ExpenseCategory::Energy,
        ExpenseCategory::Healthcare,
        ExpenseCategory::Housing,
        ExpenseCategory::Leisure,
    ];

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "energy" => Some(ExpenseCategory::Energy),
            "healthcare" => Some(ExpenseCategory::Healthcare),
            "housing" => Some(ExpenseCategory::Housing),
            "leisure" => Some(ExpenseCategory::Leisure),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ExpenseCategory::Energy => "energy",
            ExpenseCategory::Healthcare => "healthcare",
            ExpenseCategory::Housing => "housing",
            ExpenseCategory::Leisure => "leisure",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Energy => "Energy & Gas",
            ExpenseCategory::Healthcare => "Healthcare",
            ExpenseCategory::Housing => "Housing & Utilities",
            ExpenseCategory::Leisure => "Leisure Goods",
        }
    }

    pub fn series_id(&self) -> SeriesId {
        match self {
            ExpenseCategory::Energy => SeriesId::Energy,
            ExpenseCategory::Healthcare => SeriesId::Healthcare,
            ExpenseCategory::Housing => SeriesId::Housing,
            ExpenseCategory::Leisure => SeriesId::Leisure,
        }
    }
}

/// Qualitative banding of personal vs. median income. Boundaries are
/// half-open: exactly 50 is Below, exactly 80 is Near, exactly 120 is Above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeTier {
    SignificantlyBelow,
    Below,
    Near,
    Above,
}

impl IncomeTier {
    pub fn from_ratio_percent(ratio_percent: f64) -> Self {
        if ratio_percent < 50.0 {
            IncomeTier::SignificantlyBelow
        } else if ratio_percent < 80.0 {
            IncomeTier::Below
        } else if ratio_percent < 120.0 {
            IncomeTier::Near
        } else {
            IncomeTier::Above
        }
    }

    /// Short phrase used inline in the headline sentence.
    pub fn phrase(&self) -> &'static str {
        match self {
            IncomeTier::SignificantlyBelow => "significantly below",
            IncomeTier::Below => "below",
            IncomeTier::Near => "near",
            IncomeTier::Above => "above",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            IncomeTier::SignificantlyBelow => {
                "Your income is significantly below California's median, which may present affordability challenges in many parts of the state."
            }
            IncomeTier::Below => {
                "Your income is below California's median, which may limit housing options in higher-cost regions."
            }
            IncomeTier::Near => {
                "Your income is near California's median, providing moderate affordability in many areas."
            }
            IncomeTier::Above => {
                "Your income exceeds California's median, offering greater flexibility in most housing markets."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_range_rejects_inverted_bounds() {
        assert!(YearRange::new(2020, 2010).is_none());
        let r = YearRange::new(2010, 2020).unwrap();
        assert!(r.contains(2010));
        assert!(r.contains(2020));
        assert!(!r.contains(2021));
    }

    #[test]
    fn tier_boundaries_are_half_open() {
        assert_eq!(
            IncomeTier::from_ratio_percent(49.999),
            IncomeTier::SignificantlyBelow
        );
        assert_eq!(IncomeTier::from_ratio_percent(50.0), IncomeTier::Below);
        assert_eq!(IncomeTier::from_ratio_percent(80.0), IncomeTier::Near);
        assert_eq!(IncomeTier::from_ratio_percent(120.0), IncomeTier::Above);
    }

    #[test]
    fn view_mode_tokens_round_trip() {
        assert_eq!(ViewMode::from_token("actual"), Some(ViewMode::Actual));
        assert_eq!(ViewMode::from_token("percent"), Some(ViewMode::PercentChange));
        assert_eq!(
            ViewMode::from_token("adjusted"),
            Some(ViewMode::InflationAdjusted)
        );
        assert_eq!(ViewMode::from_token("bogus"), None);
    }
}
