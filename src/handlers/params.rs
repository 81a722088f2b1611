// src/handlers/params.rs
use serde::Deserialize;
use warp::Rejection;

use super::error::ApiError;
use crate::models::{ExpenseCategory, ViewMode, YearRange};

#[derive(Debug, Deserialize)]
pub struct RangeViewQuery {
    pub start_year: i32,
    pub end_year: i32,
    pub view: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExpensesQuery {
    pub start_year: i32,
    pub end_year: i32,
    pub view: Option<String>,
    pub categories: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AffordabilityQuery {
    pub income: f64,
    pub start_year: i32,
    pub end_year: i32,
}

/// Inverted ranges are rejected at the boundary, not clamped.
pub fn year_range(start: i32, end: i32) -> Result<YearRange, Rejection> {
    YearRange::new(start, end).ok_or_else(|| {
        warp::reject::custom(ApiError::invalid_input(format!(
            "start_year {} must not exceed end_year {}",
            start, end
        )))
    })
}

pub fn view_mode(raw: Option<&str>) -> Result<ViewMode, Rejection> {
    match raw {
        None => Ok(ViewMode::default()),
        Some(token) => ViewMode::from_token(token).ok_or_else(|| {
            warp::reject::custom(ApiError::invalid_input(format!(
                "unknown view mode {:?}; expected actual, percent, or adjusted",
                token
            )))
        }),
    }
}

/// Comma-separated category keys. Omitted means all four; selection always
/// comes back in canonical dashboard order regardless of query order.
pub fn expense_categories(raw: Option<&str>) -> Result<Vec<ExpenseCategory>, Rejection> {
    let raw = match raw {
        None => return Ok(ExpenseCategory::ALL.to_vec()),
        Some(raw) => raw,
    };

    let mut picked: Vec<ExpenseCategory> = Vec::new();
    for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match ExpenseCategory::from_key(token) {
            Some(category) => {
                if !picked.contains(&category) {
                    picked.push(category);
                }
            }
            None => {
                return Err(warp::reject::custom(ApiError::invalid_input(format!(
                    "unknown expense category {:?}",
                    token
                ))))
            }
        }
    }

    Ok(ExpenseCategory::ALL
        .iter()
        .copied()
        .filter(|c| picked.contains(c))
        .collect())
}

pub fn personal_income(raw: f64) -> Result<f64, Rejection> {
    if raw.is_finite() && raw >= 0.0 {
        Ok(raw)
    } else {
        Err(warp::reject::custom(ApiError::invalid_input(
            "income must be a non-negative number",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_default_to_all_in_canonical_order() {
        let all = expense_categories(None).unwrap();
        assert_eq!(all, ExpenseCategory::ALL.to_vec());
    }

    #[test]
    fn categories_are_canonically_ordered_and_deduped() {
        let picked = expense_categories(Some("housing,energy,housing")).unwrap();
        assert_eq!(
            picked,
            vec![ExpenseCategory::Energy, ExpenseCategory::Housing]
        );
    }

    #[test]
    fn empty_category_list_is_a_valid_empty_selection() {
        assert!(expense_categories(Some("")).unwrap().is_empty());
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!(expense_categories(Some("housing,avocados")).is_err());
    }

    #[test]
    fn negative_income_is_rejected() {
        assert!(personal_income(-1.0).is_err());
        assert!(personal_income(f64::NAN).is_err());
        assert!(personal_income(0.0).is_ok());
    }
}
