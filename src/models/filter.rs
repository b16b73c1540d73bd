use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SalesError};

// ---------------------------------------------------------------------------
// FilterParams — Date range plus optional category selection
// ---------------------------------------------------------------------------

/// Filter state of one dashboard interaction.
///
/// Both bounds are inclusive. An inverted range is accepted and matches
/// nothing. `categories` only affects the category view; `None` means every
/// category in the dataset, while `Some(vec![])` selects nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
}

impl FilterParams {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            categories: None,
        }
    }

    /// Parse both bounds from date-picker text.
    ///
    /// Accepts `YYYY-MM-DD` or an ISO date-time such as
    /// `2024-01-01T00:00:00`; only the date part is used.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self::new(parse_date(start)?, parse_date(end)?))
    }

    pub fn with_categories<S: AsRef<str>>(mut self, categories: &[S]) -> Self {
        self.categories = Some(categories.iter().map(|c| c.as_ref().to_string()).collect());
        self
    }
}

/// Parse the date part of an ISO date or date-time string.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    let date_part = trimmed
        .split(|c: char| c == 'T' || c == ' ')
        .next()
        .unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| SalesError::InvalidArgument(format!("invalid date '{}': {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_dates_and_datetimes() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(parse_date("2024-01-31").unwrap(), expected);
        assert_eq!(parse_date("2024-01-31T00:00:00").unwrap(), expected);
        assert_eq!(parse_date("2024-01-31 12:30:00.000").unwrap(), expected);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse_date("31/01/2024"),
            Err(SalesError::InvalidArgument(_))
        ));
        assert!(FilterParams::parse("2024-01-01", "").is_err());
    }

    #[test]
    fn inverted_range_is_accepted() {
        let p = FilterParams::parse("2024-02-01", "2024-01-01").unwrap();
        assert!(p.start_date > p.end_date);
        assert!(p.categories.is_none());
    }
}
