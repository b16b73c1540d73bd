use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SalesRecord — One row of the input dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub product: String,
    pub category: String,
    pub region: String,
    pub total_price: f64,
}

impl SalesRecord {
    pub fn new(
        date: NaiveDate,
        product: impl Into<String>,
        category: impl Into<String>,
        region: impl Into<String>,
        total_price: f64,
    ) -> Self {
        Self {
            date,
            product: product.into(),
            category: category.into(),
            region: region.into(),
            total_price,
        }
    }

    /// The `YYYY-MM` animation frame this record falls into.
    pub fn month(&self) -> String {
        month_of(self.date)
    }
}

/// Truncate a date to its sortable year-month token, e.g. `2024-03`.
pub fn month_of(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}
